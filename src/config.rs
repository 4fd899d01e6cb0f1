//! Widget configuration.
//!
//! [`WidgetConfig`] holds every visual parameter of the code input. It is built
//! once, either from [`Default`] (the theme fallback) or from a TOML style file
//! whose keys use the camelCase option names hosts already know:
//!
//! ```toml
//! spaceBetweenItems = 12
//! itemWidth = 44
//! selectedBorderColor = "#FF9800"
//! ```
//!
//! Any option left out of the file falls back to the theme value, so an empty
//! file is a valid configuration. Dimensions are unsigned pixels and a style
//! file may not set one above [`MAX_DIMENSION`].

use std::fs;
use std::path::Path;
use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::colors::{BORDER_GRAY, SELECTED_BLUE, WHITE, parse_hex_color};
use crate::error::ConfigError;

// =============================================================================
// Fixed Widget Constants
// =============================================================================

/// Number of digit cells. The entered code never grows past this.
pub const CELL_COUNT: usize = 4;

/// Default horizontal distance between a cell's left edge and the caret, in pixels.
pub const CURSOR_LEFT_PADDING: u32 = 5;

/// Default caret blink half-period in milliseconds (visible 500ms, hidden 500ms).
pub const CURSOR_BLINK_MS: u64 = 500;

/// Largest dimension a style file may set, in pixels.
pub const MAX_DIMENSION: u32 = i16::MAX as u32;

// =============================================================================
// Theme Defaults
// =============================================================================

const DEFAULT_SPACE_BETWEEN_ITEMS: u32 = 8;
const DEFAULT_NORMAL_BORDER_WIDTH: u32 = 1;
const DEFAULT_SELECTED_BORDER_WIDTH: u32 = 2;
const DEFAULT_ITEM_WIDTH: u32 = 40;
const DEFAULT_ITEM_HEIGHT: u32 = 48;
const DEFAULT_CURSOR_HEIGHT: u32 = 24;
const DEFAULT_CORNER_RADIUS: u32 = 4;

// =============================================================================
// Configuration Types
// =============================================================================

/// Inner spacing between the widget bounds and its content, in pixels.
///
/// Only measurement uses it; cells are always centered in the full bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// Visual parameters of a code input widget.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WidgetConfig {
    /// Horizontal gap between adjacent cells.
    pub space_between_items: u32,
    /// Border stroke width of cells drawn in the normal style.
    pub normal_border_width: u32,
    /// Border stroke width of emphasized cells.
    pub selected_border_width: u32,
    pub item_width: u32,
    pub item_height: u32,
    /// Whether the caret is drawn (and blinks) at all.
    pub cursor_visible: bool,
    pub cursor_height: u32,
    pub cursor_left_padding: u32,
    /// Shared corner radius of every cell border.
    pub corner_radius: u32,
    #[serde(deserialize_with = "deserialize_color")]
    pub border_color: Rgb565,
    #[serde(deserialize_with = "deserialize_color")]
    pub selected_border_color: Rgb565,
    #[serde(deserialize_with = "deserialize_color")]
    pub text_color: Rgb565,
    /// Caret toggle interval in milliseconds.
    pub blink_interval_ms: u64,
    pub padding: Padding,
}

impl WidgetConfig {
    /// Parse a configuration from TOML text. Missing options use theme defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML style file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded widget style");
        Ok(config)
    }

    /// Check every dimension against [`MAX_DIMENSION`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("spaceBetweenItems", self.space_between_items),
            ("normalBorderWidth", self.normal_border_width),
            ("selectedBorderWidth", self.selected_border_width),
            ("itemWidth", self.item_width),
            ("itemHeight", self.item_height),
            ("cursorHeight", self.cursor_height),
            ("cursorLeftPadding", self.cursor_left_padding),
            ("cornerRadius", self.corner_radius),
            ("padding.left", self.padding.left),
            ("padding.top", self.padding.top),
            ("padding.right", self.padding.right),
            ("padding.bottom", self.padding.bottom),
        ];
        match dimensions.into_iter().find(|&(_, value)| value > MAX_DIMENSION) {
            Some((option, value)) => Err(ConfigError::OutOfRange { option, value, max: MAX_DIMENSION }),
            None => Ok(()),
        }
    }

    /// Caret toggle interval as a `Duration`.
    #[inline]
    pub const fn blink_interval(&self) -> Duration { Duration::from_millis(self.blink_interval_ms) }

    /// Combined width of all cells and the gaps between them. Saturates at `u32::MAX`.
    #[inline]
    pub const fn cells_width(&self) -> u32 {
        let cells = (CELL_COUNT as u32).saturating_mul(self.item_width);
        let gaps = (CELL_COUNT as u32 - 1).saturating_mul(self.space_between_items);
        cells.saturating_add(gaps)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            space_between_items: DEFAULT_SPACE_BETWEEN_ITEMS,
            normal_border_width: DEFAULT_NORMAL_BORDER_WIDTH,
            selected_border_width: DEFAULT_SELECTED_BORDER_WIDTH,
            item_width: DEFAULT_ITEM_WIDTH,
            item_height: DEFAULT_ITEM_HEIGHT,
            cursor_visible: true,
            cursor_height: DEFAULT_CURSOR_HEIGHT,
            cursor_left_padding: CURSOR_LEFT_PADDING,
            corner_radius: DEFAULT_CORNER_RADIUS,
            border_color: BORDER_GRAY,
            selected_border_color: SELECTED_BLUE,
            text_color: WHITE,
            blink_interval_ms: CURSOR_BLINK_MS,
            padding: Padding::default(),
        }
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Rgb565, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_hex_color(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid color '{raw}', expected #RRGGBB")))
}

// =============================================================================
// Unit Tests
// =============================================================================
