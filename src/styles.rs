//! Pre-computed text styles for the digit glyphs.
//!
//! The digit font is fixed per build; only the color is configurable, so the
//! renderer builds `MonoTextStyle::new(DIGIT_FONT, color)` once per frame and
//! reuses it for every cell.

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::Rgb565,
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::PROFONT_24_POINT;

use crate::colors::WHITE;

/// Digit font (`ProFont` 24pt).
pub const DIGIT_FONT: &MonoFont = &PROFONT_24_POINT;

/// Default digit style: theme text color on the digit font.
pub const DIGIT_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_24_POINT, WHITE);

/// Top-left anchored text. Glyphs are positioned from their measured bounding box,
/// so the renderer anchors at the top-left corner and does the centering itself.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Centered text alignment. Used for the demo status line.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

/// Small white text (6x10 pixels) for status labels.
pub const LABEL_STYLE_WHITE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);
