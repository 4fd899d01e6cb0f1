//! Theme colors for the code input widget.
//!
//! These are the fallback colors used when a style file leaves a color option
//! unset. All values are `Rgb565`, the native format of the ST7789 panels the
//! widget is usually drawn on, so no conversion happens at draw time.

use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure black. Default display background.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white. Default digit color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

// =============================================================================
// Theme Colors
// =============================================================================

/// Grey 500 (#9E9E9E). Border of empty cells and of every cell while unfocused.
pub const BORDER_GRAY: Rgb565 = Rgb565::new(19, 39, 19);

/// Blue 500 (#2196F3). Border of filled cells and the active cell while focused.
pub const SELECTED_BLUE: Rgb565 = Rgb565::new(4, 37, 30);

/// Parse a `#RRGGBB` color string into `Rgb565`.
///
/// The leading `#` is optional. Returns `None` for anything that is not exactly
/// six hex digits.
pub fn parse_hex_color(value: &str) -> Option<Rgb565> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    let color = Rgb888::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8);
    Some(Rgb565::from(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color_matches_theme_constants() {
        assert_eq!(parse_hex_color("#9E9E9E"), Some(BORDER_GRAY), "#9E9E9E should be BORDER_GRAY");
        assert_eq!(parse_hex_color("#2196F3"), Some(SELECTED_BLUE), "#2196F3 should be SELECTED_BLUE");
        assert_eq!(parse_hex_color("FFFFFF"), Some(WHITE), "Leading # is optional");
        assert_eq!(parse_hex_color("#000000"), Some(BLACK));
    }

    #[test]
    fn test_parse_hex_color_rejects_malformed() {
        assert_eq!(parse_hex_color(""), None);
        assert_eq!(parse_hex_color("#FFF"), None, "Short form is not supported");
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#FFFFFFFF"), None, "Alpha channel is not supported");
    }
}
