//! Per-frame painting of the code input.
//!
//! Rendering is split in two steps:
//!
//! 1. [`paint_plan`] turns the current widget state into one [`CellPaint`] per
//!    cell: geometry, border emphasis, digit, and caret line. It is a pure
//!    function, so two passes over the same state yield the same plan.
//! 2. [`draw_plan`] draws that plan onto any `DrawTarget<Color = Rgb565>`.
//!
//! Nothing is cached between frames. Every invalidation repaints all cells from
//! scratch, which keeps the output a function of state alone.
//!
//! # Border Emphasis
//!
//! | Focused | Cell index vs. length | Border |
//! |---------|-----------------------|--------|
//! | no      | any                   | Normal |
//! | yes     | `index <= len`        | Emphasized (filled cells + active cell) |
//! | yes     | `index > len`         | Normal |
//!
//! # Digit Centering
//!
//! Digits are centered on the bounding box of the pixels the glyph actually
//! lights (its ink), not on the font's character cell or baseline, so narrow and
//! wide glyphs sit in the same visual spot. The ink box is found by drawing the
//! glyph once into an [`InkBounds`] target.

use core::convert::Infallible;

use embedded_graphics::{
    mono_font::MonoTextStyle,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle, RoundedRectangle},
    text::{Baseline, Text, renderer::TextRenderer},
};

use crate::{
    code::CodeBuffer,
    config::{CELL_COUNT, WidgetConfig},
    layout::{CellGeometry, Viewport, clamp_coord, layout_cells},
    styles::{DIGIT_FONT, TOP_LEFT},
};

// =============================================================================
// Paint Plan
// =============================================================================

/// Border style of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Border {
    Normal,
    Emphasized,
}

impl Border {
    /// Choose the border for cell `index`.
    #[inline]
    pub const fn for_cell(focused: bool, len: usize, index: usize) -> Self {
        if focused && index <= len { Self::Emphasized } else { Self::Normal }
    }

    /// Stroke style for this border under `config`.
    pub const fn stroke(self, config: &WidgetConfig) -> PrimitiveStyle<Rgb565> {
        match self {
            Self::Normal => PrimitiveStyle::with_stroke(config.border_color, config.normal_border_width),
            Self::Emphasized => PrimitiveStyle::with_stroke(config.selected_border_color, config.selected_border_width),
        }
    }
}

/// State the renderer reads for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameState<'a> {
    pub code: &'a CodeBuffer,
    pub focused: bool,
    /// Blink phase. Ignored unless focused and the caret is enabled.
    pub caret_visible: bool,
}

/// Everything needed to paint one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPaint {
    pub geometry: CellGeometry,
    pub border: Border,
    pub digit: Option<char>,
    /// Vertical caret segment, present only in the caret cell during the visible phase.
    pub caret: Option<Line>,
}

/// Vertical caret line for a cell: fixed height, left-padded, vertically centered.
pub fn caret_line(config: &WidgetConfig, geometry: &CellGeometry) -> Line {
    let x = i64::from(geometry.rect.top_left.x) + i64::from(config.cursor_left_padding);
    let top = i64::from(geometry.center.y) - i64::from(config.cursor_height / 2);
    let bottom = top + i64::from(config.cursor_height);
    Line::new(
        Point::new(clamp_coord(x), clamp_coord(top)),
        Point::new(clamp_coord(x), clamp_coord(bottom)),
    )
}

/// Build the paint plan for the current frame.
pub fn paint_plan(config: &WidgetConfig, viewport: Viewport, state: FrameState<'_>) -> [CellPaint; CELL_COUNT] {
    let len = state.code.len();
    let show_caret = state.caret_visible && state.focused && config.cursor_visible;
    let cells = layout_cells(config, viewport);

    core::array::from_fn(|index| {
        let geometry = cells[index];
        CellPaint {
            geometry,
            border: Border::for_cell(state.focused, len, index),
            digit: state.code.digit(index),
            caret: (show_caret && index == len).then(|| caret_line(config, &geometry)),
        }
    })
}

// =============================================================================
// Drawing
// =============================================================================

/// Draw a paint plan. Draw errors are ignored; the next invalidation repaints.
pub fn draw_plan<D>(display: &mut D, config: &WidgetConfig, plan: &[CellPaint])
where
    D: DrawTarget<Color = Rgb565>,
{
    let text_style = MonoTextStyle::new(DIGIT_FONT, config.text_color);
    let corner = Size::new(config.corner_radius, config.corner_radius);

    for cell in plan {
        let stroke = cell.border.stroke(config);

        RoundedRectangle::with_equal_corners(cell.geometry.rect, corner)
            .into_styled(stroke)
            .draw(display)
            .ok();

        if let Some(digit) = cell.digit {
            draw_digit_centered(display, digit, cell.geometry.center, text_style);
        }

        if let Some(caret) = cell.caret {
            caret.into_styled(stroke).draw(display).ok();
        }
    }
}

/// Paint the widget for the current state in one call.
pub fn draw_code_input<D>(display: &mut D, config: &WidgetConfig, viewport: Viewport, state: FrameState<'_>)
where
    D: DrawTarget<Color = Rgb565>,
{
    let plan = paint_plan(config, viewport, state);
    draw_plan(display, config, &plan);
}

/// Draw a single glyph whose bounding box is centered on `center`.
fn draw_digit_centered<D>(display: &mut D, digit: char, center: Point, style: MonoTextStyle<'_, Rgb565>)
where
    D: DrawTarget<Color = Rgb565>,
{
    let mut buf = [0u8; 4];
    let text = digit.encode_utf8(&mut buf);

    let position = glyph_origin(text, center, &style);
    Text::with_text_style(text, position, style, TOP_LEFT)
        .draw(display)
        .ok();
}

/// Top-left anchor that centers the ink box of `text` on `center`.
///
/// Text without ink (a space) falls back to the font's character cell.
fn glyph_origin(text: &str, center: Point, style: &MonoTextStyle<'_, Rgb565>) -> Point {
    let mut ink = InkBounds::default();
    Text::with_text_style(text, Point::zero(), *style, TOP_LEFT)
        .draw(&mut ink)
        .ok();
    let bounds = ink
        .ink_box()
        .unwrap_or_else(|| style.measure_string(text, Point::zero(), Baseline::Top).bounding_box);

    let half = Point::new((bounds.size.width / 2) as i32, (bounds.size.height / 2) as i32);
    center - half - bounds.top_left
}

// =============================================================================
// Ink Measurement
// =============================================================================

/// Draw target that keeps no pixels, only the smallest rectangle covering them.
#[derive(Clone, Copy, Debug, Default)]
pub struct InkBounds {
    corners: Option<(Point, Point)>,
}

impl InkBounds {
    /// Box around every pixel drawn so far, or `None` if nothing was drawn.
    pub fn ink_box(&self) -> Option<Rectangle> {
        self.corners.map(|(min, max)| Rectangle::with_corners(min, max))
    }
}

impl OriginDimensions for InkBounds {
    fn size(&self) -> Size { Size::new(u32::MAX, u32::MAX) }
}

impl DrawTarget for InkBounds {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, _) in pixels {
            self.corners = Some(match self.corners {
                Some((min, max)) => (min.component_min(point), max.component_max(point)),
                None => (point, point),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
