//! Cell layout and size negotiation.
//!
//! The cells form one horizontal row of [`CELL_COUNT`] equal boxes, centered as
//! a group inside the widget bounds:
//!
//! ```text
//! |<-offset->|[ 0 ]<-space->[ 1 ]<-space->[ 2 ]<-space->[ 3 ]|<-offset->|
//! ```
//!
//! Geometry is derived again on every draw pass and never cached; the whole
//! computation is a handful of integer operations per cell.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::{CELL_COUNT, WidgetConfig};

// =============================================================================
// Geometry Types
// =============================================================================

/// Widget bounds as seen by the layout: visible size plus scroll offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub size: Size,
    pub scroll: Point,
}

impl Viewport {
    /// Viewport of the given size with no scroll offset.
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            scroll: Point::zero(),
        }
    }
}

/// Bounding box and center point of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellGeometry {
    pub rect: Rectangle,
    pub center: Point,
}

/// Compute the geometry of cell `index`.
///
/// Offsets that come out odd are truncated toward zero, so a group one pixel
/// narrower than the bounds sits flush left rather than half a pixel right.
/// Positions past the `i32` range are clamped to it.
pub fn cell_geometry(config: &WidgetConfig, viewport: Viewport, index: usize) -> CellGeometry {
    let horizontal_indent = (i64::from(viewport.size.width) - i64::from(config.cells_width())) / 2
        + i64::from(viewport.scroll.x);
    let vertical_indent = (i64::from(viewport.size.height) - i64::from(config.item_height)) / 2
        + i64::from(viewport.scroll.y);

    let step = i64::from(config.space_between_items) + i64::from(config.item_width);
    let left = horizontal_indent + index as i64 * step;

    let rect = Rectangle::new(
        Point::new(clamp_coord(left), clamp_coord(vertical_indent)),
        Size::new(config.item_width, config.item_height),
    );
    let center = Point::new(
        clamp_coord(left + i64::from(config.item_width / 2)),
        clamp_coord(vertical_indent + i64::from(config.item_height / 2)),
    );

    CellGeometry { rect, center }
}

/// Narrow a wide coordinate to `i32`, saturating at either end.
pub(crate) const fn clamp_coord(value: i64) -> i32 {
    if value > i32::MAX as i64 {
        i32::MAX
    } else if value < i32::MIN as i64 {
        i32::MIN
    } else {
        value as i32
    }
}

/// Compute the geometry of every cell, left to right.
pub fn layout_cells(config: &WidgetConfig, viewport: Viewport) -> [CellGeometry; CELL_COUNT] {
    core::array::from_fn(|index| cell_geometry(config, viewport, index))
}

// =============================================================================
// Measurement
// =============================================================================

/// Size constraint handed down by the host layout for one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The widget gets exactly this many pixels.
    Exactly(u32),
    /// The widget may use up to this many pixels.
    AtMost(u32),
    /// No constraint; the widget reports what it wants.
    Unspecified,
}

impl MeasureSpec {
    /// Resolve the final size for a desired size under this constraint.
    #[inline]
    pub const fn resolve(self, desired: u32) -> u32 {
        match self {
            Self::Exactly(size) => size,
            Self::AtMost(size) => if desired < size { desired } else { size },
            Self::Unspecified => desired,
        }
    }
}

/// Size the widget would like: all cells, the gaps, padding, and room for the
/// emphasized border stroke.
pub const fn desired_size(config: &WidgetConfig) -> Size {
    let border = config.selected_border_width;
    let width = config
        .cells_width()
        .saturating_add(border)
        .saturating_add(config.padding.left)
        .saturating_add(config.padding.right);
    let height = config
        .item_height
        .saturating_add(config.padding.top)
        .saturating_add(config.padding.bottom)
        .saturating_add(border);
    Size::new(width, height)
}

/// Negotiate the widget size against the host's constraints.
pub const fn measure(config: &WidgetConfig, width: MeasureSpec, height: MeasureSpec) -> Size {
    let desired = desired_size(config);
    Size::new(width.resolve(desired.width), height.resolve(desired.height))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WidgetConfig {
        WidgetConfig {
            item_width: 40,
            item_height: 48,
            space_between_items: 8,
            ..WidgetConfig::default()
        }
    }

    // -------------------------------------------------------------------------
    // Cell Geometry Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_cells_centered_as_group() {
        // Group width = 4 * 40 + 3 * 8 = 184, bounds 284 wide -> 50px each side
        let cells = layout_cells(&config(), Viewport::new(Size::new(284, 100)));

        assert_eq!(cells[0].rect.top_left, Point::new(50, 26), "First cell should start after centering offset");
        let last = cells[CELL_COUNT - 1].rect;
        assert_eq!(last.top_left.x + last.size.width as i32, 234, "Last cell should end 50px before right edge");
    }

    #[test]
    fn test_cells_equal_size_and_spacing() {
        let cells = layout_cells(&config(), Viewport::new(Size::new(300, 60)));

        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.rect.size, Size::new(40, 48), "Cell {i} should have configured size");
            assert_eq!(cell.rect.top_left.y, 6, "Cell {i} should be vertically centered");
        }
        for pair in cells.windows(2) {
            assert_eq!(pair[1].rect.top_left.x - pair[0].rect.top_left.x, 48, "Step should be width + spacing");
        }
    }

    #[test]
    fn test_center_point() {
        let cell = cell_geometry(&config(), Viewport::new(Size::new(184, 48)), 1);
        assert_eq!(cell.rect.top_left, Point::new(48, 0));
        assert_eq!(cell.center, Point::new(68, 24));
    }

    #[test]
    fn test_scroll_offset_shifts_cells() {
        let still = cell_geometry(&config(), Viewport::new(Size::new(284, 100)), 2);
        let scrolled = cell_geometry(
            &config(),
            Viewport {
                size: Size::new(284, 100),
                scroll: Point::new(7, -3),
            },
            2,
        );
        assert_eq!(scrolled.rect.top_left, still.rect.top_left + Point::new(7, -3));
        assert_eq!(scrolled.center, still.center + Point::new(7, -3));
    }

    #[test]
    fn test_zero_bounds_yield_overhanging_cells() {
        // Degenerate bounds are not an error: the group is centered on the origin
        let cells = layout_cells(&config(), Viewport::new(Size::zero()));
        assert_eq!(cells[0].rect.top_left, Point::new(-92, -24));
        assert_eq!(cells[0].rect.size, Size::new(40, 48));
    }

    #[test]
    fn test_oversized_cells_clamp_instead_of_overflowing() {
        let config = WidgetConfig {
            item_width: 1_500_000_000,
            item_height: u32::MAX,
            ..config()
        };
        let cells = layout_cells(&config, Viewport::new(Size::new(320, 240)));

        // Saturated group width: (320 - u32::MAX) / 2
        assert_eq!(cells[0].rect.top_left.x, -2_147_483_487, "First cell computed without wrapping");
        assert_eq!(cells[3].rect.top_left.x, i32::MAX, "Far-right offset clamps to i32::MAX");
        assert_eq!(cells[1].rect.size, Size::new(1_500_000_000, u32::MAX));
    }

    #[test]
    fn test_layout_is_deterministic() {
        let viewport = Viewport::new(Size::new(320, 80));
        assert_eq!(layout_cells(&config(), viewport), layout_cells(&config(), viewport));
    }

    // -------------------------------------------------------------------------
    // Measurement Tests
    // -------------------------------------------------------------------------

    #[test]
    fn test_desired_size_includes_border_and_padding() {
        let config = WidgetConfig {
            selected_border_width: 2,
            padding: crate::config::Padding {
                left: 4,
                top: 1,
                right: 6,
                bottom: 3,
            },
            ..config()
        };
        assert_eq!(desired_size(&config), Size::new(184 + 2 + 10, 48 + 4 + 2));
    }

    #[test]
    fn test_measure_spec_modes() {
        assert_eq!(MeasureSpec::Exactly(300).resolve(186), 300, "Exactly ignores desired size");
        assert_eq!(MeasureSpec::AtMost(300).resolve(186), 186, "AtMost keeps smaller desired size");
        assert_eq!(MeasureSpec::AtMost(100).resolve(186), 100, "AtMost caps larger desired size");
        assert_eq!(MeasureSpec::Unspecified.resolve(186), 186);
    }

    #[test]
    fn test_desired_size_saturates() {
        let config = WidgetConfig {
            item_width: 1_500_000_000,
            ..config()
        };
        let size = measure(&config, MeasureSpec::Unspecified, MeasureSpec::Unspecified);
        assert_eq!(size.width, u32::MAX, "Oversized width should saturate");
        assert_eq!(size.height, 48 + 2);
    }

    #[test]
    fn test_measure_per_axis() {
        let size = measure(&config(), MeasureSpec::Unspecified, MeasureSpec::Exactly(90));
        assert_eq!(size, Size::new(186, 90));
    }
}
