//! Layout strategies applied to an element's direct children.
//!
//! A strategy rewrites child local positions (and, for grids, sizes) from
//! the parent's content size. It runs whenever the parent's size, child
//! set or strategy changes; there is no constraint solving and no second
//! pass. Children keep their anchors, so a strategy positions each
//! child's local point and the anchor shifts the drawn box as usual.

use crate::element::Element;
use crate::error::{UiError, UiResult};
use selene_core::{Size, Vec2};

/// Stacking direction for linear and justified layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Top to bottom.
    Vertical,
    /// Left to right.
    Horizontal,
}

/// Validated grid parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    cols: usize,
    cell: Size,
    h_spacing: f32,
    v_spacing: f32,
}

impl GridParams {
    /// Creates grid parameters.
    ///
    /// Rejects a zero column count and non-positive cell dimensions.
    pub fn new(cols: usize, cell: Size, h_spacing: f32, v_spacing: f32) -> UiResult<Self> {
        if cols == 0 {
            return Err(UiError::Configuration(
                "grid layout needs at least one column".to_owned(),
            ));
        }
        if cell.width <= 0.0 || cell.height <= 0.0 {
            return Err(UiError::Configuration(format!(
                "grid cell must have positive dimensions, got {}x{}",
                cell.width, cell.height
            )));
        }
        Ok(Self {
            cols,
            cell,
            h_spacing,
            v_spacing,
        })
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell size imposed on every child.
    #[must_use]
    pub fn cell(&self) -> Size {
        self.cell
    }
}

/// How a parent arranges its direct children.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutStrategy {
    /// Stack children one after another along `axis`, separated by
    /// `spacing`, all at `cross_offset` on the other axis. Child sizes
    /// are untouched.
    Linear {
        /// Stacking direction.
        axis: Axis,
        /// Gap between consecutive children.
        spacing: f32,
        /// Position on the non-stacking axis.
        cross_offset: f32,
    },
    /// Row-major grid of uniform cells. Children are resized to the cell.
    Grid(GridParams),
    /// Spread children across the full extent of `axis`: first child
    /// flush with the start, last flush with the end, leftover space
    /// split evenly between neighbors. A single child is centered.
    /// Child sizes are untouched.
    Justified {
        /// Spreading direction.
        axis: Axis,
    },
}

impl LayoutStrategy {
    /// Repositions `children` inside a parent content area of `area`.
    pub fn apply(&self, area: Size, children: &mut [Box<dyn Element>]) {
        match self {
            Self::Linear {
                axis,
                spacing,
                cross_offset,
            } => apply_linear(*axis, *spacing, *cross_offset, children),
            Self::Grid(params) => apply_grid(params, children),
            Self::Justified { axis } => apply_justified(*axis, area, children),
        }
    }
}

fn axis_extent(axis: Axis, size: Size) -> f32 {
    match axis {
        Axis::Vertical => size.height,
        Axis::Horizontal => size.width,
    }
}

fn axis_position(axis: Axis, main: f32, cross: f32) -> Vec2 {
    match axis {
        Axis::Vertical => Vec2::new(cross, main),
        Axis::Horizontal => Vec2::new(main, cross),
    }
}

fn apply_linear(axis: Axis, spacing: f32, cross_offset: f32, children: &mut [Box<dyn Element>]) {
    let mut cursor = 0.0;
    for child in children {
        let extent = axis_extent(axis, child.base().size());
        child
            .base_mut()
            .set_position(axis_position(axis, cursor, cross_offset));
        cursor += extent + spacing;
    }
}

fn apply_grid(params: &GridParams, children: &mut [Box<dyn Element>]) {
    for (i, child) in children.iter_mut().enumerate() {
        let col = i % params.cols;
        let row = i / params.cols;
        let x = col as f32 * (params.cell.width + params.h_spacing);
        let y = row as f32 * (params.cell.height + params.v_spacing);
        let base = child.base_mut();
        base.set_position(Vec2::new(x, y));
        base.set_size(params.cell);
    }
}

fn apply_justified(axis: Axis, area: Size, children: &mut [Box<dyn Element>]) {
    let total = axis_extent(axis, area);

    if children.len() == 1 {
        let child = &mut children[0];
        let extent = axis_extent(axis, child.base().size());
        let cross = match axis {
            Axis::Vertical => child.base().position().x,
            Axis::Horizontal => child.base().position().y,
        };
        child
            .base_mut()
            .set_position(axis_position(axis, (total - extent) / 2.0, cross));
        return;
    }

    let occupied: f32 = children
        .iter()
        .map(|c| axis_extent(axis, c.base().size()))
        .sum();
    let gaps = children.len().saturating_sub(1);
    if gaps == 0 {
        return;
    }
    let gap = (total - occupied) / gaps as f32;

    let mut cursor = 0.0;
    for child in children {
        let extent = axis_extent(axis, child.base().size());
        let cross = match axis {
            Axis::Vertical => child.base().position().x,
            Axis::Horizontal => child.base().position().y,
        };
        child
            .base_mut()
            .set_position(axis_position(axis, cursor, cross));
        cursor += extent + gap;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementBase;
    use selene_core::Rect;
    use std::any::Any;

    struct Block {
        base: ElementBase,
    }

    impl Block {
        fn boxed(w: f32, h: f32) -> Box<dyn Element> {
            Box::new(Self {
                base: ElementBase::new(Rect::new(0.0, 0.0, w, h)),
            })
        }
    }

    impl Element for Block {
        fn base(&self) -> &ElementBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut ElementBase {
            &mut self.base
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn linear_vertical_stacks_with_spacing() {
        let mut children = vec![Block::boxed(50.0, 20.0), Block::boxed(50.0, 30.0)];
        let layout = LayoutStrategy::Linear {
            axis: Axis::Vertical,
            spacing: 5.0,
            cross_offset: 10.0,
        };
        layout.apply(Size::new(100.0, 200.0), &mut children);

        assert_eq!(children[0].base().position(), Vec2::new(10.0, 0.0));
        assert_eq!(children[1].base().position(), Vec2::new(10.0, 25.0));
    }

    #[test]
    fn grid_wraps_and_resizes() {
        let mut children = vec![
            Block::boxed(1.0, 1.0),
            Block::boxed(1.0, 1.0),
            Block::boxed(1.0, 1.0),
        ];
        let params = GridParams::new(2, Size::new(40.0, 20.0), 4.0, 6.0).unwrap();
        LayoutStrategy::Grid(params).apply(Size::new(100.0, 100.0), &mut children);

        assert_eq!(children[0].base().position(), Vec2::new(0.0, 0.0));
        assert_eq!(children[1].base().position(), Vec2::new(44.0, 0.0));
        assert_eq!(children[2].base().position(), Vec2::new(0.0, 26.0));
        assert_eq!(children[2].base().size(), Size::new(40.0, 20.0));
    }

    #[test]
    fn grid_rejects_degenerate_parameters() {
        assert!(GridParams::new(0, Size::new(10.0, 10.0), 0.0, 0.0).is_err());
        assert!(GridParams::new(2, Size::new(0.0, 10.0), 0.0, 0.0).is_err());
    }

    #[test]
    fn justified_pins_ends_and_splits_leftover() {
        let mut children = vec![
            Block::boxed(50.0, 10.0),
            Block::boxed(50.0, 10.0),
            Block::boxed(50.0, 10.0),
        ];
        LayoutStrategy::Justified {
            axis: Axis::Horizontal,
        }
        .apply(Size::new(300.0, 50.0), &mut children);

        // 150 of 300 occupied: two interior gaps of 75 each.
        assert_eq!(children[0].base().position().x, 0.0);
        assert_eq!(children[1].base().position().x, 125.0);
        assert_eq!(children[2].base().position().x, 250.0);
        // Last child ends flush with the container.
        assert_eq!(
            children[2].base().position().x + children[2].base().size().width,
            300.0
        );
    }

    #[test]
    fn justified_single_child_is_centered() {
        let mut children = vec![Block::boxed(100.0, 10.0)];
        LayoutStrategy::Justified {
            axis: Axis::Horizontal,
        }
        .apply(Size::new(300.0, 50.0), &mut children);

        assert_eq!(children[0].base().position().x, 100.0);
    }

    #[test]
    fn empty_child_set_is_a_noop() {
        let mut children: Vec<Box<dyn Element>> = Vec::new();
        LayoutStrategy::Justified {
            axis: Axis::Vertical,
        }
        .apply(Size::new(100.0, 100.0), &mut children);
        assert!(children.is_empty());
    }
}
