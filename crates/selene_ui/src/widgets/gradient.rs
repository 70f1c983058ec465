//! Multi-stop gradient fill.

use crate::element::{Element, ElementBase};
use crate::error::{UiError, UiResult};
use crate::layout::Axis;
use crate::render::PaintContext;
use selene_core::{Color, Rect};
use std::any::Any;

/// Upper bound on gradient strips per fill.
const MAX_BANDS: usize = 64;

/// A rectangle filled with a banded color gradient.
///
/// The gradient interpolates through an ordered list of stops spread
/// evenly along the axis, drawn as solid strips. Purely decorative: does
/// not block the pointer.
pub struct GradientPanel {
    base: ElementBase,
    stops: Vec<Color>,
    axis: Axis,
}

impl std::fmt::Debug for GradientPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientPanel")
            .field("stops", &self.stops)
            .field("axis", &self.axis)
            .finish_non_exhaustive()
    }
}

impl GradientPanel {
    /// Creates a gradient fill. Rejects an empty stop list.
    pub fn new(rect: Rect, stops: Vec<Color>, axis: Axis) -> UiResult<Self> {
        if stops.is_empty() {
            return Err(UiError::Configuration(
                "gradient needs at least one color stop".to_owned(),
            ));
        }
        let mut base = ElementBase::new(rect);
        base.hit_blocking = false;
        Ok(Self { base, stops, axis })
    }

    /// The color stops, in order.
    #[must_use]
    pub fn stops(&self) -> &[Color] {
        &self.stops
    }

    /// Color at fraction `t` in `[0, 1]` along the gradient.
    #[must_use]
    pub fn sample(&self, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        if self.stops.len() == 1 {
            return self.stops[0];
        }
        let span = (self.stops.len() - 1) as f32;
        let scaled = t * span;
        let index = (scaled.floor() as usize).min(self.stops.len() - 2);
        let frac = scaled - index as f32;
        self.stops[index].lerp(self.stops[index + 1], frac)
    }
}

impl Element for GradientPanel {
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

    fn render(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.visible {
            return;
        }
        let origin = self.base.resolved_origin(ctx.origin);
        let size = self.base.size();

        let extent = match self.axis {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        };
        let bands = (extent.max(1.0) as usize).min(MAX_BANDS).max(1);
        let band_extent = extent / bands as f32;

        for i in 0..bands {
            // Sample at the band center so single-band fills hit the middle
            // of the ramp instead of an endpoint.
            let t = (i as f32 + 0.5) / bands as f32;
            let color = self.sample(t);
            let strip = match self.axis {
                Axis::Horizontal => Rect::new(
                    origin.x + i as f32 * band_extent,
                    origin.y,
                    band_extent,
                    size.height,
                ),
                Axis::Vertical => Rect::new(
                    origin.x,
                    origin.y + i as f32 * band_extent,
                    size.width,
                    band_extent,
                ),
            };
            ctx.renderer.draw_rect(strip, color);
        }

        self.base.render_children(ctx, origin);
    }
}
