//! Progress bar.

use crate::element::{Element, ElementBase};
use crate::render::PaintContext;
use crate::text::{self, FontSpec};
use selene_core::{Rect, Vec2};
use std::any::Any;

/// A horizontal fill bar with a centered percentage readout.
pub struct ProgressBar {
    base: ElementBase,
    /// Completed fraction in `[0, 1]`; writes are clamped.
    value: f32,
    /// Whether to draw the percentage text.
    pub show_text: bool,
    font: FontSpec,
}

impl ProgressBar {
    /// Creates an empty progress bar.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        let mut base = ElementBase::new(rect);
        base.hit_blocking = false;
        Self {
            base,
            value: 0.0,
            show_text: true,
            font: FontSpec::sized(14),
        }
    }

    /// Completed fraction in `[0, 1]`.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Sets the completed fraction, clamped to `[0, 1]`.
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }
}

impl Element for ProgressBar {
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
        let bounds = Rect::from_origin_size(origin, self.base.size());

        let theme = ctx.themes.resolve(self.base.theme.as_deref());
        let track = theme.slider.track;
        let fill = theme.slider.thumb_normal;
        let text_color = theme.slider.text;
        let border = theme.border;

        ctx.renderer.draw_rect(bounds, track);
        if self.value > 0.0 {
            ctx.renderer.draw_rect(
                Rect::new(bounds.x, bounds.y, bounds.width * self.value, bounds.height),
                fill,
            );
        }
        if let Some(border) = border {
            ctx.renderer.stroke_rect(bounds, border, 1.0);
        }

        if self.show_text {
            let readout = format!("{:.1}%", self.value * 100.0);
            let size = text::measure_cached(&self.font, &readout);
            let center = bounds.center();
            ctx.renderer.draw_text(
                &readout,
                Vec2::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
                &self.font,
                text_color,
            );
        }

        self.base.render_children(ctx, origin);
    }
}
