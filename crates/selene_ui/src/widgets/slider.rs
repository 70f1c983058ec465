//! Draggable value slider.

use crate::dispatch::DispatchPass;
use crate::element::{Element, ElementBase, InteractionState};
use crate::render::PaintContext;
use crate::text::{self, FontSpec};
use selene_core::{Rect, Vec2};
use std::any::Any;

const THUMB_WIDTH: f32 = 10.0;

/// A horizontal slider over a continuous `[min, max]` range.
///
/// Dragging anywhere on the track moves the thumb to the pointer; the
/// drag keeps tracking the pointer even after it leaves the bounds, and
/// ends on release.
pub struct Slider {
    base: ElementBase,
    min: f32,
    max: f32,
    value: f32,
    dragging: bool,
    /// Whether to draw the value readout under the thumb.
    pub show_value: bool,
    font: FontSpec,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    /// Creates a slider. A reversed range is normalized.
    #[must_use]
    pub fn new(rect: Rect, min: f32, max: f32, value: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            base: ElementBase::new(rect),
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
            show_value: true,
            font: FontSpec::sized(12),
            on_change: None,
        }
    }

    /// Sets the change callback, fired whenever the value moves.
    pub fn set_on_change(&mut self, callback: impl FnMut(f32) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Sets the value, clamped to the range. Fires the callback on change.
    pub fn set_value(&mut self, value: f32) {
        let clamped = value.clamp(self.min, self.max);
        if (clamped - self.value).abs() > f32::EPSILON {
            self.value = clamped;
            if let Some(callback) = self.on_change.as_mut() {
                callback(clamped);
            }
        }
    }

    /// Value as a fraction of the range.
    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.max > self.min {
            (self.value - self.min) / (self.max - self.min)
        } else {
            0.0
        }
    }

    fn value_at(&self, pointer_x: f32, bounds: Rect) -> f32 {
        if bounds.width <= 0.0 {
            return self.min;
        }
        let t = ((pointer_x - bounds.x) / bounds.width).clamp(0.0, 1.0);
        self.min + t * (self.max - self.min)
    }

    fn thumb_rect(&self, bounds: Rect) -> Rect {
        let travel = bounds.width - THUMB_WIDTH;
        Rect::new(
            bounds.x + travel * self.fraction(),
            bounds.y,
            THUMB_WIDTH,
            bounds.height,
        )
    }
}

impl Element for Slider {
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

    fn dispatch(&mut self, pass: &mut DispatchPass<'_>, origin: Vec2) {
        if !self.base.visible {
            return;
        }
        let own = self.base.resolved_origin(origin);
        self.base.dispatch_children(pass, own);

        let bounds = Rect::from_origin_size(own, self.base.size());
        let inside = !pass.pointer_taken && bounds.contains(pass.input.pointer);
        let press_edge = pass.input.pressed && !self.base.pointer_was_pressed();

        self.base.advance_pointer(inside, pass.input.pressed);

        if self.base.enabled {
            if press_edge && inside {
                self.dragging = true;
            }
            if !pass.input.pressed {
                self.dragging = false;
            }
            if self.dragging {
                self.set_value(self.value_at(pass.input.pointer.x, bounds));
                self.base.set_state(InteractionState::Pressed);
            }
        } else {
            self.dragging = false;
        }

        if inside && self.base.hit_blocking {
            pass.pointer_taken = true;
        }
    }

    fn render(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.visible {
            return;
        }
        let origin = self.base.resolved_origin(ctx.origin);
        let bounds = Rect::from_origin_size(origin, self.base.size());

        let theme = ctx.themes.resolve(self.base.theme.as_deref());
        let track_color = theme.slider.track;
        let thumb_color = match self.base.state() {
            InteractionState::Normal | InteractionState::Disabled => theme.slider.thumb_normal,
            InteractionState::Hovered => theme.slider.thumb_hover,
            InteractionState::Pressed => theme.slider.thumb_pressed,
        };
        let text_color = theme.slider.text;

        // Track as a slim bar through the middle.
        let track = Rect::new(
            bounds.x,
            bounds.center().y - 2.0,
            bounds.width,
            4.0,
        );
        ctx.renderer.draw_rect(track, track_color);

        let thumb = self.thumb_rect(bounds);
        ctx.renderer.draw_rect(thumb, thumb_color);

        if self.show_value {
            let readout = format!("{:.1}", self.value);
            let size = text::measure_cached(&self.font, &readout);
            ctx.renderer.draw_text(
                &readout,
                Vec2::new(
                    thumb.center().x - size.width / 2.0,
                    bounds.bottom() + 2.0,
                ),
                &self.font,
                text_color,
            );
        }

        self.base.render_children(ctx, origin);
    }
}
