//! Animated on/off toggle.

use crate::animation::{Animation, Easing};
use crate::element::{Element, ElementBase};
use crate::render::PaintContext;
use selene_core::{Rect, Vec2};
use std::any::Any;

/// A two-state toggle with an animated thumb.
///
/// Clicking anywhere on the switch flips it. The thumb eases between the
/// ends; the logical state flips immediately on click, only the visual
/// catches up.
pub struct Switch {
    base: ElementBase,
    on: bool,
    /// Thumb travel fraction, `0` = off end, `1` = on end.
    anim: Animation,
    on_toggle: Option<Box<dyn FnMut(bool)>>,
}

impl Switch {
    /// Creates a switch in the given state.
    #[must_use]
    pub fn new(rect: Rect, on: bool) -> Self {
        Self {
            base: ElementBase::new(rect),
            on,
            anim: Animation::new(if on { 1.0 } else { 0.0 }, Easing::ExpoOut),
            on_toggle: None,
        }
    }

    /// Sets the toggle callback, fired with the new state.
    pub fn set_on_toggle(&mut self, callback: impl FnMut(bool) + 'static) {
        self.on_toggle = Some(Box::new(callback));
    }

    /// Current logical state.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Sets the state programmatically, without animation or callback.
    pub fn set_on(&mut self, on: bool) {
        self.on = on;
        self.anim.set_immediate(if on { 1.0 } else { 0.0 });
    }

    /// Thumb travel fraction for the current frame.
    #[must_use]
    pub fn travel(&self) -> f32 {
        self.anim.value()
    }
}

impl Element for Switch {
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

    fn update(&mut self, dt: f32) {
        self.anim.update(dt);
        self.base.update_children(dt);
    }

    fn on_click(&mut self) {
        self.on = !self.on;
        self.anim.set_target(if self.on { 1.0 } else { 0.0 });
        if let Some(callback) = self.on_toggle.as_mut() {
            callback(self.on);
        }
    }

    fn render(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.visible {
            return;
        }
        let origin = self.base.resolved_origin(ctx.origin);
        let bounds = Rect::from_origin_size(origin, self.base.size());

        let theme = ctx.themes.resolve(self.base.theme.as_deref());
        let off_color = theme.slider.track;
        let on_color = theme.button.normal;
        let thumb_color = theme.slider.thumb_normal;
        let border = theme.border;

        let t = self.anim.value();
        ctx.renderer.draw_rect(bounds, off_color.lerp(on_color, t));
        if let Some(border) = border {
            ctx.renderer.stroke_rect(bounds, border, 1.0);
        }

        let radius = bounds.height / 2.0 - 2.0;
        let travel = bounds.width - bounds.height;
        let center = Vec2::new(
            bounds.x + bounds.height / 2.0 + travel * t,
            bounds.center().y,
        );
        ctx.renderer.draw_circle(center, radius, thumb_color);

        self.base.render_children(ctx, origin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::InputDispatcher;
    use crate::input::FrameInput;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn frame(pointer: (f32, f32), pressed: bool) -> FrameInput {
        FrameInput::new(0.016).with_pointer(pointer, pressed)
    }

    #[test]
    fn click_toggles_and_animates() {
        let states = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&states);

        let mut dispatcher = InputDispatcher::new();
        let mut switch = Switch::new(Rect::new(0.0, 0.0, 60.0, 30.0), false);
        switch.set_on_toggle(move |on| sink.borrow_mut().push(on));

        dispatcher.update(&mut switch, &frame((30.0, 15.0), true));
        dispatcher.update(&mut switch, &frame((30.0, 15.0), false));
        assert!(switch.is_on());
        // Thumb still in flight right after the click.
        assert!(switch.travel() < 1.0);

        for _ in 0..30 {
            dispatcher.update(&mut switch, &frame((300.0, 300.0), false));
        }
        assert!((switch.travel() - 1.0).abs() < 0.001);

        dispatcher.update(&mut switch, &frame((30.0, 15.0), true));
        dispatcher.update(&mut switch, &frame((30.0, 15.0), false));
        assert!(!switch.is_on());

        assert_eq!(*states.borrow(), vec![true, false]);
    }

    #[test]
    fn set_on_skips_animation() {
        let mut switch = Switch::new(Rect::new(0.0, 0.0, 60.0, 30.0), false);
        switch.set_on(true);
        assert!(switch.is_on());
        assert_eq!(switch.travel(), 1.0);
    }
}
