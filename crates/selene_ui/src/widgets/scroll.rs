//! Clipped scrolling container.

use crate::dispatch::DispatchPass;
use crate::element::{Element, ElementBase};
use crate::render::PaintContext;
use selene_core::{Rect, Size, Vec2};
use std::any::Any;

/// Pixels scrolled per wheel notch.
const WHEEL_STEP: f32 = 20.0;
const SCROLLBAR_THICKNESS: f32 = 6.0;

/// A viewport over larger content.
///
/// Children live in content coordinates; the frame shifts them by the
/// scroll offset identically for hit testing and painting, clips painting
/// to the viewport, and masks pointer input when the pointer is outside
/// it, so a child scrolled out of view can never be clicked.
pub struct ScrollFrame {
    base: ElementBase,
    scroll: Vec2,
    /// Whether to draw proportional scrollbars when content overflows.
    pub show_scrollbars: bool,
}

impl ScrollFrame {
    /// Creates an empty scroll frame.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(rect),
            scroll: Vec2::ZERO,
            show_scrollbars: true,
        }
    }

    /// Appends a child in content coordinates.
    pub fn add_child(&mut self, child: Box<dyn Element>) {
        self.base.add_child(child);
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Sets the scroll offset, clamped to the content.
    pub fn set_scroll(&mut self, scroll: Vec2) {
        self.scroll = scroll;
        self.clamp_scroll();
    }

    /// Extent of the content: the far edge of the furthest child.
    #[must_use]
    pub fn content_size(&self) -> Size {
        let mut size = Size::ZERO;
        for child in self.base.children() {
            let bounds = child.base().resolved_bounds(Vec2::ZERO);
            size.width = size.width.max(bounds.right());
            size.height = size.height.max(bounds.bottom());
        }
        size
    }

    fn max_scroll(&self) -> Vec2 {
        let content = self.content_size();
        let viewport = self.base.size();
        Vec2::new(
            (content.width - viewport.width).max(0.0),
            (content.height - viewport.height).max(0.0),
        )
    }

    fn clamp_scroll(&mut self) {
        let max = self.max_scroll();
        self.scroll.x = self.scroll.x.clamp(0.0, max.x);
        self.scroll.y = self.scroll.y.clamp(0.0, max.y);
    }
}

impl Element for ScrollFrame {
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
        // Content may have grown or shrunk since the last frame.
        self.clamp_scroll();
        self.base.update_children(dt);
    }

    fn dispatch(&mut self, pass: &mut DispatchPass<'_>, origin: Vec2) {
        if !self.base.visible {
            return;
        }
        let own = self.base.resolved_origin(origin);
        let viewport = Rect::from_origin_size(own, self.base.size());
        let content_origin = own - self.scroll;

        let in_viewport = !pass.pointer_taken && viewport.contains(pass.input.pointer);

        if in_viewport {
            self.base.dispatch_children(pass, content_origin);
        } else {
            // Children still advance their state machines (releases must
            // disarm), but none of them may see the pointer.
            let taken = pass.pointer_taken;
            pass.pointer_taken = true;
            self.base.dispatch_children(pass, content_origin);
            pass.pointer_taken = taken;
        }

        // Only a frame that can actually scroll consumes the wheel;
        // otherwise it stays available to an enclosing frame.
        if in_viewport && self.max_scroll().y > 0.0 {
            if let Some(delta) = pass.take_wheel() {
                self.scroll.y -= delta * WHEEL_STEP;
                self.clamp_scroll();
            }
        }

        self.base.advance_pointer(in_viewport, pass.input.pressed);

        if in_viewport && self.base.hit_blocking {
            pass.pointer_taken = true;
        }
    }

    fn render(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.visible {
            return;
        }
        let own = self.base.resolved_origin(ctx.origin);
        let viewport = Rect::from_origin_size(own, self.base.size());
        let content_origin = own - self.scroll;

        let theme = ctx.themes.resolve(self.base.theme.as_deref());
        let background = theme.background;
        let track_color = theme.slider.track;
        let thumb_color = theme.slider.thumb_normal;
        let border = theme.border;

        ctx.renderer.draw_rect(viewport, background);

        ctx.renderer.push_clip(viewport);
        self.base.render_children(ctx, content_origin);
        ctx.renderer.pop_clip();

        if self.show_scrollbars {
            let content = self.content_size();
            let max = self.max_scroll();

            if max.y > 0.0 {
                let track = Rect::new(
                    viewport.right() - SCROLLBAR_THICKNESS,
                    viewport.y,
                    SCROLLBAR_THICKNESS,
                    viewport.height,
                );
                let thumb_h = (viewport.height * viewport.height / content.height).max(8.0);
                let travel = track.height - thumb_h;
                let t = self.scroll.y / max.y;
                ctx.renderer.draw_rect(track, track_color);
                ctx.renderer.draw_rect(
                    Rect::new(track.x, track.y + travel * t, track.width, thumb_h),
                    thumb_color,
                );
            }

            if max.x > 0.0 {
                let track = Rect::new(
                    viewport.x,
                    viewport.bottom() - SCROLLBAR_THICKNESS,
                    viewport.width,
                    SCROLLBAR_THICKNESS,
                );
                let thumb_w = (viewport.width * viewport.width / content.width).max(8.0);
                let travel = track.width - thumb_w;
                let t = self.scroll.x / max.x;
                ctx.renderer.draw_rect(track, track_color);
                ctx.renderer.draw_rect(
                    Rect::new(track.x + travel * t, track.y, thumb_w, track.height),
                    thumb_color,
                );
            }
        }

        if let Some(border) = border {
            ctx.renderer.stroke_rect(viewport, border, 1.0);
        }
    }

    fn render_overlay(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.visible {
            return;
        }
        let own = self.base.resolved_origin(ctx.origin);
        let content_origin = own - self.scroll;

        let saved = ctx.origin;
        ctx.origin = content_origin;
        for child in self.base.children() {
            child.render_overlay(ctx);
        }
        ctx.origin = saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::InputDispatcher;
    use crate::input::FrameInput;
    use crate::widgets::{Button, ProgressBar};
    use std::cell::Cell;
    use std::rc::Rc;

    fn frame(pointer: (f32, f32), pressed: bool) -> FrameInput {
        FrameInput::new(0.016).with_pointer(pointer, pressed)
    }

    // Non-blocking filler to give the frame 300 units of content.
    fn filler() -> Box<dyn Element> {
        Box::new(ProgressBar::new(Rect::new(0.0, 0.0, 80.0, 300.0)))
    }

    fn tall_frame() -> ScrollFrame {
        // 100x100 viewport over 300 units of content.
        let mut sf = ScrollFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        sf.add_child(filler());
        sf
    }

    #[test]
    fn wheel_scrolls_and_clamps() {
        let mut dispatcher = InputDispatcher::new();
        let mut sf = tall_frame();

        dispatcher.update(&mut sf, &frame((50.0, 50.0), false).with_wheel(-1.0));
        assert_eq!(sf.scroll().y, 20.0);

        // Scroll far past the end: clamps to content minus viewport.
        for _ in 0..50 {
            dispatcher.update(&mut sf, &frame((50.0, 50.0), false).with_wheel(-1.0));
        }
        assert_eq!(sf.scroll().y, 200.0);

        // And back past the top.
        for _ in 0..100 {
            dispatcher.update(&mut sf, &frame((50.0, 50.0), false).with_wheel(1.0));
        }
        assert_eq!(sf.scroll().y, 0.0);
    }

    #[test]
    fn wheel_outside_viewport_is_ignored() {
        let mut dispatcher = InputDispatcher::new();
        let mut sf = tall_frame();

        dispatcher.update(&mut sf, &frame((500.0, 500.0), false).with_wheel(-1.0));
        assert_eq!(sf.scroll().y, 0.0);
    }

    #[test]
    fn set_scroll_is_clamped() {
        let mut sf = tall_frame();
        sf.set_scroll(Vec2::new(-10.0, 999.0));
        assert_eq!(sf.scroll(), Vec2::new(0.0, 200.0));
    }

    #[test]
    fn scrolled_child_is_hit_at_shifted_position() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);

        let mut sf = ScrollFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        sf.add_child(filler());
        // Button at content y=150, off screen until scrolled.
        sf.add_child(Box::new(
            Button::new(Rect::new(10.0, 150.0, 80.0, 30.0), "deep")
                .with_callback(move || seen.set(seen.get() + 1)),
        ));

        let mut dispatcher = InputDispatcher::new();

        // Without scrolling the button is outside the viewport.
        dispatcher.update(&mut sf, &frame((50.0, 60.0), true));
        dispatcher.update(&mut sf, &frame((50.0, 60.0), false));
        assert_eq!(count.get(), 0);

        // Scroll down 100: button now spans viewport y=[50, 80).
        sf.set_scroll(Vec2::new(0.0, 100.0));
        dispatcher.update(&mut sf, &frame((50.0, 60.0), true));
        dispatcher.update(&mut sf, &frame((50.0, 60.0), false));
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn pointer_outside_viewport_never_reaches_children() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);

        // Viewport ends at y=100 but the button pokes out to y=140 in
        // content space.
        let mut sf = ScrollFrame::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        sf.add_child(Box::new(
            Button::new(Rect::new(10.0, 90.0, 80.0, 50.0), "clipped")
                .with_callback(move || seen.set(seen.get() + 1)),
        ));

        let mut dispatcher = InputDispatcher::new();
        dispatcher.update(&mut sf, &frame((50.0, 120.0), true));
        dispatcher.update(&mut sf, &frame((50.0, 120.0), false));
        assert_eq!(count.get(), 0);
    }
}
