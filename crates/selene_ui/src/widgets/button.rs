//! Push button.

use crate::element::{Element, ElementBase, InteractionState};
use crate::render::PaintContext;
use crate::text::{self, FontSpec};
use selene_core::{Rect, Vec2};
use std::any::Any;

/// A captioned push button.
///
/// The callback fires on a completed click: a press that begins inside the
/// button and releases inside it. Dragging off before release fires
/// nothing.
pub struct Button {
    base: ElementBase,
    text: String,
    font: FontSpec,
    callback: Option<Box<dyn FnMut()>>,
}

impl Button {
    /// Creates a button with a caption.
    #[must_use]
    pub fn new(rect: Rect, text: impl Into<String>) -> Self {
        Self {
            base: ElementBase::new(rect),
            text: text.into(),
            font: FontSpec::sized(16),
            callback: None,
        }
    }

    /// Sets the click callback.
    pub fn set_callback(&mut self, callback: impl FnMut() + 'static) {
        self.callback = Some(Box::new(callback));
    }

    /// Builder form of [`Self::set_callback`].
    #[must_use]
    pub fn with_callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.set_callback(callback);
        self
    }

    /// Current caption.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the caption.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Element for Button {
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
        let fill = match self.base.state() {
            InteractionState::Normal => theme.button.normal,
            InteractionState::Hovered => theme.button.hover,
            InteractionState::Pressed => theme.button.pressed,
            InteractionState::Disabled => theme.button.disabled,
        };
        let text_color = theme.button.text;
        let border = theme.button.border;

        ctx.renderer.draw_rect(bounds, fill);
        if let Some(border) = border {
            ctx.renderer.stroke_rect(bounds, border, 1.0);
        }

        let text_size = text::measure_cached(&self.font, &self.text);
        let center = bounds.center();
        ctx.renderer.draw_text(
            &self.text,
            Vec2::new(
                center.x - text_size.width / 2.0,
                center.y - text_size.height / 2.0,
            ),
            &self.font,
            text_color,
        );

        self.base.render_children(ctx, origin);
    }

    fn on_click(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::InputDispatcher;
    use crate::input::FrameInput;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn callback_fires_on_release_inside() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut button = Button::new(Rect::new(0.0, 0.0, 100.0, 30.0), "go")
            .with_callback(move || seen.set(seen.get() + 1));

        let mut dispatcher = InputDispatcher::new();
        let frame = |pressed| FrameInput::new(0.016).with_pointer((50.0, 15.0), pressed);

        dispatcher.update(&mut button, &frame(false));
        dispatcher.update(&mut button, &frame(true));
        dispatcher.update(&mut button, &frame(false));

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn disabled_button_never_fires() {
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let mut button = Button::new(Rect::new(0.0, 0.0, 100.0, 30.0), "go")
            .with_callback(move || seen.set(seen.get() + 1));
        button.base_mut().enabled = false;

        let mut dispatcher = InputDispatcher::new();
        let frame = |pressed| FrameInput::new(0.016).with_pointer((50.0, 15.0), pressed);

        dispatcher.update(&mut button, &frame(true));
        dispatcher.update(&mut button, &frame(false));

        assert_eq!(count.get(), 0);
        assert_eq!(button.base().state(), InteractionState::Disabled);
    }
}
