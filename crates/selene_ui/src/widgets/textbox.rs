//! Single-line text entry.

use crate::dispatch::{DispatchPass, FocusState};
use crate::element::{Element, ElementBase};
use crate::input::KeyEvent;
use crate::render::PaintContext;
use crate::text::{self, FontSpec};
use selene_core::{Rect, Vec2};
use std::any::Any;

const CARET_BLINK_PERIOD: f32 = 0.5;
const TEXT_PAD: f32 = 6.0;

/// A single-line editable text field.
///
/// Clicking inside grabs keyboard focus; clicking anywhere else releases
/// it. Key events only reach the box while it is focused. Enter fires the
/// submit callback with the current buffer and leaves buffer and focus
/// untouched.
pub struct TextBox {
    base: ElementBase,
    buffer: String,
    /// Cursor position in characters, `0..=len`.
    cursor: usize,
    /// Dimmed text shown while the buffer is empty.
    pub placeholder: String,
    font: FontSpec,
    /// Caret x offset from the text origin, refreshed on buffer or
    /// cursor changes rather than measured per frame.
    caret_offset: f32,
    caret_timer: f32,
    caret_visible: bool,
    on_submit: Option<Box<dyn FnMut(&str)>>,
}

impl TextBox {
    /// Creates an empty text box.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(rect),
            buffer: String::new(),
            cursor: 0,
            placeholder: String::new(),
            font: FontSpec::sized(16),
            caret_offset: 0.0,
            caret_timer: 0.0,
            caret_visible: true,
            on_submit: None,
        }
    }

    /// Builder: placeholder text.
    #[must_use]
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the submit callback, fired on Enter with the current buffer.
    pub fn set_on_submit(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_submit = Some(Box::new(callback));
    }

    /// Current buffer contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Replaces the buffer and moves the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.chars().count();
        self.refresh_caret_offset();
    }

    /// Cursor position in characters.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    fn reset_caret(&mut self) {
        self.caret_timer = 0.0;
        self.caret_visible = true;
    }

    fn refresh_caret_offset(&mut self) {
        self.caret_offset = text::measure_prefix(&self.font, &self.buffer, self.cursor);
    }

    fn apply_key(&mut self, key: KeyEvent) {
        let cursor_before = self.cursor;
        let len_before = self.buffer.len();
        match key {
            KeyEvent::Char(c) => {
                let at = self.byte_index(self.cursor);
                self.buffer.insert(at, c);
                self.cursor += 1;
            }
            KeyEvent::Backspace => {
                if self.cursor > 0 {
                    let at = self.byte_index(self.cursor - 1);
                    self.buffer.remove(at);
                    self.cursor -= 1;
                }
            }
            KeyEvent::Delete => {
                if self.cursor < self.buffer.chars().count() {
                    let at = self.byte_index(self.cursor);
                    self.buffer.remove(at);
                }
            }
            KeyEvent::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyEvent::Right => {
                self.cursor = (self.cursor + 1).min(self.buffer.chars().count());
            }
            KeyEvent::Home => self.cursor = 0,
            KeyEvent::End => self.cursor = self.buffer.chars().count(),
            KeyEvent::Enter => {
                if let Some(callback) = self.on_submit.as_mut() {
                    callback(&self.buffer);
                }
            }
            KeyEvent::Escape | KeyEvent::Tab => {}
        }
        if self.cursor != cursor_before || self.buffer.len() != len_before {
            self.refresh_caret_offset();
        }
        self.reset_caret();
    }
}

impl Element for TextBox {
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
        if self.base.focused() {
            self.caret_timer += dt;
            if self.caret_timer >= CARET_BLINK_PERIOD {
                self.caret_timer -= CARET_BLINK_PERIOD;
                self.caret_visible = !self.caret_visible;
            }
        }
        self.base.update_children(dt);
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

        // Press inside grabs focus; a press landing anywhere else blurs.
        if press_edge && self.base.enabled {
            if inside {
                pass.focus.grab(self.base.id());
                self.reset_caret();
            } else {
                pass.focus.release(self.base.id());
            }
        }

        let focused = pass.focus.is(self.base.id()) && self.base.enabled;
        self.base.set_focused(focused);
        if focused {
            pass.focus_seen = true;
        }

        if inside && self.base.hit_blocking {
            pass.pointer_taken = true;
        }
    }

    fn handle_key(&mut self, key: KeyEvent, focus: &FocusState) {
        if focus.is(self.base.id()) && self.base.enabled {
            self.apply_key(key);
        }
        for child in self.base.children_mut() {
            child.handle_key(key, focus);
        }
    }

    fn render(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.visible {
            return;
        }
        let origin = self.base.resolved_origin(ctx.origin);
        let bounds = Rect::from_origin_size(origin, self.base.size());

        let theme = ctx.themes.resolve(self.base.theme.as_deref());
        let fill = theme.background_alt;
        let text_color = theme.text_primary;
        let placeholder_color = theme.text_secondary;
        let border = theme.border;

        ctx.renderer.draw_rect(bounds, fill);
        if let Some(border) = border {
            let width = if self.base.focused() { 2.0 } else { 1.0 };
            ctx.renderer.stroke_rect(bounds, border, width);
        }

        let text_origin = Vec2::new(
            bounds.x + TEXT_PAD,
            bounds.center().y - self.font.line_height() / 2.0,
        );
        if self.buffer.is_empty() {
            if !self.placeholder.is_empty() && !self.base.focused() {
                ctx.renderer
                    .draw_text(&self.placeholder, text_origin, &self.font, placeholder_color);
            }
        } else {
            ctx.renderer
                .draw_text(&self.buffer, text_origin, &self.font, text_color);
        }

        if self.base.focused() && self.caret_visible {
            let caret_x = text_origin.x + self.caret_offset;
            ctx.renderer.draw_line(
                Vec2::new(caret_x, bounds.y + 4.0),
                Vec2::new(caret_x, bounds.bottom() - 4.0),
                text_color,
                1.0,
            );
        }

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

    fn focused_box() -> (InputDispatcher, TextBox) {
        let mut dispatcher = InputDispatcher::new();
        let mut tb = TextBox::new(Rect::new(0.0, 0.0, 200.0, 30.0));
        dispatcher.update(&mut tb, &frame((50.0, 15.0), true));
        dispatcher.update(&mut tb, &frame((50.0, 15.0), false));
        assert!(dispatcher.focus().is(tb.base().id()));
        (dispatcher, tb)
    }

    #[test]
    fn keys_ignored_without_focus() {
        let mut dispatcher = InputDispatcher::new();
        let mut tb = TextBox::new(Rect::new(0.0, 0.0, 200.0, 30.0));

        let input = frame((500.0, 500.0), false).with_key(KeyEvent::Char('x'));
        dispatcher.update(&mut tb, &input);
        assert_eq!(tb.text(), "");
    }

    #[test]
    fn focused_box_edits_buffer() {
        let (mut dispatcher, mut tb) = focused_box();

        let typing = frame((50.0, 15.0), false)
            .with_key(KeyEvent::Char('h'))
            .with_key(KeyEvent::Char('i'))
            .with_key(KeyEvent::Char('!'))
            .with_key(KeyEvent::Backspace);
        dispatcher.update(&mut tb, &typing);

        assert_eq!(tb.text(), "hi");
        assert_eq!(tb.cursor(), 2);
    }

    #[test]
    fn cursor_moves_and_inserts_mid_buffer() {
        let (mut dispatcher, mut tb) = focused_box();
        tb.set_text("ac");

        let input = frame((50.0, 15.0), false)
            .with_key(KeyEvent::Left)
            .with_key(KeyEvent::Char('b'));
        dispatcher.update(&mut tb, &input);

        assert_eq!(tb.text(), "abc");
    }

    #[test]
    fn click_outside_blurs() {
        let (mut dispatcher, mut tb) = focused_box();

        dispatcher.update(&mut tb, &frame((500.0, 500.0), true));
        assert!(dispatcher.focus().current().is_none());

        dispatcher.update(
            &mut tb,
            &frame((500.0, 500.0), false).with_key(KeyEvent::Char('x')),
        );
        assert_eq!(tb.text(), "");
    }

    #[test]
    fn enter_submits_and_keeps_buffer_and_focus() {
        let (mut dispatcher, mut tb) = focused_box();
        tb.set_text("hello");

        let submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&submitted);
        tb.set_on_submit(move |s| sink.borrow_mut().push(s.to_owned()));

        dispatcher.update(&mut tb, &frame((50.0, 15.0), false).with_key(KeyEvent::Enter));

        assert_eq!(*submitted.borrow(), vec!["hello".to_owned()]);
        assert_eq!(tb.text(), "hello");
        assert!(dispatcher.focus().is(tb.base().id()));
    }

    #[test]
    fn multibyte_editing_stays_on_char_boundaries() {
        let (mut dispatcher, mut tb) = focused_box();

        let input = frame((50.0, 15.0), false)
            .with_key(KeyEvent::Char('é'))
            .with_key(KeyEvent::Char('ü'))
            .with_key(KeyEvent::Backspace);
        dispatcher.update(&mut tb, &input);

        assert_eq!(tb.text(), "é");
        assert_eq!(tb.cursor(), 1);
        // The cached caret offset tracks the edits without a per-frame
        // measurement.
        let expected = text::measure_prefix(&tb.font, "é", 1);
        assert!((tb.caret_offset - expected).abs() < f32::EPSILON);
    }
}
