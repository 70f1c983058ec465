//! Cycling option selector.

use crate::dispatch::DispatchPass;
use crate::element::{Element, ElementBase, InteractionState};
use crate::error::{UiError, UiResult};
use crate::render::PaintContext;
use crate::text::{self, FontSpec};
use crate::widgets::truncate_label;
use selene_core::{Rect, Vec2};
use std::any::Any;

const ARROW_ZONE: f32 = 20.0;
const CYCLE_COOLDOWN: f32 = 0.3;
const LABEL_CHARS: usize = 15;

/// An inline selector cycled with side arrows.
///
/// Pressing the left or right arrow zone steps the selection with
/// wrap-around. Holding the button keeps stepping on a fixed cooldown, so
/// a long option list can be traversed without repeated clicks.
pub struct Select {
    base: ElementBase,
    options: Vec<String>,
    selected: Option<usize>,
    cooldown_left: f32,
    font: FontSpec,
    on_change: Option<Box<dyn FnMut(Option<usize>)>>,
}

impl Select {
    /// Creates a selector with nothing selected.
    #[must_use]
    pub fn new(rect: Rect, options: Vec<String>) -> Self {
        Self {
            base: ElementBase::new(rect),
            options,
            selected: None,
            cooldown_left: 0.0,
            font: FontSpec::sized(16),
            on_change: None,
        }
    }

    /// Sets the selection-changed callback.
    pub fn set_on_change(&mut self, callback: impl FnMut(Option<usize>) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    /// The options.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Replaces the options, clearing a selection that no longer fits.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        if let Some(s) = self.selected {
            if s >= self.options.len() {
                self.selected = None;
                self.notify();
            }
        }
    }

    /// Appends an option.
    pub fn add_option(&mut self, option: impl Into<String>) {
        self.options.push(option.into());
    }

    /// Removes an option by index, shifting or clearing the selection to
    /// keep it coherent.
    pub fn remove_option(&mut self, index: usize) -> UiResult<String> {
        if index >= self.options.len() {
            return Err(UiError::InvalidIndex {
                index,
                len: self.options.len(),
            });
        }
        let removed = self.options.remove(index);
        match self.selected {
            Some(s) if s == index => {
                self.selected = None;
                self.notify();
            }
            Some(s) if s > index => self.selected = Some(s - 1),
            _ => {}
        }
        Ok(removed)
    }

    /// Selected index, if any.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Selected option text, if any.
    #[must_use]
    pub fn selected_text(&self) -> Option<&str> {
        self.selected.map(|i| self.options[i].as_str())
    }

    /// Sets the selection. Rejects out-of-range indices; fires the
    /// callback only when the selection actually changes.
    pub fn set_selected(&mut self, index: Option<usize>) -> UiResult<()> {
        if let Some(i) = index {
            if i >= self.options.len() {
                return Err(UiError::InvalidIndex {
                    index: i,
                    len: self.options.len(),
                });
            }
        }
        if index != self.selected {
            self.selected = index;
            self.notify();
        }
        Ok(())
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(self.selected);
        }
    }

    fn step(&mut self, forward: bool) {
        if self.options.is_empty() {
            return;
        }
        let len = self.options.len();
        let next = match self.selected {
            Some(s) if forward => (s + 1) % len,
            Some(s) => (s + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        if Some(next) != self.selected {
            self.selected = Some(next);
            self.notify();
        }
    }

    fn arrow_zones(bounds: Rect) -> (Rect, Rect) {
        let left = Rect::new(bounds.x, bounds.y, ARROW_ZONE, bounds.height);
        let right = Rect::new(
            bounds.right() - ARROW_ZONE,
            bounds.y,
            ARROW_ZONE,
            bounds.height,
        );
        (left, right)
    }
}

impl Element for Select {
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
        if self.cooldown_left > 0.0 {
            self.cooldown_left -= dt;
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

        self.base.advance_pointer(inside, pass.input.pressed);

        // The cooldown throttles held cycling only; releasing re-arms an
        // immediate step on the next press.
        if !pass.input.pressed {
            self.cooldown_left = 0.0;
        }
        if self.base.enabled && inside && pass.input.pressed && self.cooldown_left <= 0.0 {
            let (left, right) = Self::arrow_zones(bounds);
            let pointer = pass.input.pointer;
            if left.contains(pointer) {
                self.step(false);
                self.cooldown_left = CYCLE_COOLDOWN;
            } else if right.contains(pointer) {
                self.step(true);
                self.cooldown_left = CYCLE_COOLDOWN;
            }
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
        let fill = match self.base.state() {
            InteractionState::Hovered | InteractionState::Pressed => theme.dropdown.hover,
            _ => theme.dropdown.normal,
        };
        let text_color = theme.dropdown.text;
        let border = theme.dropdown.border;

        ctx.renderer.draw_rect(bounds, fill);
        if let Some(border) = border {
            ctx.renderer.stroke_rect(bounds, border, 1.0);
        }

        let arrow_font = FontSpec::sized(self.font.size);
        let mid_y = bounds.center().y - arrow_font.line_height() / 2.0;
        ctx.renderer.draw_text(
            "<",
            Vec2::new(bounds.x + 6.0, mid_y),
            &arrow_font,
            text_color,
        );
        ctx.renderer.draw_text(
            ">",
            Vec2::new(bounds.right() - ARROW_ZONE + 6.0, mid_y),
            &arrow_font,
            text_color,
        );

        let label = self
            .selected_text()
            .map_or_else(String::new, |t| truncate_label(t, LABEL_CHARS));
        if !label.is_empty() {
            let size = text::measure_cached(&self.font, &label);
            let center = bounds.center();
            ctx.renderer.draw_text(
                &label,
                Vec2::new(center.x - size.width / 2.0, center.y - size.height / 2.0),
                &self.font,
                text_color,
            );
        }

        self.base.render_children(ctx, origin);
    }
}
