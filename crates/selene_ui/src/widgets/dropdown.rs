//! Expanding option list.

use crate::dispatch::DispatchPass;
use crate::element::{Element, ElementBase, InteractionState};
use crate::error::{UiError, UiResult};
use crate::render::PaintContext;
use crate::text::{self, FontSpec};
use crate::widgets::truncate_label;
use selene_core::{Rect, Vec2};
use std::any::Any;
use std::ops::Range;

/// Height of one option row.
const OPTION_HEIGHT: f32 = 25.0;
const SCROLLBAR_WIDTH: f32 = 8.0;
const MAIN_CHARS: usize = 15;
const ROW_CHARS: usize = 20;

/// A collapsed selector that expands into a scrollable option list.
///
/// The list is virtualized: only a window of `max_visible` rows exists at
/// a time, scrolled by wheel or by dragging the proportional scrollbar,
/// so option count does not affect per-frame cost. The expanded list
/// paints in the overlay pass and therefore draws above siblings.
pub struct Dropdown {
    base: ElementBase,
    options: Vec<String>,
    selected: Option<usize>,
    expanded: bool,
    max_visible: usize,
    /// Index of the first visible row.
    scroll_offset: usize,
    hovered_option: Option<usize>,
    dragging_scrollbar: bool,
    font: FontSpec,
    on_change: Option<Box<dyn FnMut(Option<usize>)>>,
}

impl Dropdown {
    /// Creates a collapsed dropdown showing at most five options at once.
    #[must_use]
    pub fn new(rect: Rect, options: Vec<String>) -> Self {
        Self {
            base: ElementBase::new(rect),
            options,
            selected: None,
            expanded: false,
            max_visible: 5,
            scroll_offset: 0,
            hovered_option: None,
            dragging_scrollbar: false,
            font: FontSpec::sized(16),
            on_change: None,
        }
    }

    /// Builder: window size. Clamped to at least one row.
    #[must_use]
    pub fn with_max_visible(mut self, max_visible: usize) -> Self {
        self.max_visible = max_visible.max(1);
        self
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

    /// Replaces the options, collapsing the list and clearing a selection
    /// that no longer fits.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
        self.expanded = false;
        self.scroll_offset = 0;
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

    /// Removes an option by index, keeping the selection coherent: a
    /// selection past the removed index shifts down, the removed
    /// selection clears.
    pub fn remove_option(&mut self, index: usize) -> UiResult<String> {
        if index >= self.options.len() {
            return Err(UiError::InvalidIndex {
                index,
                len: self.options.len(),
            });
        }
        let removed = self.options.remove(index);
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
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

    /// Whether the option list is open.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Indices of the rows that currently exist.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.scroll_offset.min(self.options.len());
        let end = (start + self.max_visible).min(self.options.len());
        start..end
    }

    /// Scrolls the window by wheel `delta` rows (positive = up), clamped.
    pub fn handle_scroll(&mut self, delta: f32) {
        let step = delta.round() as isize;
        let max = self.max_scroll() as isize;
        let next = (self.scroll_offset as isize - step).clamp(0, max);
        self.scroll_offset = next as usize;
    }

    fn max_scroll(&self) -> usize {
        self.options.len().saturating_sub(self.max_visible)
    }

    fn needs_scrollbar(&self) -> bool {
        self.options.len() > self.max_visible
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_change.as_mut() {
            callback(self.selected);
        }
    }

    fn list_rect(&self, bounds: Rect) -> Rect {
        let rows = self.visible_range().len();
        Rect::new(
            bounds.x,
            bounds.bottom(),
            bounds.width,
            rows as f32 * OPTION_HEIGHT,
        )
    }

    fn scrollbar_track(&self, list: Rect) -> Rect {
        Rect::new(
            list.right() - SCROLLBAR_WIDTH,
            list.y,
            SCROLLBAR_WIDTH,
            list.height,
        )
    }

    fn scrollbar_thumb(&self, track: Rect) -> Rect {
        let total = self.options.len().max(1) as f32;
        let visible = self.max_visible.min(self.options.len()).max(1) as f32;
        let height = (track.height * visible / total).max(8.0);
        let travel = track.height - height;
        let t = if self.max_scroll() > 0 {
            self.scroll_offset as f32 / self.max_scroll() as f32
        } else {
            0.0
        };
        Rect::new(track.x, track.y + travel * t, track.width, height)
    }

    fn row_at(&self, list: Rect, pointer: Vec2) -> Option<usize> {
        let row = self.scroll_offset + ((pointer.y - list.y) / OPTION_HEIGHT) as usize;
        self.visible_range().contains(&row).then_some(row)
    }
}

impl Element for Dropdown {
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
        let pointer = pass.input.pointer;
        let press_edge = pass.input.pressed && !self.base.pointer_was_pressed();

        // The expanded list floats above everything, so it gets first
        // claim on the pointer.
        let mut over_list = false;
        if self.expanded && self.base.enabled {
            let list = self.list_rect(bounds);
            over_list = !pass.pointer_taken && list.contains(pointer);
            self.hovered_option = None;

            if over_list {
                let in_scrollbar =
                    self.needs_scrollbar() && self.scrollbar_track(list).contains(pointer);
                if in_scrollbar {
                    if press_edge {
                        self.dragging_scrollbar = true;
                    }
                } else if let Some(row) = self.row_at(list, pointer) {
                    self.hovered_option = Some(row);
                    if press_edge {
                        self.expanded = false;
                        if Some(row) != self.selected {
                            self.selected = Some(row);
                            self.notify();
                        }
                    }
                }

                if let Some(delta) = pass.take_wheel() {
                    self.handle_scroll(delta);
                }
            }

            if self.dragging_scrollbar {
                if pass.input.pressed {
                    let track = self.scrollbar_track(list);
                    let t = ((pointer.y - track.y) / track.height).clamp(0.0, 1.0);
                    self.scroll_offset = (t * self.max_scroll() as f32).round() as usize;
                } else {
                    self.dragging_scrollbar = false;
                }
            }
        }

        let inside_main = !pass.pointer_taken && bounds.contains(pointer);
        self.base.advance_pointer(inside_main, pass.input.pressed);

        if press_edge && self.base.enabled && !self.dragging_scrollbar {
            if inside_main {
                self.expanded = !self.expanded;
                if self.expanded {
                    self.scroll_offset = 0;
                    self.hovered_option = None;
                }
            } else if self.expanded && !over_list {
                // Press elsewhere closes the list without selecting.
                self.expanded = false;
            }
        }

        if (inside_main || over_list) && self.base.hit_blocking {
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

        let label = self
            .selected_text()
            .map_or_else(String::new, |t| truncate_label(t, MAIN_CHARS));
        if !label.is_empty() {
            ctx.renderer.draw_text(
                &label,
                Vec2::new(
                    bounds.x + 6.0,
                    bounds.center().y - self.font.line_height() / 2.0,
                ),
                &self.font,
                text_color,
            );
        }

        let arrow = if self.expanded { "^" } else { "v" };
        ctx.renderer.draw_text(
            arrow,
            Vec2::new(
                bounds.right() - 16.0,
                bounds.center().y - self.font.line_height() / 2.0,
            ),
            &self.font,
            text_color,
        );

        self.base.render_children(ctx, origin);
    }

    fn render_overlay(&self, ctx: &mut PaintContext<'_>) {
        if !self.base.visible {
            return;
        }
        let origin = self.base.resolved_origin(ctx.origin);

        if self.expanded {
            let bounds = Rect::from_origin_size(origin, self.base.size());
            let list = self.list_rect(bounds);

            let theme = ctx.themes.resolve(self.base.theme.as_deref());
            let backdrop = theme.dropdown.expanded;
            let text_color = theme.dropdown.text;
            let row_normal = theme.dropdown.option_normal;
            let row_hover = theme.dropdown.option_hover;
            let row_selected = theme.dropdown.option_selected;
            let border = theme.dropdown.border;

            ctx.renderer.draw_rect(list, backdrop);

            let row_width = if self.needs_scrollbar() {
                list.width - SCROLLBAR_WIDTH
            } else {
                list.width
            };
            for row in self.visible_range() {
                let rect = Rect::new(
                    list.x,
                    list.y + (row - self.scroll_offset) as f32 * OPTION_HEIGHT,
                    row_width,
                    OPTION_HEIGHT,
                );
                let fill = if self.hovered_option == Some(row) {
                    row_hover
                } else if self.selected == Some(row) {
                    row_selected
                } else {
                    row_normal
                };
                ctx.renderer.draw_rect(rect, fill);

                let label = truncate_label(&self.options[row], ROW_CHARS);
                ctx.renderer.draw_text(
                    &label,
                    Vec2::new(
                        rect.x + 6.0,
                        rect.center().y - self.font.line_height() / 2.0,
                    ),
                    &self.font,
                    text_color,
                );
            }

            if self.needs_scrollbar() {
                let track = self.scrollbar_track(list);
                ctx.renderer.draw_rect(track, row_normal);
                ctx.renderer
                    .draw_rect(self.scrollbar_thumb(track), text_color.with_alpha(0.5));
            }

            if let Some(border) = border {
                ctx.renderer.stroke_rect(list, border, 1.0);
            }
        }

        let saved = ctx.origin;
        ctx.origin = origin;
        for child in self.base.children() {
            child.render_overlay(ctx);
        }
        ctx.origin = saved;
    }
}
