//! Pointer-draggable container.

use crate::dispatch::DispatchPass;
use crate::element::{Element, ElementBase, InteractionState};
use crate::render::PaintContext;
use selene_core::{Color, Rect, Vec2};
use std::any::Any;

/// A panel the user can pick up and move.
///
/// Pressing anywhere on the panel (that a child has not claimed) grabs
/// it; while held, the panel follows the pointer keeping the grab point
/// under the cursor. Children ride along since their positions are local.
pub struct DraggablePanel {
    base: ElementBase,
    /// Pointer offset from the panel origin at grab time.
    grab_offset: Option<Vec2>,
    /// Explicit fill color; `None` paints the theme background.
    pub color: Option<Color>,
}

impl DraggablePanel {
    /// Creates a draggable panel.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(rect),
            grab_offset: None,
            color: None,
        }
    }

    /// Appends a child element.
    pub fn add_child(&mut self, child: Box<dyn Element>) {
        self.base.add_child(child);
    }

    /// True while the panel is being dragged.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.grab_offset.is_some()
    }
}

impl Element for DraggablePanel {
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
                self.grab_offset = Some(pass.input.pointer - own);
            }
            if !pass.input.pressed {
                self.grab_offset = None;
            }
            if let Some(grab) = self.grab_offset {
                // Keep the grab point under the pointer: convert the
                // desired absolute origin back to a local position.
                let desired = pass.input.pointer - grab;
                let size = self.base.size();
                let local = Vec2::new(
                    desired.x - origin.x + self.base.root_point.x * size.width,
                    desired.y - origin.y + self.base.root_point.y * size.height,
                );
                self.base.set_position(local);
                self.base.set_state(InteractionState::Pressed);
            }
        } else {
            self.grab_offset = None;
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
        let fill = self.color.unwrap_or(theme.background_alt);
        let border = theme.border;

        ctx.renderer.draw_rect(bounds, fill);
        if let Some(border) = border {
            let width = if self.is_dragging() { 2.0 } else { 1.0 };
            ctx.renderer.stroke_rect(bounds, border, width);
        }

        self.base.render_children(ctx, origin);
    }
}
