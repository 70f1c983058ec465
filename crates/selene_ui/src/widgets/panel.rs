//! Plain rectangular container.

use crate::element::{Element, ElementBase};
use crate::layout::LayoutStrategy;
use crate::render::PaintContext;
use selene_core::{Color, Rect};
use std::any::Any;

/// A filled rectangle that parents other elements.
///
/// Panels are the workhorse container: give one a layout strategy and add
/// children, or position children manually. The fill defaults to the
/// theme background.
pub struct Panel {
    base: ElementBase,
    /// Explicit fill color; `None` paints the theme background.
    pub color: Option<Color>,
    /// Outline width; zero for no outline.
    pub border_width: f32,
}

impl Panel {
    /// Creates a panel with the given local bounds.
    #[must_use]
    pub fn new(rect: Rect) -> Self {
        Self {
            base: ElementBase::new(rect),
            color: None,
            border_width: 1.0,
        }
    }

    /// Sets an explicit fill color.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Installs a layout strategy for the panel's children.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutStrategy) -> Self {
        self.base.set_layout(Some(layout));
        self
    }

    /// Appends a child element.
    pub fn add_child(&mut self, child: Box<dyn Element>) {
        self.base.add_child(child);
    }
}

impl Element for Panel {
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
        let fill = self.color.unwrap_or(theme.background);
        let border = theme.border;

        ctx.renderer.draw_rect(bounds, fill);
        if self.border_width > 0.0 {
            if let Some(border) = border {
                ctx.renderer.stroke_rect(bounds, border, self.border_width);
            }
        }

        self.base.render_children(ctx, origin);
    }
}
