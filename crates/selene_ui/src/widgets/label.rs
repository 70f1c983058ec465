//! Static text.

use crate::element::{Element, ElementBase};
use crate::render::PaintContext;
use crate::text::{self, FontSpec};
use selene_core::{Color, Rect, Vec2};
use std::any::Any;

/// A text run sized to its content.
///
/// Labels never block the pointer, so they can sit on top of buttons and
/// panels without stealing their input.
pub struct Label {
    base: ElementBase,
    text: String,
    font: FontSpec,
    /// Explicit text color; `None` uses the theme's label color.
    pub color: Option<Color>,
}

impl Label {
    /// Creates a label at a local position, sized to its text.
    #[must_use]
    pub fn new(position: Vec2, text: impl Into<String>) -> Self {
        Self::with_font(position, text, FontSpec::default())
    }

    /// Creates a label with a specific font.
    #[must_use]
    pub fn with_font(position: Vec2, text: impl Into<String>, font: FontSpec) -> Self {
        let text = text.into();
        let size = text::measure_cached(&font, &text);
        let mut base = ElementBase::new(Rect::from_origin_size(position, size));
        base.hit_blocking = false;
        Self {
            base,
            text,
            font,
            color: None,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and resizes to fit.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let size = text::measure_cached(&self.font, &self.text);
        self.base.set_size(size);
    }

    /// The label's font.
    #[must_use]
    pub fn font(&self) -> &FontSpec {
        &self.font
    }
}

impl Element for Label {
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

        let theme = ctx.themes.resolve(self.base.theme.as_deref());
        let color = self.color.unwrap_or(theme.label_text);

        ctx.renderer.draw_text(&self.text, origin, &self.font, color);
        self.base.render_children(ctx, origin);
    }
}
