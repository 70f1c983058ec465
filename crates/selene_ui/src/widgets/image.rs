//! Image display and image-backed button.

use crate::element::{Element, ElementBase, InteractionState};
use crate::render::{PaintContext, TextureHandle};
use selene_core::{Color, Rect};
use std::any::Any;

/// A stretched image with no interaction.
pub struct ImageLabel {
    base: ElementBase,
    /// Image to draw.
    pub texture: TextureHandle,
}

impl ImageLabel {
    /// Creates an image label.
    #[must_use]
    pub fn new(rect: Rect, texture: TextureHandle) -> Self {
        let mut base = ElementBase::new(rect);
        base.hit_blocking = false;
        Self { base, texture }
    }
}

impl Element for ImageLabel {
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

        ctx.renderer.draw_surface(self.texture, bounds);
        self.base.render_children(ctx, origin);
    }
}

/// A clickable image with hover and press tinting.
pub struct ImageButton {
    base: ElementBase,
    /// Image to draw.
    pub texture: TextureHandle,
    callback: Option<Box<dyn FnMut()>>,
}

impl ImageButton {
    /// Creates an image button.
    #[must_use]
    pub fn new(rect: Rect, texture: TextureHandle) -> Self {
        Self {
            base: ElementBase::new(rect),
            texture,
            callback: None,
        }
    }

    /// Sets the click callback.
    pub fn set_callback(&mut self, callback: impl FnMut() + 'static) {
        self.callback = Some(Box::new(callback));
    }
}

impl Element for ImageButton {
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

        ctx.renderer.draw_surface(self.texture, bounds);

        // State feedback as a translucent tint over the image.
        let tint = match self.base.state() {
            InteractionState::Hovered => Some(Color::WHITE.with_alpha(0.2)),
            InteractionState::Pressed => Some(Color::BLACK.with_alpha(0.2)),
            InteractionState::Disabled => Some(Color::BLACK.with_alpha(0.4)),
            InteractionState::Normal => None,
        };
        if let Some(tint) = tint {
            ctx.renderer.draw_rect(bounds, tint);
        }

        self.base.render_children(ctx, origin);
    }

    fn on_click(&mut self) {
        if let Some(callback) = self.callback.as_mut() {
            callback();
        }
    }
}
