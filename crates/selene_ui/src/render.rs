//! Renderer abstraction consumed by element `render` calls.
//!
//! The core emits drawing calls through the [`Renderer`] trait and never
//! touches a concrete backend; software and hardware-accelerated backends
//! implement the same trait and are interchangeable. [`CommandList`] is a
//! recording implementation used by tests and by batching backends that
//! replay commands against the GPU.

use crate::text::FontSpec;
use selene_core::{Color, Rect, Vec2};

/// Opaque handle to an image loaded by an external collaborator.
///
/// The core never interprets the handle; it only forwards it to
/// [`Renderer::draw_surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Drawing interface implemented by rendering backends.
pub trait Renderer {
    /// Fills a rectangle.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Strokes a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);

    /// Fills a circle.
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draws a line segment.
    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);

    /// Draws a text run with its top-left corner at `position`.
    fn draw_text(&mut self, text: &str, position: Vec2, font: &FontSpec, color: Color);

    /// Draws a loaded image stretched into `rect`.
    fn draw_surface(&mut self, texture: TextureHandle, rect: Rect);

    /// Pushes a clip rectangle; subsequent draws are confined to it.
    fn push_clip(&mut self, rect: Rect);

    /// Pops the most recent clip rectangle.
    fn pop_clip(&mut self);
}

/// A recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Rectangle outline.
    StrokeRect {
        /// Bounds.
        rect: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
    },
    /// Filled circle.
    Circle {
        /// Center point.
        center: Vec2,
        /// Radius.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Line segment.
    Line {
        /// Start point.
        from: Vec2,
        /// End point.
        to: Vec2,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
    },
    /// Text run.
    Text {
        /// Content.
        text: String,
        /// Top-left corner.
        position: Vec2,
        /// Font request.
        font: FontSpec,
        /// Text color.
        color: Color,
    },
    /// Image blit.
    Surface {
        /// Image handle.
        texture: TextureHandle,
        /// Destination bounds.
        rect: Rect,
    },
    /// Begin clipping to `rect` (already intersected with the active clip).
    PushClip {
        /// Clip bounds.
        rect: Rect,
    },
    /// End the current clip region.
    PopClip,
}

/// Command-recording renderer.
///
/// Nested clips are intersected as they are pushed, so a replaying backend
/// can apply each `PushClip` rect directly as a scissor.
#[derive(Debug, Default)]
pub struct CommandList {
    commands: Vec<DrawCommand>,
    clip_stack: Vec<Rect>,
}

impl CommandList {
    /// Creates an empty command list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
            clip_stack: Vec::with_capacity(8),
        }
    }

    /// Clears recorded commands at the start of a frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.clip_stack.clear();
    }

    /// Returns the recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns the number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the active clip rect, if any.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }
}

impl Renderer for CommandList {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, font: &FontSpec, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            position,
            font: font.clone(),
            color,
        });
    }

    fn draw_surface(&mut self, texture: TextureHandle, rect: Rect) {
        self.commands.push(DrawCommand::Surface { texture, rect });
    }

    fn push_clip(&mut self, rect: Rect) {
        let effective = match self.clip_stack.last() {
            Some(current) => current.intersection(&rect).unwrap_or(Rect::ZERO),
            None => rect,
        };
        self.clip_stack.push(effective);
        self.commands.push(DrawCommand::PushClip { rect: effective });
    }

    fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.commands.push(DrawCommand::PopClip);
    }
}

/// Everything an element needs while painting.
///
/// `origin` is the absolute origin of the element's parent; tree recursion
/// moves it as it descends and restores it on the way back up.
pub struct PaintContext<'a> {
    /// Drawing sink for this frame.
    pub renderer: &'a mut dyn Renderer,
    /// Theme lookup.
    pub themes: &'a crate::theme::ThemeRegistry,
    /// Absolute origin of the current parent.
    pub origin: Vec2,
}

/// Paints a whole tree: the normal pass, then one overlay pass so
/// floating content (expanded dropdowns) draws above everything.
pub fn render_root(
    root: &dyn crate::element::Element,
    renderer: &mut dyn Renderer,
    themes: &crate::theme::ThemeRegistry,
) {
    let mut ctx = PaintContext {
        renderer,
        themes,
        origin: Vec2::ZERO,
    };
    root.render(&mut ctx);
    root.render_overlay(&mut ctx);
}
