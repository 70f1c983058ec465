//! # Selene UI
//!
//! Retained-mode widget toolkit for real-time render loops:
//! - Anchor-based positioning over an owned element tree
//! - One input pass and one paint pass per frame, no event queue
//! - Named themes with fail-soft fallback
//! - Virtualized dropdowns and clipped scrolling
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      FRAME PIPELINE                        │
//! ├───────────────────────────────────────────────────────────┤
//! │  FrameInput → Dispatch Pass → Key Routing → update(dt)    │
//! │       ↓             ↓              ↓            ↓          │
//! │  Hit Testing   State Machine    Focus      Animations     │
//! │                                                            │
//! │  render() → render_overlay() → Renderer backend           │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! The host owns the loop: it samples input into a [`FrameInput`], runs
//! [`InputDispatcher::update`], then paints with [`render_root`] against
//! any [`Renderer`] backend. The toolkit never blocks and never polls the
//! platform itself.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod animation;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod input;
pub mod layout;
pub mod render;
pub mod text;
pub mod theme;
pub mod widgets;

pub use animation::{Animation, Easing};
pub use dispatch::{DispatchPass, FocusState, InputDispatcher};
pub use element::{Element, ElementBase, ElementId, InteractionState};
pub use error::{UiError, UiResult};
pub use input::{FrameInput, KeyEvent};
pub use layout::{Axis, GridParams, LayoutStrategy};
pub use render::{render_root, CommandList, DrawCommand, PaintContext, Renderer, TextureHandle};
pub use text::FontSpec;
pub use theme::{Theme, ThemeRegistry};
