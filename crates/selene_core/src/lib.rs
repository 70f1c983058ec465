//! # Selene Core
//!
//! Shared primitives for the selene UI system: 2D geometry and color.
//!
//! Everything in this crate is plain data. Widgets, layout, themes and
//! rendering live in `selene_ui`; backends consume these types unchanged.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod color;
pub mod math;

pub use color::Color;
pub use math::{Rect, Size, Vec2};
