//! Text measurement with a process-wide cache.
//!
//! The core never rasterizes glyphs; it only needs sizes for layout, label
//! sizing and caret placement. Measurement uses a fixed monospace advance
//! derived from the font size, which backends are expected to match for the
//! built-in font. Measured sizes are cached per `(font, text)` pair with
//! explicit invalidation, mirroring how rendered text surfaces were cached
//! in earlier revisions of the engine.

use parking_lot::RwLock;
use selene_core::Size;
use std::collections::HashMap;
use std::sync::OnceLock;

/// A font request keyed by name and pixel size.
///
/// `name: None` selects the backend's built-in font.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    /// Font name, or `None` for the built-in font.
    pub name: Option<String>,
    /// Pixel size.
    pub size: u32,
}

impl FontSpec {
    /// Built-in font at the given size.
    #[must_use]
    pub fn sized(size: u32) -> Self {
        Self { name: None, size }
    }

    /// Named font at the given size.
    #[must_use]
    pub fn named(name: impl Into<String>, size: u32) -> Self {
        Self {
            name: Some(name.into()),
            size,
        }
    }

    /// Horizontal advance of one glyph.
    #[must_use]
    pub fn advance(&self) -> f32 {
        self.size as f32 * 0.6
    }

    /// Line height.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.size as f32 * 1.25
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::sized(20)
    }
}

/// Measures a string without consulting the cache.
#[must_use]
pub fn measure(font: &FontSpec, text: &str) -> Size {
    let chars = text.chars().count() as f32;
    Size::new(chars * font.advance(), font.line_height())
}

/// Width of the first `chars` characters; used for caret placement.
#[must_use]
pub fn measure_prefix(font: &FontSpec, text: &str, chars: usize) -> f32 {
    let n = text.chars().take(chars).count() as f32;
    n * font.advance()
}

fn cache() -> &'static RwLock<HashMap<(FontSpec, String), Size>> {
    static CACHE: OnceLock<RwLock<HashMap<(FontSpec, String), Size>>> = OnceLock::new();
    CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Measures a string through the process-wide cache.
///
/// Read-mostly: the write lock is only taken on first sight of a
/// `(font, text)` pair.
#[must_use]
pub fn measure_cached(font: &FontSpec, text: &str) -> Size {
    let key = (font.clone(), text.to_owned());

    if let Some(size) = cache().read().get(&key) {
        return *size;
    }

    let size = measure(font, text);
    cache().write().insert(key, size);
    size
}

/// Drops every cached measurement.
///
/// Call after swapping the backend font set.
pub fn invalidate_measure_cache() {
    cache().write().clear();
}
