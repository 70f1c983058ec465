//! # Theme Registry
//!
//! Named visual themes for every widget category, with a deliberate
//! fail-soft policy: lookups never fail. Requesting an unknown theme
//! returns the built-in fallback, and partial definitions loaded from TOML
//! degrade field-by-field to the defaults, so a broken theme file can never
//! prevent startup.

use crate::error::{UiError, UiResult};
use selene_core::Color;
use serde::Deserialize;
use std::collections::HashMap;

/// Name of the guaranteed-present fallback theme.
pub const FALLBACK_THEME: &str = "default";

/// Button color group.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonColors {
    /// Resting fill.
    pub normal: Color,
    /// Fill while hovered.
    pub hover: Color,
    /// Fill while pressed.
    pub pressed: Color,
    /// Fill while disabled.
    pub disabled: Color,
    /// Caption color.
    pub text: Color,
    /// Outline color, `None` for no outline.
    pub border: Option<Color>,
}

impl Default for ButtonColors {
    fn default() -> Self {
        Self {
            normal: Color::rgb8(70, 130, 180),
            hover: Color::rgb8(50, 110, 160),
            pressed: Color::rgb8(30, 90, 140),
            disabled: Color::rgb8(120, 120, 120),
            text: Color::WHITE,
            border: Some(Color::rgb8(100, 150, 200)),
        }
    }
}

/// Dropdown and select color group.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DropdownColors {
    /// Collapsed box fill.
    pub normal: Color,
    /// Collapsed box fill while hovered.
    pub hover: Color,
    /// Backdrop of the expanded option list.
    pub expanded: Color,
    /// Option and caption text color.
    pub text: Color,
    /// Option row fill.
    pub option_normal: Color,
    /// Option row fill while hovered.
    pub option_hover: Color,
    /// Fill of the currently selected row.
    pub option_selected: Color,
    /// Outline color, `None` for no outline.
    pub border: Option<Color>,
}

impl Default for DropdownColors {
    fn default() -> Self {
        Self {
            normal: Color::rgb8(90, 90, 110),
            hover: Color::rgb8(110, 110, 130),
            expanded: Color::rgb8(100, 100, 120),
            text: Color::WHITE,
            option_normal: Color::rgb8(70, 70, 90),
            option_hover: Color::rgb8(80, 80, 100),
            option_selected: Color::rgb8(90, 90, 110),
            border: Some(Color::rgb8(150, 150, 170)),
        }
    }
}

/// Slider, progress bar and scrollbar color group.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SliderColors {
    /// Track fill.
    pub track: Color,
    /// Thumb fill.
    pub thumb_normal: Color,
    /// Thumb fill while hovered.
    pub thumb_hover: Color,
    /// Thumb fill while pressed.
    pub thumb_pressed: Color,
    /// Value readout color.
    pub text: Color,
}

impl Default for SliderColors {
    fn default() -> Self {
        Self {
            track: Color::rgb8(80, 80, 80),
            thumb_normal: Color::rgb8(200, 100, 100),
            thumb_hover: Color::rgb8(220, 120, 120),
            thumb_pressed: Color::rgb8(180, 80, 80),
            text: Color::WHITE,
        }
    }
}

/// Complete named theme: one color bundle per widget category.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Button colors.
    pub button: ButtonColors,
    /// Dropdown/select colors.
    pub dropdown: DropdownColors,
    /// Slider/progress colors.
    pub slider: SliderColors,
    /// Label text color.
    pub label_text: Color,
    /// Primary surface color.
    pub background: Color,
    /// Contrasting secondary surface color.
    pub background_alt: Color,
    /// Primary text color.
    pub text_primary: Color,
    /// Muted text color.
    pub text_secondary: Color,
    /// General outline color, `None` for no outlines.
    pub border: Option<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            button: ButtonColors::default(),
            dropdown: DropdownColors::default(),
            slider: SliderColors::default(),
            label_text: Color::WHITE,
            background: Color::rgb8(40, 40, 50),
            background_alt: Color::rgb8(30, 30, 38),
            text_primary: Color::WHITE,
            text_secondary: Color::rgb8(180, 180, 190),
            border: Some(Color::rgb8(90, 90, 110)),
        }
    }
}

fn midnight() -> Theme {
    Theme {
        button: ButtonColors {
            normal: Color::rgb8(45, 45, 68),
            hover: Color::rgb8(60, 60, 88),
            pressed: Color::rgb8(32, 32, 50),
            disabled: Color::rgb8(70, 70, 80),
            text: Color::rgb8(220, 220, 240),
            border: Some(Color::rgb8(90, 90, 130)),
        },
        dropdown: DropdownColors {
            normal: Color::rgb8(38, 38, 56),
            hover: Color::rgb8(50, 50, 72),
            expanded: Color::rgb8(44, 44, 64),
            text: Color::rgb8(220, 220, 240),
            option_normal: Color::rgb8(32, 32, 48),
            option_hover: Color::rgb8(46, 46, 66),
            option_selected: Color::rgb8(58, 58, 84),
            border: Some(Color::rgb8(80, 80, 120)),
        },
        slider: SliderColors {
            track: Color::rgb8(50, 50, 70),
            thumb_normal: Color::rgb8(110, 110, 170),
            thumb_hover: Color::rgb8(130, 130, 190),
            thumb_pressed: Color::rgb8(90, 90, 150),
            text: Color::rgb8(220, 220, 240),
        },
        label_text: Color::rgb8(220, 220, 240),
        background: Color::rgb8(18, 18, 28),
        background_alt: Color::rgb8(12, 12, 20),
        text_primary: Color::rgb8(230, 230, 245),
        text_secondary: Color::rgb8(140, 140, 170),
        border: Some(Color::rgb8(70, 70, 100)),
    }
}

fn matrix() -> Theme {
    Theme {
        button: ButtonColors {
            normal: Color::rgb8(0, 60, 0),
            hover: Color::rgb8(0, 90, 0),
            pressed: Color::rgb8(0, 40, 0),
            disabled: Color::rgb8(40, 50, 40),
            text: Color::rgb8(0, 255, 70),
            border: Some(Color::rgb8(0, 160, 40)),
        },
        dropdown: DropdownColors {
            normal: Color::rgb8(0, 40, 0),
            hover: Color::rgb8(0, 60, 0),
            expanded: Color::rgb8(0, 30, 0),
            text: Color::rgb8(0, 255, 70),
            option_normal: Color::rgb8(0, 25, 0),
            option_hover: Color::rgb8(0, 50, 0),
            option_selected: Color::rgb8(0, 70, 0),
            border: Some(Color::rgb8(0, 140, 40)),
        },
        slider: SliderColors {
            track: Color::rgb8(0, 40, 0),
            thumb_normal: Color::rgb8(0, 180, 50),
            thumb_hover: Color::rgb8(0, 220, 60),
            thumb_pressed: Color::rgb8(0, 140, 40),
            text: Color::rgb8(0, 255, 70),
        },
        label_text: Color::rgb8(0, 255, 70),
        background: Color::rgb8(0, 10, 0),
        background_alt: Color::rgb8(0, 18, 0),
        text_primary: Color::rgb8(0, 255, 70),
        text_secondary: Color::rgb8(0, 150, 50),
        border: Some(Color::rgb8(0, 120, 40)),
    }
}

fn ember() -> Theme {
    Theme {
        button: ButtonColors {
            normal: Color::rgb8(160, 60, 30),
            hover: Color::rgb8(190, 80, 40),
            pressed: Color::rgb8(130, 45, 22),
            disabled: Color::rgb8(110, 90, 80),
            text: Color::rgb8(255, 240, 225),
            border: Some(Color::rgb8(220, 120, 60)),
        },
        dropdown: DropdownColors {
            normal: Color::rgb8(70, 35, 25),
            hover: Color::rgb8(90, 45, 30),
            expanded: Color::rgb8(80, 40, 28),
            text: Color::rgb8(255, 235, 215),
            option_normal: Color::rgb8(60, 30, 22),
            option_hover: Color::rgb8(85, 42, 28),
            option_selected: Color::rgb8(110, 55, 32),
            border: Some(Color::rgb8(180, 95, 50)),
        },
        slider: SliderColors {
            track: Color::rgb8(70, 40, 30),
            thumb_normal: Color::rgb8(230, 110, 50),
            thumb_hover: Color::rgb8(250, 130, 60),
            thumb_pressed: Color::rgb8(200, 90, 40),
            text: Color::rgb8(255, 240, 225),
        },
        label_text: Color::rgb8(255, 240, 225),
        background: Color::rgb8(34, 20, 16),
        background_alt: Color::rgb8(26, 15, 12),
        text_primary: Color::rgb8(255, 245, 235),
        text_secondary: Color::rgb8(210, 160, 130),
        border: Some(Color::rgb8(150, 80, 45)),
    }
}

fn ocean() -> Theme {
    Theme {
        button: ButtonColors {
            normal: Color::rgb8(20, 90, 120),
            hover: Color::rgb8(28, 110, 145),
            pressed: Color::rgb8(14, 70, 95),
            disabled: Color::rgb8(80, 100, 110),
            text: Color::rgb8(230, 248, 255),
            border: Some(Color::rgb8(60, 150, 185)),
        },
        dropdown: DropdownColors {
            normal: Color::rgb8(16, 60, 80),
            hover: Color::rgb8(22, 75, 100),
            expanded: Color::rgb8(18, 68, 90),
            text: Color::rgb8(230, 248, 255),
            option_normal: Color::rgb8(13, 50, 68),
            option_hover: Color::rgb8(20, 70, 92),
            option_selected: Color::rgb8(28, 92, 120),
            border: Some(Color::rgb8(55, 135, 170)),
        },
        slider: SliderColors {
            track: Color::rgb8(18, 55, 72),
            thumb_normal: Color::rgb8(60, 170, 210),
            thumb_hover: Color::rgb8(80, 190, 230),
            thumb_pressed: Color::rgb8(45, 145, 185),
            text: Color::rgb8(230, 248, 255),
        },
        label_text: Color::rgb8(230, 248, 255),
        background: Color::rgb8(8, 28, 38),
        background_alt: Color::rgb8(5, 20, 28),
        text_primary: Color::rgb8(235, 250, 255),
        text_secondary: Color::rgb8(150, 195, 215),
        border: Some(Color::rgb8(45, 115, 145)),
    }
}

fn slate() -> Theme {
    Theme {
        button: ButtonColors {
            normal: Color::rgb8(100, 105, 115),
            hover: Color::rgb8(120, 125, 135),
            pressed: Color::rgb8(80, 85, 95),
            disabled: Color::rgb8(90, 90, 95),
            text: Color::rgb8(240, 240, 245),
            border: Some(Color::rgb8(150, 155, 165)),
        },
        dropdown: DropdownColors {
            normal: Color::rgb8(85, 90, 100),
            hover: Color::rgb8(100, 105, 115),
            expanded: Color::rgb8(92, 97, 107),
            text: Color::rgb8(240, 240, 245),
            option_normal: Color::rgb8(75, 80, 90),
            option_hover: Color::rgb8(95, 100, 110),
            option_selected: Color::rgb8(110, 115, 125),
            border: Some(Color::rgb8(140, 145, 155)),
        },
        slider: SliderColors {
            track: Color::rgb8(75, 80, 88),
            thumb_normal: Color::rgb8(170, 175, 185),
            thumb_hover: Color::rgb8(190, 195, 205),
            thumb_pressed: Color::rgb8(150, 155, 165),
            text: Color::rgb8(240, 240, 245),
        },
        label_text: Color::rgb8(240, 240, 245),
        background: Color::rgb8(48, 52, 60),
        background_alt: Color::rgb8(38, 42, 48),
        text_primary: Color::rgb8(245, 245, 250),
        text_secondary: Color::rgb8(170, 175, 185),
        border: Some(Color::rgb8(120, 125, 135)),
    }
}

/// Stores named themes and the active theme for the scene.
///
/// Construction seeds the fixed built-in set; additional themes can be
/// registered or overridden at runtime and loaded from TOML definitions.
#[derive(Debug)]
pub struct ThemeRegistry {
    themes: HashMap<String, Theme>,
    active: String,
}

impl ThemeRegistry {
    /// Creates a registry seeded with the built-in themes, with
    /// [`FALLBACK_THEME`] active.
    #[must_use]
    pub fn new() -> Self {
        let mut themes = HashMap::new();
        themes.insert(FALLBACK_THEME.to_owned(), Theme::default());
        themes.insert("midnight".to_owned(), midnight());
        themes.insert("matrix".to_owned(), matrix());
        themes.insert("ember".to_owned(), ember());
        themes.insert("ocean".to_owned(), ocean());
        themes.insert("slate".to_owned(), slate());

        Self {
            themes,
            active: FALLBACK_THEME.to_owned(),
        }
    }

    /// Looks up a theme by name. Never fails: unknown names resolve to the
    /// fallback theme.
    #[must_use]
    pub fn get(&self, name: &str) -> &Theme {
        if let Some(theme) = self.themes.get(name) {
            return theme;
        }
        tracing::debug!("theme {name:?} not registered, using fallback");
        self.themes
            .get(FALLBACK_THEME)
            .expect("fallback theme is seeded at construction")
    }

    /// Resolves an element's optional theme override against the active
    /// theme.
    #[must_use]
    pub fn resolve(&self, name: Option<&str>) -> &Theme {
        match name {
            Some(name) => self.get(name),
            None => self.active(),
        }
    }

    /// Returns the active theme.
    #[must_use]
    pub fn active(&self) -> &Theme {
        self.get(self.active.as_str())
    }

    /// Returns the active theme's name.
    #[must_use]
    pub fn active_name(&self) -> &str {
        &self.active
    }

    /// Sets the active theme. Returns false (leaving the active theme
    /// unchanged) when the name is not registered.
    ///
    /// Unlike [`ThemeRegistry::get`], this does not fall back: silently
    /// activating "default" would hide the caller's typo, while a lookup
    /// mid-frame has no better option than to keep drawing.
    pub fn set_active(&mut self, name: &str) -> bool {
        if self.themes.contains_key(name) {
            self.active = name.to_owned();
            true
        } else {
            tracing::warn!("cannot activate unknown theme {name:?}");
            false
        }
    }

    /// Registers or overrides a theme at runtime.
    pub fn set_theme(&mut self, name: impl Into<String>, theme: Theme) {
        self.themes.insert(name.into(), theme);
    }

    /// Returns true if a theme with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.themes.contains_key(name)
    }

    /// Returns all registered theme names.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.themes.keys().map(String::as_str).collect()
    }

    /// Loads theme definitions from a TOML document.
    ///
    /// The document is a table of `name -> theme` where every field is
    /// optional and missing fields degrade to the default theme's values.
    /// Returns the number of themes registered. A malformed document is a
    /// [`UiError::Configuration`]; callers that must not fail at startup
    /// can log and continue, the registry is left untouched on error.
    pub fn load_str(&mut self, toml_source: &str) -> UiResult<usize> {
        let parsed: HashMap<String, Theme> = toml::from_str(toml_source).map_err(|e| {
            tracing::warn!("rejected theme definition: {e}");
            UiError::Configuration(format!("theme definition: {e}"))
        })?;

        let count = parsed.len();
        for (name, theme) in parsed {
            self.themes.insert(name, theme);
        }
        Ok(count)
    }
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
