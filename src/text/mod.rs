//! Text-measurement collaborator contract.
//!
//! Layout never draws text; it only needs the rendered extent of a string in
//! a given font. Production hosts measure against their real text stack and
//! implement [`TextMeasurer`]; the built-in [`CharGridMeasurer`] gives the
//! deterministic answers headless layout and tests rely on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub style: FontStyle,
    pub weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size: 12.0,
            style: FontStyle::Normal,
            weight: FontWeight::Normal,
        }
    }
}

impl Font {
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Contract implemented by the host's text stack.
///
/// Must be deterministic for identical inputs within one measuring pass.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &Font) -> TextSize;
}

/// Deterministic character-grid measurer.
///
/// Width is `char count * font size * width_ratio`, height is
/// `font size * line_height_ratio`. Bold text widens by `bold_ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharGridMeasurer {
    pub width_ratio: f64,
    pub line_height_ratio: f64,
    pub bold_ratio: f64,
}

impl Default for CharGridMeasurer {
    fn default() -> Self {
        Self {
            width_ratio: 0.6,
            line_height_ratio: 1.2,
            bold_ratio: 1.1,
        }
    }
}

impl TextMeasurer for CharGridMeasurer {
    fn measure(&self, text: &str, font: &Font) -> TextSize {
        if text.is_empty() {
            return TextSize::new(0.0, font.size * self.line_height_ratio);
        }

        let mut width = text.chars().count() as f64 * font.size * self.width_ratio;
        if font.weight == FontWeight::Bold {
            width *= self.bold_ratio;
        }

        TextSize::new(width, font.size * self.line_height_ratio)
    }
}
