use anyhow::{Context, Result};

use crate::layout::{PageGeometry, TextStyle};

/// Application configuration loaded from environment variables.
///
/// Every layout variable is optional; defaults are the briefing viewport the
/// reader renders (380×520 px page, 32 px padding, 48 px footer, 14 px text
/// at 1.8 line height with 0.1 em word spacing).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub page_width: f32,
    pub page_height: f32,
    pub page_padding: f32,
    pub footer_height: f32,
    pub font_size_px: f32,
    pub line_height: f32,
    pub word_spacing_em: f32,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            page_width: 380.0,
            page_height: 520.0,
            page_padding: 32.0,
            footer_height: 48.0,
            font_size_px: 14.0,
            line_height: 1.8,
            word_spacing_em: 0.1,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            page_width: env_f32("PAGE_WIDTH", defaults.page_width)?,
            page_height: env_f32("PAGE_HEIGHT", defaults.page_height)?,
            page_padding: env_f32("PAGE_PADDING", defaults.page_padding)?,
            footer_height: env_f32("FOOTER_HEIGHT", defaults.footer_height)?,
            font_size_px: env_f32("FONT_SIZE_PX", defaults.font_size_px)?,
            line_height: env_f32("LINE_HEIGHT", defaults.line_height)?,
            word_spacing_em: env_f32("WORD_SPACING_EM", defaults.word_spacing_em)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry {
            page_width: self.page_width,
            page_height: self.page_height,
            padding: self.page_padding,
            footer_height: self.footer_height,
        }
    }

    pub fn text_style(&self) -> TextStyle {
        TextStyle {
            font_size_px: self.font_size_px,
            line_height: self.line_height,
            word_spacing_em: self.word_spacing_em,
        }
    }
}

fn env_f32(key: &str, default: f32) -> Result<f32> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<f32>()
            .with_context(|| format!("'{key}' must be a number, got '{value}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reader_viewport() {
        let config = Config::default();
        assert_eq!(config.page_width, 380.0);
        assert_eq!(config.page_height, 520.0);
        assert_eq!(config.page_padding, 32.0);
        assert_eq!(config.footer_height, 48.0);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_geometry_and_style_projection() {
        let config = Config::default();
        let geometry = config.geometry();
        assert_eq!(geometry.content_width(), 316.0);
        assert_eq!(geometry.available_height(), 400.0);
        assert_eq!(config.text_style(), TextStyle::default());
    }
}
