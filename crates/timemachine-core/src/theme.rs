//! Color palette for the renderer
//!
//! A theme starts from one of the built-in presets and may override single
//! colors from the `[theme]` section of the configuration file.

use std::str::FromStr;

use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::{Deserialize, Deserializer};

/// Complete theme definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Preset name
    pub name: String,
    pub colors: ThemeColors,
    pub borders: BorderStyle,
}

/// Colors used by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    /// Regular text
    pub foreground: Color,
    /// Titles and the highlighted menu entry
    pub accent: Color,
    /// Background of the selected row
    pub selection: Color,
    /// Error line
    pub error: Color,
    /// Dirty working tree, rollback hazard
    pub warning: Color,
    /// Clean working tree, notices
    pub success: Color,
    /// Help lines and secondary text
    pub muted: Color,
}

/// Border style for panels
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Rounded,
    Square,
    Double,
    None,
}

impl BorderStyle {
    /// Border type for a bordered block, `None` when borders are disabled
    pub fn border_type(&self) -> Option<BorderType> {
        match self {
            BorderStyle::Rounded => Some(BorderType::Rounded),
            BorderStyle::Square => Some(BorderType::Plain),
            BorderStyle::Double => Some(BorderType::Double),
            BorderStyle::None => None,
        }
    }
}

/// `[theme]` configuration section: a preset plus optional per-color overrides
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// `dark` (default), `light` or `nord`
    pub preset: Option<String>,
    pub borders: Option<BorderStyle>,
    #[serde(deserialize_with = "color_opt")]
    pub foreground: Option<Color>,
    #[serde(deserialize_with = "color_opt")]
    pub accent: Option<Color>,
    #[serde(deserialize_with = "color_opt")]
    pub selection: Option<Color>,
    #[serde(deserialize_with = "color_opt")]
    pub error: Option<Color>,
    #[serde(deserialize_with = "color_opt")]
    pub warning: Option<Color>,
    #[serde(deserialize_with = "color_opt")]
    pub success: Option<Color>,
    #[serde(deserialize_with = "color_opt")]
    pub muted: Option<Color>,
}

/// Accepts color names (`red`, `darkgray`), `#rrggbb` and ANSI indexes
/// (`"208"` or `"indexed:208"`).
fn color_opt<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    parse_color(&raw)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown color: {}", raw)))
}

fn parse_color(raw: &str) -> Option<Color> {
    let raw = raw.trim();
    match raw.strip_prefix("indexed:") {
        Some(index) => index.parse::<u8>().ok().map(Color::Indexed),
        None => Color::from_str(raw).ok(),
    }
}

impl Theme {
    /// Default dark theme
    pub fn dark() -> Self {
        Theme {
            name: "dark".to_string(),
            colors: ThemeColors {
                foreground: Color::Rgb(205, 214, 244),
                accent: Color::Rgb(137, 180, 250),
                selection: Color::Rgb(69, 71, 90),
                error: Color::Rgb(243, 139, 168),
                warning: Color::Rgb(249, 226, 175),
                success: Color::Rgb(166, 227, 161),
                muted: Color::Rgb(127, 132, 156),
            },
            borders: BorderStyle::Rounded,
        }
    }

    pub fn light() -> Self {
        Theme {
            name: "light".to_string(),
            colors: ThemeColors {
                foreground: Color::Rgb(76, 79, 105),
                accent: Color::Rgb(30, 102, 245),
                selection: Color::Rgb(204, 208, 218),
                error: Color::Rgb(210, 15, 57),
                warning: Color::Rgb(223, 142, 29),
                success: Color::Rgb(64, 160, 43),
                muted: Color::Rgb(108, 111, 133),
            },
            borders: BorderStyle::Rounded,
        }
    }

    pub fn nord() -> Self {
        Theme {
            name: "nord".to_string(),
            colors: ThemeColors {
                foreground: Color::Rgb(236, 239, 244),
                accent: Color::Rgb(136, 192, 208),
                selection: Color::Rgb(67, 76, 94),
                error: Color::Rgb(191, 97, 106),
                warning: Color::Rgb(235, 203, 139),
                success: Color::Rgb(163, 190, 140),
                muted: Color::Rgb(129, 161, 193),
            },
            borders: BorderStyle::Square,
        }
    }

    /// Looks up a built-in preset by (case-insensitive) name
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dark" => Some(Theme::dark()),
            "light" => Some(Theme::light()),
            "nord" => Some(Theme::nord()),
            _ => None,
        }
    }

    /// Builds the theme described by a configuration section.
    ///
    /// # Errors
    ///
    /// Returns the offending name when the preset is unknown.
    pub fn from_config(config: &ThemeConfig) -> Result<Self, String> {
        let mut theme = match config.preset.as_deref() {
            Some(name) => Theme::preset(name).ok_or_else(|| name.to_string())?,
            None => Theme::default(),
        };

        let colors = &mut theme.colors;
        let overrides = [
            (&mut colors.foreground, config.foreground),
            (&mut colors.accent, config.accent),
            (&mut colors.selection, config.selection),
            (&mut colors.error, config.error),
            (&mut colors.warning, config.warning),
            (&mut colors.success, config.success),
            (&mut colors.muted, config.muted),
        ];
        for (slot, value) in overrides {
            if let Some(color) = value {
                *slot = color;
            }
        }
        if let Some(borders) = config.borders {
            theme.borders = borders;
        }
        Ok(theme)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}
