//! Gallery configuration: `config.toml` loading and CSS variable generation.
//!
//! One file, sparse overrides — specify only what you change:
//!
//! ```toml
//! title = "Reklam & Tabela"
//! page_slug = "hizmetler"
//!
//! [colors.light]
//! background = "#fafafa"
//!
//! [[rules.category]]
//! id = "tabela"
//! keywords = ["tabela", "sign"]
//! ```
//!
//! Unknown keys are rejected to catch typos early. The `[rules]` section is
//! documented in [`crate::rules`].

use crate::rules::RulesConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Site-level gallery settings. All fields default; user files are sparse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Site title shown in the page header and `<title>`.
    pub title: String,
    /// Page id used in URL fragments: `#<page_slug>#<category>`.
    pub page_slug: String,
    /// Light/dark color schemes injected as CSS custom properties.
    pub colors: ColorConfig,
    /// Classification rule overrides; absent tables keep stock rules.
    pub rules: RulesConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        GalleryConfig {
            title: "Ürün Galerisi".to_string(),
            page_slug: "hizmetler".to_string(),
            colors: ColorConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    #[serde(default = "dark_defaults")]
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        ColorConfig {
            light: ColorScheme::default(),
            dark: dark_defaults(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub border: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        ColorScheme {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            accent: "#c8102e".to_string(),
            border: "#e0e0e0".to_string(),
        }
    }
}

fn dark_defaults() -> ColorScheme {
    ColorScheme {
        background: "#111111".to_string(),
        text: "#eeeeee".to_string(),
        accent: "#ff5a5f".to_string(),
        border: "#333333".to_string(),
    }
}

/// Load `config.toml` from `dir`, falling back to defaults if absent.
pub fn load_config(dir: &Path) -> Result<GalleryConfig, ConfigError> {
    let path = dir.join("config.toml");
    if !path.exists() {
        return Ok(GalleryConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    Ok(toml::from_str(&content)?)
}

/// Generate the CSS custom-property block the stylesheet consumes.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        ":root {{\n  --background: {};\n  --text: {};\n  --accent: {};\n  --border: {};\n}}\n\
         @media (prefers-color-scheme: dark) {{\n  :root {{\n    --background: {};\n    --text: {};\n    --accent: {};\n    --border: {};\n  }}\n}}\n",
        colors.light.background,
        colors.light.text,
        colors.light.accent,
        colors.light.border,
        colors.dark.background,
        colors.dark.text,
        colors.dark.accent,
        colors.dark.border,
    )
}

/// A fully documented stock `config.toml`, printed by `vitrin gen-config`.
pub fn stock_config_toml() -> String {
    r##"# vitrin configuration. Every key is optional; defaults shown.

# Site title shown in the page header and <title>.
title = "Ürün Galerisi"

# Page id used in URL fragments: #<page_slug>#<category>
page_slug = "hizmetler"

[colors.light]
background = "#ffffff"
text = "#1a1a1a"
accent = "#c8102e"
border = "#e0e0e0"

[colors.dark]
background = "#111111"
text = "#eeeeee"
accent = "#ff5a5f"
border = "#333333"

# Classification rules. Each table replaces its stock counterpart wholesale;
# row order is match-precedence order. Omit a table to keep stock rules.
#
# Gallery navigation order ('slide' is never shown):
#[rules]
#primary = ["tabela", "baski", "arac", "hediye", "plaket", "promosyon"]
#
#[[rules.category]]
#id = "tabela"
#keywords = ["tabela"]
#
#[[rules.subcategory]]
#category = "tabela"
#keywords = ["isikli", "kutu-harf", "yonlendirme", "totem", "cephe"]
#
# Legacy upload-timestamp ranges; set to [] once filenames are descriptive.
#[[rules.numeric_fallback]]
#range = [1400000000, 1401000000]
#category = "arac"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.page_slug, "hizmetler");
        assert_eq!(config.title, "Ürün Galerisi");
    }

    #[test]
    fn sparse_override_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "title = \"Tabela Dünyası\"\n").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Tabela Dünyası");
        assert_eq!(config.page_slug, "hizmetler");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "tilte = \"typo\"\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn rules_section_parses_into_rule_set() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
            [rules]
            primary = ["baski", "tabela"]
            "#,
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        let rules = RuleSet::from_config(&config.rules).unwrap();
        assert_eq!(rules.default_category(), crate::types::CategoryId::Baski);
    }

    #[test]
    fn color_css_contains_both_schemes() {
        let css = generate_color_css(&ColorConfig::default());
        assert!(css.contains("--background: #ffffff"));
        assert!(css.contains("prefers-color-scheme: dark"));
        assert!(css.contains("--background: #111111"));
    }

    #[test]
    fn stock_config_round_trips() {
        let config: GalleryConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(config.page_slug, "hizmetler");
    }
}
