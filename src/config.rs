//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults are
//! overridden by the user's file in the source directory; the file only
//! needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_path = "assets/data/content.json"  # Relative to the source dir
//!
//! [site]
//! title = "Portfolio"
//! author = ""
//! description = ""
//! url = ""
//!
//! [layout]
//! sections = ["profileAvatar", "skillsContainer", ...]  # Mount points
//!
//! [carousel.articles]
//! autoplay = true
//! autoplay_delay_ms = 6000
//! loop = true
//! swipe = true
//!
//! [navigation]
//! header_offset = 80        # Fixed header height subtracted on anchor scroll
//! scrolled_threshold = 100  # Scroll distance before the navbar compacts
//! active_offset = 100       # Lead distance when highlighting sections
//!
//! [reveal]
//! threshold = 0.1
//! root_margin = "0px 0px -50px 0px"
//!
//! [avatar]
//! max_bytes = 5242880
//! size = 300
//! quality = 90
//!
//! [colors.dark]
//! background = "#0a0a0f"
//! ...
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::carousel::CarouselOptions;
use crate::page::MountId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Name of the config file looked up in the source directory.
pub const CONFIG_FILENAME: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path of the content document, relative to the source directory.
    pub content_path: String,
    pub site: SiteMeta,
    pub layout: LayoutConfig,
    pub carousel: CarouselsConfig,
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub avatar: AvatarConfig,
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_path: "assets/data/content.json".to_string(),
            site: SiteMeta::default(),
            layout: LayoutConfig::default(),
            carousel: CarouselsConfig::default(),
            navigation: NavigationConfig::default(),
            reveal: RevealConfig::default(),
            avatar: AvatarConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Validation(
                "reveal.threshold must be between 0 and 1".into(),
            ));
        }
        if self.avatar.quality == 0 || self.avatar.quality > 100 {
            return Err(ConfigError::Validation(
                "avatar.quality must be 1-100".into(),
            ));
        }
        if self.avatar.size == 0 {
            return Err(ConfigError::Validation(
                "avatar.size must be non-zero".into(),
            ));
        }
        for (name, carousel) in self.carousel.named() {
            if carousel.autoplay && carousel.autoplay_delay_ms == 0 {
                return Err(ConfigError::Validation(format!(
                    "carousel.{name}.autoplay_delay_ms must be non-zero when autoplay is on"
                )));
            }
        }
        for section in &self.layout.sections {
            if MountId::from_id(section).is_none() {
                return Err(ConfigError::Validation(format!(
                    "layout.sections: unknown mount point '{section}'"
                )));
            }
        }
        Ok(())
    }
}

/// Page metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteMeta {
    pub title: String,
    pub author: String,
    pub description: String,
    /// Canonical URL of the published site, if known.
    pub url: String,
}

impl Default for SiteMeta {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            author: String::new(),
            description: String::new(),
            url: String::new(),
        }
    }
}

/// Which mount points the page template provides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub sections: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sections: MountId::DEFAULT_LAYOUT
                .iter()
                .map(|m| m.id().to_string())
                .collect(),
        }
    }
}

/// Settings for one carousel section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub autoplay: bool,
    pub autoplay_delay_ms: u64,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub swipe: bool,
}

impl CarouselConfig {
    fn with_delay(ms: u64) -> Self {
        Self {
            autoplay_delay_ms: ms,
            ..Self::default()
        }
    }

    pub fn options(&self) -> CarouselOptions {
        CarouselOptions {
            autoplay: self.autoplay,
            autoplay_delay: Duration::from_millis(self.autoplay_delay_ms),
            looping: self.looping,
            swipe: self.swipe,
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            autoplay_delay_ms: 5000,
            looping: true,
            swipe: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselsConfig {
    pub articles: CarouselConfig,
    pub publications: CarouselConfig,
    pub media: CarouselConfig,
}

impl CarouselsConfig {
    fn named(&self) -> [(&'static str, &CarouselConfig); 3] {
        [
            ("articles", &self.articles),
            ("publications", &self.publications),
            ("media", &self.media),
        ]
    }
}

impl Default for CarouselsConfig {
    fn default() -> Self {
        Self {
            articles: CarouselConfig::with_delay(6000),
            publications: CarouselConfig::with_delay(7000),
            media: CarouselConfig::with_delay(8000),
        }
    }
}

/// Navbar scroll geometry, in CSS pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavigationConfig {
    pub header_offset: f64,
    pub scrolled_threshold: f64,
    pub active_offset: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            scrolled_threshold: 100.0,
            active_offset: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

/// Profile picture upload limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AvatarConfig {
    /// Largest accepted upload, in bytes.
    pub max_bytes: u64,
    /// Edge of the square bounding box the picture is fitted into.
    pub size: u32,
    /// JPEG quality (1-100).
    pub quality: u8,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            max_bytes: 5 * 1024 * 1024,
            size: 300,
            quality: 90,
        }
    }
}

/// Color configuration for the two themes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub dark: ColorScheme,
    pub light: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            dark: ColorScheme::default_dark(),
            light: ColorScheme::default_light(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Card and navbar background.
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    pub accent: String,
    pub border: String,
}

impl ColorScheme {
    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0f".to_string(),
            surface: "#15151f".to_string(),
            text: "#f0f0f5".to_string(),
            text_muted: "#9a9ab0".to_string(),
            accent: "#667eea".to_string(),
            border: "#2a2a3a".to_string(),
        }
    }

    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            surface: "#f5f5fa".to_string(),
            text: "#111118".to_string(),
            text_muted: "#5a5a70".to_string(),
            accent: "#764ba2".to_string(),
            border: "#e0e0ea".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_dark()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `site.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `site.toml` in the given directory, on top of stock
/// defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    if overlay.is_none() {
        tracing::debug!("no {CONFIG_FILENAME} in {}, using defaults", dir.display());
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `site.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Content document, relative to the source directory.
content_path = "assets/data/content.json"

# ---------------------------------------------------------------------------
# Page metadata
# ---------------------------------------------------------------------------
[site]
title = "Portfolio"
author = ""
description = ""
# Canonical URL of the published site.
url = ""

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Mount points present on the page. A section whose mount point is missing
# is simply not rendered. Use experienceTimeline + educationTimeline for a
# split journey, or journeyTimeline for a single combined timeline.
sections = [
    "profileAvatar",
    "skillsContainer",
    "experienceTimeline",
    "educationTimeline",
    "articlesCarousel",
    "publicationsCarousel",
    "mediaCarousel",
    "statsGrid",
    "followersWidget",
    "qrCode",
    "searchResults",
]

# ---------------------------------------------------------------------------
# Carousels
# ---------------------------------------------------------------------------
[carousel.articles]
autoplay = true
autoplay_delay_ms = 6000
loop = true
swipe = true

[carousel.publications]
autoplay = true
autoplay_delay_ms = 7000
loop = true
swipe = true

[carousel.media]
autoplay = true
autoplay_delay_ms = 8000
loop = true
swipe = true

# ---------------------------------------------------------------------------
# Navigation (CSS pixels)
# ---------------------------------------------------------------------------
[navigation]
# Fixed header height subtracted when scrolling to an anchor.
header_offset = 80.0
# Scroll distance after which the navbar gets the "scrolled" class.
scrolled_threshold = 100.0
# How far ahead of a section's top it becomes the active nav link.
active_offset = 100.0

# ---------------------------------------------------------------------------
# Reveal-on-scroll
# ---------------------------------------------------------------------------
[reveal]
threshold = 0.1
root_margin = "0px 0px -50px 0px"

# ---------------------------------------------------------------------------
# Profile picture uploads
# ---------------------------------------------------------------------------
[avatar]
# Largest accepted file (5 MiB).
max_bytes = 5242880
# Pictures are fitted into a size x size box.
size = 300
quality = 90

# ---------------------------------------------------------------------------
# Colors - dark theme (default)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0f"
surface = "#15151f"
text = "#f0f0f5"
text_muted = "#9a9ab0"
accent = "#667eea"
border = "#2a2a3a"

# ---------------------------------------------------------------------------
# Colors - light theme
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
surface = "#f5f5fa"
text = "#111118"
text_muted = "#5a5a70"
accent = "#764ba2"
border = "#e0e0ea"
"##
}

fn scheme_css(selector: &str, scheme: &ColorScheme) -> String {
    format!(
        r#"{selector} {{
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-border: {border};
}}"#,
        background = scheme.background,
        surface = scheme.surface,
        text = scheme.text,
        text_muted = scheme.text_muted,
        accent = scheme.accent,
        border = scheme.border,
    )
}

/// Generate CSS custom properties for both themes, keyed on the root
/// element's `data-theme` attribute. Dark applies when the attribute is
/// absent.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        "{}\n\n{}",
        scheme_css(r#":root, [data-theme="dark"]"#, &colors.dark),
        scheme_css(r#"[data-theme="light"]"#, &colors.light),
    )
}
