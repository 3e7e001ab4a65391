//! Site-level theme configuration
//!
//! Compiled defaults for the controllers, loadable from TOML. Every field
//! has a serde default so a partial file is valid configuration.

use crate::mode::{NavbarTransparency, ThemeMode, WallpaperMode};
use serde::{Deserialize, Serialize};

/// Top-level theme options.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeOptions {
    /// Theme used when neither storage nor the page supplies one.
    pub default_theme: ThemeMode,
    pub highlight: HighlightThemes,
    pub wallpaper: WallpaperOptions,
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self {
            default_theme: ThemeMode::Dark,
            highlight: HighlightThemes::default(),
            wallpaper: WallpaperOptions::default(),
        }
    }
}

impl ThemeOptions {
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

/// Code-highlight theme pair, selected by the resolved color scheme and
/// reflected as the root `data-theme` attribute.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightThemes {
    pub light: String,
    pub dark: String,
}

impl Default for HighlightThemes {
    fn default() -> Self {
        Self {
            light: "github-light".to_owned(),
            dark: "github-dark".to_owned(),
        }
    }
}

impl HighlightThemes {
    pub fn for_dark(&self, dark: bool) -> &str {
        if dark {
            &self.dark
        } else {
            &self.light
        }
    }
}

/// Wallpaper configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallpaperOptions {
    /// Wallpaper mode when neither storage nor the page supplies one.
    pub mode: WallpaperMode,
    pub fullscreen: FullscreenOptions,
    pub banner: BannerOptions,
}

impl Default for WallpaperOptions {
    fn default() -> Self {
        Self {
            mode: WallpaperMode::Banner,
            fullscreen: FullscreenOptions::default(),
            banner: BannerOptions::default(),
        }
    }
}

/// Options for the full-bleed wallpaper layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullscreenOptions {
    /// Layer opacity in `0.0..=1.0`; the controller falls back to 0.8.
    pub opacity: Option<f32>,
    pub navbar: NavbarOptions,
}

/// Options for the banner strip.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerOptions {
    pub navbar: NavbarOptions,
}

/// Per-mode navbar overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarOptions {
    /// Transparency style; each wallpaper mode has its own fallback.
    pub transparent_mode: Option<NavbarTransparency>,
}
