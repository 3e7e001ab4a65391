//! Visual mode enumerations
//!
//! Each mode is one value from a small closed set, reflected as a single
//! document attribute or class. The string forms double as the persisted
//! representation, so parsing is strict: anything unrecognized is rejected
//! at the boundary and callers fall back to their configured default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Failure to parse a persisted or page-supplied mode string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized {kind} value: {value:?}")]
pub struct ParseModeError {
    kind: &'static str,
    value: String,
}

impl ParseModeError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// User-facing theme preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    /// Follow the OS color scheme, re-probed at every application.
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(ParseModeError::new("theme", other)),
        }
    }
}

/// Resolved color scheme — what the document actually shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }

    pub fn toggle(&self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wallpaper presentation mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallpaperMode {
    /// Full-bleed layer behind the whole page.
    Fullscreen,
    /// Header banner strip above the main content.
    Banner,
    None,
}

impl WallpaperMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WallpaperMode::Fullscreen => "fullscreen",
            WallpaperMode::Banner => "banner",
            WallpaperMode::None => "none",
        }
    }

    /// Whether the body background must stay transparent in this mode.
    pub fn wants_transparency(&self) -> bool {
        matches!(self, WallpaperMode::Fullscreen | WallpaperMode::Banner)
    }
}

impl fmt::Display for WallpaperMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WallpaperMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fullscreen" => Ok(WallpaperMode::Fullscreen),
            "banner" => Ok(WallpaperMode::Banner),
            "none" => Ok(WallpaperMode::None),
            other => Err(ParseModeError::new("wallpaper", other)),
        }
    }
}

/// Navbar transparency styles, derived from the wallpaper mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarTransparency {
    /// Always semi-transparent.
    Semi,
    /// Fully transparent.
    Full,
    /// Fully transparent at the top, semi once scrolled.
    Semifull,
}

impl NavbarTransparency {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavbarTransparency::Semi => "semi",
            NavbarTransparency::Full => "full",
            NavbarTransparency::Semifull => "semifull",
        }
    }
}

impl fmt::Display for NavbarTransparency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NavbarTransparency {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "semi" => Ok(NavbarTransparency::Semi),
            "full" => Ok(NavbarTransparency::Full),
            "semifull" => Ok(NavbarTransparency::Semifull),
            other => Err(ParseModeError::new("navbar transparency", other)),
        }
    }
}
