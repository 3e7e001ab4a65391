//! Layered preference resolution
//!
//! A preference read resolves through three layers: the session overlay
//! (what this session last set, durable or not), the host's storage
//! backend, then the page-embedded default on the config carrier, then
//! the compiled default. Writes always land in the session overlay first;
//! a failing durable write is logged and swallowed so the feature
//! degrades to session-only persistence.

use crate::config::ThemeOptions;
use crate::mode::{ThemeMode, WallpaperMode};
use rustc_hash::FxHashMap;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use vista_core::{node_ids, Document, PreferenceStorage};

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";
/// Storage key for the wallpaper mode preference.
pub const WALLPAPER_MODE_KEY: &str = "wallpaperMode";

/// Config-carrier data attribute holding the page default theme.
pub const CARRIER_THEME_ATTR: &str = "data-theme";
/// Config-carrier data attribute holding the page default wallpaper mode.
pub const CARRIER_WALLPAPER_ATTR: &str = "data-wallpaper-mode";

pub struct Preferences {
    storage: Arc<dyn PreferenceStorage>,
    document: Arc<Document>,
    options: ThemeOptions,
    session: RwLock<FxHashMap<String, String>>,
}

impl Preferences {
    pub fn new(
        storage: Arc<dyn PreferenceStorage>,
        document: Arc<Document>,
        options: ThemeOptions,
    ) -> Self {
        Self {
            storage,
            document,
            options,
            session: RwLock::new(FxHashMap::default()),
        }
    }

    pub fn options(&self) -> &ThemeOptions {
        &self.options
    }

    /// Resolved theme preference.
    pub fn theme(&self) -> ThemeMode {
        self.resolve(THEME_KEY, CARRIER_THEME_ATTR, self.options.default_theme)
    }

    /// Resolved wallpaper mode preference.
    pub fn wallpaper_mode(&self) -> WallpaperMode {
        self.resolve(
            WALLPAPER_MODE_KEY,
            CARRIER_WALLPAPER_ATTR,
            self.options.wallpaper.mode,
        )
    }

    pub fn set_theme(&self, mode: ThemeMode) {
        self.store(THEME_KEY, mode.as_str());
    }

    pub fn set_wallpaper_mode(&self, mode: WallpaperMode) {
        self.store(WALLPAPER_MODE_KEY, mode.as_str());
    }

    fn resolve<M>(&self, key: &str, carrier_attr: &str, fallback: M) -> M
    where
        M: FromStr + Copy,
    {
        if let Some(raw) = self.raw(key) {
            match raw.parse() {
                Ok(mode) => return mode,
                Err(_) => {
                    tracing::warn!(key, value = %raw, "ignoring unrecognized stored preference");
                }
            }
        }
        if let Some(raw) = self.carrier_attr(carrier_attr) {
            if let Ok(mode) = raw.parse() {
                return mode;
            }
            tracing::warn!(attr = carrier_attr, value = %raw, "ignoring unrecognized page default");
        }
        fallback
    }

    /// Session overlay first, then the durable backend.
    fn raw(&self, key: &str) -> Option<String> {
        if let Some(value) = self.session.read().unwrap().get(key) {
            return Some(value.clone());
        }
        self.storage.read(key)
    }

    fn carrier_attr(&self, attr: &str) -> Option<String> {
        self.document.node(node_ids::CONFIG_CARRIER)?.attr(attr)
    }

    fn store(&self, key: &str, value: &str) {
        self.session
            .write()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        if let Err(err) = self.storage.write(key, value) {
            tracing::warn!(key, %err, "preference not persisted; keeping session value");
        }
    }
}
