//! Vista Theming System
//!
//! Theme and wallpaper mode controllers for the Vista presentation-state
//! engine, with layered preference persistence.
//!
//! # Overview
//!
//! - **Preference store**: session overlay → durable storage →
//!   page-embedded default → compiled default
//! - **Theme applicator**: light/dark/system with OS scheme probing,
//!   idempotent application, and a two-frame transition guard
//! - **Wallpaper applicator**: fullscreen/banner/none with guarded exit
//!   sequences and derived navbar/layout side effects
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use vista_core::{Document, FrameScheduler, MemoryStorage};
//! use vista_theme::{
//!     ColorScheme, FixedScheme, Preferences, ThemeController, ThemeOptions,
//!     WallpaperController, WallpaperHooks,
//! };
//!
//! let document = Arc::new(Document::new());
//! let scheduler = FrameScheduler::new();
//!
//! let preferences = Arc::new(Preferences::new(
//!     Arc::new(MemoryStorage::new()),
//!     Arc::clone(&document),
//!     ThemeOptions::default(),
//! ));
//!
//! let theme = ThemeController::new(
//!     Arc::clone(&document),
//!     scheduler.handle(),
//!     Arc::new(FixedScheme(ColorScheme::Dark)),
//!     Arc::clone(&preferences),
//! );
//! let wallpaper = WallpaperController::new(
//!     Arc::clone(&document),
//!     scheduler.handle(),
//!     Arc::clone(&preferences),
//!     WallpaperHooks::new(),
//! );
//!
//! theme.init();
//! wallpaper.init();
//! scheduler.advance_and_run(std::time::Duration::from_secs(2));
//!
//! assert!(document.root().has_class("dark"));
//! ```
//!
//! The controllers own their transition bookkeeping; the document is the
//! externally observable projection a host mirrors into real UI. All
//! degraded conditions — unavailable storage, unmounted containers,
//! unrecognized persisted values — fall back silently (worst case: the
//! visual state does not update).

pub mod config;
pub mod durations;
pub mod favicon;
pub mod mode;
pub mod preference;
pub mod theme;
pub mod wallpaper;

pub use config::{
    BannerOptions, FullscreenOptions, HighlightThemes, NavbarOptions, ThemeOptions,
    WallpaperOptions,
};
pub use favicon::IconVariant;
pub use mode::{ColorScheme, NavbarTransparency, ParseModeError, ThemeMode, WallpaperMode};
pub use preference::{Preferences, THEME_KEY, WALLPAPER_MODE_KEY};
pub use theme::{FixedScheme, SchemeProbe, SharedScheme, ThemeController};
pub use wallpaper::{CarouselState, WallpaperController, WallpaperHooks};
