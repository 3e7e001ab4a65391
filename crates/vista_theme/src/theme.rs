//! Theme applicator
//!
//! Applies a theme preference to the document: the `dark` class on the
//! root, the companion `data-theme` highlight attribute, and the icon
//! variant. Idempotent against the document-reflected state, with a
//! transition guard held across the two-frame mutation window so hosts
//! can suppress per-property transitions while the whole palette flips.

use crate::config::ThemeOptions;
use crate::favicon;
use crate::mode::{ColorScheme, ThemeMode};
use crate::preference::Preferences;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use vista_core::{Document, SchedulerHandle};

/// Root class reflecting the resolved dark scheme.
pub const DARK_CLASS: &str = "dark";
/// Root attribute selecting the code-highlight theme.
pub const HIGHLIGHT_ATTR: &str = "data-theme";
/// Root class held while a theme transition is in flight.
pub const THEME_GUARD_CLASS: &str = "is-theme-transitioning";

/// Source of the OS-level color scheme, probed at apply time — never
/// cached, so a `System` preference tracks the OS between applications.
pub trait SchemeProbe: Send + Sync {
    fn detect(&self) -> ColorScheme;
}

/// Probe with a fixed answer, for hosts without system integration.
pub struct FixedScheme(pub ColorScheme);

impl SchemeProbe for FixedScheme {
    fn detect(&self) -> ColorScheme {
        self.0
    }
}

/// Probe backed by a shared cell the host updates from OS notifications.
#[derive(Clone)]
pub struct SharedScheme {
    scheme: Arc<RwLock<ColorScheme>>,
}

impl SharedScheme {
    pub fn new(initial: ColorScheme) -> Self {
        Self {
            scheme: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn set(&self, scheme: ColorScheme) {
        *self.scheme.write().unwrap() = scheme;
    }
}

impl SchemeProbe for SharedScheme {
    fn detect(&self) -> ColorScheme {
        *self.scheme.read().unwrap()
    }
}

pub struct ThemeController {
    document: Arc<Document>,
    scheduler: SchedulerHandle,
    probe: Arc<dyn SchemeProbe>,
    preferences: Arc<Preferences>,
    options: ThemeOptions,
    /// Bumped per effective apply; stale deferred frames abandon.
    generation: Arc<AtomicU64>,
    /// Generation that raised the transition guard (0 = not held).
    guard_owner: Arc<AtomicU64>,
}

impl ThemeController {
    pub fn new(
        document: Arc<Document>,
        scheduler: SchedulerHandle,
        probe: Arc<dyn SchemeProbe>,
        preferences: Arc<Preferences>,
    ) -> Self {
        let options = preferences.options().clone();
        Self {
            document,
            scheduler,
            probe,
            preferences,
            options,
            generation: Arc::new(AtomicU64::new(0)),
            guard_owner: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Resolve a preference to the scheme the document should show.
    pub fn resolve(&self, mode: ThemeMode) -> ColorScheme {
        match mode {
            ThemeMode::Light => ColorScheme::Light,
            ThemeMode::Dark => ColorScheme::Dark,
            ThemeMode::System => self.probe.detect(),
        }
    }

    /// Apply `mode` to the document.
    ///
    /// No-op when the resolved scheme and highlight theme already match
    /// the document and `force` is false. Otherwise the guard class goes
    /// up synchronously, the mutations land on the next frame, and the
    /// guard drops one frame later.
    pub fn apply(&self, mode: ThemeMode, force: bool) {
        let root = self.document.root();
        let scheme = self.resolve(mode);
        let target_dark = scheme.is_dark();
        let highlight = self.options.highlight.for_dark(target_dark).to_owned();

        let needs_scheme = root.has_class(DARK_CLASS) != target_dark;
        let needs_highlight = root.attr(HIGHLIGHT_ATTR).as_deref() != Some(highlight.as_str());
        if !force && !needs_scheme && !needs_highlight {
            return;
        }

        tracing::debug!(%mode, %scheme, force, needs_scheme, "applying theme");

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if needs_scheme {
            root.add_class(THEME_GUARD_CLASS);
            self.guard_owner.store(generation, Ordering::SeqCst);
        }

        let document = Arc::clone(&self.document);
        let scheduler = self.scheduler.clone();
        let generations = Arc::clone(&self.generation);
        let guard_owner = Arc::clone(&self.guard_owner);

        self.scheduler.request_frame(move || {
            let root = document.root();
            if generations.load(Ordering::SeqCst) != generation {
                // Superseded before the frame ran. Drop the guard only if
                // nothing newer took it over.
                if guard_owner
                    .compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    root.remove_class(THEME_GUARD_CLASS);
                }
                return;
            }

            if needs_scheme {
                root.set_class(DARK_CLASS, target_dark);
                favicon::apply_variant(&document, scheme);
            }
            root.set_attr(HIGHLIGHT_ATTR, &highlight);

            if needs_scheme {
                let document = Arc::clone(&document);
                let guard_owner = Arc::clone(&guard_owner);
                scheduler.request_frame(move || {
                    if guard_owner
                        .compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst)
                        .is_ok()
                    {
                        document.root().remove_class(THEME_GUARD_CLASS);
                    }
                });
            }
        });
    }

    /// Persist `mode` and apply it.
    pub fn set(&self, mode: ThemeMode) {
        self.preferences.set_theme(mode);
        self.apply(mode, false);
    }

    /// Seed the document from the resolved preference at page load.
    pub fn init(&self) {
        let mode = self.preferences.theme();
        self.apply(mode, true);
        favicon::apply_variant(&self.document, self.resolve(mode));
    }

    /// Host hook for OS scheme-change notifications. Only a stored
    /// `System` preference tracks the change.
    pub fn system_scheme_changed(&self) {
        if self.preferences.theme() == ThemeMode::System {
            self.apply(ThemeMode::System, false);
        }
    }

    /// Whether the transition guard is currently up.
    pub fn is_transitioning(&self) -> bool {
        self.document.root().has_class(THEME_GUARD_CLASS)
    }
}
