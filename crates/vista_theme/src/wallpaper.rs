//! Wallpaper mode applicator
//!
//! Drives the three mutually exclusive wallpaper states — fullscreen,
//! banner, none — through their timed transitions. The recorded mode
//! lives on the root `data-wallpaper-mode` attribute; layer visibility,
//! body transparency, the main-content offset, and navbar transparency
//! all derive from it.
//!
//! Leaving banner mode is special: the outgoing strip keeps its layout
//! slot for [`durations::BANNER_EXIT`] so it can slide out while the main
//! content moves up underneath it, and only then does the mode commit.
//!
//! Every apply bumps a generation counter. Deferred tails (timers, mount
//! waiters) compare their captured generation before touching the
//! document, so a superseded transition cannot finish destructively.

use crate::config::WallpaperOptions;
use crate::durations;
use crate::mode::{NavbarTransparency, WallpaperMode};
use crate::preference::Preferences;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vista_core::{node_ids, Document, NodeHandle, SchedulerHandle};

/// Root attribute recording the current wallpaper mode.
pub const WALLPAPER_MODE_ATTR: &str = "data-wallpaper-mode";
/// Root class held while a wallpaper transition is in flight.
pub const WALLPAPER_GUARD_CLASS: &str = "is-wallpaper-transitioning";
/// Root class held while the banner slides out of layout.
pub const BANNER_HIDING_CLASS: &str = "banner-hiding";
/// Root class suppressing transitions while the banner re-enters layout.
pub const BANNER_TRANSITION_CLASS: &str = "banner-transitioning";
/// Root class driving the one-shot banner reveal animation.
pub const BANNER_REVEAL_CLASS: &str = "show-banner-animation";
/// Body class keeping the page background transparent over a wallpaper.
pub const TRANSPARENT_CLASS: &str = "wallpaper-transparent";
/// Body class enabling banner-dependent layout rules.
pub const ENABLE_BANNER_CLASS: &str = "enable-banner";
/// Main-content class for the compact, bannerless layout.
pub const NO_BANNER_LAYOUT_CLASS: &str = "no-banner-layout";
/// Navbar attribute carrying the derived transparency style.
pub const NAVBAR_TRANSPARENCY_ATTR: &str = "data-transparent-mode";

const HIDDEN_CLASS: &str = "hidden";
const OPACITY_0_CLASS: &str = "opacity-0";
const OPACITY_100_CLASS: &str = "opacity-100";

/// Banner height as a viewport-height fraction.
pub const BANNER_HEIGHT_VH: f32 = 30.0;
/// How far the main panel overlaps the banner, in rem.
pub const BANNER_OVERLAP_REM: f32 = 0.0;
/// Main-content top offset without a banner, in rem.
pub const COMPACT_TOP_REM: f32 = 5.5;
/// Fullscreen layer opacity when the configuration leaves it unset.
pub const DEFAULT_FULLSCREEN_OPACITY: f32 = 0.8;

type Hook = Arc<dyn Fn() + Send + Sync>;

/// Initializers owned by other collaborators, dispatched at the right
/// points of a transition.
#[derive(Clone, Default)]
pub struct WallpaperHooks {
    banner_carousel: Option<Hook>,
    fullscreen_carousel: Option<Hook>,
    semifull_scroll: Option<Hook>,
}

impl WallpaperHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the banner image carousel when banner mode engages.
    pub fn with_banner_carousel(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.banner_carousel = Some(Arc::new(hook));
        self
    }

    /// Starts the fullscreen image carousel when fullscreen mode engages.
    pub fn with_fullscreen_carousel(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.fullscreen_carousel = Some(Arc::new(hook));
        self
    }

    /// Re-arms scroll detection when the navbar enters `semifull`.
    pub fn with_semifull_scroll(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.semifull_scroll = Some(Arc::new(hook));
        self
    }
}

/// Carousel bookkeeping, owned here rather than floating in host globals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CarouselState {
    pub index: usize,
    /// Scheduler time of the last image switch.
    pub last_switch: Option<Duration>,
}

pub struct WallpaperController {
    inner: Arc<Inner>,
}

struct Inner {
    document: Arc<Document>,
    scheduler: SchedulerHandle,
    preferences: Arc<Preferences>,
    options: WallpaperOptions,
    hooks: WallpaperHooks,
    generation: AtomicU64,
    /// Generation that started the current banner reveal (0 = none).
    reveal_owner: AtomicU64,
    carousel: Mutex<CarouselState>,
}

impl WallpaperController {
    pub fn new(
        document: Arc<Document>,
        scheduler: SchedulerHandle,
        preferences: Arc<Preferences>,
        hooks: WallpaperHooks,
    ) -> Self {
        let options = preferences.options().wallpaper.clone();
        Self {
            inner: Arc::new(Inner {
                document,
                scheduler,
                preferences,
                options,
                hooks,
                generation: AtomicU64::new(0),
                reveal_owner: AtomicU64::new(0),
                carousel: Mutex::new(CarouselState::default()),
            }),
        }
    }

    /// Mode currently recorded on the document, if any.
    pub fn current_mode(&self) -> Option<WallpaperMode> {
        self.inner.current_mode()
    }

    /// Apply `mode`, running the transition sequence. No-op when the
    /// recorded mode already equals the target and `force` is false.
    pub fn apply(&self, mode: WallpaperMode, force: bool) {
        self.inner.apply(mode, force);
    }

    /// Persist `mode` and apply it.
    pub fn set(&self, mode: WallpaperMode) {
        self.inner.preferences.set_wallpaper_mode(mode);
        self.inner.apply(mode, false);
    }

    /// Seed the document from the resolved preference at page load.
    pub fn init(&self) {
        self.inner.apply(self.inner.preferences.wallpaper_mode(), true);
    }

    /// Derived navbar transparency for `mode` (pure).
    pub fn navbar_transparency_for(&self, mode: WallpaperMode) -> NavbarTransparency {
        self.inner.navbar_transparency_for(mode)
    }

    /// Whether the transition guard is currently up.
    pub fn is_transitioning(&self) -> bool {
        self.inner
            .document
            .root()
            .has_class(WALLPAPER_GUARD_CLASS)
    }

    pub fn carousel(&self) -> CarouselState {
        *self.inner.carousel.lock().unwrap()
    }

    /// Record an image switch made by the carousel collaborator.
    pub fn record_carousel_switch(&self, index: usize) {
        let mut state = self.inner.carousel.lock().unwrap();
        state.index = index;
        state.last_switch = Some(self.inner.scheduler.now());
    }
}

impl Inner {
    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn current_mode(&self) -> Option<WallpaperMode> {
        self.document
            .root()
            .attr(WALLPAPER_MODE_ATTR)
            .and_then(|raw| raw.parse().ok())
    }

    fn apply(self: &Arc<Self>, mode: WallpaperMode, force: bool) {
        let current = self.current_mode();
        if !force && current == Some(mode) {
            return;
        }

        tracing::debug!(%mode, previous = ?current, force, "switching wallpaper mode");

        let root = self.document.root();
        root.set_attr(WALLPAPER_MODE_ATTR, mode.as_str());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Banner exit: the strip keeps its slot while it slides out, but
        // the layout underneath starts moving immediately.
        if current == Some(WallpaperMode::Banner) && mode != WallpaperMode::Banner {
            root.add_class(BANNER_HIDING_CLASS);
            self.adjust_main_offset(mode);
            self.update_navbar(mode);

            let inner = Arc::clone(self);
            self.scheduler.after(durations::BANNER_EXIT, move || {
                // Clearing the marker is safe even when superseded; only
                // the commit itself is generation-gated.
                inner.document.root().remove_class(BANNER_HIDING_CLASS);
                if inner.generation() == generation {
                    inner.execute(mode, generation);
                } else {
                    tracing::trace!(%mode, "banner exit superseded");
                }
            });
            return;
        }

        let inner = Arc::clone(self);
        self.scheduler
            .request_frame(move || inner.execute(mode, generation));
    }

    /// The committed part of a mode switch.
    fn execute(self: &Arc<Self>, mode: WallpaperMode, generation: u64) {
        if self.generation() != generation {
            tracing::trace!(%mode, "abandoning superseded wallpaper transition");
            return;
        }

        let root = self.document.root();
        let body = self.document.body();

        root.add_class(WALLPAPER_GUARD_CLASS);

        if mode.wants_transparency() {
            body.add_class(TRANSPARENT_CLASS);
        } else {
            // Ride the background fade before dropping transparency, and
            // leave it in place if a newer transition went transparent.
            let inner = Arc::clone(self);
            self.scheduler.after(durations::SURFACE_SETTLE, move || {
                let root = inner.document.root();
                let still_transitioning = root.has_class(WALLPAPER_GUARD_CLASS);
                let transparent_now = inner
                    .current_mode()
                    .is_some_and(|m| m.wants_transparency());
                if !still_transitioning || !transparent_now {
                    inner.document.body().remove_class(TRANSPARENT_CLASS);
                }
            });
        }

        body.set_class(ENABLE_BANNER_CLASS, mode == WallpaperMode::Banner);

        match mode {
            WallpaperMode::Banner => self.show_banner(generation),
            WallpaperMode::Fullscreen => {
                self.show_fullscreen(generation);
                self.set_main_transparency(true);
            }
            WallpaperMode::None => {
                self.show_none(generation);
                self.set_main_transparency(false);
            }
        }

        self.adjust_main_offset(mode);
        self.update_navbar(mode);

        if mode == WallpaperMode::Banner {
            // Static banner layers settle shortly after the switch even
            // when no carousel takes over.
            let inner = Arc::clone(self);
            self.scheduler
                .after(durations::STATIC_BANNER_INIT, move || {
                    inner.reveal_banner_layers();
                });
        }

        let inner = Arc::clone(self);
        self.scheduler
            .after(durations::WALLPAPER_TRANSITION, move || {
                if inner.generation() == generation {
                    inner.document.root().remove_class(WALLPAPER_GUARD_CLASS);
                }
            });
    }

    fn show_banner(self: &Arc<Self>, generation: u64) {
        // Fade the fullscreen layer now; drop it from layout once settled.
        if let Some(layer) = self.document.node(node_ids::FULLSCREEN_LAYER) {
            layer.set_style("opacity", "0");
            self.run_if_mode(
                WallpaperMode::Banner,
                generation,
                durations::WALLPAPER_TRANSITION,
                move |_| {
                    layer.add_class(HIDDEN_CLASS);
                },
            );
        }

        // The wrapper may not be constructed yet; park until it is.
        let inner = Arc::clone(self);
        self.document.when_mounted(
            node_ids::BANNER_WRAPPER,
            Box::new(move |wrapper| inner.reveal_banner_wrapper(wrapper, generation)),
        );
    }

    fn reveal_banner_wrapper(self: &Arc<Self>, wrapper: &NodeHandle, generation: u64) {
        if self.generation() != generation {
            return;
        }

        let root = self.document.root();
        let already_visible =
            !wrapper.has_class(HIDDEN_CLASS) && !root.has_class(BANNER_HIDING_CLASS);

        if !already_visible {
            root.remove_class(BANNER_HIDING_CLASS);
            root.add_class(BANNER_TRANSITION_CLASS);
            wrapper.remove_class(HIDDEN_CLASS);
            // The live page forces a reflow between these two steps; the
            // projection has no layout to flush.
            root.remove_class(BANNER_TRANSITION_CLASS);

            root.add_class(BANNER_REVEAL_CLASS);
            self.reveal_owner.store(generation, Ordering::SeqCst);
            let inner = Arc::clone(self);
            self.scheduler.after(durations::BANNER_REVEAL, move || {
                if inner
                    .reveal_owner
                    .compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst)
                    .is_ok()
                {
                    inner.document.root().remove_class(BANNER_REVEAL_CLASS);
                }
            });
        }

        wrapper.remove_class(OPACITY_0_CLASS);
        wrapper.add_class(OPACITY_100_CLASS);

        if let Some(hook) = &self.hooks.banner_carousel {
            hook();
        } else {
            let inner = Arc::clone(self);
            self.scheduler
                .after(durations::STATIC_BANNER_INIT, move || {
                    inner.reveal_banner_layers();
                });
        }
    }

    fn show_fullscreen(self: &Arc<Self>, generation: u64) {
        let inner = Arc::clone(self);
        self.document.when_mounted(
            node_ids::FULLSCREEN_LAYER,
            Box::new(move |layer| {
                if inner.generation() != generation {
                    return;
                }

                layer.remove_class(HIDDEN_CLASS);
                let opacity = inner
                    .options
                    .fullscreen
                    .opacity
                    .unwrap_or(DEFAULT_FULLSCREEN_OPACITY);
                layer.set_style("opacity", &opacity.to_string());

                if let Some(hook) = &inner.hooks.fullscreen_carousel {
                    hook();
                }

                if let Some(wrapper) = inner.document.node(node_ids::BANNER_WRAPPER) {
                    if inner.document.root().has_class(BANNER_HIDING_CLASS) {
                        // Let the exit animation finish before the strip
                        // leaves layout.
                        inner.run_if_mode(
                            WallpaperMode::Fullscreen,
                            generation,
                            durations::WALLPAPER_TRANSITION,
                            move |_| {
                                wrapper.add_class(HIDDEN_CLASS);
                            },
                        );
                    } else {
                        wrapper.add_class(HIDDEN_CLASS);
                    }
                }
            }),
        );
    }

    fn show_none(self: &Arc<Self>, generation: u64) {
        if let Some(wrapper) = self.document.node(node_ids::BANNER_WRAPPER) {
            wrapper.add_class(HIDDEN_CLASS);
        }
        if let Some(layer) = self.document.node(node_ids::FULLSCREEN_LAYER) {
            layer.set_style("opacity", "0");
            self.run_if_mode(
                WallpaperMode::None,
                generation,
                durations::WALLPAPER_TRANSITION,
                move |_| {
                    layer.add_class(HIDDEN_CLASS);
                },
            );
        }
    }

    /// Opacity classes on the banner layers themselves (desktop and
    /// mobile variants). Idempotent; missing layers are skipped.
    fn reveal_banner_layers(&self) {
        for id in [node_ids::BANNER, node_ids::MOBILE_BANNER] {
            if let Some(layer) = self.document.node(id) {
                layer.remove_class(OPACITY_0_CLASS);
                layer.add_class(OPACITY_100_CLASS);
            }
        }
    }

    fn adjust_main_offset(&self, mode: WallpaperMode) {
        let Some(main) = self.document.node(node_ids::MAIN_CONTENT) else {
            return;
        };
        main.remove_class(NO_BANNER_LAYOUT_CLASS);
        match mode {
            WallpaperMode::Banner => {
                main.set_style(
                    "top",
                    &format!("calc({BANNER_HEIGHT_VH}vh - {BANNER_OVERLAP_REM}rem)"),
                );
            }
            WallpaperMode::Fullscreen | WallpaperMode::None => {
                main.add_class(NO_BANNER_LAYOUT_CLASS);
                main.set_style("top", &format!("{COMPACT_TOP_REM}rem"));
            }
        }
    }

    fn set_main_transparency(&self, enable: bool) {
        if let Some(main) = self.document.node(node_ids::MAIN_CONTENT) {
            main.set_class(TRANSPARENT_CLASS, enable);
        }
    }

    fn navbar_transparency_for(&self, mode: WallpaperMode) -> NavbarTransparency {
        match mode {
            WallpaperMode::Fullscreen => self
                .options
                .fullscreen
                .navbar
                .transparent_mode
                .unwrap_or(NavbarTransparency::Semi),
            WallpaperMode::Banner => self
                .options
                .banner
                .navbar
                .transparent_mode
                .unwrap_or(NavbarTransparency::Semifull),
            WallpaperMode::None => NavbarTransparency::Semi,
        }
    }

    fn update_navbar(&self, mode: WallpaperMode) {
        let Some(navbar) = self.document.node(node_ids::NAVBAR) else {
            return;
        };
        let transparency = self.navbar_transparency_for(mode);
        navbar.set_attr(NAVBAR_TRANSPARENCY_ATTR, transparency.as_str());

        if transparency == NavbarTransparency::Semifull {
            if let Some(hook) = self.hooks.semifull_scroll.clone() {
                self.scheduler.request_frame(move || hook());
            }
        }
    }

    /// Standard tail-effect guard: run `effect` after `delay` only if the
    /// transition that scheduled it is still the latest and the document
    /// still records `mode`.
    fn run_if_mode(
        self: &Arc<Self>,
        mode: WallpaperMode,
        generation: u64,
        delay: Duration,
        effect: impl FnOnce(&Document) + Send + 'static,
    ) {
        let inner = Arc::clone(self);
        self.scheduler.after(delay, move || {
            if inner.generation() == generation && inner.current_mode() == Some(mode) {
                effect(&inner.document);
            }
        });
    }
}
