//! End-to-end transition behavior, driven over virtual time.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use vista_core::{node_ids, Document, FrameScheduler, MemoryStorage, NodeHandle};
use vista_theme::wallpaper::{
    BANNER_HIDING_CLASS, BANNER_REVEAL_CLASS, ENABLE_BANNER_CLASS, NO_BANNER_LAYOUT_CLASS,
    TRANSPARENT_CLASS,
};
use vista_theme::{
    ColorScheme, FixedScheme, NavbarTransparency, Preferences, SharedScheme, ThemeController,
    ThemeMode, ThemeOptions, WallpaperController, WallpaperHooks, WallpaperMode,
};

const MS: Duration = Duration::from_millis(1);

struct Fixture {
    document: Arc<Document>,
    scheduler: FrameScheduler,
    probe: SharedScheme,
    theme: ThemeController,
    wallpaper: WallpaperController,
}

fn fixture_with(options: ThemeOptions, hooks: WallpaperHooks) -> Fixture {
    let document = Arc::new(Document::new());
    for id in [
        node_ids::NAVBAR,
        node_ids::BANNER_WRAPPER,
        node_ids::BANNER,
        node_ids::FULLSCREEN_LAYER,
        node_ids::MAIN_CONTENT,
    ] {
        document.mount(id, NodeHandle::new());
    }

    let scheduler = FrameScheduler::new();
    let preferences = Arc::new(Preferences::new(
        Arc::new(MemoryStorage::new()),
        Arc::clone(&document),
        options,
    ));
    let probe = SharedScheme::new(ColorScheme::Dark);
    let theme = ThemeController::new(
        Arc::clone(&document),
        scheduler.handle(),
        Arc::new(probe.clone()),
        Arc::clone(&preferences),
    );
    let wallpaper = WallpaperController::new(
        Arc::clone(&document),
        scheduler.handle(),
        preferences,
        hooks,
    );

    Fixture {
        document,
        scheduler,
        probe,
        theme,
        wallpaper,
    }
}

fn fixture() -> Fixture {
    fixture_with(ThemeOptions::default(), WallpaperHooks::new())
}

fn settle(f: &Fixture) {
    f.scheduler.advance_and_run(Duration::from_secs(3));
}

// ===== Theme =====

#[test]
fn theme_guard_spans_exactly_the_two_frame_window() {
    let f = fixture();
    let root = f.document.root();

    f.theme.apply(ThemeMode::Dark, false);
    assert!(f.theme.is_transitioning(), "guard raised synchronously");
    assert!(!root.has_class("dark"), "mutation deferred to next frame");

    f.scheduler.run_frame();
    assert!(root.has_class("dark"));
    assert_eq!(root.attr("data-theme").as_deref(), Some("github-dark"));
    assert!(f.theme.is_transitioning(), "guard held through mutation frame");

    f.scheduler.run_frame();
    assert!(!f.theme.is_transitioning(), "guard dropped one frame later");
}

#[test]
fn reapplying_same_theme_is_a_no_op() {
    let f = fixture();
    f.theme.apply(ThemeMode::Dark, false);
    settle(&f);

    f.theme.apply(ThemeMode::Dark, false);
    assert_eq!(f.scheduler.pending_frame_tasks(), 0, "nothing re-queued");
    assert!(!f.theme.is_transitioning());
}

#[test]
fn system_theme_probes_at_every_application() {
    let f = fixture();
    f.probe.set(ColorScheme::Light);
    f.theme.set(ThemeMode::System);
    settle(&f);
    assert!(!f.document.root().has_class("dark"));

    f.probe.set(ColorScheme::Dark);
    f.theme.system_scheme_changed();
    settle(&f);
    assert!(f.document.root().has_class("dark"));
}

#[test]
fn scheme_change_is_ignored_unless_preference_is_system() {
    let f = fixture();
    f.probe.set(ColorScheme::Light);
    f.theme.set(ThemeMode::Dark);
    settle(&f);
    assert!(f.document.root().has_class("dark"));

    f.probe.set(ColorScheme::Light);
    f.theme.system_scheme_changed();
    settle(&f);
    assert!(
        f.document.root().has_class("dark"),
        "explicit preference pins the scheme"
    );
}

#[test]
fn superseded_theme_frame_abandons_without_leaking_guard() {
    let f = fixture();
    // First apply wants a scheme flip; the second, queued before any
    // frame runs, supersedes it with a highlight-only change.
    f.theme.apply(ThemeMode::Dark, false);
    f.theme.apply(ThemeMode::Light, false);
    settle(&f);

    let root = f.document.root();
    assert!(!root.has_class("dark"), "stale dark flip never landed");
    assert_eq!(root.attr("data-theme").as_deref(), Some("github-light"));
    assert!(!f.theme.is_transitioning(), "abandoned guard was released");
}

#[test]
fn init_applies_stored_preference_and_icon() {
    let f = fixture();
    let carrier = NodeHandle::new();
    carrier.set_attr(
        "data-favicons",
        r#"[{"src":"/icon-dark.png","theme":"dark"},{"src":"/icon-light.png","theme":"light"}]"#,
    );
    f.document.mount(node_ids::CONFIG_CARRIER, carrier);

    f.theme.init();
    settle(&f);

    assert!(f.document.root().has_class("dark"), "compiled default is dark");
    let favicon = f.document.node(node_ids::FAVICON).expect("icon node created");
    assert_eq!(favicon.attr("href").as_deref(), Some("/icon-dark.png"));
    assert_eq!(favicon.attr("rel").as_deref(), Some("icon"));
}

// ===== Wallpaper =====

#[test]
fn reapplying_current_wallpaper_mode_is_a_no_op() {
    let f = fixture();
    f.wallpaper.init();
    settle(&f);
    assert_eq!(f.wallpaper.current_mode(), Some(WallpaperMode::Banner));

    f.wallpaper.apply(WallpaperMode::Banner, false);
    assert!(f.scheduler.is_idle(), "no transition re-triggered");
    assert!(!f.wallpaper.is_transitioning());
}

#[test]
fn fullscreen_and_banner_layers_are_mutually_exclusive() {
    let f = fixture();
    f.wallpaper.init();
    settle(&f);

    f.wallpaper.apply(WallpaperMode::Fullscreen, false);
    settle(&f);

    let wrapper = f.document.node(node_ids::BANNER_WRAPPER).unwrap();
    let layer = f.document.node(node_ids::FULLSCREEN_LAYER).unwrap();
    assert!(wrapper.has_class("hidden"), "banner gone once settled");
    assert!(!layer.has_class("hidden"));
    assert_eq!(layer.style("opacity").as_deref(), Some("0.8"));
    assert!(f.document.body().has_class(TRANSPARENT_CLASS));

    f.wallpaper.apply(WallpaperMode::Banner, false);
    settle(&f);
    assert!(!wrapper.has_class("hidden"));
    assert!(layer.has_class("hidden"), "fullscreen gone once settled");
    assert_eq!(layer.style("opacity").as_deref(), Some("0"));
}

#[test]
fn banner_exit_commits_only_after_the_exit_window() {
    let f = fixture();
    f.wallpaper.init();
    settle(&f);

    let root = f.document.root();
    let main = f.document.node(node_ids::MAIN_CONTENT).unwrap();
    let wrapper = f.document.node(node_ids::BANNER_WRAPPER).unwrap();
    assert_eq!(main.style("top").as_deref(), Some("calc(30vh - 0rem)"));

    f.wallpaper.apply(WallpaperMode::None, false);

    // Concurrent layout effects land immediately; the strip stays put.
    assert!(root.has_class(BANNER_HIDING_CLASS));
    assert_eq!(main.style("top").as_deref(), Some("5.5rem"));
    assert!(main.has_class(NO_BANNER_LAYOUT_CLASS));
    assert!(!wrapper.has_class("hidden"), "element hide is deferred");

    f.scheduler.advance_and_run(599 * MS);
    assert!(root.has_class(BANNER_HIDING_CLASS));
    assert!(!wrapper.has_class("hidden"));

    f.scheduler.advance_and_run(MS);
    assert!(!root.has_class(BANNER_HIDING_CLASS), "marker clears with commit");
    assert!(wrapper.has_class("hidden"), "hide lands with commit");
    assert!(!f.document.body().has_class(ENABLE_BANNER_CLASS));
}

#[test]
fn leaving_transparency_waits_for_the_surface_fade() {
    let f = fixture();
    f.wallpaper.init();
    settle(&f);
    assert!(f.document.body().has_class(TRANSPARENT_CLASS));

    f.wallpaper.apply(WallpaperMode::None, false);
    f.scheduler.advance_and_run(600 * MS); // exit window commits here
    assert!(
        f.document.body().has_class(TRANSPARENT_CLASS),
        "transparency rides the background fade"
    );

    f.scheduler.advance_and_run(299 * MS);
    assert!(f.document.body().has_class(TRANSPARENT_CLASS));
    f.scheduler.advance_and_run(MS);
    assert!(!f.document.body().has_class(TRANSPARENT_CLASS));
}

#[test]
fn banner_reveal_animation_is_one_shot() {
    let f = fixture();
    let wrapper = f.document.node(node_ids::BANNER_WRAPPER).unwrap();
    wrapper.add_class("hidden");

    f.wallpaper.apply(WallpaperMode::Banner, true);
    f.scheduler.run_frame();
    assert!(!wrapper.has_class("hidden"));

    let root = f.document.root();
    assert!(root.has_class(BANNER_REVEAL_CLASS));
    f.scheduler.advance_and_run(1199 * MS);
    assert!(root.has_class(BANNER_REVEAL_CLASS));
    f.scheduler.advance_and_run(MS);
    assert!(!root.has_class(BANNER_REVEAL_CLASS));
}

#[test]
fn reentering_banner_mid_exit_abandons_the_stale_commit() {
    let f = fixture();
    f.wallpaper.init();
    settle(&f);

    f.wallpaper.apply(WallpaperMode::None, false);
    f.scheduler.advance_and_run(100 * MS);
    f.wallpaper.apply(WallpaperMode::Banner, false);
    settle(&f);

    let wrapper = f.document.node(node_ids::BANNER_WRAPPER).unwrap();
    assert_eq!(f.wallpaper.current_mode(), Some(WallpaperMode::Banner));
    assert!(
        !wrapper.has_class("hidden"),
        "stale exit commit must not hide the re-entered banner"
    );
    assert!(!f.document.root().has_class(BANNER_HIDING_CLASS));
    assert!(f.document.body().has_class(ENABLE_BANNER_CLASS));
    assert!(!f.wallpaper.is_transitioning());
}

#[test]
fn banner_apply_waits_for_wrapper_mount() {
    let document = Arc::new(Document::new());
    document.mount(node_ids::MAIN_CONTENT, NodeHandle::new());

    let scheduler = FrameScheduler::new();
    let preferences = Arc::new(Preferences::new(
        Arc::new(MemoryStorage::new()),
        Arc::clone(&document),
        ThemeOptions::default(),
    ));
    let wallpaper = WallpaperController::new(
        Arc::clone(&document),
        scheduler.handle(),
        preferences,
        WallpaperHooks::new(),
    );

    wallpaper.init();
    scheduler.advance_and_run(Duration::from_secs(3));
    assert_eq!(wallpaper.current_mode(), Some(WallpaperMode::Banner));

    // The wrapper shows up late; the parked reveal resolves on mount.
    let wrapper = NodeHandle::new();
    wrapper.add_class("hidden");
    document.mount(node_ids::BANNER_WRAPPER, wrapper.clone());
    scheduler.advance_and_run(Duration::from_secs(3));

    assert!(!wrapper.has_class("hidden"));
    assert!(wrapper.has_class("opacity-100"));
}

#[test]
fn navbar_transparency_derivation_uses_per_mode_fallbacks() {
    let options = ThemeOptions::from_toml_str(
        r#"
        [wallpaper.fullscreen.navbar]
        transparent_mode = "full"
        "#,
    )
    .unwrap();
    let f = fixture_with(options, WallpaperHooks::new());

    assert_eq!(
        f.wallpaper.navbar_transparency_for(WallpaperMode::Fullscreen),
        NavbarTransparency::Full
    );
    assert_eq!(
        f.wallpaper.navbar_transparency_for(WallpaperMode::Banner),
        NavbarTransparency::Semifull
    );
    assert_eq!(
        f.wallpaper.navbar_transparency_for(WallpaperMode::None),
        NavbarTransparency::Semi
    );
}

#[test]
fn semifull_navbar_rearms_scroll_detection() {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits2 = Arc::clone(&hits);
    let hooks = WallpaperHooks::new().with_semifull_scroll(move || {
        hits2.fetch_add(1, Ordering::SeqCst);
    });
    let f = fixture_with(ThemeOptions::default(), hooks);

    f.wallpaper.apply(WallpaperMode::Banner, true); // banner defaults to semifull
    settle(&f);
    assert!(hits.load(Ordering::SeqCst) >= 1);
}

#[test]
fn banner_carousel_hook_replaces_static_reveal() {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits2 = Arc::clone(&hits);
    let hooks = WallpaperHooks::new().with_banner_carousel(move || {
        hits2.fetch_add(1, Ordering::SeqCst);
    });
    let f = fixture_with(ThemeOptions::default(), hooks);

    f.wallpaper.apply(WallpaperMode::Banner, true);
    settle(&f);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn carousel_bookkeeping_tracks_scheduler_time() {
    let f = fixture();
    assert_eq!(f.wallpaper.carousel().last_switch, None);

    f.scheduler.advance(Duration::from_secs(5));
    f.wallpaper.record_carousel_switch(3);

    let state = f.wallpaper.carousel();
    assert_eq!(state.index, 3);
    assert_eq!(state.last_switch, Some(Duration::from_secs(5)));
}

#[test]
fn wallpaper_transition_guard_clears_after_window() {
    let f = fixture();
    f.wallpaper.apply(WallpaperMode::Fullscreen, true);
    f.scheduler.run_frame();
    assert!(f.wallpaper.is_transitioning());

    f.scheduler.advance_and_run(599 * MS);
    assert!(f.wallpaper.is_transitioning());
    f.scheduler.advance_and_run(MS);
    assert!(!f.wallpaper.is_transitioning());
}

#[test]
fn unknown_stored_wallpaper_mode_falls_back_to_config_default() {
    let f = fixture();
    // Preference layer rejects garbage before it reaches the applicator.
    let storage = Arc::new(MemoryStorage::new());
    use vista_core::PreferenceStorage;
    storage.write("wallpaperMode", "kaleidoscope").unwrap();

    let preferences = Arc::new(Preferences::new(
        storage,
        Arc::clone(&f.document),
        ThemeOptions::default(),
    ));
    assert_eq!(preferences.wallpaper_mode(), WallpaperMode::Banner);
}

#[test]
fn fullscreen_opacity_comes_from_configuration() {
    let options = ThemeOptions::from_toml_str(
        r#"
        [wallpaper.fullscreen]
        opacity = 0.5
        "#,
    )
    .unwrap();
    let f = fixture_with(options, WallpaperHooks::new());

    f.wallpaper.apply(WallpaperMode::Fullscreen, true);
    settle(&f);

    let layer = f.document.node(node_ids::FULLSCREEN_LAYER).unwrap();
    assert_eq!(layer.style("opacity").as_deref(), Some("0.5"));
}

// A scheme probe that counts how often the OS is consulted.
struct CountingProbe(AtomicUsize);

impl vista_theme::SchemeProbe for CountingProbe {
    fn detect(&self) -> ColorScheme {
        self.0.fetch_add(1, Ordering::SeqCst);
        ColorScheme::Dark
    }
}

#[test]
fn explicit_modes_never_consult_the_probe() {
    let document = Arc::new(Document::new());
    let scheduler = FrameScheduler::new();
    let preferences = Arc::new(Preferences::new(
        Arc::new(MemoryStorage::new()),
        Arc::clone(&document),
        ThemeOptions::default(),
    ));
    let probe = Arc::new(CountingProbe(AtomicUsize::new(0)));
    let theme = ThemeController::new(
        Arc::clone(&document),
        scheduler.handle(),
        Arc::clone(&probe) as Arc<dyn vista_theme::SchemeProbe>,
        preferences,
    );

    theme.apply(ThemeMode::Light, false);
    theme.apply(ThemeMode::Dark, false);
    scheduler.advance_and_run(Duration::from_secs(1));
    assert_eq!(probe.0.load(Ordering::SeqCst), 0);

    theme.apply(ThemeMode::System, false);
    scheduler.advance_and_run(Duration::from_secs(1));
    assert_eq!(probe.0.load(Ordering::SeqCst), 1);
}

#[test]
fn fixed_scheme_probe_is_constant() {
    let probe = FixedScheme(ColorScheme::Light);
    use vista_theme::SchemeProbe;
    assert_eq!(probe.detect(), ColorScheme::Light);
}
