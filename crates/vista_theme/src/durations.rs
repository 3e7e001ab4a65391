//! Transition durations
//!
//! Single source of truth for every timed window in the presentation
//! layer. The visual transition definitions on the host side must use the
//! same values; keeping them named here is what makes the coupling
//! explicit instead of a scatter of magic milliseconds.

use std::time::Duration;

/// Window a wallpaper transition guard stays up.
pub const WALLPAPER_TRANSITION: Duration = Duration::from_millis(600);

/// Delay between starting a banner exit and committing the mode switch.
/// Matches the banner slide-out transition.
pub const BANNER_EXIT: Duration = Duration::from_millis(600);

/// Length of the one-shot banner reveal animation.
pub const BANNER_REVEAL: Duration = Duration::from_millis(1200);

/// Settle time for background fades that ride alongside a mode switch.
pub const SURFACE_SETTLE: Duration = Duration::from_millis(300);

/// Grace period before the static (no-carousel) banner reveal kicks in.
pub const STATIC_BANNER_INIT: Duration = Duration::from_millis(100);
