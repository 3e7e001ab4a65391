//! Responsive grid derivation
//!
//! Pure derivation of the page grid from the current widget set: which
//! sidebars exist, which device tiers show them, and the structural class
//! strings for each region. The column layout depends on which of the two
//! sidebars are visible at each tier — four cases per tier.
//!
//! The result is ephemeral: recomputed per render, never persisted.

use crate::manager::WidgetManager;
use crate::widget::{Device, Heading, Side};
use smallvec::SmallVec;

/// Rail width shared by both sidebars.
const RAIL: &str = "17.5rem";

/// Derived visibility flags and structural classes for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub has_left: bool,
    pub has_right: bool,
    pub mobile_sidebar: bool,
    pub tablet_sidebar: bool,
    pub desktop_sidebar: bool,
    pub grid_cols: String,
    pub left_sidebar: String,
    pub right_sidebar: String,
    pub main_content: String,
}

pub(crate) fn derive(manager: &WidgetManager, headings: &[Heading]) -> GridLayout {
    let has_left = manager.has_content_on_side(Side::Left, headings);
    let has_right = manager.has_content_on_side(Side::Right, headings);
    let any = has_left || has_right;

    let mobile = any && manager.should_show_sidebar(Device::Mobile);
    let tablet = any && manager.should_show_sidebar(Device::Tablet);
    let desktop = any && manager.should_show_sidebar(Device::Desktop);

    let mut grid_cols: SmallVec<[String; 3]> = SmallVec::new();
    grid_cols.push("grid-cols-1".into());
    grid_cols.push(if tablet {
        format!("md:grid-cols-[{RAIL}_1fr]")
    } else {
        "md:grid-cols-1".into()
    });
    grid_cols.push(if desktop {
        match (has_left, has_right) {
            (true, true) => format!("lg:grid-cols-[{RAIL}_1fr_{RAIL}]"),
            (true, false) => format!("lg:grid-cols-[{RAIL}_1fr]"),
            _ => format!("lg:grid-cols-[1fr_{RAIL}]"),
        }
    } else {
        "lg:grid-cols-1".into()
    });

    let mut left: SmallVec<[String; 4]> = SmallVec::new();
    left.push("mb-0 col-span-1".into());
    left.push(if mobile && has_left {
        "block row-start-2 row-end-3".into()
    } else {
        "hidden".into()
    });
    left.push(if tablet && has_left {
        format!("md:block md:max-w-[{RAIL}]")
    } else {
        "md:hidden".into()
    });
    left.push(if desktop && has_left {
        format!("lg:block lg:max-w-[{RAIL}] lg:col-start-1 lg:col-end-2 lg:row-start-1 lg:row-end-2")
    } else {
        "lg:hidden".into()
    });

    let mut right: SmallVec<[String; 4]> = SmallVec::new();
    right.push("mb-0 col-span-1".into());
    right.push(if mobile && has_right {
        "block row-start-3 row-end-4".into()
    } else {
        "hidden".into()
    });
    right.push(if tablet && has_right {
        format!("md:block md:max-w-[{RAIL}]")
    } else {
        "md:hidden".into()
    });
    right.push(if desktop && has_right {
        if has_left {
            format!("lg:block lg:max-w-[{RAIL}] lg:col-start-3 lg:col-end-4 lg:row-start-1 lg:row-end-2")
        } else {
            format!("lg:block lg:max-w-[{RAIL}] lg:col-start-2 lg:col-end-3 lg:row-start-1 lg:row-end-2")
        }
    } else {
        "lg:hidden".into()
    });

    let mut main: SmallVec<[String; 3]> = SmallVec::new();
    main.push("overflow-hidden w-full col-span-1 row-start-1 row-end-2".into());
    main.push(if tablet {
        "md:col-start-2 md:col-end-3 md:row-start-1 md:row-end-2".into()
    } else {
        "md:col-span-1".into()
    });
    main.push(if desktop {
        if has_left {
            "lg:col-start-2 lg:col-end-3 lg:row-start-1 lg:row-end-2".into()
        } else if has_right {
            "lg:col-start-1 lg:col-end-2 lg:row-start-1 lg:row-end-2".into()
        } else {
            "lg:col-span-1".into()
        }
    } else {
        "lg:col-span-1".into()
    });

    GridLayout {
        has_left,
        has_right,
        mobile_sidebar: mobile,
        tablet_sidebar: tablet,
        desktop_sidebar: desktop,
        grid_cols: grid_cols.join(" "),
        left_sidebar: left.join(" "),
        right_sidebar: right.join(" "),
        main_content: main.join(" "),
    }
}
