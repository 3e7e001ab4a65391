//! Widget descriptors
//!
//! A widget descriptor is the declarative record for one sidebar unit:
//! what it is, whether it renders, where it sits, and how it responds to
//! device width. Descriptors come from static configuration and are only
//! changed through the manager's mutation API.

use serde::{Deserialize, Serialize};

/// Built-in sidebar widget kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Profile,
    Announcement,
    Categories,
    Tags,
    /// Table of contents; only has content when the page has headings.
    Toc,
    Statistics,
    Custom,
}

/// Which sidebar a widget belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

/// Vertical region within a sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Fixed region at the top of the sidebar.
    Top,
    /// Sticky region that follows the scroll.
    Sticky,
}

/// Device width tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Tablet,
    Desktop,
}

/// How sidebars render on a given device tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Hidden,
    Bottom,
    Drawer,
    Sidebar,
}

/// Responsive behavior of one widget.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Responsive {
    /// Device tiers this widget is hidden on.
    pub hidden: Vec<Device>,
    /// Item count at which the widget collapses (inclusive).
    pub collapse_threshold: Option<u32>,
}

/// One sidebar widget's declarative configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub kind: WidgetKind,
    pub enable: bool,
    pub side: Side,
    /// Relative sort key among enabled widgets on the same side; ties
    /// keep declaration order.
    pub order: i32,
    pub placement: Placement,
    /// Extra inline style passed through to the rendered widget.
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub responsive: Responsive,
    /// Free-form options consumed by the widget implementation.
    #[serde(default)]
    pub custom_props: serde_json::Map<String, serde_json::Value>,
}

impl WidgetConfig {
    /// An enabled widget of `kind` with neutral placement defaults.
    pub fn new(kind: WidgetKind, side: Side, order: i32, placement: Placement) -> Self {
        Self {
            kind,
            enable: true,
            side,
            order,
            placement,
            style: None,
            responsive: Responsive::default(),
            custom_props: serde_json::Map::new(),
        }
    }
}

/// One page heading, used to decide whether a table of contents has
/// anything to show.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level, 1..=6.
    pub depth: u8,
    /// Anchor slug.
    pub slug: String,
    pub text: String,
}

impl Heading {
    pub fn new(depth: u8, slug: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            depth,
            slug: slug.into(),
            text: text.into(),
        }
    }
}
