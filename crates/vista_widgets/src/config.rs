//! Sidebar configuration

use crate::widget::{Device, LayoutMode, Placement, Responsive, Side, WidgetConfig, WidgetKind};
use serde::{Deserialize, Serialize};

/// Complete sidebar configuration: the widget list plus per-device
/// layout modes. The default is the stock arrangement: profile,
/// announcement, categories, and tags on the left; table of contents and
/// statistics on the right; sidebars on every tier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SidebarConfig {
    pub components: Vec<WidgetConfig>,
    pub responsive: ResponsiveLayout,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        let collapsing = |threshold| Responsive {
            hidden: Vec::new(),
            collapse_threshold: Some(threshold),
        };

        let mut categories =
            WidgetConfig::new(WidgetKind::Categories, Side::Left, 3, Placement::Sticky);
        categories.responsive = collapsing(5);
        let mut tags = WidgetConfig::new(WidgetKind::Tags, Side::Left, 4, Placement::Sticky);
        tags.responsive = collapsing(20);

        let mut toc = WidgetConfig::new(WidgetKind::Toc, Side::Right, 1, Placement::Sticky);
        toc.custom_props
            .insert("depth".to_owned(), serde_json::json!(3));

        Self {
            components: vec![
                WidgetConfig::new(WidgetKind::Profile, Side::Left, 1, Placement::Top),
                WidgetConfig::new(WidgetKind::Announcement, Side::Left, 2, Placement::Top),
                categories,
                tags,
                toc,
                WidgetConfig::new(WidgetKind::Statistics, Side::Right, 2, Placement::Sticky),
            ],
            responsive: ResponsiveLayout::default(),
        }
    }
}

impl SidebarConfig {
    /// Configuration with no widgets at all.
    pub fn empty() -> Self {
        Self {
            components: Vec::new(),
            responsive: ResponsiveLayout::default(),
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

/// Per-device layout modes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveLayout {
    pub mobile: LayoutMode,
    pub tablet: LayoutMode,
    pub desktop: LayoutMode,
}

impl Default for ResponsiveLayout {
    fn default() -> Self {
        Self {
            mobile: LayoutMode::Sidebar,
            tablet: LayoutMode::Sidebar,
            desktop: LayoutMode::Sidebar,
        }
    }
}

impl ResponsiveLayout {
    pub fn for_device(&self, device: Device) -> LayoutMode {
        match device {
            Device::Mobile => self.mobile,
            Device::Tablet => self.tablet,
            Device::Desktop => self.desktop,
        }
    }
}
