//! Widget layout manager
//!
//! Owns the sidebar configuration and a cached view of the enabled
//! widgets, sorted by `order` with declaration order breaking ties.
//! Every mutation recomputes the cache synchronously before returning,
//! so readers never observe a stale view.

use crate::config::SidebarConfig;
use crate::grid::{self, GridLayout};
use crate::widget::{Device, Heading, LayoutMode, Placement, Side, WidgetConfig, WidgetKind};
use smallvec::SmallVec;

pub struct WidgetManager {
    config: SidebarConfig,
    enabled: Vec<WidgetConfig>,
}

impl WidgetManager {
    pub fn new(config: SidebarConfig) -> Self {
        let mut manager = Self {
            config,
            enabled: Vec::new(),
        };
        manager.recompute();
        manager
    }

    pub fn config(&self) -> &SidebarConfig {
        &self.config
    }

    /// Enabled widgets in render order.
    pub fn enabled(&self) -> &[WidgetConfig] {
        &self.enabled
    }

    fn recompute(&mut self) {
        self.enabled = self
            .config
            .components
            .iter()
            .filter(|w| w.enable)
            .cloned()
            .collect();
        // sort_by_key is stable: equal orders keep declaration order.
        self.enabled.sort_by_key(|w| w.order);
    }

    // ========== Queries ==========

    pub fn by_side(&self, side: Side) -> Vec<&WidgetConfig> {
        self.enabled.iter().filter(|w| w.side == side).collect()
    }

    pub fn by_placement(&self, placement: Placement) -> Vec<&WidgetConfig> {
        self.enabled
            .iter()
            .filter(|w| w.placement == placement)
            .collect()
    }

    pub fn by_side_and_placement(&self, side: Side, placement: Placement) -> Vec<&WidgetConfig> {
        self.enabled
            .iter()
            .filter(|w| w.side == side && w.placement == placement)
            .collect()
    }

    /// Responsive visibility classes for one widget.
    pub fn widget_classes(&self, widget: &WidgetConfig) -> String {
        let mut classes: SmallVec<[&str; 4]> = SmallVec::new();
        for device in &widget.responsive.hidden {
            match device {
                Device::Mobile => classes.extend(["hidden", "md:block"]),
                Device::Tablet => classes.extend(["md:hidden", "lg:block"]),
                Device::Desktop => classes.push("lg:hidden"),
            }
        }
        classes.join(" ")
    }

    /// Inline style string for one widget.
    pub fn widget_style(&self, widget: &WidgetConfig) -> String {
        widget.style.clone().unwrap_or_default()
    }

    /// Whether a widget collapses at `item_count` items. The configured
    /// threshold is an inclusive boundary; no threshold never collapses.
    pub fn is_collapsed(&self, widget: &WidgetConfig, item_count: u32) -> bool {
        widget
            .responsive
            .collapse_threshold
            .is_some_and(|threshold| item_count >= threshold)
    }

    /// Whether `device` renders sidebars at all. Always false when no
    /// widget is enabled, regardless of the configured layout mode.
    pub fn should_show_sidebar(&self, device: Device) -> bool {
        if self.enabled.is_empty() {
            return false;
        }
        self.config.responsive.for_device(device) == LayoutMode::Sidebar
    }

    /// Whether `side` has anything to actually show. A table of contents
    /// only counts when the page supplied headings; every other kind is
    /// assumed to have content.
    pub fn has_content_on_side(&self, side: Side, headings: &[Heading]) -> bool {
        let widgets = self.by_side(side);
        if widgets.is_empty() {
            return false;
        }
        widgets
            .iter()
            .any(|w| w.kind != WidgetKind::Toc || !headings.is_empty())
    }

    /// Derive the responsive grid for the current widget set.
    pub fn grid_layout(&self, headings: &[Heading]) -> GridLayout {
        grid::derive(self, headings)
    }

    // ========== Mutation ==========

    pub fn add(&mut self, widget: WidgetConfig) {
        tracing::debug!(kind = ?widget.kind, side = ?widget.side, "adding widget");
        self.config.components.push(widget);
        self.recompute();
    }

    pub fn remove(&mut self, kind: WidgetKind) {
        self.config.components.retain(|w| w.kind != kind);
        self.recompute();
    }

    pub fn toggle(&mut self, kind: WidgetKind, enable: bool) {
        if let Some(widget) = self.config.components.iter_mut().find(|w| w.kind == kind) {
            widget.enable = enable;
        }
        self.recompute();
    }

    pub fn reorder(&mut self, kind: WidgetKind, order: i32) {
        if let Some(widget) = self.config.components.iter_mut().find(|w| w.kind == kind) {
            widget.order = order;
        }
        self.recompute();
    }

    pub fn update_config(&mut self, config: SidebarConfig) {
        self.config = config;
        self.recompute();
    }
}

impl Default for WidgetManager {
    fn default() -> Self {
        Self::new(SidebarConfig::default())
    }
}
