//! Vista Widget System
//!
//! Sidebar widget descriptors, the layout manager, and the responsive
//! grid derivation for the Vista presentation-state engine.
//!
//! # Overview
//!
//! Widgets are declared in static configuration; the manager filters and
//! orders the enabled ones, answers visibility questions per device tier,
//! and derives the structural grid classes for each layout region.
//!
//! # Quick Start
//!
//! ```rust
//! use vista_widgets::{Heading, SidebarConfig, WidgetManager};
//!
//! let manager = WidgetManager::new(SidebarConfig::default());
//!
//! let headings = [Heading::new(2, "intro", "Introduction")];
//! let grid = manager.grid_layout(&headings);
//! assert!(grid.has_left && grid.has_right);
//! ```

pub mod config;
pub mod grid;
pub mod manager;
pub mod widget;

pub use config::{ResponsiveLayout, SidebarConfig};
pub use grid::GridLayout;
pub use manager::WidgetManager;
pub use widget::{
    Device, Heading, LayoutMode, Placement, Responsive, Side, WidgetConfig, WidgetKind,
};
