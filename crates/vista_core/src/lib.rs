//! Vista Core Runtime
//!
//! This crate provides the foundational primitives for the Vista
//! presentation-state engine:
//!
//! - **Document Projection**: Class lists, data attributes, and style
//!   properties on a small set of named nodes, observable by the host
//! - **Cooperative Scheduler**: Frame and timer queues over a virtual
//!   clock, pumped by the host
//! - **Preference Storage**: A storage seam with in-memory and disabled
//!   backends
//!
//! # Example
//!
//! ```rust
//! use vista_core::{Document, FrameScheduler, NodeHandle};
//!
//! let document = Document::new();
//! let scheduler = FrameScheduler::new();
//!
//! document.mount(vista_core::node_ids::NAVBAR, NodeHandle::new());
//!
//! let root = document.root().clone();
//! scheduler.handle().request_frame(move || {
//!     root.add_class("dark");
//! });
//!
//! scheduler.run_frame();
//! assert!(document.root().has_class("dark"));
//! ```

pub mod document;
pub mod scheduler;
pub mod storage;

pub use document::{node_ids, Document, MountWaiter, NodeHandle, NodeState};
pub use scheduler::{FrameScheduler, SchedulerHandle, Task, TimerId};
pub use storage::{DisabledStorage, MemoryStorage, PreferenceStorage, StorageError};
