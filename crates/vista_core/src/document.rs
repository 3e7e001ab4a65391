//! Document projection
//!
//! The document is the externally observable side of presentation state:
//! class lists, data attributes, and style properties on a small set of
//! named nodes. A host mounts its real UI containers under well-known ids
//! and mirrors whatever the controllers write here.
//!
//! Nodes can be mounted after controllers start running (page construction
//! races). Instead of polling, controllers park a waiter with
//! [`Document::when_mounted`] and the mount resolves it.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, RwLock};

/// Well-known node ids shared between controllers and hosts.
pub mod node_ids {
    pub const NAVBAR: &str = "navbar";
    pub const BANNER_WRAPPER: &str = "banner-wrapper";
    pub const BANNER: &str = "banner";
    pub const MOBILE_BANNER: &str = "mobile-banner";
    pub const FULLSCREEN_LAYER: &str = "fullscreen-wallpaper";
    pub const MAIN_CONTENT: &str = "main-content";
    pub const CONFIG_CARRIER: &str = "config-carrier";
    pub const FAVICON: &str = "favicon";
}

/// Classes, attributes, and style properties of one node.
///
/// Class order is preserved: hosts serialize the set back into markup and
/// the order is observable there.
#[derive(Debug, Default)]
pub struct NodeState {
    classes: IndexSet<String>,
    attrs: FxHashMap<String, String>,
    style: FxHashMap<String, String>,
}

/// Cheap clonable handle to a node's state.
#[derive(Clone, Debug, Default)]
pub struct NodeHandle {
    state: Arc<RwLock<NodeState>>,
}

impl NodeHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class. Returns false if it was already present.
    pub fn add_class(&self, class: &str) -> bool {
        self.state.write().unwrap().classes.insert(class.to_owned())
    }

    /// Remove a class. Returns false if it was not present.
    pub fn remove_class(&self, class: &str) -> bool {
        self.state.write().unwrap().classes.shift_remove(class)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.read().unwrap().classes.contains(class)
    }

    /// Add or remove a class based on `on`.
    pub fn set_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Snapshot of the class list in insertion order.
    pub fn classes(&self) -> Vec<String> {
        self.state.read().unwrap().classes.iter().cloned().collect()
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.state
            .write()
            .unwrap()
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.state.read().unwrap().attrs.get(name).cloned()
    }

    pub fn remove_attr(&self, name: &str) -> Option<String> {
        self.state.write().unwrap().attrs.remove(name)
    }

    pub fn set_style(&self, prop: &str, value: &str) {
        self.state
            .write()
            .unwrap()
            .style
            .insert(prop.to_owned(), value.to_owned());
    }

    pub fn style(&self, prop: &str) -> Option<String> {
        self.state.read().unwrap().style.get(prop).cloned()
    }
}

/// Callback resolved once a node is mounted.
pub type MountWaiter = Box<dyn FnOnce(&NodeHandle) + Send>;

/// The document: root and body nodes plus a registry of named mounts.
pub struct Document {
    root: NodeHandle,
    body: NodeHandle,
    nodes: RwLock<FxHashMap<String, NodeHandle>>,
    waiters: Mutex<FxHashMap<String, Vec<MountWaiter>>>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            root: NodeHandle::new(),
            body: NodeHandle::new(),
            nodes: RwLock::new(FxHashMap::default()),
            waiters: Mutex::new(FxHashMap::default()),
        }
    }

    /// The root node. Carries `data-theme`, `data-wallpaper-mode`, the
    /// `dark` class, and the transition-guard classes.
    pub fn root(&self) -> &NodeHandle {
        &self.root
    }

    /// The body node. Carries `wallpaper-transparent` and `enable-banner`.
    pub fn body(&self) -> &NodeHandle {
        &self.body
    }

    /// Mount a node under `id`, resolving any parked waiters.
    ///
    /// Mounting over an existing id replaces the node; waiters registered
    /// since the previous mount run against the new one.
    pub fn mount(&self, id: &str, node: NodeHandle) {
        self.nodes
            .write()
            .unwrap()
            .insert(id.to_owned(), node.clone());

        let pending = self.waiters.lock().unwrap().remove(id);
        if let Some(pending) = pending {
            tracing::debug!(id, waiters = pending.len(), "node mounted");
            for waiter in pending {
                waiter(&node);
            }
        }
    }

    pub fn unmount(&self, id: &str) -> Option<NodeHandle> {
        self.nodes.write().unwrap().remove(id)
    }

    pub fn node(&self, id: &str) -> Option<NodeHandle> {
        self.nodes.read().unwrap().get(id).cloned()
    }

    pub fn is_mounted(&self, id: &str) -> bool {
        self.nodes.read().unwrap().contains_key(id)
    }

    /// Get the node under `id`, mounting a fresh one if absent.
    pub fn ensure_node(&self, id: &str) -> NodeHandle {
        if let Some(node) = self.node(id) {
            return node;
        }
        let node = NodeHandle::new();
        self.mount(id, node.clone());
        node
    }

    /// Run `waiter` against the node under `id` as soon as it exists:
    /// immediately if already mounted, otherwise at mount time.
    pub fn when_mounted(&self, id: &str, waiter: MountWaiter) {
        if let Some(node) = self.node(id) {
            waiter(&node);
            return;
        }
        tracing::trace!(id, "parking waiter for unmounted node");
        self.waiters
            .lock()
            .unwrap()
            .entry(id.to_owned())
            .or_default()
            .push(waiter);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
