//! Runtime - the explicitly owned context object threaded through mount.
//!
//! Hosts construct one [`Runtime`] per root (or share one across roots)
//! and pass it by reference into the mount entry point. It owns the
//! pieces that would otherwise be process-wide registries: the optional
//! render/mount hooks, the instance-to-DOM lookup used by
//! `find_dom_node`, and the (inert) recycling pools. Tearing a root down
//! is `clear_dom_index` plus dropping the runtime - no global state to
//! unwind.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::dom::DomNode;
use crate::pool::Pools;
use crate::vnode::{ClassHandle, PropValue, VNode};

// =============================================================================
// Context
// =============================================================================

/// Immutable key/value context flowing down the mount recursion.
///
/// Class components can extend it for their subtree via
/// [`crate::vnode::Component::child_context`]; extension clones, it never
/// mutates the parent's view.
#[derive(Clone, Default)]
pub struct Context {
    entries: Rc<HashMap<String, PropValue>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion, for hosts and child-context providers.
    pub fn with(self, key: &str, value: impl Into<PropValue>) -> Self {
        let mut entries = (*self.entries).clone();
        entries.insert(key.to_string(), value.into());
        Self {
            entries: Rc::new(entries),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A context containing this one's entries overlaid with `extra`.
    pub fn extended(&self, extra: &Context) -> Context {
        if extra.is_empty() {
            return self.clone();
        }
        let mut entries = (*self.entries).clone();
        for (key, value) in extra.entries.iter() {
            entries.insert(key.clone(), value.clone());
        }
        Context {
            entries: Rc::new(entries),
        }
    }
}

// =============================================================================
// Options
// =============================================================================

/// Host-owned configuration consulted (read-only) during mount.
#[derive(Clone, Default)]
pub struct Options {
    /// Invoked with the instance right after a class component's initial
    /// render step.
    pub after_render: Option<Rc<dyn Fn(&ClassHandle)>>,
    /// Invoked with the original view node from the flushed class
    /// did-mount event.
    pub after_mount: Option<Rc<dyn Fn(&VNode)>>,
    /// When true, class component mounts record instance -> DOM so
    /// [`Runtime::find_dom_node`] can answer later lookups.
    pub find_dom_node_enabled: bool,
}

// =============================================================================
// Runtime
// =============================================================================

/// Owned mount context: options, instance-to-DOM index, recycling pools.
#[derive(Default)]
pub struct Runtime {
    pub options: Options,
    dom_index: RefCell<HashMap<usize, DomNode>>,
    pub pools: RefCell<Pools>,
}

impl Runtime {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            dom_index: RefCell::new(HashMap::new()),
            pools: RefCell::new(Pools::default()),
        }
    }

    pub(crate) fn register_instance_dom(&self, handle: &ClassHandle, dom: &DomNode) {
        self.dom_index
            .borrow_mut()
            .insert(handle.ptr_id(), dom.clone());
    }

    /// Look up the DOM anchor recorded for a class component instance.
    ///
    /// Only populated while `Options::find_dom_node_enabled` is true.
    pub fn find_dom_node(&self, handle: &ClassHandle) -> Option<DomNode> {
        self.dom_index.borrow().get(&handle.ptr_id()).cloned()
    }

    /// Drop all instance -> DOM records (root teardown).
    pub fn clear_dom_index(&self) {
        self.dom_index.borrow_mut().clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
