//! Node recycling pools - data shape only, recycling is disabled.
//!
//! Unmounted nodes could be parked here keyed by tag or component
//! identity and reclaimed on a later mount of the same type. The reuse
//! path is not wired up: [`Pools::pool`] appends and nothing currently
//! evicts or pops, so the maps are write-only. The shape is kept because
//! the patch engine's data contract includes it.

use std::collections::HashMap;
use std::rc::Rc;

use crate::iv::IvRef;
use crate::vnode::{VInput, VNode, VNodeType};

// =============================================================================
// Pool Keys
// =============================================================================

/// Identity a pooled node is filed under: element tag, or component
/// factory/render-function pointer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum PoolKey {
    Tag(String),
    Component(usize),
}

impl PoolKey {
    fn from_vnode(vnode: &VNode) -> Option<PoolKey> {
        match &vnode.vtype {
            VNodeType::Element(tag) => Some(PoolKey::Tag(tag.clone())),
            VNodeType::ClassComponent(factory) => {
                Some(PoolKey::Component(Rc::as_ptr(factory) as *const () as usize))
            }
            VNodeType::FunctionComponent(render) => {
                Some(PoolKey::Component(Rc::as_ptr(render) as *const () as usize))
            }
            VNodeType::Portal(_) => None,
        }
    }
}

// =============================================================================
// Pools
// =============================================================================

/// Per-type pool: a non-keyed list plus a key-to-list map.
#[derive(Default)]
pub struct TypePool {
    pub non_keyed: Vec<IvRef>,
    pub keyed: HashMap<String, Vec<IvRef>>,
}

/// All pools, keyed by node type.
#[derive(Default)]
pub struct Pools {
    entries: HashMap<PoolKey, TypePool>,
}

impl Pools {
    /// Park an internal node for its type. Append-only; nothing reads
    /// these entries back yet.
    pub fn pool(&mut self, iv: &IvRef) {
        let node = iv.borrow();
        let VInput::Node(vnode) = &node.input else {
            return;
        };
        let Some(key) = PoolKey::from_vnode(vnode) else {
            return;
        };
        let pool = self.entries.entry(key).or_default();
        match &vnode.key {
            Some(node_key) => pool
                .keyed
                .entry(node_key.clone())
                .or_default()
                .push(iv.clone()),
            None => pool.non_keyed.push(iv.clone()),
        }
    }

    pub fn get(&self, key: &PoolKey) -> Option<&TypePool> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
