//! In-memory DOM - the document surface the mount engine writes to.
//!
//! The mount path consumes a deliberately small DOM surface: element and
//! text node creation, namespace-aware attribute/class setting, text
//! content, and a parent-relative "insert before anchor or append"
//! primitive. This module provides exactly that surface over
//! reference-counted nodes so hosts (and the test suite) can inspect the
//! produced tree.
//!
//! Nodes are shared handles: cloning a [`DomNode`] clones the handle, not
//! the node. Identity is pointer identity ([`DomNode::ptr_eq`]).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

// =============================================================================
// Node Types
// =============================================================================

/// Element namespace. SVG elements live in their own namespace and take
/// their class via `setAttribute("class", ..)` instead of the className
/// property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
}

enum NodeKind {
    Element {
        tag: String,
        namespace: Namespace,
        attributes: IndexMap<String, String>,
        class_name: Option<String>,
    },
    Text {
        text: String,
    },
}

struct NodeData {
    kind: NodeKind,
    parent: Option<Weak<RefCell<NodeData>>>,
    children: Vec<DomNode>,
}

/// Shared handle to one DOM node.
#[derive(Clone)]
pub struct DomNode {
    inner: Rc<RefCell<NodeData>>,
}

// =============================================================================
// Constructors
// =============================================================================

/// Create a detached element node in the given namespace.
pub fn create_element(tag: &str, namespace: Namespace) -> DomNode {
    DomNode {
        inner: Rc::new(RefCell::new(NodeData {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                namespace,
                attributes: IndexMap::new(),
                class_name: None,
            },
            parent: None,
            children: Vec::new(),
        })),
    }
}

/// Create a detached text node.
pub fn create_text(text: &str) -> DomNode {
    DomNode {
        inner: Rc::new(RefCell::new(NodeData {
            kind: NodeKind::Text {
                text: text.to_string(),
            },
            parent: None,
            children: Vec::new(),
        })),
    }
}

// =============================================================================
// Tree Mutation
// =============================================================================

/// Insert `child` into `parent` before `anchor`, or append when `anchor`
/// is `None` (or not actually a child of `parent`).
///
/// A child already attached elsewhere is detached first, matching DOM
/// `insertBefore` semantics.
pub fn insert_or_append(parent: &DomNode, child: &DomNode, anchor: Option<&DomNode>) {
    child.detach();
    let index = anchor.and_then(|anchor| parent.index_of(anchor));
    {
        let mut data = parent.inner.borrow_mut();
        match index {
            Some(index) => data.children.insert(index, child.clone()),
            None => data.children.push(child.clone()),
        }
    }
    child.inner.borrow_mut().parent = Some(Rc::downgrade(&parent.inner));
}

impl DomNode {
    /// Remove this node from its parent, if attached.
    pub fn detach(&self) {
        let parent = self.parent();
        if let Some(parent) = parent {
            parent
                .inner
                .borrow_mut()
                .children
                .retain(|child| !child.ptr_eq(self));
        }
        self.inner.borrow_mut().parent = None;
    }

    /// Replace all children with a single text payload.
    ///
    /// One write from the caller's perspective; existing children are
    /// discarded.
    pub fn set_text_content(&self, text: &str) {
        let old_children = {
            let mut data = self.inner.borrow_mut();
            std::mem::take(&mut data.children)
        };
        for child in &old_children {
            child.inner.borrow_mut().parent = None;
        }
        insert_or_append(self, &create_text(text), None);
    }

    /// Set an attribute (elements only; no-op on text nodes).
    pub fn set_attribute(&self, name: &str, value: &str) {
        let mut data = self.inner.borrow_mut();
        if let NodeKind::Element { attributes, .. } = &mut data.kind {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Remove an attribute (elements only).
    pub fn remove_attribute(&self, name: &str) {
        let mut data = self.inner.borrow_mut();
        if let NodeKind::Element { attributes, .. } = &mut data.kind {
            attributes.shift_remove(name);
        }
    }

    /// Set the className property (the non-SVG class path).
    pub fn set_class_name(&self, value: &str) {
        let mut data = self.inner.borrow_mut();
        if let NodeKind::Element { class_name, .. } = &mut data.kind {
            *class_name = Some(value.to_string());
        }
    }
}

// =============================================================================
// Inspection
// =============================================================================

impl DomNode {
    /// Pointer identity.
    pub fn ptr_eq(&self, other: &DomNode) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn parent(&self) -> Option<DomNode> {
        let data = self.inner.borrow();
        data.parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| DomNode { inner })
    }

    pub fn child_nodes(&self) -> Vec<DomNode> {
        self.inner.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.inner.borrow().children.len()
    }

    pub fn first_child(&self) -> Option<DomNode> {
        self.inner.borrow().children.first().cloned()
    }

    /// Tag name for elements, `None` for text nodes.
    pub fn tag(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn namespace(&self) -> Option<Namespace> {
        match &self.inner.borrow().kind {
            NodeKind::Element { namespace, .. } => Some(*namespace),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.inner.borrow().kind, NodeKind::Text { .. })
    }

    /// Text payload of a text node, `None` for elements.
    pub fn text(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Text { text } => Some(text.clone()),
            NodeKind::Element { .. } => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let data = self.inner.borrow();
        match &data.kind {
            NodeKind::Text { text } => text.clone(),
            NodeKind::Element { .. } => {
                let mut out = String::new();
                for child in &data.children {
                    out.push_str(&child.text_content());
                }
                out
            }
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).cloned(),
            NodeKind::Text { .. } => None,
        }
    }

    pub fn class_name(&self) -> Option<String> {
        match &self.inner.borrow().kind {
            NodeKind::Element { class_name, .. } => class_name.clone(),
            NodeKind::Text { .. } => None,
        }
    }

    fn index_of(&self, child: &DomNode) -> Option<usize> {
        self.inner
            .borrow()
            .children
            .iter()
            .position(|candidate| candidate.ptr_eq(child))
    }
}

// =============================================================================
// Tests
// =============================================================================
