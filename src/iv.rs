//! Internal view nodes - the engine-owned mirror of the mounted tree.
//!
//! One [`IvNode`] is created fresh for every view-node occurrence (or
//! array slot) during mount and never reused across renders. It owns the
//! DOM reference for the subtree it anchors, the derived child-shape
//! flags the patch engine dispatches on, and - for component render
//! roots - a non-owning back reference to the owning component node.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::dom::DomNode;
use crate::types::{ChildFlags, IvKind};
use crate::vnode::{ClassHandle, VInput};

/// Shared handle to an internal view node.
pub type IvRef = Rc<RefCell<IvNode>>;

/// Child slot shape, dictated by the node's child flags.
#[derive(Default)]
pub enum IvChildren {
    #[default]
    None,
    One(IvRef),
    Many(Vec<IvRef>),
}

/// Mutable internal record mirroring one mounted view-node occurrence.
pub struct IvNode {
    /// The input this node mirrors. Replaced wholesale on later updates,
    /// never mutated in place.
    pub input: VInput,
    /// The DOM node this internal node is anchored to. Exclusively owned:
    /// a parent only reads a child's `dom`, it never writes it.
    pub dom: Option<DomNode>,
    /// Child internal nodes, shaped per `child_flags`.
    pub children: IvChildren,
    /// Derived child-set shape, computed once at mount time.
    pub child_flags: ChildFlags,
    /// Real DOM-bearing node vs. logical grouping node.
    pub kind: IvKind,
    /// Positional slot when this node sits inside an array.
    pub index: Option<usize>,
    /// Back reference to the owning component node, set only when this
    /// node is the rendered root of a component. Non-owning: used to
    /// locate the real DOM anchor without descending again.
    pub component_owner: Option<Weak<RefCell<IvNode>>>,
    /// The class component instance anchored here, if any.
    pub instance: Option<ClassHandle>,
}

impl IvNode {
    /// Create a fresh internal node for one mount input.
    pub fn new(input: VInput) -> IvRef {
        Rc::new(RefCell::new(IvNode {
            input,
            dom: None,
            children: IvChildren::None,
            child_flags: ChildFlags::empty(),
            kind: IvKind::Regular,
            index: None,
            component_owner: None,
            instance: None,
        }))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_iv_starts_unmounted() {
        let iv = IvNode::new(VInput::Text("x".to_string()));
        let node = iv.borrow();
        assert!(node.dom.is_none());
        assert!(matches!(node.children, IvChildren::None));
        assert!(node.child_flags.is_empty());
        assert_eq!(node.kind, IvKind::Regular);
        assert!(node.index.is_none());
        assert!(node.component_owner.is_none());
        assert!(node.instance.is_none());
    }

    #[test]
    fn test_component_owner_is_non_owning() {
        let owner = IvNode::new(VInput::Empty);
        let child = IvNode::new(VInput::Empty);
        child.borrow_mut().component_owner = Some(Rc::downgrade(&owner));

        assert!(child
            .borrow()
            .component_owner
            .as_ref()
            .unwrap()
            .upgrade()
            .is_some());

        drop(owner);
        assert!(child
            .borrow()
            .component_owner
            .as_ref()
            .unwrap()
            .upgrade()
            .is_none());
    }
}
