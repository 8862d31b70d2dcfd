//! Portal mounter - content rendered into a foreign container.
//!
//! A portal's children mount into the target container the view node
//! carries, not into the logical parent. The logical parent instead
//! receives a zero-width text placeholder so the portal keeps a stable
//! position (and DOM anchor) among its siblings; the internal node's
//! `dom` is that placeholder, never the target content. Portal content
//! is treated as keyed regardless of what its first entry says.

use std::rc::Rc;

use crate::dom::{self, DomNode};
use crate::error::MountError;
use crate::iv::{IvChildren, IvNode, IvRef};
use crate::lifecycle::LifecycleQueue;
use crate::runtime::{Context, Runtime};
use crate::types::ChildFlags;
use crate::vnode::{VInput, VNode, VNodeType};

/// Mount a portal view node.
///
/// Returns `None`: the portal contributes no content DOM to its logical
/// parent, only the placeholder recorded on its internal node.
pub(crate) fn mount_portal(
    runtime: &Runtime,
    iv: &IvRef,
    vnode: &Rc<VNode>,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    queue: &mut LifecycleQueue,
    context: &Context,
) -> Result<Option<DomNode>, MountError> {
    let VNodeType::Portal(target) = &vnode.vtype else {
        return Err(MountError::InvalidInput(
            "portal flag without a target payload".into(),
        ));
    };
    tracing::trace!("mount portal content into detached target");

    match &vnode.children {
        VInput::Empty | VInput::Bool(_) => {
            iv.borrow_mut().child_flags = ChildFlags::HAS_INVALID_CHILDREN;
        }
        // Not a virtual grouping: the portal anchors its own
        // placeholder, it never borrows a child's dom.
        VInput::Many(entries) => {
            super::arrays::mount_array(
                runtime, iv, entries, target, None, queue, context, false, false, true,
            )?;
        }
        single => {
            let child_iv = IvNode::new(single.clone());
            {
                let mut node = iv.borrow_mut();
                node.child_flags = ChildFlags::HAS_BASIC_CHILDREN;
                node.children = IvChildren::One(child_iv.clone());
            }
            super::mount(runtime, &child_iv, target, None, queue, context, false, true)?;
        }
    }

    // Placeholder keeps the portal's slot in the logical parent.
    let placeholder = dom::create_text("");
    dom::insert_or_append(parent_dom, &placeholder, anchor);
    iv.borrow_mut().dom = Some(placeholder);

    Ok(None)
}

// =============================================================================
// Tests
// =============================================================================
