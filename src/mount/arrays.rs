//! Array mounter - ordered child sequences and virtual groupings.
//!
//! An array mounts as one internal node with `Many` children. When the
//! array itself has no DOM element of its own (a bare top-level sequence,
//! a component rendering a fragment, portal content) it mounts as a
//! *virtual* grouping whose `dom` is borrowed from its first mounted
//! child; when it is the child list of an element, the element's internal
//! node hosts the children directly.
//!
//! The keyed decision is made once, from the first valid entry, and is
//! not re-validated against the rest of the array. Invalid entries are
//! skipped as no-ops but keep their slot numbering.

use crate::dom::DomNode;
use crate::error::MountError;
use crate::iv::{IvChildren, IvNode, IvRef};
use crate::lifecycle::LifecycleQueue;
use crate::runtime::{Context, Runtime};
use crate::types::{ChildFlags, IvKind};
use crate::vnode::VInput;

/// Mount an ordered sequence of inputs.
///
/// Returns the first mounted child's DOM node, which doubles as the
/// grouping's anchor when `is_virtual`.
#[allow(clippy::too_many_arguments)]
pub(crate) fn mount_array(
    runtime: &Runtime,
    iv: &IvRef,
    entries: &[VInput],
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    queue: &mut LifecycleQueue,
    context: &Context,
    is_svg: bool,
    is_virtual: bool,
    force_keyed: bool,
) -> Result<Option<DomNode>, MountError> {
    if is_virtual {
        iv.borrow_mut().kind = IvKind::VirtualArray;
    }

    let child_flags = decide_child_flags(entries, force_keyed);
    iv.borrow_mut().child_flags = child_flags;
    if child_flags == ChildFlags::HAS_INVALID_CHILDREN {
        tracing::trace!("child array holds no valid entries");
        return Ok(None);
    }

    let mut children = Vec::with_capacity(entries.len());
    let mut first_dom: Option<DomNode> = None;
    for (slot, entry) in entries.iter().enumerate() {
        if entry.is_invalid() {
            continue;
        }
        let child_iv = IvNode::new(entry.clone());
        child_iv.borrow_mut().index = Some(slot);
        super::mount(
            runtime, &child_iv, parent_dom, anchor, queue, context, is_svg, true,
        )?;
        if first_dom.is_none() {
            first_dom = child_iv.borrow().dom.clone();
        }
        children.push(child_iv);
    }

    {
        let mut node = iv.borrow_mut();
        node.children = IvChildren::Many(children);
        if is_virtual {
            node.dom = first_dom.clone();
        }
    }
    Ok(first_dom)
}

/// Classify the child set from its first valid entry.
fn decide_child_flags(entries: &[VInput], force_keyed: bool) -> ChildFlags {
    let Some(first_valid) = entries.iter().find(|entry| !entry.is_invalid()) else {
        return ChildFlags::HAS_INVALID_CHILDREN;
    };
    let keyed = force_keyed
        || matches!(first_valid, VInput::Node(vnode) if vnode.key.is_some());
    if keyed {
        ChildFlags::HAS_KEYED_CHILDREN
    } else {
        ChildFlags::HAS_NON_KEYED_CHILDREN
    }
}

// =============================================================================
// Tests
// =============================================================================
