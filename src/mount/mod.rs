//! Mount pipeline - from view-node tree to live DOM plus internal tree.
//!
//! The dispatcher routes an input of unknown shape to a specialized
//! mounter; every mounter may recurse back through the dispatcher for
//! its children, threading the same lifecycle queue and context down the
//! recursion. The whole mount of a tree is one synchronous,
//! non-interruptible call: nothing yields until the tree is fully built,
//! and the lifecycle queue is flushed exactly once at the outer
//! boundary. Partial DOM is not rolled back on failure; recovery policy
//! belongs to the caller.
//!
//! # Modules
//!
//! - [`element`] - element and text mounters
//! - [`arrays`] - array/fragment mounter and the keyed decision
//! - [`component`] - class and functional component mounters
//! - [`portal`] - portal mounter and its logical placeholder

pub(crate) mod arrays;
pub(crate) mod component;
pub(crate) mod element;
pub(crate) mod portal;

use crate::dom::DomNode;
use crate::error::{dev_only, MountError};
use crate::iv::{IvNode, IvRef};
use crate::lifecycle::LifecycleQueue;
use crate::runtime::{Context, Runtime};
use crate::types::{ChildFlags, VNodeFlags};
use crate::vnode::{format_number, VInput};

// =============================================================================
// Entry Point
// =============================================================================

/// Mount `input` into `container` and return the root internal node.
///
/// Builds the full DOM subtree, then flushes the lifecycle queue once -
/// deferred did-mount callbacks run strictly children-before-parents.
pub fn mount_tree(
    runtime: &Runtime,
    input: VInput,
    container: &DomNode,
) -> Result<IvRef, MountError> {
    let iv = IvNode::new(input);
    let mut queue = LifecycleQueue::new();
    let context = Context::default();

    mount(runtime, &iv, container, None, &mut queue, &context, false, true)?;
    tracing::debug!(deferred = queue.len(), "tree mounted, flushing lifecycle queue");
    queue.flush(runtime);

    Ok(iv)
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Route one mount input to its specialized mounter.
///
/// Returns the mounted DOM node (`None` for portals and invalid input)
/// and populates `iv` in place. `anchor` is the DOM node to insert
/// before; `None` appends. `insert` defers DOM insertion to the caller
/// when false (used by component mounters, which place their rendered
/// root themselves).
#[allow(clippy::too_many_arguments)]
pub(crate) fn mount(
    runtime: &Runtime,
    iv: &IvRef,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    queue: &mut LifecycleQueue,
    context: &Context,
    is_svg: bool,
    insert: bool,
) -> Result<Option<DomNode>, MountError> {
    let input = iv.borrow().input.clone();
    match input {
        VInput::Text(text) => Ok(Some(element::mount_text(
            iv, &text, parent_dom, anchor, insert,
        ))),
        VInput::Num(value) => Ok(Some(element::mount_text(
            iv,
            &format_number(value),
            parent_dom,
            anchor,
            insert,
        ))),
        VInput::Node(vnode) => {
            let flags = vnode.flags;
            tracing::trace!(?flags, "mount view node");
            if flags.contains(VNodeFlags::ELEMENT) {
                element::mount_element(
                    runtime, iv, &vnode, parent_dom, anchor, queue, context, is_svg, insert,
                )
                .map(Some)
            } else if flags.intersects(VNodeFlags::COMPONENT) {
                component::mount_component(
                    runtime, iv, &vnode, parent_dom, anchor, queue, context, is_svg, insert,
                )
            } else if flags.contains(VNodeFlags::PORTAL) {
                portal::mount_portal(runtime, iv, &vnode, parent_dom, anchor, queue, context)
            } else {
                iv.borrow_mut().child_flags = ChildFlags::HAS_INVALID_CHILDREN;
                match dev_only(MountError::InvalidInput(
                    "view node carries no primary kind flag".into(),
                )) {
                    Some(err) => Err(err),
                    None => Ok(None),
                }
            }
        }
        // A bare sequence mounts as a virtual grouping node.
        VInput::Many(entries) => arrays::mount_array(
            runtime, iv, &entries, parent_dom, anchor, queue, context, is_svg, true, false,
        ),
        VInput::Empty | VInput::Bool(_) => {
            iv.borrow_mut().child_flags = ChildFlags::HAS_INVALID_CHILDREN;
            match dev_only(MountError::InvalidInput(
                "cannot mount null, undefined or boolean input".into(),
            )) {
                Some(err) => Err(err),
                None => Ok(None),
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
