//! Element and text mounters.
//!
//! The element mounter is the workhorse of the mount path: resolve the
//! namespace, create the DOM element, classify and mount children, then
//! apply props, className and ref, and finally insert. Children mount
//! before props so that e.g. `<select value=..>` sees its options.

use std::rc::Rc;

use crate::dom::{self, DomNode, Namespace};
use crate::error::MountError;
use crate::iv::{IvChildren, IvNode, IvRef};
use crate::lifecycle::LifecycleQueue;
use crate::props;
use crate::refs;
use crate::runtime::{Context, Runtime};
use crate::types::{ChildFlags, VNodeFlags};
use crate::vnode::{format_number, VInput, VNode, VNodeType};

/// Tag that resets SVG handling for its subtree.
const FOREIGN_OBJECT: &str = "foreignObject";

// =============================================================================
// Text Mounter
// =============================================================================

/// Create one text DOM node for a primitive input.
pub(crate) fn mount_text(
    iv: &IvRef,
    text: &str,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    insert: bool,
) -> DomNode {
    let dom = dom::create_text(text);
    iv.borrow_mut().child_flags = ChildFlags::HAS_TEXT_CHILDREN;
    if insert {
        dom::insert_or_append(parent_dom, &dom, anchor);
        iv.borrow_mut().dom = Some(dom.clone());
    }
    dom
}

// =============================================================================
// Element Mounter
// =============================================================================

/// Mount one element view node and its subtree.
#[allow(clippy::too_many_arguments)]
pub(crate) fn mount_element(
    runtime: &Runtime,
    iv: &IvRef,
    vnode: &Rc<VNode>,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    queue: &mut LifecycleQueue,
    context: &Context,
    is_svg: bool,
    insert: bool,
) -> Result<DomNode, MountError> {
    let VNodeType::Element(tag) = &vnode.vtype else {
        return Err(MountError::InvalidInput(
            "element flag without an element tag payload".into(),
        ));
    };

    let is_svg = is_svg || vnode.flags.contains(VNodeFlags::SVG_ELEMENT);
    let namespace = if is_svg { Namespace::Svg } else { Namespace::Html };
    let dom = dom::create_element(tag, namespace);

    // foreignObject content returns to non-SVG handling.
    let child_svg = is_svg && tag != FOREIGN_OBJECT;

    match &vnode.children {
        VInput::Empty | VInput::Bool(_) => {
            iv.borrow_mut().child_flags = ChildFlags::HAS_INVALID_CHILDREN;
        }
        VInput::Text(text) => {
            // Single DOM write, no intermediate text node in the
            // internal tree.
            dom.set_text_content(text);
            iv.borrow_mut().child_flags = ChildFlags::HAS_TEXT_CHILDREN;
        }
        VInput::Num(value) => {
            dom.set_text_content(&format_number(*value));
            iv.borrow_mut().child_flags = ChildFlags::HAS_TEXT_CHILDREN;
        }
        VInput::Node(child) => {
            let child_iv = IvNode::new(VInput::Node(child.clone()));
            {
                let mut node = iv.borrow_mut();
                node.child_flags = ChildFlags::HAS_BASIC_CHILDREN;
                node.children = IvChildren::One(child_iv.clone());
            }
            super::mount(runtime, &child_iv, &dom, None, queue, context, child_svg, true)?;
        }
        VInput::Many(entries) => {
            arrays_into(runtime, iv, entries, &dom, queue, context, child_svg)?;
        }
    }

    if !vnode.props.is_empty() {
        let is_form = vnode.flags.contains(VNodeFlags::FORM_ELEMENT);
        let has_controlled_value = is_form && props::is_controlled_form_element(&vnode.props);
        for (name, value) in &vnode.props {
            props::patch_prop(name, None, value, &dom, is_svg, has_controlled_value);
        }
        if is_form {
            props::process_element(vnode.flags, &dom, &vnode.props, true, has_controlled_value);
        }
    }

    if let Some(class_name) = &vnode.class_name {
        if is_svg {
            dom.set_attribute("class", class_name);
        } else {
            dom.set_class_name(class_name);
        }
    }

    refs::attach_element_ref(vnode.vref.as_ref(), &dom)?;

    if insert {
        dom::insert_or_append(parent_dom, &dom, anchor);
        iv.borrow_mut().dom = Some(dom.clone());
    }

    Ok(dom)
}

/// Element child sequences mount on the element's own internal node;
/// the element is not a virtual grouping.
fn arrays_into(
    runtime: &Runtime,
    iv: &IvRef,
    entries: &[VInput],
    dom: &DomNode,
    queue: &mut LifecycleQueue,
    context: &Context,
    is_svg: bool,
) -> Result<(), MountError> {
    super::arrays::mount_array(
        runtime, iv, entries, dom, None, queue, context, is_svg, false, false,
    )
    .map(|_| ())
}

// =============================================================================
// Tests
// =============================================================================
