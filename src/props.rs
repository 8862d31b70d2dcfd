//! Prop application collaborators.
//!
//! The element mounter sequences three opaque calls per node: a
//! controlled-form decision, one `patch_prop` per own prop (in map
//! order), and a final `process_element` that wires the controlled
//! value/checked state after all other props landed. The mount path only
//! depends on these signatures; the bodies here are the minimal DOM
//! realization.

use crate::dom::DomNode;
use crate::types::VNodeFlags;
use crate::vnode::{PropValue, Props};

/// Prop names never written as attributes (consumed elsewhere in the
/// mount path, or engine-internal).
const SKIPPED_PROPS: [&str; 4] = ["children", "className", "key", "ref"];

/// Prop names owned by the controlled-element wiring.
const CONTROLLED_PROPS: [&str; 4] = ["value", "checked", "defaultValue", "defaultChecked"];

/// Whether a form element's value is owned by application state.
pub fn is_controlled_form_element(props: &Props) -> bool {
    props.contains_key("value") || props.contains_key("checked")
}

/// Apply one prop to a DOM node.
///
/// Controlled props are deferred to [`process_element`] so they land
/// after everything else (attribute order matters for e.g. `value`
/// vs. `type` on inputs).
pub fn patch_prop(
    name: &str,
    _old_value: Option<&PropValue>,
    next_value: &PropValue,
    dom: &DomNode,
    _is_svg: bool,
    has_controlled_value: bool,
) {
    if SKIPPED_PROPS.contains(&name) {
        return;
    }
    if has_controlled_value && CONTROLLED_PROPS.contains(&name) {
        return;
    }
    match next_value {
        PropValue::Bool(true) => dom.set_attribute(name, ""),
        PropValue::Bool(false) => dom.remove_attribute(name),
        other => dom.set_attribute(name, &other.as_attr_text()),
    }
}

/// Controlled-element wiring, invoked once per form element after all
/// props were applied.
pub fn process_element(
    flags: VNodeFlags,
    dom: &DomNode,
    props: &Props,
    is_mount: bool,
    has_controlled_value: bool,
) {
    tracing::trace!(?flags, is_mount, has_controlled_value, "process element");
    if !has_controlled_value {
        return;
    }
    if let Some(value) = props.get("value") {
        dom.set_attribute("value", &value.as_attr_text());
    }
    match props.get("checked") {
        Some(PropValue::Bool(true)) => dom.set_attribute("checked", ""),
        Some(PropValue::Bool(false)) => dom.remove_attribute("checked"),
        _ => {}
    }
}

// =============================================================================
// Tests
// =============================================================================
