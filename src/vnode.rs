//! View nodes - immutable descriptions of what should exist.
//!
//! A [`VNode`] is produced by application code and is read-only to the
//! mount engine: flags, payload, props, children, key, ref and className
//! are fixed at creation. [`VInput`] is the open-shaped value the mount
//! dispatcher routes on: a primitive, a view node, an ordered sequence,
//! or one of the invalid sentinels (null/undefined/booleans) that make
//! inline conditional rendering expressions cheap no-ops.
//!
//! Components come in two kinds. Class components are stateful objects
//! implementing [`Component`], built through a [`ComponentFactory`] and
//! held behind a [`ClassHandle`]. Functional components are plain render
//! functions; their lifecycle participation goes through a
//! [`FunctionalHooks`] ref instead of instance methods.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use indexmap::IndexMap;

use crate::dom::DomNode;
use crate::runtime::Context;
use crate::types::VNodeFlags;

// =============================================================================
// Props
// =============================================================================

/// Ordered prop map. Application order is insertion order.
pub type Props = IndexMap<String, PropValue>;

/// A single prop value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Str(String),
    Num(f64),
    Bool(bool),
}

impl PropValue {
    /// Attribute text for this value. Numbers print without a trailing
    /// `.0` when integral, matching the string coercion hosts expect.
    pub fn as_attr_text(&self) -> String {
        match self {
            PropValue::Str(value) => value.clone(),
            PropValue::Num(value) => format_number(*value),
            PropValue::Bool(value) => value.to_string(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Num(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Num(value as f64)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

/// Render a number the way text children and attributes expect it.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

// =============================================================================
// Mount Input
// =============================================================================

/// A value of unknown shape handed to the mount dispatcher.
///
/// `Empty` (null/undefined) and `Bool` (true/false) are the invalid
/// sentinels: permitted inside child arrays as no-ops, rejected as
/// top-level input.
#[derive(Clone)]
pub enum VInput {
    Empty,
    Bool(bool),
    Text(String),
    Num(f64),
    Node(Rc<VNode>),
    Many(Vec<VInput>),
}

impl VInput {
    /// True for the sentinels that never produce DOM output.
    pub fn is_invalid(&self) -> bool {
        matches!(self, VInput::Empty | VInput::Bool(_))
    }
}

impl From<&str> for VInput {
    fn from(value: &str) -> Self {
        VInput::Text(value.to_string())
    }
}

impl From<String> for VInput {
    fn from(value: String) -> Self {
        VInput::Text(value)
    }
}

impl From<f64> for VInput {
    fn from(value: f64) -> Self {
        VInput::Num(value)
    }
}

impl From<VNode> for VInput {
    fn from(value: VNode) -> Self {
        VInput::Node(Rc::new(value))
    }
}

impl From<Rc<VNode>> for VInput {
    fn from(value: Rc<VNode>) -> Self {
        VInput::Node(value)
    }
}

impl From<Vec<VInput>> for VInput {
    fn from(value: Vec<VInput>) -> Self {
        VInput::Many(value)
    }
}

// =============================================================================
// Components
// =============================================================================

/// A stateful class component. State lives inside the implementing type;
/// `render` receives the externally supplied props and context.
pub trait Component {
    fn render(&mut self, props: &Props, context: &Context) -> VInput;

    /// Extra context entries this instance provides to its subtree.
    fn child_context(&self) -> Option<Context> {
        None
    }

    /// Deferred notification, invoked from the lifecycle queue after the
    /// whole tree finished mounting.
    fn did_mount(&mut self) {}
}

/// Builds a class component instance from props and context.
pub trait ComponentFactory {
    fn create(&self, props: &Props, context: &Context) -> Box<dyn Component>;
}

impl<F> ComponentFactory for F
where
    F: Fn(&Props, &Context) -> Box<dyn Component>,
{
    fn create(&self, props: &Props, context: &Context) -> Box<dyn Component> {
        self(props, context)
    }
}

/// A functional component's render step.
pub type RenderFn = dyn Fn(&Props, &Context) -> VInput;

pub(crate) struct ClassState {
    pub(crate) component: RefCell<Box<dyn Component>>,
    /// Reentrancy guard raised during the initial render call.
    ///
    /// The guards live outside the component's `RefCell` so a component
    /// can query them from inside its own callbacks.
    pub(crate) rendering: Cell<bool>,
    /// Guard raised around the deferred did-mount callback.
    pub(crate) updating: Cell<bool>,
}

/// Shared handle to a mounted class component instance.
#[derive(Clone)]
pub struct ClassHandle {
    pub(crate) state: Rc<ClassState>,
}

impl ClassHandle {
    pub(crate) fn new(component: Box<dyn Component>) -> Self {
        Self {
            state: Rc::new(ClassState {
                component: RefCell::new(component),
                rendering: Cell::new(false),
                updating: Cell::new(false),
            }),
        }
    }

    /// Stable identity of this instance, usable as a map key.
    pub fn ptr_id(&self) -> usize {
        Rc::as_ptr(&self.state) as usize
    }

    pub fn is_rendering(&self) -> bool {
        self.state.rendering.get()
    }

    pub fn is_updating(&self) -> bool {
        self.state.updating.get()
    }

    /// Run a closure against the component behind this handle.
    pub fn with_component<R>(&self, f: impl FnOnce(&mut dyn Component) -> R) -> R {
        f(self.state.component.borrow_mut().as_mut())
    }
}

// =============================================================================
// Refs
// =============================================================================

/// Lifecycle capability set for functional components.
///
/// `on_component_will_mount` runs synchronously once the subtree is built
/// but before it is inserted into the document; `on_component_did_mount`
/// is deferred into the lifecycle queue.
pub trait FunctionalHooks {
    fn on_component_will_mount(&self, props: &Props) {
        let _ = props;
    }

    fn on_component_did_mount(&self, dom: Option<&DomNode>, props: &Props) {
        let _ = (dom, props);
    }
}

/// A ref attached to a view node.
///
/// `Node` and `Instance` are the callback forms expected on elements and
/// class components. `Hooks` is the functional-component capability
/// object. `Raw` models the string/plain-object shapes that loosely typed
/// host bindings can produce; it is a usage error everywhere and rejected
/// in dev builds.
#[derive(Clone)]
pub enum Ref {
    Node(Rc<dyn Fn(&DomNode)>),
    Instance(Rc<dyn Fn(&ClassHandle)>),
    Hooks(Rc<dyn FunctionalHooks>),
    Raw(String),
}

// =============================================================================
// View Node
// =============================================================================

/// Kind payload of a view node. Routing happens on [`VNodeFlags`]; the
/// payload carries what that kind needs.
#[derive(Clone)]
pub enum VNodeType {
    /// Tag name.
    Element(String),
    /// Instance factory.
    ClassComponent(Rc<dyn ComponentFactory>),
    /// Render function.
    FunctionComponent(Rc<RenderFn>),
    /// Target container the content mounts into.
    Portal(DomNode),
}

/// Immutable description of one element/component/portal occurrence.
pub struct VNode {
    pub flags: VNodeFlags,
    pub vtype: VNodeType,
    pub props: Props,
    pub children: VInput,
    pub key: Option<String>,
    pub vref: Option<Ref>,
    pub class_name: Option<String>,
}

/// Tags that carry the FORM_ELEMENT bit automatically.
const FORM_TAGS: [&str; 3] = ["input", "select", "textarea"];

impl VNode {
    fn new(flags: VNodeFlags, vtype: VNodeType) -> Self {
        Self {
            flags,
            vtype,
            props: Props::new(),
            children: VInput::Empty,
            key: None,
            vref: None,
            class_name: None,
        }
    }

    /// Create an element node. `svg` and form tags get their secondary
    /// bits set automatically.
    pub fn element(tag: &str) -> Self {
        let mut flags = VNodeFlags::ELEMENT;
        if tag == "svg" {
            flags |= VNodeFlags::SVG_ELEMENT;
        }
        if FORM_TAGS.contains(&tag) {
            flags |= VNodeFlags::FORM_ELEMENT;
        }
        Self::new(flags, VNodeType::Element(tag.to_string()))
    }

    /// Create an SVG element node (for SVG tags other than `svg` itself
    /// used as subtree roots).
    pub fn svg_element(tag: &str) -> Self {
        Self::new(
            VNodeFlags::ELEMENT | VNodeFlags::SVG_ELEMENT,
            VNodeType::Element(tag.to_string()),
        )
    }

    /// Create a class component node.
    pub fn class_component<F>(factory: F) -> Self
    where
        F: ComponentFactory + 'static,
    {
        Self::new(
            VNodeFlags::COMPONENT_CLASS,
            VNodeType::ClassComponent(Rc::new(factory)),
        )
    }

    /// Create a functional component node.
    pub fn function_component<F>(render: F) -> Self
    where
        F: Fn(&Props, &Context) -> VInput + 'static,
    {
        Self::new(
            VNodeFlags::COMPONENT_FUNCTION,
            VNodeType::FunctionComponent(Rc::new(render)),
        )
    }

    /// Create a portal whose content mounts into `target`.
    pub fn portal(target: DomNode, children: impl Into<VInput>) -> Self {
        let mut node = Self::new(VNodeFlags::PORTAL, VNodeType::Portal(target));
        node.children = children.into();
        node
    }

    pub fn key(mut self, key: &str) -> Self {
        self.key = Some(key.to_string());
        self
    }

    pub fn prop(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.props.insert(name.to_string(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<VInput>) -> Self {
        self.children = child.into();
        self
    }

    pub fn children(mut self, children: Vec<VInput>) -> Self {
        self.children = VInput::Many(children);
        self
    }

    pub fn class(mut self, class_name: &str) -> Self {
        self.class_name = Some(class_name.to_string());
        self
    }

    pub fn node_ref(mut self, vref: Ref) -> Self {
        self.vref = Some(vref);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::VNodeFlags;

    fn primary_bits(flags: VNodeFlags) -> u32 {
        (flags
            & (VNodeFlags::ELEMENT
                | VNodeFlags::COMPONENT_CLASS
                | VNodeFlags::COMPONENT_FUNCTION
                | VNodeFlags::PORTAL))
            .bits()
            .count_ones()
    }

    #[test]
    fn test_constructors_set_exactly_one_primary_kind() {
        let element = VNode::element("div");
        let class = VNode::class_component(|_: &Props, _: &Context| -> Box<dyn Component> {
            unreachable!("factory is not invoked at construction time")
        });
        let function = VNode::function_component(|_, _| VInput::Empty);
        let portal = VNode::portal(crate::dom::create_element("div", Default::default()), "x");

        for node in [&element, &class, &function, &portal] {
            assert_eq!(primary_bits(node.flags), 1);
        }
    }

    #[test]
    fn test_form_tags_carry_form_bit() {
        assert!(VNode::element("input").flags.contains(VNodeFlags::FORM_ELEMENT));
        assert!(VNode::element("select").flags.contains(VNodeFlags::FORM_ELEMENT));
        assert!(VNode::element("textarea").flags.contains(VNodeFlags::FORM_ELEMENT));
        assert!(!VNode::element("div").flags.contains(VNodeFlags::FORM_ELEMENT));
    }

    #[test]
    fn test_svg_tag_carries_svg_bit() {
        assert!(VNode::element("svg").flags.contains(VNodeFlags::SVG_ELEMENT));
        assert!(VNode::svg_element("circle").flags.contains(VNodeFlags::SVG_ELEMENT));
        assert!(!VNode::element("div").flags.contains(VNodeFlags::SVG_ELEMENT));
    }

    #[test]
    fn test_invalid_sentinels() {
        assert!(VInput::Empty.is_invalid());
        assert!(VInput::Bool(true).is_invalid());
        assert!(VInput::Bool(false).is_invalid());
        assert!(!VInput::Text(String::new()).is_invalid());
        assert!(!VInput::Num(0.0).is_invalid());
        assert!(!VInput::Many(Vec::new()).is_invalid());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_prop_order_is_insertion_order() {
        let node = VNode::element("input")
            .prop("type", "text")
            .prop("placeholder", "name")
            .prop("maxLength", 12i64);
        let names: Vec<&str> = node.props.keys().map(String::as_str).collect();
        assert_eq!(names, ["type", "placeholder", "maxLength"]);
    }
}
