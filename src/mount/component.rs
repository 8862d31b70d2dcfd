//! Component mounters - class instances and functional renders.
//!
//! Both kinds follow the same shape: run the render step to obtain an
//! output of unknown shape, mount that output with insertion deferred,
//! then place the produced DOM and queue the deferred did-mount
//! notification. Deferring insertion keeps will-mount callbacks ahead of
//! document attachment; the final placement only inserts a node that is
//! not already attached, so a fragment-rendering component (whose
//! children inserted themselves during the array mount) is not moved
//! twice.

use std::rc::Rc;

use crate::dom::{self, DomNode};
use crate::error::MountError;
use crate::iv::{IvChildren, IvNode, IvRef};
use crate::lifecycle::{LifecycleEvent, LifecycleQueue};
use crate::refs;
use crate::runtime::{Context, Runtime};
use crate::types::{ChildFlags, VNodeFlags};
use crate::vnode::{ClassHandle, VInput, VNode, VNodeType};

// =============================================================================
// Dispatch
// =============================================================================

/// Mount a class or functional component view node.
#[allow(clippy::too_many_arguments)]
pub(crate) fn mount_component(
    runtime: &Runtime,
    iv: &IvRef,
    vnode: &Rc<VNode>,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    queue: &mut LifecycleQueue,
    context: &Context,
    is_svg: bool,
    insert: bool,
) -> Result<Option<DomNode>, MountError> {
    if vnode.flags.contains(VNodeFlags::COMPONENT_CLASS) {
        mount_class_component(
            runtime, iv, vnode, parent_dom, anchor, queue, context, is_svg, insert,
        )
    } else {
        mount_functional_component(
            runtime, iv, vnode, parent_dom, anchor, queue, context, is_svg, insert,
        )
    }
}

// =============================================================================
// Class Components
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn mount_class_component(
    runtime: &Runtime,
    iv: &IvRef,
    vnode: &Rc<VNode>,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    queue: &mut LifecycleQueue,
    context: &Context,
    is_svg: bool,
    insert: bool,
) -> Result<Option<DomNode>, MountError> {
    let VNodeType::ClassComponent(factory) = &vnode.vtype else {
        return Err(MountError::InvalidInput(
            "class component flag without a factory payload".into(),
        ));
    };

    let handle = ClassHandle::new(factory.create(&vnode.props, context));
    tracing::trace!(instance = handle.ptr_id(), "mount class component");

    // Initial render, under the reentrancy guard.
    let render_output = {
        handle.state.rendering.set(true);
        let output = handle
            .state
            .component
            .borrow_mut()
            .render(&vnode.props, context);
        handle.state.rendering.set(false);
        output
    };

    if let Some(after_render) = &runtime.options.after_render {
        after_render(&handle);
    }

    // The instance's context extension applies to its subtree only.
    let child_context = match handle.state.component.borrow().child_context() {
        Some(extra) => context.extended(&extra),
        None => context.clone(),
    };

    let dom = mount_render_output(
        runtime,
        iv,
        render_output,
        parent_dom,
        anchor,
        queue,
        &child_context,
        is_svg,
    )?;

    refs::attach_class_ref(vnode.vref.as_ref(), &handle)?;
    queue.push(LifecycleEvent::ClassDidMount {
        instance: handle.clone(),
        vnode: vnode.clone(),
    });

    finish_placement(iv, dom.as_ref(), parent_dom, anchor, insert);
    if runtime.options.find_dom_node_enabled {
        if let Some(dom) = &dom {
            runtime.register_instance_dom(&handle, dom);
        }
    }
    iv.borrow_mut().instance = Some(handle);

    Ok(dom)
}

// =============================================================================
// Functional Components
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn mount_functional_component(
    runtime: &Runtime,
    iv: &IvRef,
    vnode: &Rc<VNode>,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    queue: &mut LifecycleQueue,
    context: &Context,
    is_svg: bool,
    insert: bool,
) -> Result<Option<DomNode>, MountError> {
    let VNodeType::FunctionComponent(render) = &vnode.vtype else {
        return Err(MountError::InvalidInput(
            "function component flag without a render payload".into(),
        ));
    };

    let render_output = render(&vnode.props, context);
    let dom = mount_render_output(
        runtime,
        iv,
        render_output,
        parent_dom,
        anchor,
        queue,
        context,
        is_svg,
    )?;

    // will-mount fires here, before final placement; did-mount is
    // deferred into the queue.
    refs::attach_functional_callbacks(vnode.vref.as_ref(), dom.as_ref(), &vnode.props, queue)?;

    finish_placement(iv, dom.as_ref(), parent_dom, anchor, insert);
    Ok(dom)
}

// =============================================================================
// Shared Steps
// =============================================================================

/// Mount a component's render output with DOM insertion deferred.
///
/// An invalid output (the component rendered null) is legal: the
/// component anchors nothing and its internal node records the invalid
/// shape.
#[allow(clippy::too_many_arguments)]
fn mount_render_output(
    runtime: &Runtime,
    iv: &IvRef,
    render_output: VInput,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    queue: &mut LifecycleQueue,
    context: &Context,
    is_svg: bool,
) -> Result<Option<DomNode>, MountError> {
    if render_output.is_invalid() {
        iv.borrow_mut().child_flags = ChildFlags::HAS_INVALID_CHILDREN;
        return Ok(None);
    }

    let child_iv = IvNode::new(render_output);
    child_iv.borrow_mut().component_owner = Some(Rc::downgrade(iv));
    {
        let mut node = iv.borrow_mut();
        node.child_flags = ChildFlags::HAS_BASIC_CHILDREN;
        node.children = IvChildren::One(child_iv.clone());
    }

    let dom = super::mount(
        runtime, &child_iv, parent_dom, anchor, queue, context, is_svg, false,
    )?;
    Ok(dom.or_else(|| child_iv.borrow().dom.clone()))
}

/// Place the component's DOM and cache it on both internal nodes.
///
/// Only inserts a node that is still detached: when the render output
/// was an array, its children already inserted themselves during the
/// array mount and the borrowed first-child dom must not be moved.
fn finish_placement(
    iv: &IvRef,
    dom: Option<&DomNode>,
    parent_dom: &DomNode,
    anchor: Option<&DomNode>,
    insert: bool,
) {
    let Some(dom) = dom else {
        return;
    };
    if insert && dom.parent().is_none() {
        dom::insert_or_append(parent_dom, dom, anchor);
    }
    let mut node = iv.borrow_mut();
    node.dom = Some(dom.clone());
    if let IvChildren::One(child) = &node.children {
        let mut child = child.borrow_mut();
        if child.dom.is_none() {
            child.dom = Some(dom.clone());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::dom::{create_element, Namespace};
    use crate::mount::mount_tree;
    use crate::runtime::Options;
    use crate::vnode::{Component, FunctionalHooks, Props, Ref};

    fn container() -> DomNode {
        create_element("div", Namespace::Html)
    }

    struct Static(VInput);

    impl Component for Static {
        fn render(&mut self, _: &Props, _: &Context) -> VInput {
            self.0.clone()
        }
    }

    fn class_of(output: impl Into<VInput>) -> VNode {
        let output: VInput = output.into();
        VNode::class_component(move |_: &Props, _: &Context| -> Box<dyn Component> {
            Box::new(Static(output.clone()))
        })
    }

    #[test]
    fn test_class_component_mounts_render_output() {
        let runtime = Runtime::default();
        let root = container();

        let iv = mount_tree(&runtime, class_of(VNode::element("p").child("hi")).into(), &root)
            .unwrap();

        assert_eq!(root.child_count(), 1);
        assert_eq!(root.text_content(), "hi");

        let node = iv.borrow();
        assert!(node.instance.is_some());
        assert_eq!(node.child_flags, ChildFlags::HAS_BASIC_CHILDREN);
        assert!(node.dom.as_ref().unwrap().ptr_eq(&root.first_child().unwrap()));

        // The render root points back at its owning component node.
        let IvChildren::One(child) = &node.children else {
            panic!("expected one render root");
        };
        let owner = child.borrow().component_owner.clone().unwrap();
        assert!(Rc::ptr_eq(&owner.upgrade().unwrap(), &iv));
    }

    #[test]
    fn test_class_component_rendering_null_mounts_nothing() {
        let runtime = Runtime::default();
        let root = container();

        let iv = mount_tree(&runtime, class_of_null().into(), &root).unwrap();

        assert_eq!(root.child_count(), 0);
        let node = iv.borrow();
        assert!(node.dom.is_none());
        assert_eq!(node.child_flags, ChildFlags::HAS_INVALID_CHILDREN);
        assert!(node.instance.is_some());
    }

    fn class_of_null() -> VNode {
        VNode::class_component(|_: &Props, _: &Context| -> Box<dyn Component> {
            Box::new(Static(VInput::Empty))
        })
    }

    #[test]
    fn test_did_mount_fires_even_for_null_render() {
        struct Null {
            fired: Rc<RefCell<bool>>,
        }

        impl Component for Null {
            fn render(&mut self, _: &Props, _: &Context) -> VInput {
                VInput::Empty
            }

            fn did_mount(&mut self) {
                *self.fired.borrow_mut() = true;
            }
        }

        let runtime = Runtime::default();
        let fired = Rc::new(RefCell::new(false));
        let fired_in_factory = fired.clone();
        let vnode = VNode::class_component(move |_: &Props, _: &Context| -> Box<dyn Component> {
            Box::new(Null {
                fired: fired_in_factory.clone(),
            })
        });

        mount_tree(&runtime, vnode.into(), &container()).unwrap();
        assert!(*fired.borrow());
    }

    #[test]
    fn test_nested_did_mount_is_post_order() {
        struct Logging {
            name: &'static str,
            output: VInput,
            log: Rc<RefCell<Vec<&'static str>>>,
        }

        impl Component for Logging {
            fn render(&mut self, _: &Props, _: &Context) -> VInput {
                self.output.clone()
            }

            fn did_mount(&mut self) {
                self.log.borrow_mut().push(self.name);
            }
        }

        let runtime = Runtime::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_log = log.clone();
        let inner = VNode::class_component(move |_: &Props, _: &Context| -> Box<dyn Component> {
            Box::new(Logging {
                name: "inner",
                output: VNode::element("span").child("x").into(),
                log: inner_log.clone(),
            })
        });

        let outer_log = log.clone();
        let inner = Rc::new(inner);
        let outer = VNode::class_component(move |_: &Props, _: &Context| -> Box<dyn Component> {
            Box::new(Logging {
                name: "outer",
                output: VNode::element("div").child(inner.clone()).into(),
                log: outer_log.clone(),
            })
        });

        mount_tree(&runtime, outer.into(), &container()).unwrap();
        assert_eq!(log.borrow().as_slice(), ["inner", "outer"]);
    }

    #[test]
    fn test_fragment_render_output_inserts_children_once() {
        let runtime = Runtime::default();
        let root = container();

        let iv = mount_tree(
            &runtime,
            class_of(vec![
                VInput::from(VNode::element("li").child("1")),
                VInput::from(VNode::element("li").child("2")),
            ])
            .into(),
            &root,
        )
        .unwrap();

        assert_eq!(root.child_count(), 2);
        assert_eq!(root.text_content(), "12");
        // Component dom is the borrowed first child, already in place.
        assert!(iv
            .borrow()
            .dom
            .as_ref()
            .unwrap()
            .ptr_eq(&root.first_child().unwrap()));
    }

    #[test]
    fn test_after_render_hook_sees_settled_guard() {
        let observed = Rc::new(RefCell::new(None));
        let observed_in_hook = observed.clone();
        let runtime = Runtime::new(Options {
            after_render: Some(Rc::new(move |handle: &ClassHandle| {
                *observed_in_hook.borrow_mut() = Some(handle.is_rendering());
            })),
            ..Options::default()
        });

        mount_tree(
            &runtime,
            class_of(VNode::element("p")).into(),
            &container(),
        )
        .unwrap();
        assert_eq!(*observed.borrow(), Some(false));
    }

    #[test]
    fn test_child_context_reaches_nested_component() {
        struct Provider;

        impl Component for Provider {
            fn render(&mut self, _: &Props, _: &Context) -> VInput {
                VNode::element("div")
                    .child(VNode::function_component(|_: &Props, context: &Context| {
                        let theme = context
                            .get("theme")
                            .map(|value| value.as_attr_text())
                            .unwrap_or_default();
                        VNode::element("span").child(theme).into()
                    }))
                    .into()
            }

            fn child_context(&self) -> Option<Context> {
                Some(Context::new().with("theme", "dark"))
            }
        }

        let runtime = Runtime::default();
        let root = container();
        let vnode = VNode::class_component(|_: &Props, _: &Context| -> Box<dyn Component> {
            Box::new(Provider)
        });

        mount_tree(&runtime, vnode.into(), &root).unwrap();
        assert_eq!(root.text_content(), "dark");
    }

    #[test]
    fn test_find_dom_node_registers_when_enabled() {
        let runtime = Runtime::new(Options {
            find_dom_node_enabled: true,
            ..Options::default()
        });
        let root = container();

        let iv = mount_tree(&runtime, class_of(VNode::element("p")).into(), &root).unwrap();

        let handle = iv.borrow().instance.clone().unwrap();
        let dom = runtime.find_dom_node(&handle).unwrap();
        assert!(dom.ptr_eq(&root.first_child().unwrap()));

        // Disabled by default: a second runtime records nothing.
        let bare = Runtime::default();
        let other_root = container();
        let other_iv =
            mount_tree(&bare, class_of(VNode::element("p")).into(), &other_root).unwrap();
        let other_handle = other_iv.borrow().instance.clone().unwrap();
        assert!(bare.find_dom_node(&other_handle).is_none());
    }

    #[test]
    fn test_functional_component_mounts_output() {
        let runtime = Runtime::default();
        let root = container();

        let vnode = VNode::function_component(|props: &Props, _: &Context| {
            let name = props
                .get("name")
                .map(|value| value.as_attr_text())
                .unwrap_or_default();
            VNode::element("p").child(format!("hello {name}")).into()
        })
        .prop("name", "world");

        mount_tree(&runtime, vnode.into(), &root).unwrap();
        assert_eq!(root.text_content(), "hello world");
    }

    #[test]
    fn test_functional_hooks_straddle_insertion() {
        struct Hooks {
            root: DomNode,
            log: Rc<RefCell<Vec<(&'static str, usize)>>>,
        }

        impl FunctionalHooks for Hooks {
            fn on_component_will_mount(&self, _: &Props) {
                self.log.borrow_mut().push(("will", self.root.child_count()));
            }

            fn on_component_did_mount(&self, dom: Option<&DomNode>, _: &Props) {
                assert!(dom.unwrap().parent().is_some());
                self.log.borrow_mut().push(("did", self.root.child_count()));
            }
        }

        let runtime = Runtime::default();
        let root = container();
        let log = Rc::new(RefCell::new(Vec::new()));

        let vnode = VNode::function_component(|_: &Props, _: &Context| {
            VNode::element("p").child("x").into()
        })
        .node_ref(Ref::Hooks(Rc::new(Hooks {
            root: root.clone(),
            log: log.clone(),
        })));

        mount_tree(&runtime, vnode.into(), &root).unwrap();
        // will-mount saw an empty container, did-mount the full one.
        assert_eq!(log.borrow().as_slice(), [("will", 0), ("did", 1)]);
    }
}
