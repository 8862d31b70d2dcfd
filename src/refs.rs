//! Ref attachment - callback invocation for element and component refs.
//!
//! Element refs fire synchronously with the DOM node once the element's
//! subtree is fully constructed, before insertion into the live
//! document. Class refs fire with the instance handle after the rendered
//! subtree mounted. Functional hook refs run `on_component_will_mount`
//! at that same point and defer `on_component_did_mount` into the
//! lifecycle queue.
//!
//! Shape validation is dev-build only (see [`crate::error`]); release
//! builds skip the checks and ignore malformed refs.

use crate::dom::DomNode;
use crate::error::{dev_only, MountError};
use crate::lifecycle::{LifecycleEvent, LifecycleQueue};
use crate::vnode::{ClassHandle, Props, Ref};

/// Invoke an element ref with its finished DOM node.
pub(crate) fn attach_element_ref(vref: Option<&Ref>, dom: &DomNode) -> Result<(), MountError> {
    match vref {
        None => Ok(()),
        Some(Ref::Node(callback)) => {
            callback(dom);
            Ok(())
        }
        Some(Ref::Raw(value)) => reject(MountError::InvalidRef(format!(
            "string ref \"{value}\" on an element; expected a callback"
        ))),
        Some(Ref::Hooks(_)) => reject(MountError::InvalidRef(
            "lifecycle hooks object on an element; expected a callback".into(),
        )),
        Some(Ref::Instance(_)) => reject(MountError::InvalidRef(
            "instance ref on an element; expected a DOM-node callback".into(),
        )),
    }
}

/// Invoke a class component ref with the mounted instance.
pub(crate) fn attach_class_ref(
    vref: Option<&Ref>,
    handle: &ClassHandle,
) -> Result<(), MountError> {
    match vref {
        None => Ok(()),
        Some(Ref::Instance(callback)) => {
            callback(handle);
            Ok(())
        }
        Some(Ref::Hooks(_)) => reject(MountError::UnsupportedRefUsage),
        Some(Ref::Raw(value)) => reject(MountError::InvalidRef(format!(
            "string ref \"{value}\" on a class component; expected a callback"
        ))),
        Some(Ref::Node(_)) => reject(MountError::InvalidRef(
            "DOM-node ref on a class component; expected an instance callback".into(),
        )),
    }
}

/// Run a functional component's will-mount hook and queue its did-mount
/// hook.
pub(crate) fn attach_functional_callbacks(
    vref: Option<&Ref>,
    dom: Option<&DomNode>,
    props: &Props,
    queue: &mut LifecycleQueue,
) -> Result<(), MountError> {
    match vref {
        None => Ok(()),
        Some(Ref::Hooks(hooks)) => {
            hooks.on_component_will_mount(props);
            queue.push(LifecycleEvent::HookDidMount {
                hooks: hooks.clone(),
                dom: dom.cloned(),
                props: props.clone(),
            });
            Ok(())
        }
        Some(Ref::Raw(value)) => reject(MountError::InvalidRef(format!(
            "string ref \"{value}\" on a functional component; expected lifecycle hooks"
        ))),
        Some(Ref::Node(_) | Ref::Instance(_)) => reject(MountError::InvalidRef(
            "callback ref on a functional component; expected lifecycle hooks".into(),
        )),
    }
}

fn reject(err: MountError) -> Result<(), MountError> {
    match dev_only(err) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::dom::{create_element, Namespace};
    use crate::runtime::{Context, Runtime};
    use crate::vnode::{Component, FunctionalHooks, VInput};

    #[test]
    fn test_element_ref_receives_dom() {
        let seen = Rc::new(RefCell::new(None));
        let seen_in_ref = seen.clone();
        let vref = Ref::Node(Rc::new(move |dom: &DomNode| {
            *seen_in_ref.borrow_mut() = dom.tag();
        }));

        let dom = create_element("div", Namespace::Html);
        attach_element_ref(Some(&vref), &dom).unwrap();
        assert_eq!(seen.borrow().as_deref(), Some("div"));
    }

    #[test]
    fn test_raw_ref_rejected_on_element() {
        let dom = create_element("div", Namespace::Html);
        let result = attach_element_ref(Some(&Ref::Raw("myRef".into())), &dom);
        assert!(matches!(result, Err(MountError::InvalidRef(_))));
    }

    #[test]
    fn test_hooks_ref_rejected_on_class_component() {
        struct NoopHooks;
        impl FunctionalHooks for NoopHooks {}

        struct Empty;
        impl Component for Empty {
            fn render(&mut self, _: &Props, _: &Context) -> VInput {
                VInput::Empty
            }
        }

        let handle = ClassHandle::new(Box::new(Empty));
        let result = attach_class_ref(Some(&Ref::Hooks(Rc::new(NoopHooks))), &handle);
        assert!(matches!(result, Err(MountError::UnsupportedRefUsage)));
    }

    #[test]
    fn test_class_ref_receives_instance() {
        struct Empty;
        impl Component for Empty {
            fn render(&mut self, _: &Props, _: &Context) -> VInput {
                VInput::Empty
            }
        }

        let seen = Rc::new(RefCell::new(None));
        let seen_in_ref = seen.clone();
        let vref = Ref::Instance(Rc::new(move |handle: &ClassHandle| {
            *seen_in_ref.borrow_mut() = Some(handle.ptr_id());
        }));

        let handle = ClassHandle::new(Box::new(Empty));
        attach_class_ref(Some(&vref), &handle).unwrap();
        assert_eq!(*seen.borrow(), Some(handle.ptr_id()));
    }

    #[test]
    fn test_functional_hooks_will_mount_now_did_mount_deferred() {
        struct Hooks {
            log: Rc<RefCell<Vec<&'static str>>>,
        }

        impl FunctionalHooks for Hooks {
            fn on_component_will_mount(&self, _: &Props) {
                self.log.borrow_mut().push("will");
            }

            fn on_component_did_mount(&self, _: Option<&DomNode>, _: &Props) {
                self.log.borrow_mut().push("did");
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let vref = Ref::Hooks(Rc::new(Hooks { log: log.clone() }));

        let mut queue = LifecycleQueue::new();
        attach_functional_callbacks(Some(&vref), None, &Props::new(), &mut queue).unwrap();

        assert_eq!(log.borrow().as_slice(), ["will"]);
        assert_eq!(queue.len(), 1);

        queue.flush(&Runtime::default());
        assert_eq!(log.borrow().as_slice(), ["will", "did"]);
    }
}
