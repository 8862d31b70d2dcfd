//! Lifecycle queue - deferred post-mount notifications.
//!
//! Mounters append typed events while the tree is built; nothing reads
//! the queue until the top-level entry point flushes it exactly once,
//! after the whole tree (including all nested components) exists in the
//! DOM. Because component mounters append *after* their subtree mount
//! returns, queue order is post-order: children notify before parents,
//! however deep the recursion went.

use std::rc::Rc;

use crate::dom::DomNode;
use crate::runtime::Runtime;
use crate::vnode::{ClassHandle, FunctionalHooks, Props, VNode};

// =============================================================================
// Events
// =============================================================================

/// One deferred notification.
pub enum LifecycleEvent {
    /// A class component finished mounting. Flushing toggles the
    /// instance's updating guard around `did_mount` and then invokes the
    /// host's `after_mount` hook with the original view node.
    ClassDidMount {
        instance: ClassHandle,
        vnode: Rc<VNode>,
    },
    /// A functional component with a hooks ref finished mounting.
    HookDidMount {
        hooks: Rc<dyn FunctionalHooks>,
        dom: Option<DomNode>,
        props: Props,
    },
}

// =============================================================================
// Queue
// =============================================================================

/// Append-only during mount, drained once by [`LifecycleQueue::flush`].
#[derive(Default)]
pub struct LifecycleQueue {
    events: Vec<LifecycleEvent>,
}

impl LifecycleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LifecycleEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Invoke all collected events in collection order and empty the
    /// queue.
    pub fn flush(&mut self, runtime: &Runtime) {
        for event in self.events.drain(..) {
            match event {
                LifecycleEvent::ClassDidMount { instance, vnode } => {
                    instance.state.updating.set(true);
                    instance.state.component.borrow_mut().did_mount();
                    instance.state.updating.set(false);
                    if let Some(after_mount) = &runtime.options.after_mount {
                        after_mount(&vnode);
                    }
                }
                LifecycleEvent::HookDidMount { hooks, dom, props } => {
                    hooks.on_component_did_mount(dom.as_ref(), &props);
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
