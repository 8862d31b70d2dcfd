//! # spark-dom
//!
//! Virtual DOM mount engine for Rust.
//!
//! Turns a declarative view-node tree into a live DOM tree plus a
//! parallel internal tree the patch engine navigates later. The mount of
//! a tree is one synchronous pass; deferred did-mount notifications are
//! collected in a queue and flushed once at the end, children before
//! parents.
//!
//! ## Architecture
//!
//! ```text
//! VInput tree → mount dispatcher → {text, element, component, array, portal}
//!            → live DOM + internal (IV) tree → lifecycle flush
//! ```
//!
//! Every mount input gets a fresh internal node: the engine records the
//! DOM it produced, the derived child-shape flags, and the component
//! back references the patch engine needs, without ever mutating the
//! caller's view nodes.
//!
//! ## Modules
//!
//! - [`types`] - flag bitsets and internal node kinds
//! - [`vnode`] - view nodes, mount inputs, components, refs
//! - [`iv`] - the engine-owned internal tree
//! - [`dom`] - the in-memory DOM surface mounters write to
//! - [`mount`] - the mount dispatcher and specialized mounters
//! - [`runtime`] - explicitly owned options, context and registries
//! - [`lifecycle`] - the deferred did-mount queue
//! - [`props`] - prop application and controlled-form wiring
//! - [`pool`] - node recycling pool shape (inert)

pub mod dom;
pub mod error;
pub mod iv;
pub mod lifecycle;
pub mod mount;
pub mod pool;
pub mod props;
pub mod refs;
pub mod runtime;
pub mod types;
pub mod vnode;

// Re-export commonly used items
pub use types::{ChildFlags, IvKind, VNodeFlags};

pub use vnode::{
    format_number, ClassHandle, Component, ComponentFactory, FunctionalHooks, PropValue, Props,
    Ref, RenderFn, VInput, VNode, VNodeType,
};

pub use dom::{create_element, create_text, insert_or_append, DomNode, Namespace};

pub use iv::{IvChildren, IvNode, IvRef};

pub use mount::mount_tree;

pub use runtime::{Context, Options, Runtime};

pub use lifecycle::{LifecycleEvent, LifecycleQueue};

pub use error::MountError;
