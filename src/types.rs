//! Core flag types for spark-dom.
//!
//! These bitsets are the wire contract between the mount engine and the
//! patch engine: both sides read the same bits, so the layouts here must
//! never be reordered. The view-node flags identify what a node *is*,
//! the child flags record what shape of children an internal node ended
//! up with, and [`IvKind`] separates real DOM-bearing nodes from logical
//! grouping nodes.

// =============================================================================
// View Node Flags
// =============================================================================

bitflags::bitflags! {
    /// Kind bits carried by a view node.
    ///
    /// Exactly one primary kind bit (ELEMENT, COMPONENT_CLASS,
    /// COMPONENT_FUNCTION or PORTAL) is set per node; the constructors in
    /// [`crate::vnode`] enforce this. SVG_ELEMENT and FORM_ELEMENT are
    /// secondary bits that refine element handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct VNodeFlags: u16 {
        const ELEMENT = 1;
        const COMPONENT_CLASS = 1 << 1;
        const COMPONENT_FUNCTION = 1 << 2;
        const PORTAL = 1 << 3;
        const SVG_ELEMENT = 1 << 4;
        const FORM_ELEMENT = 1 << 5;

        /// Either component kind.
        const COMPONENT = Self::COMPONENT_CLASS.bits() | Self::COMPONENT_FUNCTION.bits();
    }
}

// =============================================================================
// Child Shape Flags
// =============================================================================

bitflags::bitflags! {
    /// Child-set shape derived once at mount time.
    ///
    /// The variants are mutually exclusive by construction: mounters assign
    /// a whole value, never OR bits together. The patch engine consumes
    /// these as its fast-path dispatch hints.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChildFlags: u8 {
        /// No renderable children (null, undefined or boolean input).
        const HAS_INVALID_CHILDREN = 1;
        /// A single text payload, written directly into the DOM node.
        const HAS_TEXT_CHILDREN = 1 << 1;
        /// Exactly one child internal node.
        const HAS_BASIC_CHILDREN = 1 << 2;
        /// An ordered child list tracked by explicit keys.
        const HAS_KEYED_CHILDREN = 1 << 3;
        /// An ordered child list tracked by position only.
        const HAS_NON_KEYED_CHILDREN = 1 << 4;
    }
}

// =============================================================================
// Internal Node Kind
// =============================================================================

/// Whether an internal node owns a real DOM node or is a logical grouping.
///
/// A `VirtualArray` node (array fragment, component array output) borrows
/// its `dom` from its first child so ancestors can answer "where is this
/// node anchored" without descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum IvKind {
    #[default]
    Regular = 0,
    VirtualArray = 1,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_kind_bits_are_disjoint() {
        let primaries = [
            VNodeFlags::ELEMENT,
            VNodeFlags::COMPONENT_CLASS,
            VNodeFlags::COMPONENT_FUNCTION,
            VNodeFlags::PORTAL,
        ];
        for (i, a) in primaries.iter().enumerate() {
            for (j, b) in primaries.iter().enumerate() {
                if i != j {
                    assert!((*a & *b).is_empty());
                }
            }
        }
    }

    #[test]
    fn test_component_covers_both_kinds() {
        assert!(VNodeFlags::COMPONENT.contains(VNodeFlags::COMPONENT_CLASS));
        assert!(VNodeFlags::COMPONENT.contains(VNodeFlags::COMPONENT_FUNCTION));
        assert!(!VNodeFlags::COMPONENT.contains(VNodeFlags::ELEMENT));
    }

    #[test]
    fn test_child_flags_are_distinct() {
        let shapes = [
            ChildFlags::HAS_INVALID_CHILDREN,
            ChildFlags::HAS_TEXT_CHILDREN,
            ChildFlags::HAS_BASIC_CHILDREN,
            ChildFlags::HAS_KEYED_CHILDREN,
            ChildFlags::HAS_NON_KEYED_CHILDREN,
        ];
        for (i, a) in shapes.iter().enumerate() {
            for (j, b) in shapes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }
}
