// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events, listener sets, and containment.

use trellis_event_state::Key;

bitflags::bitflags! {
    /// Document listeners held by an open overlay.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Listeners: u8 {
        /// Pointer-down anywhere in the document.
        const POINTER_DOWN = 0b0000_0001;
        /// Key-down anywhere in the document (Escape handling).
        const KEY_DOWN     = 0b0000_0010;
        /// Scroll anywhere in the document, capture phase.
        const SCROLL       = 0b0000_0100;
        /// Viewport resize.
        const RESIZE       = 0b0000_1000;
    }
}

impl Default for Listeners {
    fn default() -> Self {
        Self::all()
    }
}

/// A document-level event forwarded by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentEvent<N> {
    /// A pointer was pressed on `target` (`None` if it hit nothing the host tracks).
    PointerDown {
        /// Node under the pointer.
        target: Option<N>,
    },
    /// A key was pressed while `focused` had focus.
    KeyDown {
        /// The key.
        key: Key,
        /// Node holding focus, if any.
        focused: Option<N>,
    },
    /// A scroll originated at `source`.
    Scroll {
        /// Scrolled node (`None` for the document itself).
        source: Option<N>,
    },
    /// The viewport was resized.
    Resize,
}

/// Why an overlay was dismissed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DismissReason {
    /// Pointer pressed outside both trigger and content.
    PointerDownOutside,
    /// Escape pressed.
    Escape,
    /// Something other than the content scrolled.
    Scroll,
    /// The viewport was resized.
    Resize,
}

impl DismissReason {
    /// The listener responsible for this reason.
    pub const fn listener(self) -> Listeners {
        match self {
            Self::PointerDownOutside => Listeners::POINTER_DOWN,
            Self::Escape => Listeners::KEY_DOWN,
            Self::Scroll => Listeners::SCROLL,
            Self::Resize => Listeners::RESIZE,
        }
    }
}

/// Host capability: parent of a node in the host's element tree.
pub trait ParentLookup<N> {
    /// Parent of `node`, or `None` at the root or for unknown nodes.
    fn parent_of(&self, node: &N) -> Option<N>;
}

impl<N, F: Fn(&N) -> Option<N>> ParentLookup<N> for F {
    fn parent_of(&self, node: &N) -> Option<N> {
        self(node)
    }
}

// Guards against cyclic parent data from the host.
const MAX_DEPTH: usize = 4096;

/// Returns `true` if `node` is `ancestor` or one of its descendants.
pub fn contains<N: PartialEq + Clone>(lookup: &impl ParentLookup<N>, ancestor: &N, node: &N) -> bool {
    let mut current = node.clone();
    for _ in 0..MAX_DEPTH {
        if current == *ancestor {
            return true;
        }
        match lookup.parent_of(&current) {
            Some(parent) => current = parent,
            None => return false,
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 ─┬─ 1 ── 3
    //    └─ 2
    fn parent(n: &u32) -> Option<u32> {
        match n {
            1 | 2 => Some(0),
            3 => Some(1),
            _ => None,
        }
    }

    #[test]
    fn containment_is_inclusive_and_transitive() {
        assert!(contains(&parent, &1, &1));
        assert!(contains(&parent, &1, &3));
        assert!(contains(&parent, &0, &3));
        assert!(!contains(&parent, &2, &3));
        assert!(!contains(&parent, &3, &1));
    }

    #[test]
    fn cyclic_parents_terminate() {
        let cyclic = |n: &u32| Some(if *n == 5 { 6 } else { 5 });
        assert!(!contains(&cyclic, &7, &5));
    }

    #[test]
    fn reasons_map_to_listeners() {
        assert_eq!(DismissReason::Escape.listener(), Listeners::KEY_DOWN);
        assert_eq!(DismissReason::Resize.listener(), Listeners::RESIZE);
        assert_eq!(Listeners::default(), Listeners::all());
    }
}
