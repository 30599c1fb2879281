// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logical keys understood by Trellis widgets.

/// A logical key press, already decoded by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape.
    Escape,
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Any key producing a printable character.
    Character(char),
}

impl Key {
    /// Returns `true` for keys that activate a focused trigger or item.
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }

    /// The printable character carried by this key, if any.
    pub const fn printable(self) -> Option<char> {
        match self {
            Self::Character(c) => Some(c),
            _ => None,
        }
    }

    /// Returns `true` for the four arrow keys.
    pub const fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }
}
