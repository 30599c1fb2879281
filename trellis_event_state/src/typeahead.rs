// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typeahead: highlight the first item whose label starts with what was typed.
//!
//! Characters typed in quick succession accumulate into a search buffer. The
//! buffer resets once [`TypeaheadConfig::reset_after`] milliseconds pass
//! without a keystroke. Matching is case-insensitive and starts *after* the
//! currently highlighted item, wrapping around, so pressing the same letter
//! repeatedly cycles through every item starting with that letter.
//!
//! ```
//! use trellis_event_state::typeahead::Typeahead;
//!
//! let items = [(0_u32, "Apple"), (1, "Banana"), (2, "Blueberry"), (3, "Cherry")];
//! let mut search = Typeahead::new();
//!
//! assert_eq!(search.search('b', 0, &items, None), Some(1));
//! // Same letter again cycles to the next match.
//! assert_eq!(search.search('b', 100, &items, Some(1)), Some(2));
//! // After the buffer resets, a longer prefix narrows the match.
//! assert_eq!(search.search('b', 2_000, &items, Some(2)), Some(1));
//! assert_eq!(search.search('l', 2_100, &items, Some(1)), Some(2));
//! ```

use alloc::string::String;

/// Typeahead configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeaheadConfig {
    /// Idle time in milliseconds after which the search buffer is cleared.
    pub reset_after: u64,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self { reset_after: 1000 }
    }
}

/// Search buffer for typeahead navigation.
#[derive(Clone, Debug, Default)]
pub struct Typeahead {
    buffer: String,
    last_input: Option<u64>,
    /// Configuration.
    pub config: TypeaheadConfig,
}

impl Typeahead {
    /// Create an empty buffer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with a custom configuration.
    pub fn with_config(config: TypeaheadConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The current search buffer.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns `true` while a search is in progress (buffer not yet expired).
    pub fn is_active(&self, now: u64) -> bool {
        !self.buffer.is_empty() && !self.expired(now)
    }

    /// Clear the buffer.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_input = None;
    }

    /// Append `ch` to the buffer (clearing it first if it expired).
    pub fn push(&mut self, ch: char, now: u64) -> &str {
        if self.expired(now) {
            self.buffer.clear();
        }
        self.buffer.push(ch);
        self.last_input = Some(now);
        &self.buffer
    }

    /// Append `ch` and return the id of the best match among `items`.
    ///
    /// `items` should only contain enabled candidates, in display order.
    /// `current` is the currently highlighted id, used as the search start.
    pub fn search<K: Copy + PartialEq>(
        &mut self,
        ch: char,
        now: u64,
        items: &[(K, &str)],
        current: Option<K>,
    ) -> Option<K> {
        self.push(ch, now);
        find_match(&self.buffer, items, current)
    }

    fn expired(&self, now: u64) -> bool {
        self.last_input
            .is_none_or(|last| now.saturating_sub(last) > self.config.reset_after)
    }
}

/// Find the next item after `current` whose label starts with `buffer`.
fn find_match<K: Copy + PartialEq>(buffer: &str, items: &[(K, &str)], current: Option<K>) -> Option<K> {
    if items.is_empty() || buffer.is_empty() {
        return None;
    }
    // "bbb" behaves like "b": cycle through items starting with that letter.
    let mut chars = buffer.chars();
    let first = chars.next()?;
    let repeated = chars.all(|c| c == first);
    let mut single = [0_u8; 4];
    let needle: &str = if repeated {
        first.encode_utf8(&mut single)
    } else {
        buffer
    };

    let start = current
        .and_then(|id| items.iter().position(|(k, _)| *k == id))
        .map_or(0, |pos| pos + 1);
    let len = items.len();
    // A single-character search skips the current item so repeats advance;
    // a longer search may stay on it.
    let exclude_current = needle.chars().count() == 1;
    (0..len)
        .map(|offset| {
            if exclude_current {
                (start + offset) % len
            } else {
                (start + len - 1 + offset) % len
            }
        })
        .map(|i| items[i])
        .find(|(k, label)| {
            !(exclude_current && Some(*k) == current) && starts_with_ignore_case(label, needle)
        })
        .map(|(k, _)| k)
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let mut text = text.chars().flat_map(char::to_lowercase);
    prefix
        .chars()
        .flat_map(char::to_lowercase)
        .all(|p| text.next() == Some(p))
}
