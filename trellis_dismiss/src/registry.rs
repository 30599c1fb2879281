// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry of open overlays and their dismissal listeners.

use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;
use trellis_event_state::Key;

use crate::types::{DismissReason, DocumentEvent, Listeners, ParentLookup, contains};

/// One instance that must close.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dismissal<K> {
    /// Instance key.
    pub key: K,
    /// Why it must close.
    pub reason: DismissReason,
}

/// Dismissals produced by one event, most recently interacted instance first.
pub type Dismissals<K> = SmallVec<[Dismissal<K>; 2]>;

#[derive(Clone, Debug)]
struct Layer<N> {
    trigger: Option<N>,
    content: Option<N>,
    listeners: Listeners,
    /// Interaction recency; higher is more recent.
    touched: u64,
}

/// Listener registry keyed by overlay instance.
///
/// ## Usage
///
/// - On the open transition (or at construction if created open), call
///   [`DismissRegistry::attach`] (or [`DismissRegistry::sync`] with `open = true`).
/// - Forward document events to [`DismissRegistry::dispatch`] and route the
///   returned [`Dismissal`]s into each instance's open state.
/// - On every close path (explicit close, dismissal accepted, host-forced
///   close, unmount), call [`DismissRegistry::detach`]. Detaching an instance
///   that is not attached is a no-op, so unmount paths may call it
///   unconditionally.
pub struct DismissRegistry<K, N> {
    layers: HashMap<K, Layer<N>>,
    clock: u64,
}

impl<K: Debug, N: Debug> Debug for DismissRegistry<K, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DismissRegistry")
            .field("attached", &self.layers.len())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl<K, N> Default for DismissRegistry<K, N> {
    fn default() -> Self {
        Self {
            layers: HashMap::new(),
            clock: 0,
        }
    }
}

impl<K, N> DismissRegistry<K, N>
where
    K: Clone + Eq + Hash + Debug,
    N: Clone + PartialEq,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the full listener set for `key`.
    ///
    /// Returns `true` if the instance was not attached before. Re-attaching
    /// refreshes the nodes and marks the instance as most recently interacted.
    pub fn attach(&mut self, key: K, trigger: Option<N>, content: Option<N>) -> bool {
        self.attach_with(key, trigger, content, Listeners::all())
    }

    /// Register a specific listener set for `key`.
    ///
    /// Tooltips, for example, skip [`Listeners::SCROLL`].
    pub fn attach_with(
        &mut self,
        key: K,
        trigger: Option<N>,
        content: Option<N>,
        listeners: Listeners,
    ) -> bool {
        let touched = self.tick();
        let layer = Layer {
            trigger,
            content,
            listeners,
            touched,
        };
        let fresh = self.layers.insert(key.clone(), layer).is_none();
        if fresh {
            tracing::debug!(?key, ?listeners, "dismiss listeners attached");
        }
        fresh
    }

    /// Remove every listener held by `key`.
    ///
    /// Returns `true` if the instance was attached.
    pub fn detach(&mut self, key: &K) -> bool {
        let removed = self.layers.remove(key).is_some();
        if removed {
            tracing::debug!(?key, "dismiss listeners detached");
        }
        removed
    }

    /// Attach or detach `key` to match `open`.
    pub fn sync(&mut self, key: K, open: bool, trigger: Option<N>, content: Option<N>) {
        if open {
            if let Some(layer) = self.layers.get_mut(&key) {
                layer.trigger = trigger;
                layer.content = content;
            } else {
                self.attach(key, trigger, content);
            }
        } else {
            self.detach(&key);
        }
    }

    /// Update the nodes of an attached instance (for example once its content mounts).
    pub fn set_nodes(&mut self, key: &K, trigger: Option<N>, content: Option<N>) {
        if let Some(layer) = self.layers.get_mut(key) {
            layer.trigger = trigger;
            layer.content = content;
        }
    }

    /// Mark `key` as the most recently interacted instance.
    pub fn touch(&mut self, key: &K) {
        let now = self.tick();
        if let Some(layer) = self.layers.get_mut(key) {
            layer.touched = now;
        }
    }

    /// Returns `true` if `key` currently holds listeners.
    pub fn is_attached(&self, key: &K) -> bool {
        self.layers.contains_key(key)
    }

    /// Listener set held by `key` (empty if detached).
    pub fn listeners(&self, key: &K) -> Listeners {
        self.layers
            .get(key)
            .map_or(Listeners::empty(), |layer| layer.listeners)
    }

    /// Number of attached instances.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if nothing is attached.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total number of individual listeners held across all instances.
    pub fn listener_count(&self) -> usize {
        self.layers
            .values()
            .map(|layer| layer.listeners.bits().count_ones() as usize)
            .sum()
    }

    /// Evaluate a document event against every attached instance.
    ///
    /// Returns the instances that must close, most recently interacted first.
    /// A pointer press inside an instance also marks it as interacted with.
    pub fn dispatch(
        &mut self,
        event: &DocumentEvent<N>,
        lookup: &impl ParentLookup<N>,
    ) -> Dismissals<K> {
        let mut hits: SmallVec<[(u64, Dismissal<K>); 2]> = SmallVec::new();
        match event {
            DocumentEvent::PointerDown { target } => {
                let now = self.tick();
                for (key, layer) in &mut self.layers {
                    if !layer.listeners.contains(Listeners::POINTER_DOWN) {
                        continue;
                    }
                    let inside = target.as_ref().is_some_and(|t| layer.contains(lookup, t));
                    if inside {
                        layer.touched = now;
                    } else {
                        hits.push((layer.touched, dismissal(key, DismissReason::PointerDownOutside)));
                    }
                }
            }
            DocumentEvent::KeyDown { key, focused } => {
                if *key == Key::Escape {
                    if let Some(key) = self.escape_target(focused.as_ref(), lookup) {
                        hits.push((0, dismissal(&key, DismissReason::Escape)));
                    }
                }
            }
            DocumentEvent::Scroll { source } => {
                for (key, layer) in &self.layers {
                    if !layer.listeners.contains(Listeners::SCROLL) {
                        continue;
                    }
                    let inside_content = match (source, &layer.content) {
                        (Some(source), Some(content)) => contains(lookup, content, source),
                        _ => false,
                    };
                    if !inside_content {
                        hits.push((layer.touched, dismissal(key, DismissReason::Scroll)));
                    }
                }
            }
            DocumentEvent::Resize => {
                for (key, layer) in &self.layers {
                    if layer.listeners.contains(Listeners::RESIZE) {
                        hits.push((layer.touched, dismissal(key, DismissReason::Resize)));
                    }
                }
            }
        }
        // Deterministic order regardless of map iteration order.
        hits.sort_by(|a, b| b.0.cmp(&a.0));
        let out: Dismissals<K> = hits.into_iter().map(|(_, d)| d).collect();
        if !out.is_empty() {
            tracing::debug!(count = out.len(), "overlays dismissed");
        }
        out
    }

    /// The single instance Escape should close.
    fn escape_target(&self, focused: Option<&N>, lookup: &impl ParentLookup<N>) -> Option<K> {
        let candidates = || {
            self.layers
                .iter()
                .filter(|(_, layer)| layer.listeners.contains(Listeners::KEY_DOWN))
        };
        let focused_owner = focused.and_then(|f| {
            candidates()
                .filter(|(_, layer)| layer.contains(lookup, f))
                .max_by_key(|(_, layer)| layer.touched)
        });
        focused_owner
            .or_else(|| candidates().max_by_key(|(_, layer)| layer.touched))
            .map(|(key, _)| key.clone())
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }
}

impl<N: Clone + PartialEq> Layer<N> {
    fn contains(&self, lookup: &impl ParentLookup<N>, node: &N) -> bool {
        [&self.trigger, &self.content]
            .into_iter()
            .flatten()
            .any(|root| contains(lookup, root, node))
    }
}

fn dismissal<K: Clone>(key: &K, reason: DismissReason) -> Dismissal<K> {
    Dismissal {
        key: key.clone(),
        reason,
    }
}
