//! Selection phases and phase-change listeners.
//!
//! A UI redraws selection highlighting when the phase changes. Instead of
//! binding to a toolkit property, it registers a plain callback that is told
//! the old and new phase.

use serde::{Deserialize, Serialize};

/// Where the selector is in a move-selection cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the move origin. Resolved automatically.
    SelectFrom,
    /// Waiting for the destination.
    SelectTo,
    /// A legal destination has been picked; the move can be made.
    ReadyToMove,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(Phase, Phase)>;

/// Registered phase-change callbacks, called in subscription order.
#[derive(Default)]
pub struct PhaseListeners {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u32,
}

impl PhaseListeners {
    /// Create an empty listener set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback receiving `(old, new)` on every phase change.
    pub fn subscribe(&mut self, listener: impl FnMut(Phase, Phase) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// True if no callback is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call every listener with `(old, new)`.
    pub fn notify(&mut self, old: Phase, new: Phase) {
        for (_, listener) in &mut self.listeners {
            listener(old, new);
        }
    }
}

impl std::fmt::Debug for PhaseListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseListeners")
            .field("count", &self.listeners.len())
            .finish()
    }
}
