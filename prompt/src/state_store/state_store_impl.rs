// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use super::{PartialState, PromptState, PromptStatus};

/// Holds the three layers that make up a prompt's state:
///
/// 1. Defaults ([`PromptState::default()`]), always present as a floor.
/// 2. The caller supplied initial state, fixed at construction.
/// 3. The accumulated overrides from every accepted [`StateStore::set_state()`] call.
///
/// [`StateStore::get_state()`] returns `defaults ⊕ initial ⊕ overrides` as an immutable
/// [`Arc`] snapshot. Each accepted write bumps [`StateStore::version()`] and produces a new
/// snapshot, so anyone holding an older snapshot keeps seeing the old values.
///
/// The store is passive. It does not render, the caller does that after each write.
///
/// Writes are sanitized before they are merged:
/// - Once the status is [`PromptStatus::Done`] every write is ignored.
/// - Entering [`PromptStatus::Loading`] from another status resets `loading_increment`
///   to 0.
/// - A `loading_increment` write is dropped unless the resulting status is
///   [`PromptStatus::Loading`].
#[derive(Debug, Clone)]
pub struct StateStore {
    initial: PartialState,
    overrides: PartialState,
    version: u64,
    snapshot: Arc<PromptState>,
}

impl StateStore {
    #[must_use]
    pub fn new(initial: PartialState) -> Self {
        let snapshot = Arc::new(Self::compute(&initial, &PartialState::default()));
        Self {
            initial,
            overrides: PartialState::default(),
            version: 0,
            snapshot,
        }
    }

    /// Current merged snapshot. Cheap, this is an [`Arc`] clone.
    #[must_use]
    pub fn get_state(&self) -> Arc<PromptState> { self.snapshot.clone() }

    /// Number of accepted writes so far.
    #[must_use]
    pub fn version(&self) -> u64 { self.version }

    /// Shallow merges `partial` into the override layer. See the type docs for the rules
    /// that may drop all or part of the write.
    pub fn set_state(&mut self, mut partial: PartialState) {
        let current = self.snapshot.status;
        let next = partial.status.unwrap_or(current);

        if !current.can_transition_to(next) {
            tracing::warn!(
                message = "Ignoring state write after prompt is done",
                ?partial
            );
            return;
        }

        if next == PromptStatus::Loading {
            if current != PromptStatus::Loading {
                partial.loading_increment = Some(0);
            }
        } else {
            partial.loading_increment = None;
        }

        self.overrides.merge(partial);
        self.version += 1;
        self.snapshot = Arc::new(Self::compute(&self.initial, &self.overrides));
    }

    fn compute(initial: &PartialState, overrides: &PartialState) -> PromptState {
        let mut it = PromptState::default();
        initial.apply_to(&mut it);
        overrides.apply_to(&mut it);
        it
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::PromptMessage;

    #[test]
    fn test_defaults_are_the_floor() {
        let store = StateStore::new(PartialState::default());
        assert_eq!(*store.get_state(), PromptState::default());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_layers_merge_in_order() {
        let mut store =
            StateStore::new(PartialState::new().default_value("hello").value("init"));

        store.set_state(PartialState::new().value("a"));
        store.set_state(PartialState::new().message("Name?").error("bad"));
        store.set_state(PartialState::new().value("ab").clear_error());

        let state = store.get_state();
        assert_eq!(state.value, "ab");
        assert_eq!(state.default, "hello");
        assert_eq!(state.message, PromptMessage::Ready("Name?".into()));
        assert_eq!(state.error, None);
        assert_eq!(store.version(), 3);
    }

    #[test]
    fn test_snapshots_are_immutable() {
        let mut store = StateStore::new(PartialState::default());
        let before = store.get_state();
        store.set_state(PartialState::new().value("x"));
        assert_eq!(before.value, "");
        assert_eq!(store.get_state().value, "x");
    }

    #[test]
    fn test_done_is_terminal() {
        let mut store = StateStore::new(PartialState::default());
        store.set_state(PartialState::new().status(PromptStatus::Done));
        let version = store.version();

        store.set_state(PartialState::new().status(PromptStatus::Idle).value("late"));

        let state = store.get_state();
        assert_eq!(state.status, PromptStatus::Done);
        assert_eq!(state.value, "");
        assert_eq!(store.version(), version);
    }

    #[test]
    fn test_entering_loading_resets_increment() {
        let mut store = StateStore::new(PartialState::default());
        store.set_state(PartialState::new().status(PromptStatus::Loading));
        store.set_state(PartialState::new().loading_increment(7));
        assert_eq!(store.get_state().loading_increment, 7);

        store.set_state(PartialState::new().status(PromptStatus::Idle));
        store.set_state(PartialState::new().status(PromptStatus::Loading));
        assert_eq!(store.get_state().loading_increment, 0);
    }

    #[test]
    fn test_increment_frozen_outside_loading() {
        let mut store = StateStore::new(PartialState::default());
        store.set_state(PartialState::new().loading_increment(3).value("v"));

        let state = store.get_state();
        assert_eq!(state.loading_increment, 0);
        assert_eq!(state.value, "v");
    }
}
