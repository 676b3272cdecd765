// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, sync::Arc};

use crate::{PartialState, PromptState, StateStore};

/// The only way hooks can touch the prompt state. It is handed to
/// [`crate::PromptConfig::on_keypress()`] and [`crate::PromptConfig::on_line()`].
///
/// Every [`Self::set_state()`] merges into the [`StateStore`] and then re-renders, so the
/// terminal always shows the latest state.
///
/// `status` and `loading_increment` belong to the prompt itself. Hooks can't write them,
/// any such field in a [`PartialState`] passed here is dropped.
pub struct StateHandle<'a> {
    store: &'a mut StateStore,
    on_change: &'a mut dyn FnMut(&PromptState),
    submit_requested: bool,
}

impl Debug for StateHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateHandle")
            .field("store", &self.store)
            .field("submit_requested", &self.submit_requested)
            .finish_non_exhaustive()
    }
}

impl<'a> StateHandle<'a> {
    pub fn new(store: &'a mut StateStore, on_change: &'a mut dyn FnMut(&PromptState)) -> Self {
        Self {
            store,
            on_change,
            submit_requested: false,
        }
    }

    pub fn set_state(&mut self, mut partial: PartialState) {
        let status = partial.status.take();
        let loading_increment = partial.loading_increment.take();
        if status.is_some() || loading_increment.is_some() {
            tracing::warn!(
                message = "Dropping prompt owned fields written by a hook",
                status = ?status,
                loading_increment = ?loading_increment
            );
        }
        self.store.set_state(partial);
        let state = self.store.get_state();
        (self.on_change)(&state);
    }

    #[must_use]
    pub fn get_state(&self) -> Arc<PromptState> { self.store.get_state() }

    /// Asks the prompt to run the submit pipeline once the current hook returns.
    pub fn submit(&mut self) { self.submit_requested = true; }

    #[must_use]
    pub fn is_submit_requested(&self) -> bool { self.submit_requested }
}
