// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::KeyEvent;

use super::{StateHandle, Validation};
use crate::PromptState;

/// Behavior that is fixed for the lifetime of a prompt. Every method has a default, so a
/// plain text input is just `impl PromptConfig for MyInput {}`.
///
/// The [`crate::Renderer`] also receives a reference to the config, so it is a natural
/// place to keep static display data (choices for a list prompt, a placeholder, etc).
pub trait PromptConfig: Send + Sync + 'static {
    /// Called for every key except `Enter`, after `value` has been synced from the line
    /// reader buffer and `error` has been cleared. Use `handle` to change the state further
    /// (eg, move a selection) or to [`StateHandle::submit()`].
    fn on_keypress(
        &self,
        _raw_input: Option<&str>,
        _key: &KeyEvent,
        _state: &PromptState,
        _handle: &mut StateHandle<'_>,
    ) {
    }

    /// Called when the user presses `Enter`. The default submits right away.
    fn on_line(&self, _state: &PromptState, handle: &mut StateHandle<'_>) { handle.submit(); }

    /// Derives the raw answer from the state. The default is [`default_raw_value()`].
    fn map_state_to_value(&self, state: &PromptState) -> String { default_raw_value(state) }

    /// Synchronous structural check of the raw value. Runs after the filter and before
    /// [`crate::AnswerHooks::validate()`], which is skipped if this does not return
    /// [`Validation::Valid`].
    fn validate_raw(&self, _raw_value: &str, _state: &PromptState) -> Validation {
        Validation::Valid
    }
}

/// The buffer if it is not empty, otherwise the default.
#[must_use]
pub fn default_raw_value(state: &PromptState) -> String {
    if state.value.is_empty() {
        state.default.clone()
    } else {
        state.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_raw_value() {
        let mut state = PromptState {
            default: "hello".into(),
            ..Default::default()
        };
        assert_eq!(default_raw_value(&state), "hello");

        state.value = "hi".into();
        assert_eq!(default_raw_value(&state), "hi");
    }
}
