// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{AsRefStr, Display, EnumString};

/// Lifecycle of a single prompt run.
///
/// ```text
/// Idle ──► Loading ──► Idle
///   │         │
///   └──► Done ◄┘
/// ```
///
/// [`PromptStatus::Done`] is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum PromptStatus {
    #[default]
    Idle,
    Loading,
    Done,
}

impl PromptStatus {
    /// Nothing leaves [`PromptStatus::Done`]. Every other move is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: PromptStatus) -> bool {
        match (self, next) {
            (PromptStatus::Done, _) => false,
            (PromptStatus::Idle | PromptStatus::Loading, _) => true,
        }
    }
}

/// The question text. It stays [`PromptMessage::Pending`] until a deferred message
/// resolves.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PromptMessage {
    #[default]
    Pending,
    Ready(String),
}

impl PromptMessage {
    #[must_use]
    pub fn as_ready(&self) -> Option<&str> {
        match self {
            PromptMessage::Pending => None,
            PromptMessage::Ready(it) => Some(it.as_str()),
        }
    }
}

/// Fully merged, immutable snapshot of a prompt's state. Produced by
/// [`crate::StateStore::get_state()`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptState {
    pub status: PromptStatus,
    /// The raw editable answer buffer.
    pub value: String,
    /// Fallback used when `value` is empty at submission. Empty means no default.
    pub default: String,
    pub message: PromptMessage,
    /// User facing validation failure text. Cleared on every keystroke.
    pub error: Option<String>,
    /// Spinner frame counter. Only moves while `status` is [`PromptStatus::Loading`].
    pub loading_increment: usize,
}

/// A set of field overrides to merge into a [`PromptState`]. Fields left as [`None`] are
/// untouched.
///
/// `error` is doubly optional so that a write can clear the error:
/// - `None` leaves it alone.
/// - `Some(None)` clears it.
/// - `Some(Some(msg))` sets it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartialState {
    pub status: Option<PromptStatus>,
    pub value: Option<String>,
    pub default: Option<String>,
    pub message: Option<PromptMessage>,
    pub error: Option<Option<String>>,
    pub loading_increment: Option<usize>,
}

impl PartialState {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn status(mut self, status: PromptStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(PromptMessage::Ready(message.into()));
        self
    }

    #[must_use]
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(Some(error.into()));
        self
    }

    #[must_use]
    pub fn clear_error(mut self) -> Self {
        self.error = Some(None);
        self
    }

    #[must_use]
    pub fn loading_increment(mut self, increment: usize) -> Self {
        self.loading_increment = Some(increment);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self == &Self::default() }

    /// Shallow merge: every field that is set in `other` wins.
    pub fn merge(&mut self, other: PartialState) {
        let PartialState {
            status,
            value,
            default,
            message,
            error,
            loading_increment,
        } = other;
        if status.is_some() {
            self.status = status;
        }
        if value.is_some() {
            self.value = value;
        }
        if default.is_some() {
            self.default = default;
        }
        if message.is_some() {
            self.message = message;
        }
        if error.is_some() {
            self.error = error;
        }
        if loading_increment.is_some() {
            self.loading_increment = loading_increment;
        }
    }

    /// Writes every set field into `state`.
    pub fn apply_to(&self, state: &mut PromptState) {
        if let Some(it) = self.status {
            state.status = it;
        }
        if let Some(it) = &self.value {
            state.value.clone_from(it);
        }
        if let Some(it) = &self.default {
            state.default.clone_from(it);
        }
        if let Some(it) = &self.message {
            state.message = it.clone();
        }
        if let Some(it) = &self.error {
            state.error.clone_from(it);
        }
        if let Some(it) = self.loading_increment {
            state.loading_increment = it;
        }
    }
}
