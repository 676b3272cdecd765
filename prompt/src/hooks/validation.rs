// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Result of a validator.
///
/// | Validator returns    | Meaning                                   |
/// | :------------------- | :---------------------------------------- |
/// | `true`               | [`Validation::Valid`]                     |
/// | a non empty message  | [`Validation::Invalid`] with that message |
/// | `false`, or `""`     | [`Validation::Rejected`], generic message |
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Validation {
    #[default]
    Valid,
    Invalid(String),
    Rejected,
}

impl Validation {
    #[must_use]
    pub fn is_valid(&self) -> bool { matches!(self, Validation::Valid) }

    /// The error text to show, or [`None`] when valid. A [`Validation::Rejected`] uses
    /// `fallback`.
    #[must_use]
    pub fn into_error_message(self, fallback: &str) -> Option<String> {
        match self {
            Validation::Valid => None,
            Validation::Invalid(message) => Some(message),
            Validation::Rejected => Some(fallback.to_string()),
        }
    }
}

impl From<bool> for Validation {
    fn from(is_valid: bool) -> Self {
        if is_valid {
            Validation::Valid
        } else {
            Validation::Rejected
        }
    }
}

impl From<String> for Validation {
    fn from(message: String) -> Self {
        if message.is_empty() {
            Validation::Rejected
        } else {
            Validation::Invalid(message)
        }
    }
}

impl From<&str> for Validation {
    fn from(message: &str) -> Self { message.to_string().into() }
}
