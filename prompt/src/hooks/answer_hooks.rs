// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::future::Future;

use super::Validation;
use crate::PromptState;

/// Per run hooks that turn the raw buffer into a typed answer.
///
/// Both [`Self::filter()`] and [`Self::validate()`] may be slow (a network lookup, a file
/// system check). If the pair takes longer than
/// [`crate::PromptSettings::loader_show_delay`] the prompt shows a spinner until they
/// finish. Returning an [`Err`] from either one does not end the prompt: the error's
/// message is shown in the error banner and the user can try again.
///
/// Implementations may use `async fn`:
///
/// ```
/// use r3bl_prompt::{AnswerHooks, PromptState, Validation};
///
/// struct Port;
///
/// impl AnswerHooks for Port {
///     type Value = u16;
///
///     async fn filter(&self, raw: String) -> miette::Result<u16> {
///         raw.trim().parse().map_err(|_| miette::miette!("{raw} is not a port"))
///     }
///
///     async fn validate(&self, value: &u16, _: &PromptState) -> miette::Result<Validation> {
///         Ok((*value >= 1024).into())
///     }
/// }
/// ```
pub trait AnswerHooks: Send + Sync {
    type Value: Send + 'static;

    /// Maps the raw value (see [`crate::PromptConfig::map_state_to_value()`]) to the typed
    /// answer.
    fn filter(
        &self,
        raw_value: String,
    ) -> impl Future<Output = miette::Result<Self::Value>> + Send;

    /// Semantic check of the filtered answer.
    fn validate(
        &self,
        value: &Self::Value,
        state: &PromptState,
    ) -> impl Future<Output = miette::Result<Validation>> + Send;

    /// Display form of the buffer. `is_final` is true for the last frame, after the
    /// answer is accepted.
    fn transformer(&self, value: &str, _is_final: bool) -> String { value.to_string() }
}

/// Accepts any text as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAnswerHooks;

impl AnswerHooks for DefaultAnswerHooks {
    type Value = String;

    async fn filter(&self, raw_value: String) -> miette::Result<String> { Ok(raw_value) }

    async fn validate(&self, _value: &String, _state: &PromptState) -> miette::Result<Validation> {
        Ok(Validation::Valid)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_default_hooks_are_identity() {
        let hooks = DefaultAnswerHooks;
        let value = hooks.filter("abc".into()).await.unwrap();
        assert_eq!(value, "abc");
        assert_eq!(
            hooks.validate(&value, &PromptState::default()).await.unwrap(),
            Validation::Valid
        );
        assert_eq!(hooks.transformer("abc", true), "abc");
    }
}
