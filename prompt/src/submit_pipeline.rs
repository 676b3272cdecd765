// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Write as _;

use crate::{AnswerHooks, PromptConfig, PromptSettings, PromptState};

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome<V> {
    /// The typed answer passed every validator.
    Done(V),
    /// The text to show in the error banner.
    Failed(String),
}

/// Runs one submission against the `snapshot` captured when it started. Each step waits
/// for the previous one to settle:
///
/// 1. Raw value from [`PromptConfig::map_state_to_value()`].
/// 2. [`AnswerHooks::filter()`] on the raw value.
/// 3. [`PromptConfig::validate_raw()`] on the raw value (synchronous).
/// 4. [`AnswerHooks::validate()`] on the filtered value, only if step 3 passed.
///
/// Errors from the hooks are turned into [`SubmitOutcome::Failed`] using
/// [`describe_report()`]. Nothing here returns an error to the caller.
pub async fn run_submit_pipeline<C, H>(
    config: &C,
    hooks: &H,
    snapshot: &PromptState,
    settings: &PromptSettings,
) -> SubmitOutcome<H::Value>
where
    C: PromptConfig + ?Sized,
    H: AnswerHooks,
{
    let fallback = settings.default_error_message.as_str();
    let raw_value = config.map_state_to_value(snapshot);

    let filtered = match hooks.filter(raw_value.clone()).await {
        Ok(it) => it,
        Err(report) => return SubmitOutcome::Failed(describe_report(&report)),
    };

    if let Some(message) = config
        .validate_raw(&raw_value, snapshot)
        .into_error_message(fallback)
    {
        return SubmitOutcome::Failed(message);
    }

    match hooks.validate(&filtered, snapshot).await {
        Ok(validation) => match validation.into_error_message(fallback) {
            None => SubmitOutcome::Done(filtered),
            Some(message) => SubmitOutcome::Failed(message),
        },
        Err(report) => SubmitOutcome::Failed(describe_report(&report)),
    }
}

/// The report's message, then each cause on its own line, then the help text if there is
/// any.
#[must_use]
pub fn describe_report(report: &miette::Report) -> String {
    let mut acc = report.to_string();
    for cause in report.chain().skip(1) {
        _ = write!(acc, "\n  caused by: {cause}");
    }
    if let Some(help) = report.help() {
        _ = write!(acc, "\n  help: {help}");
    }
    acc
}
