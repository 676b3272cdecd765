// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Errors that escape a prompt run. Validation failures and hook errors are not in this
//! list: those are shown to the user as an error banner and the prompt keeps running.
//! See [`PromptError`].

/// Failures that end a prompt run.
///
/// | Variant                    | Cause                                                       | Who fixes it |
/// | :------------------------- | :---------------------------------------------------------- | :----------- |
/// | [`CompletionNotArmed`]     | Completion signaled before [`CompletionSlot::arm()`]        | Integrator   |
/// | [`CompletionAlreadyArmed`] | [`CompletionSlot::arm()`] called twice                      | Integrator   |
/// | [`CompletionAlreadyFired`] | A second answer was delivered for the same run              | Integrator   |
/// | [`CompletionDropped`]      | The run ended without delivering an answer                  | Integrator   |
/// | [`ReaderPaused`]           | The line reader was polled while it was paused              | Integrator   |
/// | [`InputClosed`]            | Input stream ended, or the user pressed `Ctrl+C` / `Ctrl+D` | User         |
/// | [`MessageUnavailable`]     | The deferred prompt message failed to resolve               | Integrator   |
/// | [`Io`]                     | Writing to the terminal failed                              | Environment  |
///
/// [`CompletionNotArmed`]: Self::CompletionNotArmed
/// [`CompletionAlreadyArmed`]: Self::CompletionAlreadyArmed
/// [`CompletionAlreadyFired`]: Self::CompletionAlreadyFired
/// [`CompletionDropped`]: Self::CompletionDropped
/// [`ReaderPaused`]: Self::ReaderPaused
/// [`InputClosed`]: Self::InputClosed
/// [`MessageUnavailable`]: Self::MessageUnavailable
/// [`Io`]: Self::Io
/// [`CompletionSlot::arm()`]: crate::CompletionSlot::arm
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum PromptError {
    #[error("Prompt completion was signaled before it was armed")]
    #[diagnostic(
        code(r3bl_prompt::completion_not_armed),
        help(
            "Arm the `CompletionSlot` and pass it to `StateManager::execute()`, \
             or use `Prompt::run()` which does both."
        )
    )]
    CompletionNotArmed,

    #[error("Prompt completion slot is already armed")]
    #[diagnostic(
        code(r3bl_prompt::completion_already_armed),
        help("Use a fresh `CompletionSlot` for every prompt run.")
    )]
    CompletionAlreadyArmed,

    #[error("Prompt completion was signaled more than once")]
    #[diagnostic(
        code(r3bl_prompt::completion_already_fired),
        help("A prompt run delivers exactly one answer. Use a new run for a new answer.")
    )]
    CompletionAlreadyFired,

    #[error("Prompt ended without delivering an answer")]
    #[diagnostic(code(r3bl_prompt::completion_dropped))]
    CompletionDropped,

    #[error("Line reader was polled while paused")]
    #[diagnostic(
        code(r3bl_prompt::reader_paused),
        help("Call `LineReader::resume()` before asking for the next event.")
    )]
    ReaderPaused,

    #[error("Input closed before an answer was submitted")]
    #[diagnostic(code(r3bl_prompt::input_closed))]
    InputClosed,

    #[error("Failed to resolve the prompt message: {reason}")]
    #[diagnostic(code(r3bl_prompt::message_unavailable))]
    MessageUnavailable {
        /// Description of the underlying error.
        reason: String,
    },

    #[error("Terminal I/O failed")]
    #[diagnostic(
        code(r3bl_prompt::io),
        help("Check that stdout is a terminal and has not been closed.")
    )]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic;

    use super::*;

    #[test]
    fn test_diagnostic_codes() {
        let it = PromptError::CompletionNotArmed;
        assert_eq!(
            it.code().map(|code| code.to_string()),
            Some("r3bl_prompt::completion_not_armed".to_string())
        );
        assert!(it.help().is_some());
    }

    #[test]
    fn test_message_unavailable_display() {
        let it = PromptError::MessageUnavailable {
            reason: "network down".into(),
        };
        assert_eq!(
            it.to_string(),
            "Failed to resolve the prompt message: network down"
        );
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::other("broken pipe");
        let it: PromptError = io.into();
        assert!(matches!(it, PromptError::Io(_)));
    }
}
