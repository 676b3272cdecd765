// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use crate::{SpinnerTemplate, loader::{LOADER_SHOW_DELAY, SPINNER_TICK_INTERVAL}};

pub const LOADING_MESSAGE: &str = "Loading...";
pub const READY_GLYPH: &str = "?";
pub const ERROR_MARKER: &str = ">>";
pub const DEFAULT_ERROR_MESSAGE: &str = "you must provide a valid value";

/// Knobs that control how a prompt looks and when the loader shows up. These are the same
/// for every run of a [`crate::Prompt`].
///
/// Use [`PromptSettings::plain()`] to turn off ANSI colors (handy in tests, and when
/// output is piped).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSettings {
    /// How long a submission may run before the spinner is shown.
    pub loader_show_delay: Duration,
    /// Time between two spinner frames.
    pub spinner_tick_interval: Duration,
    pub spinner_template: SpinnerTemplate,
    /// Displayed in place of the message until a deferred message resolves.
    pub loading_message: String,
    /// Prefix shown while idle or done.
    pub ready_glyph: String,
    /// Prepended to the error text to make the error banner.
    pub error_marker: String,
    /// Used when a validator rejects a value without saying why.
    pub default_error_message: String,
    pub colorize: bool,
}

impl Default for PromptSettings {
    fn default() -> Self {
        Self {
            loader_show_delay: LOADER_SHOW_DELAY,
            spinner_tick_interval: SPINNER_TICK_INTERVAL,
            spinner_template: SpinnerTemplate::Braille,
            loading_message: LOADING_MESSAGE.into(),
            ready_glyph: READY_GLYPH.into(),
            error_marker: ERROR_MARKER.into(),
            default_error_message: DEFAULT_ERROR_MESSAGE.into(),
            colorize: true,
        }
    }
}

impl PromptSettings {
    /// Default settings without ANSI colors.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            colorize: false,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_loader_show_delay(mut self, delay: Duration) -> Self {
        self.loader_show_delay = delay;
        self
    }

    #[must_use]
    pub fn with_spinner(mut self, template: SpinnerTemplate, tick_interval: Duration) -> Self {
        self.spinner_template = template;
        self.spinner_tick_interval = tick_interval;
        self
    }

    #[must_use]
    pub fn with_loading_message(mut self, message: impl Into<String>) -> Self {
        self.loading_message = message.into();
        self
    }

    #[must_use]
    pub fn with_error_marker(mut self, marker: impl Into<String>) -> Self {
        self.error_marker = marker.into();
        self
    }

    #[must_use]
    pub fn with_default_error_message(mut self, message: impl Into<String>) -> Self {
        self.default_error_message = message.into();
        self
    }

    #[must_use]
    pub fn with_colorize(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }
}
