// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_PATH: &str = "r3bl_prompt_log.log";

/// Where, how much, and for whom to log. Pass it to [`crate::init_logging()`].
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub destination: LogDestination,
    pub level_filter: LevelFilter,
    pub scope: LoggingScope,
}

/// Where log lines go. The `String` is the path of the log file, it is created (but not
/// rotated) if it doesn't exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

/// 1. [`LoggingScope::Global`] can only be set once per process. Use it in apps.
/// 2. [`LoggingScope::ThreadLocal`] lasts until the returned guard is dropped. Use it in
///    tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingScope {
    #[default]
    Global,
    ThreadLocal,
}

impl LoggingConfig {
    /// Debug level logging to `file_path` (or [`DEFAULT_LOG_FILE_PATH`]).
    #[must_use]
    pub fn new_file(maybe_file_path: Option<String>) -> Self {
        Self {
            destination: LogDestination::File(
                maybe_file_path.unwrap_or_else(|| DEFAULT_LOG_FILE_PATH.to_string()),
            ),
            level_filter: LevelFilter::DEBUG,
            scope: LoggingScope::Global,
        }
    }

    /// Debug level logging to stdout or stderr.
    #[must_use]
    pub fn new_display(display_preference: DisplayPreference) -> Self {
        Self {
            destination: LogDestination::Display(display_preference),
            level_filter: LevelFilter::DEBUG,
            scope: LoggingScope::Global,
        }
    }

    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: LoggingScope) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn display_preference(&self) -> Option<DisplayPreference> {
        match &self.destination {
            LogDestination::Display(it) | LogDestination::DisplayAndFile(it, _) => Some(*it),
            LogDestination::None | LogDestination::File(_) => None,
        }
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&str> {
        match &self.destination {
            LogDestination::File(it) | LogDestination::DisplayAndFile(_, it) => Some(it),
            LogDestination::None | LogDestination::Display(_) => None,
        }
    }
}
