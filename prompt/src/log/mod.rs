// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Opt in [`tracing`] setup for apps built on this crate. The crate itself only emits
//! events, it never installs a subscriber. Since a prompt owns the terminal while it
//! runs, logging to a file ([`LogDestination::File`]) is usually what you want.

// Attach sources.
pub mod logging_config;
pub mod logging_init;
pub mod rolling_file_appender_impl;

// Re-export.
pub use logging_config::*;
pub use logging_init::*;
