// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod answer_hooks;
pub mod prompt_config;
pub mod state_handle;
pub mod validation;

// Re-export.
pub use answer_hooks::*;
pub use prompt_config::*;
pub use state_handle::*;
pub use validation::*;
