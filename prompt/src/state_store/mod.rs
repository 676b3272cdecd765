// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod prompt_state;
pub mod state_store_impl;

// Re-export.
pub use prompt_state::*;
pub use state_store_impl::*;
