// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod loader_constants;
pub mod loader_scheduler;
pub mod spinner_frames;

// Re-export.
pub use loader_constants::*;
pub use loader_scheduler::*;
pub use spinner_frames::*;
