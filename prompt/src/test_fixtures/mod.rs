// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Test doubles for the prompt's collaborators. They are public so that crates building
//! prompts on top of this one can test them the same way.

// Attach sources.
pub mod async_input_stream_mock;
pub mod call_log;
pub mod input_device_ext_mock;
pub mod mock_line_reader;
pub mod mock_screen;
pub mod output_device_ext;
pub mod stdout_mock;

// Re-export.
pub use async_input_stream_mock::*;
pub use call_log::*;
pub use input_device_ext_mock::*;
pub use mock_line_reader::*;
pub use mock_screen::*;
pub use output_device_ext::*;
pub use stdout_mock::*;
