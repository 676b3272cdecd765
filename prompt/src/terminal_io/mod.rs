// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod input_device;
pub mod line_reader;
pub mod output_device;
pub mod screen;
pub mod terminal_io_type_aliases;

// Re-export.
pub use input_device::*;
pub use line_reader::*;
pub use output_device::*;
pub use screen::*;
pub use terminal_io_type_aliases::*;
