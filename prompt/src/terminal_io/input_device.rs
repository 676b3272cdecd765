// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::EventStream;
use futures_util::{FutureExt, StreamExt};
use miette::IntoDiagnostic;

use crate::{CrosstermEventResult, PinnedInputStream};

/// Source of terminal events for a [`crate::CrosstermLineReader`]. See
/// [`crate::InputDeviceExtMock`] for testing features.
#[allow(missing_debug_implementations)]
pub struct InputDevice {
    pub resource: PinnedInputStream<CrosstermEventResult>,
}

impl InputDevice {
    #[must_use]
    pub fn new_event_stream() -> InputDevice {
        InputDevice {
            resource: Box::pin(EventStream::new()),
        }
    }
}

impl InputDevice {
    /// Returns [`None`] once the stream is exhausted.
    ///
    /// # Errors
    ///
    /// If reading the underlying event source fails.
    pub async fn next(&mut self) -> miette::Result<Option<crossterm::event::Event>> {
        match self.resource.next().fuse().await {
            Some(it) => it.map(Some).into_diagnostic(),
            None => Ok(None),
        }
    }
}
