// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc, PoisonError};

use super::CallLog;
use crate::{Screen, StdMutex, ok};

/// One call to [`Screen::render()`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub content: String,
    pub bottom_content: Option<String>,
}

/// Records every frame it is asked to render. Clones share the same frames, so keep one
/// in the test and hand the other to the prompt.
///
/// [`Screen::done()`] is recorded in the [`CallLog`] as `screen.done`.
#[derive(Debug, Clone)]
pub struct MockScreen {
    frames: Arc<StdMutex<Vec<Frame>>>,
    call_log: CallLog,
}

impl MockScreen {
    #[must_use]
    pub fn new(call_log: CallLog) -> Self {
        Self {
            frames: Arc::default(),
            call_log,
        }
    }

    #[must_use]
    pub fn frames(&self) -> Vec<Frame> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<Frame> { self.frames().pop() }
}

impl Screen for MockScreen {
    fn render(&mut self, content: &str, bottom_content: Option<&str>) -> miette::Result<()> {
        self.frames
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Frame {
                content: content.to_string(),
                bottom_content: bottom_content.map(str::to_string),
            });
        ok!()
    }

    fn done(&mut self) -> miette::Result<()> {
        self.call_log.push("screen.done");
        ok!()
    }
}
