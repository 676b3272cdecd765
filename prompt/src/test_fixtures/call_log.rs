// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc, PoisonError};

use crate::StdMutex;

/// Shared, ordered record of calls made on the mock collaborators. Clone it into each mock
/// and assert on the order afterwards.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<StdMutex<Vec<String>>>,
}

impl CallLog {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn push(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn count(&self, entry: &str) -> usize {
        self.entries().iter().filter(|it| *it == entry).count()
    }
}
