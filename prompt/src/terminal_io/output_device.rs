// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::{Arc, MutexGuard};

use crate::{PromptError, SafeRawTerminal, SendRawTerminal, StdMutex};

pub type LockedOutputDevice<'a> = &'a mut dyn std::io::Write;

/// Where a [`crate::TerminalScreen`] writes its frames.
/// - It is safe to clone.
/// - To write to it, use [`Self::lock()`], in its own block scope.
/// - See [`crate::OutputDeviceExt::new_mock()`] for a test double.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub is_mock: bool,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Arc::new(StdMutex::new(std::io::stdout())),
            is_mock: false,
        }
    }

    /// Locks the output device for writing. Don't call this again in the same scope, it
    /// will deadlock.
    ///
    /// # Errors
    ///
    /// If the mutex is poisoned, ie, a thread panicked while holding the lock.
    pub fn lock(&self) -> Result<MutexGuard<'_, SendRawTerminal>, PromptError> {
        self.resource
            .lock()
            .map_err(|_| PromptError::Io(std::io::Error::other("output device lock poisoned")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_output_device_is_not_mock() {
        let device = OutputDevice::new_stdout();
        assert!(!device.is_mock);
        let mut guard = device.lock().unwrap();
        let mut_ref: LockedOutputDevice<'_> = &mut *guard;
        assert!(mut_ref.flush().is_ok());
    }
}
