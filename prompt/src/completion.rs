// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tokio::sync::oneshot;

use crate::PromptError;

#[derive(Debug)]
enum SlotState<V> {
    Unarmed,
    Armed(oneshot::Sender<V>),
    Fired,
}

/// Single use channel that delivers the answer of one prompt run.
///
/// ```text
/// Unarmed ──arm()──► Armed ──fire()──► Fired
/// ```
///
/// Anything else is a protocol error and returns a [`PromptError`]:
/// - [`Self::fire()`] before [`Self::arm()`] ([`PromptError::CompletionNotArmed`]).
/// - [`Self::fire()`] twice ([`PromptError::CompletionAlreadyFired`]).
/// - [`Self::arm()`] twice ([`PromptError::CompletionAlreadyArmed`]).
#[derive(Debug)]
pub struct CompletionSlot<V> {
    state: SlotState<V>,
}

impl<V> Default for CompletionSlot<V> {
    fn default() -> Self { Self::new() }
}

impl<V> CompletionSlot<V> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: SlotState::Unarmed,
        }
    }

    /// Returns the receiving end of the slot.
    ///
    /// # Errors
    ///
    /// [`PromptError::CompletionAlreadyArmed`] if the slot was armed before.
    pub fn arm(&mut self) -> Result<oneshot::Receiver<V>, PromptError> {
        match self.state {
            SlotState::Unarmed => {
                let (sender, receiver) = oneshot::channel();
                self.state = SlotState::Armed(sender);
                Ok(receiver)
            }
            SlotState::Armed(_) | SlotState::Fired => Err(PromptError::CompletionAlreadyArmed),
        }
    }

    #[must_use]
    pub fn is_armed(&self) -> bool { matches!(self.state, SlotState::Armed(_)) }

    #[must_use]
    pub fn is_fired(&self) -> bool { matches!(self.state, SlotState::Fired) }

    /// Delivers `value`. If the receiver is gone the value is dropped, which still counts
    /// as fired.
    ///
    /// # Errors
    ///
    /// [`PromptError::CompletionNotArmed`] or [`PromptError::CompletionAlreadyFired`].
    pub fn fire(&mut self, value: V) -> Result<(), PromptError> {
        match std::mem::replace(&mut self.state, SlotState::Fired) {
            SlotState::Armed(sender) => {
                if sender.send(value).is_err() {
                    tracing::warn!(message = "Prompt answer receiver was dropped");
                }
                Ok(())
            }
            SlotState::Unarmed => {
                self.state = SlotState::Unarmed;
                Err(PromptError::CompletionNotArmed)
            }
            SlotState::Fired => Err(PromptError::CompletionAlreadyFired),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_arm_then_fire() {
        let mut slot = CompletionSlot::new();
        let receiver = slot.arm().unwrap();
        assert!(slot.is_armed());

        slot.fire("hello").unwrap();
        assert!(slot.is_fired());
        assert_eq!(receiver.await.unwrap(), "hello");
    }

    #[test]
    fn test_fire_before_arm_fails() {
        let mut slot = CompletionSlot::new();
        let result = slot.fire(1);
        assert!(matches!(result, Err(PromptError::CompletionNotArmed)));
        assert!(!slot.is_fired());
    }

    #[test]
    fn test_fire_twice_fails() {
        let mut slot = CompletionSlot::new();
        let _receiver = slot.arm().unwrap();
        slot.fire(1).unwrap();
        assert!(matches!(
            slot.fire(2),
            Err(PromptError::CompletionAlreadyFired)
        ));
    }

    #[test]
    fn test_arm_twice_fails() {
        let mut slot = CompletionSlot::<u8>::new();
        let _receiver = slot.arm().unwrap();
        assert!(matches!(
            slot.arm(),
            Err(PromptError::CompletionAlreadyArmed)
        ));
    }

    #[test]
    fn test_fire_with_dropped_receiver() {
        let mut slot = CompletionSlot::new();
        drop(slot.arm().unwrap());
        assert!(slot.fire(1).is_ok());
        assert!(slot.is_fired());
    }
}
