// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::CallLog;
use crate::{LineEvent, LineReader, PromptError};

/// One scripted step for a [`MockLineReader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockInput {
    /// Appends the char to the buffer.
    Char(char),
    /// Removes the last char from the buffer.
    Backspace,
    /// `Enter` keypress followed by a [`LineEvent::Line`].
    Enter,
    /// A key that leaves the buffer alone (arrows, tab, etc).
    Key(KeyEvent),
}

/// Scripted [`LineReader`]. Once the script runs out the input counts as closed.
///
/// Calls to `pause`, `resume` and `detach` are recorded in the [`CallLog`] as
/// `reader.pause`, `reader.resume` and `reader.detach`.
#[derive(Debug)]
pub struct MockLineReader {
    script: VecDeque<MockInput>,
    pending_line: bool,
    buffer: String,
    is_paused: bool,
    is_detached: bool,
    call_log: CallLog,
}

impl MockLineReader {
    #[must_use]
    pub fn new(call_log: CallLog) -> Self {
        Self {
            script: VecDeque::new(),
            pending_line: false,
            buffer: String::new(),
            is_paused: false,
            is_detached: false,
            call_log,
        }
    }

    #[must_use]
    pub fn type_text(mut self, text: &str) -> Self {
        self.script.extend(text.chars().map(MockInput::Char));
        self
    }

    #[must_use]
    pub fn press(mut self, input: MockInput) -> Self {
        self.script.push_back(input);
        self
    }

    #[must_use]
    pub fn press_enter(self) -> Self { self.press(MockInput::Enter) }
}

impl LineReader for MockLineReader {
    async fn next_event(&mut self) -> miette::Result<Option<LineEvent>> {
        if self.is_detached {
            return Ok(None);
        }
        if self.is_paused {
            return Err(PromptError::ReaderPaused.into());
        }
        if self.pending_line {
            self.pending_line = false;
            return Ok(Some(LineEvent::Line));
        }

        let Some(input) = self.script.pop_front() else {
            self.call_log.push("reader.closed");
            return Ok(None);
        };
        let event = match input {
            MockInput::Char(ch) => {
                self.buffer.push(ch);
                LineEvent::Keypress {
                    raw: Some(ch.to_string()),
                    key: KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE),
                }
            }
            MockInput::Backspace => {
                self.buffer.pop();
                LineEvent::Keypress {
                    raw: None,
                    key: KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
                }
            }
            MockInput::Enter => {
                self.pending_line = true;
                LineEvent::Keypress {
                    raw: None,
                    key: KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
                }
            }
            MockInput::Key(key) => LineEvent::Keypress { raw: None, key },
        };
        Ok(Some(event))
    }

    fn line(&self) -> &str { &self.buffer }

    fn pause(&mut self) {
        self.is_paused = true;
        self.call_log.push("reader.pause");
    }

    fn resume(&mut self) {
        self.is_paused = false;
        self.call_log.push("reader.resume");
    }

    fn detach(&mut self) {
        self.is_detached = true;
        self.call_log.push("reader.detach");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    #[allow(clippy::needless_return)]
    async fn test_script_plays_back() {
        let call_log = CallLog::new();
        let mut it = MockLineReader::new(call_log.clone())
            .type_text("ab")
            .press(MockInput::Backspace)
            .press_enter();

        for _ in 0..3 {
            it.next_event().await.unwrap();
        }
        assert_eq!(it.line(), "a");
        assert!(matches!(
            it.next_event().await.unwrap(),
            Some(LineEvent::Keypress { key, .. }) if key.code == KeyCode::Enter
        ));
        assert_eq!(it.next_event().await.unwrap(), Some(LineEvent::Line));
        assert_eq!(it.next_event().await.unwrap(), None);
        assert_eq!(call_log.entries(), vec!["reader.closed"]);
    }
}
