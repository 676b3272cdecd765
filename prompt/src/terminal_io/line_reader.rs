// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::future::Future;

use crossterm::{event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
                terminal};
use miette::IntoDiagnostic;

use crate::{InputDevice, PromptError, ok};

/// What the line reader tells the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// A key was pressed. `raw` is the text it inserted, if any. The editable buffer has
    /// already been updated when this is delivered.
    Keypress { raw: Option<String>, key: KeyEvent },
    /// The user asked to submit (`Enter`). Always preceded by the `Enter` keypress.
    Line,
}

/// Line editing collaborator of a [`crate::StateManager`]. It owns the editable buffer and
/// decodes keystrokes. The prompt only reads [`Self::line()`] and reacts to
/// [`LineEvent`]s.
pub trait LineReader {
    /// The next event. [`None`] means the input is gone (stream ended, or the user
    /// aborted with `Ctrl+C` / `Ctrl+D`).
    ///
    /// # Errors
    ///
    /// [`PromptError::ReaderPaused`] if called while paused, or any failure reading the
    /// underlying input.
    fn next_event(&mut self) -> impl Future<Output = miette::Result<Option<LineEvent>>>;

    /// Current contents of the editable buffer.
    fn line(&self) -> &str;

    /// No events are delivered until [`Self::resume()`].
    fn pause(&mut self);

    fn resume(&mut self);

    /// Stop for good. Every later [`Self::next_event()`] returns [`None`].
    fn detach(&mut self);
}

/// [`LineReader`] on top of crossterm events from an [`InputDevice`].
///
/// | Key                                   | Effect                                     |
/// | :------------------------------------ | :----------------------------------------- |
/// | printable char, paste                 | insert at cursor                           |
/// | `Backspace`, `Delete`                 | remove before / at cursor                  |
/// | `Left`, `Right`, `Home`, `End`        | move cursor                                |
/// | `Ctrl+U`                              | clear the buffer                           |
/// | `Ctrl+C`, `Ctrl+D`                    | abort, [`LineReader::next_event()`] → None |
/// | `Enter`                               | keypress, then [`LineEvent::Line`]         |
/// | anything else                         | keypress, buffer unchanged                 |
///
/// The buffer is kept after `Enter`, so a rejected answer can be edited.
#[allow(missing_debug_implementations)]
pub struct CrosstermLineReader {
    input_device: InputDevice,
    buffer: String,
    /// Cursor position, in chars.
    cursor: usize,
    pending_line: bool,
    is_paused: bool,
    is_detached: bool,
    is_raw_mode: bool,
}

/// Result of applying a key to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyOutcome {
    Edited(Option<String>),
    Submit,
    Abort,
    Skip,
}

impl CrosstermLineReader {
    /// Reads from `input_device` without touching the terminal mode.
    #[must_use]
    pub fn new(input_device: InputDevice) -> Self {
        Self {
            input_device,
            buffer: String::new(),
            cursor: 0,
            pending_line: false,
            is_paused: false,
            is_detached: false,
            is_raw_mode: false,
        }
    }

    /// Reads from the terminal, which is put in raw mode until [`LineReader::detach()`]
    /// is called or this is dropped.
    ///
    /// # Errors
    ///
    /// If raw mode can't be enabled.
    pub fn try_new_terminal(input_device: InputDevice) -> miette::Result<Self> {
        terminal::enable_raw_mode().into_diagnostic()?;
        let mut it = Self::new(input_device);
        it.is_raw_mode = true;
        ok!(it)
    }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_index)
            .map_or(self.buffer.len(), |(offset, _)| offset)
    }

    fn char_count(&self) -> usize { self.buffer.chars().count() }

    fn insert_str(&mut self, text: &str) {
        let offset = self.byte_offset(self.cursor);
        self.buffer.insert_str(offset, text);
        self.cursor += text.chars().count();
    }

    fn apply_key(&mut self, key: KeyEvent) -> KeyOutcome {
        use apply_key_helper::{handle_control_key, handle_regular_key};

        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Skip;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            handle_control_key(self, key.code)
        } else {
            handle_regular_key(self, key.code)
        }
    }

    fn restore_terminal(&mut self) {
        if self.is_raw_mode {
            self.is_raw_mode = false;
            if let Err(err) = terminal::disable_raw_mode() {
                tracing::error!(message = "Failed to disable raw mode", error = ?err);
            }
        }
    }
}

mod apply_key_helper {
    use super::{CrosstermLineReader, KeyCode, KeyOutcome};

    pub fn handle_control_key(reader: &mut CrosstermLineReader, code: KeyCode) -> KeyOutcome {
        match code {
            KeyCode::Char('c' | 'd') => KeyOutcome::Abort,
            KeyCode::Char('u') => {
                reader.buffer.clear();
                reader.cursor = 0;
                KeyOutcome::Edited(None)
            }
            _ => KeyOutcome::Edited(None),
        }
    }

    pub fn handle_regular_key(reader: &mut CrosstermLineReader, code: KeyCode) -> KeyOutcome {
        match code {
            KeyCode::Enter => return KeyOutcome::Submit,
            KeyCode::Char(ch) => {
                let text = ch.to_string();
                reader.insert_str(&text);
                return KeyOutcome::Edited(Some(text));
            }
            KeyCode::Backspace => {
                if reader.cursor > 0 {
                    reader.cursor -= 1;
                    let offset = reader.byte_offset(reader.cursor);
                    reader.buffer.remove(offset);
                }
            }
            KeyCode::Delete => {
                if reader.cursor < reader.char_count() {
                    let offset = reader.byte_offset(reader.cursor);
                    reader.buffer.remove(offset);
                }
            }
            KeyCode::Left => reader.cursor = reader.cursor.saturating_sub(1),
            KeyCode::Right => reader.cursor = (reader.cursor + 1).min(reader.char_count()),
            KeyCode::Home => reader.cursor = 0,
            KeyCode::End => reader.cursor = reader.char_count(),
            _ => {}
        }
        KeyOutcome::Edited(None)
    }
}

impl LineReader for CrosstermLineReader {
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

        loop {
            let Some(event) = self.input_device.next().await? else {
                return Ok(None);
            };
            match event {
                Event::Key(key) => match self.apply_key(key) {
                    KeyOutcome::Edited(raw) => return Ok(Some(LineEvent::Keypress { raw, key })),
                    KeyOutcome::Submit => {
                        self.pending_line = true;
                        return Ok(Some(LineEvent::Keypress { raw: None, key }));
                    }
                    KeyOutcome::Abort => return Ok(None),
                    KeyOutcome::Skip => {}
                },
                Event::Paste(text) => {
                    self.insert_str(&text);
                    let key = KeyEvent::new(KeyCode::Null, KeyModifiers::NONE);
                    return Ok(Some(LineEvent::Keypress {
                        raw: Some(text),
                        key,
                    }));
                }
                // Resize, focus and mouse events don't touch the buffer.
                _ => {}
            }
        }
    }

    fn line(&self) -> &str { &self.buffer }

    fn pause(&mut self) { self.is_paused = true; }

    fn resume(&mut self) { self.is_paused = false; }

    fn detach(&mut self) {
        self.is_detached = true;
        self.restore_terminal();
    }
}

impl Drop for CrosstermLineReader {
    fn drop(&mut self) { self.restore_terminal(); }
}
