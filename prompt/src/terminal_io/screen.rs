// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::{QueueableCommand,
                cursor::{MoveToColumn, MoveUp},
                style::Print,
                terminal::{Clear, ClearType}};
use unicode_width::UnicodeWidthStr;

use crate::{OutputDevice, PromptError, ok};

/// Output collaborator of a [`crate::StateManager`]. It receives fully formatted frames
/// and owns everything about putting them on the terminal.
pub trait Screen {
    /// Replace the previous frame with `content`, with the optional `bottom_content`
    /// (the error banner) shown below it. The cursor is left at the end of `content`.
    ///
    /// # Errors
    ///
    /// If writing to the terminal fails.
    fn render(&mut self, content: &str, bottom_content: Option<&str>) -> miette::Result<()>;

    /// Finalize. Called exactly once, after the last [`Self::render()`].
    ///
    /// # Errors
    ///
    /// If writing to the terminal fails.
    fn done(&mut self) -> miette::Result<()>;
}

/// Redraws frames in place on an [`OutputDevice`]. Each frame:
///
/// 1. Moves up to the first row of the previous frame and clears everything below.
/// 2. Prints the content, then the bottom content on the following rows.
/// 3. Puts the cursor back at the end of the content, where the user is typing.
#[allow(missing_debug_implementations)]
pub struct TerminalScreen {
    output_device: OutputDevice,
    /// Rows between the first row of the last frame and the cursor.
    cursor_row: usize,
    is_done: bool,
}

impl TerminalScreen {
    #[must_use]
    pub fn new(output_device: OutputDevice) -> Self {
        Self {
            output_device,
            cursor_row: 0,
            is_done: false,
        }
    }

    #[must_use]
    pub fn is_done(&self) -> bool { self.is_done }
}

impl Default for TerminalScreen {
    fn default() -> Self { Self::new(OutputDevice::new_stdout()) }
}

impl Screen for TerminalScreen {
    fn render(&mut self, content: &str, bottom_content: Option<&str>) -> miette::Result<()> {
        if self.is_done {
            tracing::warn!(message = "Ignoring render after screen is done");
            return ok!();
        }
        let mut guard = self.output_device.lock()?;
        let term: &mut dyn Write = &mut *guard;
        self.cursor_row = screen_helper::write_frame(term, self.cursor_row, content, bottom_content)
            .map_err(PromptError::from)?;
        ok!()
    }

    fn done(&mut self) -> miette::Result<()> {
        if self.is_done {
            return ok!();
        }
        self.is_done = true;
        let mut guard = self.output_device.lock()?;
        let term: &mut dyn Write = &mut *guard;
        screen_helper::finish(term).map_err(PromptError::from)?;
        self.cursor_row = 0;
        ok!()
    }
}

mod screen_helper {
    use super::{Clear, ClearType, MoveToColumn, MoveUp, Print, QueueableCommand,
                UnicodeWidthStr, Write, io};

    fn to_u16(it: usize) -> u16 { u16::try_from(it).unwrap_or(u16::MAX) }

    /// Returns the new cursor row.
    pub fn write_frame(
        term: &mut dyn Write,
        previous_cursor_row: usize,
        content: &str,
        bottom_content: Option<&str>,
    ) -> io::Result<usize> {
        if previous_cursor_row > 0 {
            term.queue(MoveUp(to_u16(previous_cursor_row)))?;
        }
        term.queue(MoveToColumn(0))?;
        term.queue(Clear(ClearType::FromCursorDown))?;

        let lines: Vec<&str> = content.split('\n').collect();
        term.queue(Print(lines.join("\r\n")))?;

        if let Some(bottom_content) = bottom_content {
            let bottom_lines: Vec<&str> = bottom_content.split('\n').collect();
            term.queue(Print("\r\n"))?;
            term.queue(Print(bottom_lines.join("\r\n")))?;
            term.queue(MoveUp(to_u16(bottom_lines.len())))?;

            let last_line = lines.last().copied().unwrap_or_default();
            let width = strip_ansi_escapes::strip_str(last_line).width();
            term.queue(MoveToColumn(to_u16(width)))?;
        }

        term.flush()?;
        Ok(lines.len() - 1)
    }

    /// Clears whatever is below the cursor and moves to a fresh line.
    pub fn finish(term: &mut dyn Write) -> io::Result<()> {
        term.queue(Clear(ClearType::FromCursorDown))?;
        term.queue(Print("\r\n"))?;
        term.flush()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::OutputDeviceExt;

    #[test]
    fn test_render_content_and_bottom() {
        let (device, stdout_mock) = OutputDevice::new_mock();
        let mut screen = TerminalScreen::new(device);

        screen.render("? Name: ab", Some(">> too short")).unwrap();

        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string_strip_ansi().replace('\r', ""),
            "? Name: ab\n>> too short"
        );
        let raw = stdout_mock.get_copy_of_buffer_as_string();
        // Cursor goes back up to the content row, to the end of the content.
        assert!(raw.contains("\u{1b}[1A"));
        assert!(raw.contains("\u{1b}[11G"));
    }

    #[test]
    fn test_rerender_moves_up_over_multi_line_frame() {
        let (device, stdout_mock) = OutputDevice::new_mock();
        let mut screen = TerminalScreen::new(device);

        screen.render("line 1\nline 2\nline 3", None).unwrap();
        stdout_mock.clear();
        screen.render("again", None).unwrap();

        let raw = stdout_mock.get_copy_of_buffer_as_string();
        assert!(raw.starts_with("\u{1b}[2A"));
        assert_eq!(stdout_mock.get_copy_of_buffer_as_string_strip_ansi(), "again");
    }

    #[test]
    fn test_done_once() {
        let (device, stdout_mock) = OutputDevice::new_mock();
        let mut screen = TerminalScreen::new(device);

        screen.render("? Name: bob", None).unwrap();
        screen.done().unwrap();
        screen.done().unwrap();
        screen.render("late", None).unwrap();

        assert!(screen.is_done());
        assert_eq!(
            stdout_mock.get_copy_of_buffer_as_string_strip_ansi().replace('\r', ""),
            "? Name: bob\n"
        );
    }
}
