// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use async_stream::stream;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use crate::{InlineVec, PinnedInputStream};

/// The main constructors are:
/// - [`super::InputDeviceExtMock::new_mock()`]
/// - [`super::InputDeviceExtMock::new_mock_with_delay()`]
pub fn gen_input_stream<T>(generator_vec: InlineVec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

pub fn gen_input_stream_with_delay<T>(
    generator_vec: InlineVec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}

/// Key press event with no modifiers.
#[must_use]
pub fn keypress(code: KeyCode) -> Event { Event::Key(KeyEvent::new(code, KeyModifiers::NONE)) }

/// `Ctrl+<ch>` key press event.
#[must_use]
pub fn ctrl_keypress(ch: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL))
}
