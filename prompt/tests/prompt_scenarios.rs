// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End to end runs of [`Prompt::run()`] against the scripted line reader and the
//! recording screen.

use std::time::Duration;

use crossterm::event::KeyCode;
use pretty_assertions::assert_eq;
use r3bl_prompt::{AnswerHooks, CallLog, CrosstermLineReader, Frame, InputDevice,
                  InputDeviceExtMock, MessageSource, MockInput, MockLineReader, MockScreen,
                  OutputDevice, OutputDeviceExt, Prompt, PromptConfig, PromptError,
                  PromptIo, PromptOptions, PromptSettings, PromptState, RenderState,
                  Renderer, SpinnerTemplate, TerminalScreen, Validation, create_prompt,
                  create_prompt_with_builder, keypress};
use smallvec::smallvec;

struct TextInput;
impl PromptConfig for TextInput {}

/// `prefix message value|status`, eg `? Name? bob|idle`.
fn text_prompt() -> Prompt<TextInput, impl Renderer<TextInput>> {
    create_prompt(TextInput, |state: &RenderState, _: &TextInput| {
        format!(
            "{} {} {}|{}",
            state.prefix, state.message, state.value, state.status
        )
    })
    .with_settings(PromptSettings::plain())
}

fn scripted_io(
    call_log: &CallLog,
    script: impl FnOnce(MockLineReader) -> MockLineReader,
) -> (PromptIo<MockLineReader, MockScreen>, MockScreen) {
    let screen = MockScreen::new(call_log.clone());
    let io = PromptIo::new(script(MockLineReader::new(call_log.clone())), screen.clone());
    (io, screen)
}

struct MinLength(usize);

impl AnswerHooks for MinLength {
    type Value = String;

    async fn filter(&self, raw_value: String) -> miette::Result<String> { Ok(raw_value) }

    async fn validate(&self, value: &String, _: &PromptState) -> miette::Result<Validation> {
        Ok(if value.chars().count() < self.0 {
            "too short".into()
        } else {
            Validation::Valid
        })
    }
}

struct ParseNumber;

impl AnswerHooks for ParseNumber {
    type Value = u32;

    async fn filter(&self, raw_value: String) -> miette::Result<u32> {
        raw_value
            .trim()
            .parse()
            .map_err(|_| miette::miette!("bad number: {raw_value}"))
    }

    async fn validate(&self, _: &u32, _: &PromptState) -> miette::Result<Validation> {
        Ok(Validation::Valid)
    }
}

/// Validation that takes `delay` of (virtual) time.
struct SlowCheck {
    delay: Duration,
}

impl AnswerHooks for SlowCheck {
    type Value = String;

    async fn filter(&self, raw_value: String) -> miette::Result<String> { Ok(raw_value) }

    async fn validate(&self, _: &String, _: &PromptState) -> miette::Result<Validation> {
        tokio::time::sleep(self.delay).await;
        Ok(Validation::Valid)
    }
}

fn has_spinner(frames: &[Frame]) -> bool {
    frames
        .iter()
        .any(|frame| SpinnerTemplate::Braille.appears_in(&frame.content))
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_empty_buffer_resolves_to_default() {
    let call_log = CallLog::new();
    let (io, screen) = scripted_io(&call_log, MockLineReader::press_enter);

    let answer = text_prompt()
        .run(PromptOptions::new("Greeting?").with_default("hello"), io)
        .await
        .unwrap();

    assert_eq!(answer, "hello");
    assert_eq!(screen.frames()[0].content, "? Greeting? |idle");
    assert_eq!(screen.last_frame().unwrap().content, "? Greeting? |done");
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_rejected_answer_shows_banner_then_clears_on_keypress() {
    let call_log = CallLog::new();
    let (io, screen) = scripted_io(&call_log, |it| {
        it.type_text("ab").press_enter().type_text("c").press_enter()
    });

    let answer = text_prompt()
        .run(PromptOptions::new("Name?").with_hooks(MinLength(3)), io)
        .await
        .unwrap();
    assert_eq!(answer, "abc");

    let frames = screen.frames();
    let banner_index = frames
        .iter()
        .position(|frame| frame.bottom_content.as_deref() == Some(">> too short"))
        .unwrap();
    assert_eq!(frames[banner_index].content, "? Name? ab|idle");

    // The next keystroke clears the banner.
    assert_eq!(frames[banner_index + 1].content, "? Name? abc|idle");
    assert_eq!(frames[banner_index + 1].bottom_content, None);
    assert_eq!(screen.last_frame().unwrap().bottom_content, None);
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_filter_error_becomes_banner_and_reader_resumes() {
    let call_log = CallLog::new();
    let (io, screen) = scripted_io(&call_log, |it| {
        it.type_text("x")
            .press_enter()
            .press(MockInput::Backspace)
            .type_text("42")
            .press_enter()
    });

    let answer = text_prompt()
        .run(PromptOptions::new("Count?").with_hooks(ParseNumber), io)
        .await
        .unwrap();
    assert_eq!(answer, 42);

    assert!(
        screen
            .frames()
            .iter()
            .filter_map(|frame| frame.bottom_content.as_deref())
            .any(|banner| banner.contains("bad number: x"))
    );
    assert_eq!(
        call_log.entries(),
        vec![
            "reader.pause",
            "reader.resume",
            "reader.pause",
            "reader.detach",
            "screen.done",
        ]
    );
}

#[tokio::test(start_paused = true)]
#[allow(clippy::needless_return)]
async fn test_deferred_message_shows_placeholder_first() {
    let call_log = CallLog::new();
    let (io, screen) = scripted_io(&call_log, |it| it.type_text("b").press_enter());

    let message = MessageSource::deferred(async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok("Pick one:".to_string())
    });
    let answer = text_prompt()
        .run(PromptOptions::new(message), io)
        .await
        .unwrap();
    assert_eq!(answer, "b");

    let frames = screen.frames();
    assert_eq!(frames[0].content, "? Loading... |idle");
    assert!(frames[1..].iter().all(|frame| frame.content.contains("Pick one:")));
}

#[tokio::test(start_paused = true)]
#[allow(clippy::needless_return)]
async fn test_fast_submit_never_shows_spinner() {
    let call_log = CallLog::new();
    let (io, screen) = scripted_io(&call_log, |it| it.type_text("ok").press_enter());

    text_prompt()
        .run(
            PromptOptions::new("Name?").with_hooks(SlowCheck {
                delay: Duration::from_millis(400),
            }),
            io,
        )
        .await
        .unwrap();

    assert!(!has_spinner(&screen.frames()));
    assert!(
        screen
            .frames()
            .iter()
            .all(|frame| !frame.content.ends_with("|loading"))
    );
}

#[tokio::test(start_paused = true)]
#[allow(clippy::needless_return)]
async fn test_slow_submit_shows_spinner_until_done() {
    let call_log = CallLog::new();
    let (io, screen) = scripted_io(&call_log, |it| it.type_text("ok").press_enter());

    text_prompt()
        .run(
            PromptOptions::new("Name?").with_hooks(SlowCheck {
                delay: Duration::from_secs(1),
            }),
            io,
        )
        .await
        .unwrap();

    let frames = screen.frames();
    let loading_frames: Vec<&Frame> = frames
        .iter()
        .filter(|frame| frame.content.ends_with("|loading"))
        .collect();

    // Shown at 500ms, then a tick every 85ms until the check finishes at 1s.
    assert_eq!(loading_frames.len(), 6);
    assert!(loading_frames[0].content.starts_with(SpinnerTemplate::Braille.glyph_for(0)));
    assert!(loading_frames[5].content.starts_with(SpinnerTemplate::Braille.glyph_for(5)));
    assert_eq!(screen.last_frame().unwrap().content, "? Name? ok|done");
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_input_closed_before_answer() {
    let call_log = CallLog::new();
    let (io, _screen) = scripted_io(&call_log, |it| it.type_text("abc"));

    let err = text_prompt()
        .run(PromptOptions::new("Name?"), io)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PromptError>(),
        Some(PromptError::InputClosed)
    ));
    assert_eq!(call_log.count("screen.done"), 0);
}

/// Selects from a fixed list with the arrow keys. The renderer reads the choices from the
/// config.
struct Select {
    choices: Vec<&'static str>,
}

impl PromptConfig for Select {
    fn on_keypress(
        &self,
        _raw_input: Option<&str>,
        key: &crossterm::event::KeyEvent,
        state: &PromptState,
        handle: &mut r3bl_prompt::StateHandle<'_>,
    ) {
        let current = self
            .choices
            .iter()
            .position(|it| *it == state.default)
            .unwrap_or(0);
        let next = match key.code {
            KeyCode::Down => (current + 1).min(self.choices.len() - 1),
            KeyCode::Up => current.saturating_sub(1),
            _ => current,
        };
        handle.set_state(r3bl_prompt::PartialState::new().default_value(self.choices[next]));
    }

    fn map_state_to_value(&self, state: &PromptState) -> String { state.default.clone() }
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_builder_config_drives_renderer() {
    let prompt = create_prompt_with_builder(
        || Select {
            choices: vec!["red", "green", "blue"],
        },
        |state: &RenderState, config: &Select| {
            config
                .choices
                .iter()
                .map(|it| {
                    if *it == state.default {
                        format!("> {it}")
                    } else {
                        format!("  {it}")
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        },
    )
    .with_settings(PromptSettings::plain());

    let call_log = CallLog::new();
    let (io, screen) = scripted_io(&call_log, |it| {
        it.press(MockInput::Key(crossterm::event::KeyEvent::from(KeyCode::Down)))
            .press(MockInput::Key(crossterm::event::KeyEvent::from(KeyCode::Down)))
            .press_enter()
    });
    let answer = prompt
        .run(PromptOptions::new("Color?").with_default("red"), io)
        .await
        .unwrap();

    assert_eq!(answer, "blue");
    assert_eq!(
        screen.last_frame().unwrap().content,
        "  red\n  green\n> blue"
    );
}

#[tokio::test]
#[allow(clippy::needless_return)]
async fn test_crossterm_reader_and_terminal_screen() {
    let input_device = InputDevice::new_mock(smallvec![
        Ok(keypress(KeyCode::Char('h'))),
        Ok(keypress(KeyCode::Char('i'))),
        Ok(keypress(KeyCode::Enter)),
    ]);
    let (output_device, stdout_mock) = OutputDevice::new_mock();
    let io = PromptIo::new(
        CrosstermLineReader::new(input_device),
        TerminalScreen::new(output_device),
    );

    let answer = text_prompt()
        .run(PromptOptions::new("Name?"), io)
        .await
        .unwrap();

    assert_eq!(answer, "hi");
    let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.contains("? Name? hi|done"));
}
