// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::Debug, future::Future, sync::Arc};

use futures_util::future::BoxFuture;

use crate::{AnswerHooks, CompletionSlot, CrosstermLineReader, DefaultAnswerHooks,
            InputDevice, LineReader, OutputDevice, PartialState, PromptConfig, PromptError,
            PromptSettings, Renderer, Screen, StateManager, TerminalScreen};

/// A prompt message that is still being computed.
pub type DeferredMessage = BoxFuture<'static, miette::Result<String>>;

/// The question text. A [`MessageSource::Deferred`] message shows
/// [`PromptSettings::loading_message`] until it resolves. If it fails, the prompt run
/// fails with [`PromptError::MessageUnavailable`].
pub enum MessageSource {
    Literal(String),
    Deferred(DeferredMessage),
}

impl MessageSource {
    pub fn deferred(
        future: impl Future<Output = miette::Result<String>> + Send + 'static,
    ) -> Self {
        MessageSource::Deferred(Box::pin(future))
    }
}

impl Debug for MessageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageSource::Literal(it) => f.debug_tuple("Literal").field(it).finish(),
            MessageSource::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&str> for MessageSource {
    fn from(it: &str) -> Self { MessageSource::Literal(it.to_string()) }
}

impl From<String> for MessageSource {
    fn from(it: String) -> Self { MessageSource::Literal(it) }
}

/// Everything that varies per run: the message, the [`AnswerHooks`], and any initial
/// state overrides (eg, a default).
#[derive(Debug)]
pub struct PromptOptions<H> {
    pub message: MessageSource,
    pub hooks: H,
    pub initial_state: PartialState,
}

impl PromptOptions<DefaultAnswerHooks> {
    /// Options that accept any text as the answer.
    pub fn new(message: impl Into<MessageSource>) -> Self {
        Self {
            message: message.into(),
            hooks: DefaultAnswerHooks,
            initial_state: PartialState::default(),
        }
    }
}

impl<H: AnswerHooks> PromptOptions<H> {
    #[must_use]
    pub fn with_hooks<H2: AnswerHooks>(self, hooks: H2) -> PromptOptions<H2> {
        PromptOptions {
            message: self.message,
            hooks,
            initial_state: self.initial_state,
        }
    }

    /// Used when the buffer is empty at submission.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.initial_state.default = Some(default.into());
        self
    }

    /// Merged over the current initial state. The message always comes from
    /// [`Self::message`].
    #[must_use]
    pub fn with_initial_state(mut self, partial: PartialState) -> Self {
        self.initial_state.merge(partial);
        self
    }
}

/// The input and output side of one run.
#[derive(Debug)]
pub struct PromptIo<L, S> {
    pub line_reader: L,
    pub screen: S,
}

impl<L: LineReader, S: Screen> PromptIo<L, S> {
    pub fn new(line_reader: L, screen: S) -> Self {
        Self {
            line_reader,
            screen,
        }
    }
}

impl PromptIo<CrosstermLineReader, TerminalScreen> {
    /// Puts the terminal in raw mode. It is restored when the line reader is detached or
    /// dropped.
    ///
    /// # Errors
    ///
    /// If raw mode can't be enabled.
    pub fn from_devices(
        input_device: InputDevice,
        output_device: OutputDevice,
    ) -> miette::Result<Self> {
        Ok(Self {
            line_reader: CrosstermLineReader::try_new_terminal(input_device)?,
            screen: TerminalScreen::new(output_device),
        })
    }

    /// Reads from crossterm's event stream and writes to stdout.
    ///
    /// # Errors
    ///
    /// If raw mode can't be enabled.
    pub fn terminal() -> miette::Result<Self> {
        Self::from_devices(InputDevice::new_event_stream(), OutputDevice::new_stdout())
    }
}

/// Either one config shared by every run, or a builder that makes a fresh one per run.
enum ConfigSource<C> {
    Shared(Arc<C>),
    Builder(Arc<dyn Fn() -> C + Send + Sync>),
}

impl<C> ConfigSource<C> {
    fn resolve(&self) -> Arc<C> {
        match self {
            ConfigSource::Shared(it) => it.clone(),
            ConfigSource::Builder(builder) => Arc::new(builder()),
        }
    }
}

/// A reusable prompt: a [`PromptConfig`] (or a builder for one) paired with a
/// [`Renderer`]. Create one with [`create_prompt()`] or [`create_prompt_with_builder()`],
/// then call [`Self::run()`] once per question.
#[allow(missing_debug_implementations)]
pub struct Prompt<C, R> {
    config_source: ConfigSource<C>,
    renderer: Arc<R>,
    settings: Arc<PromptSettings>,
}

/// A prompt whose config is shared by every run.
pub fn create_prompt<C, R>(config: C, renderer: R) -> Prompt<C, R>
where
    C: PromptConfig,
    R: Renderer<C>,
{
    Prompt {
        config_source: ConfigSource::Shared(Arc::new(config)),
        renderer: Arc::new(renderer),
        settings: Arc::new(PromptSettings::default()),
    }
}

/// A prompt that calls `builder` at the start of every run, so that each run gets a fresh
/// config.
pub fn create_prompt_with_builder<C, R, F>(builder: F, renderer: R) -> Prompt<C, R>
where
    C: PromptConfig,
    R: Renderer<C>,
    F: Fn() -> C + Send + Sync + 'static,
{
    Prompt {
        config_source: ConfigSource::Builder(Arc::new(builder)),
        renderer: Arc::new(renderer),
        settings: Arc::new(PromptSettings::default()),
    }
}

impl<C, R> Prompt<C, R>
where
    C: PromptConfig,
    R: Renderer<C>,
{
    #[must_use]
    pub fn with_settings(mut self, settings: PromptSettings) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &PromptSettings { &self.settings }

    /// Asks the question and waits for an accepted answer.
    ///
    /// # Errors
    ///
    /// See [`StateManager::execute()`]. Rejected answers are not errors, the user is
    /// asked again.
    pub async fn run<H, L, S>(
        &self,
        options: PromptOptions<H>,
        io: PromptIo<L, S>,
    ) -> miette::Result<H::Value>
    where
        H: AnswerHooks,
        L: LineReader,
        S: Screen,
    {
        let mut completion = CompletionSlot::new();
        let receiver = completion.arm()?;

        let state_manager = StateManager::new(
            self.config_source.resolve(),
            self.renderer.clone(),
            options,
            io,
            self.settings.clone(),
        );
        state_manager.execute(&mut completion).await?;

        Ok(receiver.await.map_err(|_| PromptError::CompletionDropped)?)
    }

    /// [`Self::run()`] against the real terminal.
    ///
    /// # Errors
    ///
    /// See [`Self::run()`] and [`PromptIo::terminal()`].
    pub async fn run_in_terminal<H: AnswerHooks>(
        &self,
        options: PromptOptions<H>,
    ) -> miette::Result<H::Value> {
        let io = PromptIo::terminal()?;
        self.run(options, io).await
    }
}
