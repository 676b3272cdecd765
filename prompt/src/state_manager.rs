// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::{AnswerHooks, CompletionSlot, DeferredMessage, LineEvent, LineReader,
            LoaderEvent, LoaderScheduler, MessageSource, PartialState, PromptConfig,
            PromptError, PromptIo, PromptMessage, PromptOptions, PromptSettings,
            PromptState, PromptStatus, RenderDispatcher, Renderer, Screen, StateHandle,
            StateStore, SubmitOutcome, describe_report, ok, run_submit_pipeline};

/// Runs one prompt from first frame to answer. Owns the [`StateStore`], reacts to the
/// [`LineReader`], runs submissions, drives the [`LoaderScheduler`], and re-renders via
/// the [`RenderDispatcher`] after every mutation.
///
/// Use [`crate::Prompt::run()`] unless you need to hold the pieces yourself.
///
/// # Lifecycle
///
/// 1. [`Self::new()`] seeds the state from the [`PromptOptions`]. A literal message goes
///    straight into the initial state, a deferred one leaves it pending.
/// 2. [`Self::execute()`] renders the first frame, resolves a deferred message, then
///    handles line reader events until an answer is accepted.
/// 3. On acceptance: final render, detach the line reader, finalize the screen, then
///    fire the [`CompletionSlot`]. Nothing touches the state after that.
///
/// # Submissions
///
/// While a submission runs, the line reader is paused so no keystroke can mutate the
/// state, and the submit pipeline works on the snapshot taken when it started. The only
/// thing that may change the state meanwhile is the loader, which shows the spinner if
/// the pipeline outlives [`PromptSettings::loader_show_delay`].
///
/// A submission can't start while another one runs. It is awaited inline by
/// [`Self::execute()`], which reads no events until it returns, and hooks only run in
/// response to those events.
#[allow(missing_debug_implementations)]
pub struct StateManager<C, H, R, L, S>
where
    C: PromptConfig,
    H: AnswerHooks,
    R: Renderer<C>,
    L: LineReader,
    S: Screen,
{
    config: Arc<C>,
    hooks: H,
    line_reader: L,
    dispatcher: RenderDispatcher<R, S>,
    store: StateStore,
    loader: LoaderScheduler,
    maybe_deferred_message: Option<DeferredMessage>,
    settings: Arc<PromptSettings>,
}

impl<C, H, R, L, S> StateManager<C, H, R, L, S>
where
    C: PromptConfig,
    H: AnswerHooks,
    R: Renderer<C>,
    L: LineReader,
    S: Screen,
{
    pub fn new(
        config: Arc<C>,
        renderer: Arc<R>,
        options: PromptOptions<H>,
        io: PromptIo<L, S>,
        settings: Arc<PromptSettings>,
    ) -> Self {
        let PromptOptions {
            message,
            hooks,
            mut initial_state,
        } = options;

        let maybe_deferred_message = match message {
            MessageSource::Literal(text) => {
                initial_state.message = Some(PromptMessage::Ready(text));
                None
            }
            MessageSource::Deferred(future) => {
                initial_state.message = Some(PromptMessage::Pending);
                Some(future)
            }
        };

        let PromptIo {
            line_reader,
            screen,
        } = io;

        Self {
            config,
            hooks,
            line_reader,
            dispatcher: RenderDispatcher::new(renderer, screen, settings.clone()),
            store: StateStore::new(initial_state),
            loader: LoaderScheduler::from_settings(&settings),
            maybe_deferred_message,
            settings,
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn get_state(&self) -> Arc<PromptState> { self.store.get_state() }

    /// Runs the prompt until an answer is accepted and delivered to `completion`.
    ///
    /// # Errors
    ///
    /// - [`PromptError::CompletionNotArmed`] if `completion` was not armed.
    /// - [`PromptError::MessageUnavailable`] if the deferred message fails.
    /// - [`PromptError::InputClosed`] if the line reader runs dry before an answer is
    ///   accepted.
    /// - Any line reader or screen failure.
    ///
    /// Rejected answers and hook errors are not returned, they are shown in the error
    /// banner.
    pub async fn execute(mut self, completion: &mut CompletionSlot<H::Value>) -> miette::Result<()> {
        if !completion.is_armed() {
            return Err(PromptError::CompletionNotArmed.into());
        }

        tracing::debug!(message = "Prompt started");
        self.render();
        self.dispatcher.take_error()?;
        self.resolve_message().await?;

        loop {
            let Some(event) = self.line_reader.next_event().await? else {
                tracing::debug!(message = "Prompt input closed");
                return Err(PromptError::InputClosed.into());
            };

            let is_submit_requested = match event {
                LineEvent::Keypress { raw, key } => self.on_keypress(raw.as_deref(), &key),
                LineEvent::Line => self.on_line(),
            };
            self.dispatcher.take_error()?;

            if is_submit_requested {
                if let Some(value) = self.on_submit().await? {
                    return self.on_done(value, completion);
                }
            }
        }
    }

    async fn resolve_message(&mut self) -> miette::Result<()> {
        let Some(deferred_message) = self.maybe_deferred_message.take() else {
            return ok!();
        };
        let message = deferred_message.await.map_err(|report| {
            PromptError::MessageUnavailable {
                reason: describe_report(&report),
            }
        })?;
        self.set_state(PartialState::new().message(message));
        self.dispatcher.take_error()
    }

    /// Sync the buffer into the state and clear the error before the hook sees it.
    /// `Enter` is left to [`Self::on_line()`].
    fn on_keypress(&mut self, raw_input: Option<&str>, key: &KeyEvent) -> bool {
        if key.code == KeyCode::Enter {
            return false;
        }
        let line = self.line_reader.line().to_string();
        self.with_state_handle(|config, handle| {
            handle.set_state(PartialState::new().value(line).clear_error());
            let state = handle.get_state();
            config.on_keypress(raw_input, key, &state, handle);
            handle.is_submit_requested()
        })
    }

    fn on_line(&mut self) -> bool {
        self.with_state_handle(|config, handle| {
            let state = handle.get_state();
            config.on_line(&state, handle);
            handle.is_submit_requested()
        })
    }

    /// Returns the accepted answer, or [`None`] if it was rejected (the error banner is
    /// showing and the line reader is resumed).
    async fn on_submit(&mut self) -> miette::Result<Option<H::Value>> {
        let snapshot = self.store.get_state();
        tracing::debug!(message = "Submitting", version = self.store.version());
        self.loader.arm();
        self.line_reader.pause();

        let outcome = {
            let Self {
                config,
                hooks,
                dispatcher,
                store,
                loader,
                settings,
                ..
            } = self;
            let config: &C = config;
            let hooks: &H = hooks;
            let settings: &PromptSettings = settings;

            let pipeline = run_submit_pipeline(config, hooks, &snapshot, settings);
            tokio::pin!(pipeline);

            loop {
                tokio::select! {
                    biased;
                    outcome = &mut pipeline => break outcome,
                    event = loader.next_event() => {
                        if apply_loader_event(store, loader, event) {
                            dispatcher.dispatch(&store.get_state(), config, hooks);
                        }
                    }
                }
            }
        };

        self.loader.cancel();
        self.dispatcher.take_error()?;

        match outcome {
            SubmitOutcome::Done(value) => Ok(Some(value)),
            SubmitOutcome::Failed(error) => {
                tracing::debug!(message = "Submit rejected", error);
                self.set_state(PartialState::new().status(PromptStatus::Idle).error(error));
                self.dispatcher.take_error()?;
                self.line_reader.resume();
                Ok(None)
            }
        }
    }

    fn on_done(
        &mut self,
        value: H::Value,
        completion: &mut CompletionSlot<H::Value>,
    ) -> miette::Result<()> {
        self.set_state(
            PartialState::new()
                .status(PromptStatus::Done)
                .clear_error(),
        );
        self.dispatcher.take_error()?;

        self.line_reader.detach();
        self.dispatcher.finish()?;
        completion.fire(value)?;

        tracing::debug!(message = "Prompt done");
        ok!()
    }

    fn set_state(&mut self, partial: PartialState) {
        self.store.set_state(partial);
        self.render();
    }

    fn render(&mut self) {
        let state = self.store.get_state();
        self.dispatcher.dispatch(&state, &*self.config, &self.hooks);
    }

    /// Lends a [`StateHandle`] (that re-renders on every write) to `f`.
    fn with_state_handle<T>(&mut self, f: impl FnOnce(&C, &mut StateHandle<'_>) -> T) -> T {
        let Self {
            config,
            hooks,
            dispatcher,
            store,
            ..
        } = self;
        let config: &C = config;
        let hooks: &H = hooks;
        let mut on_change = |state: &PromptState| dispatcher.dispatch(state, config, hooks);
        let mut handle = StateHandle::new(store, &mut on_change);
        f(config, &mut handle)
    }
}

/// Returns true if the state changed. A tick that arrives after the status left loading
/// stops the scheduler instead.
fn apply_loader_event(
    store: &mut StateStore,
    loader: &mut LoaderScheduler,
    event: LoaderEvent,
) -> bool {
    match event {
        LoaderEvent::Show => {
            store.set_state(
                PartialState::new()
                    .status(PromptStatus::Loading)
                    .loading_increment(0),
            );
            true
        }
        LoaderEvent::Tick => {
            let state = store.get_state();
            if state.status == PromptStatus::Loading {
                store.set_state(
                    PartialState::new().loading_increment(state.loading_increment + 1),
                );
                true
            } else {
                loader.cancel();
                false
            }
        }
    }
}
