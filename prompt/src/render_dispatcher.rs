// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::{AnswerHooks, PromptMessage, PromptSettings, PromptState, PromptStatus, Screen,
            paint};

/// Data only view of a [`PromptState`], handed to the [`Renderer`]. It has no hooks in
/// it, only the values derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    /// Ready glyph when idle or done, spinner frame when loading.
    pub prefix: String,
    pub status: PromptStatus,
    /// The question, or the loading placeholder while it is still pending.
    pub message: String,
    /// The buffer after [`AnswerHooks::transformer()`].
    pub value: String,
    pub default: String,
    /// The error banner (marker plus error text), if there is an error.
    pub error: Option<String>,
    pub loading_increment: usize,
}

/// Pure function from render state (and the static config) to the text to display.
/// Any `Fn(&RenderState, &C) -> String` closure works.
pub trait Renderer<C: ?Sized>: Send + Sync {
    fn render(&self, state: &RenderState, config: &C) -> String;
}

impl<C: ?Sized, F> Renderer<C> for F
where
    F: Fn(&RenderState, &C) -> String + Send + Sync,
{
    fn render(&self, state: &RenderState, config: &C) -> String { self(state, config) }
}

/// Turns every state change into a frame on the [`Screen`].
///
/// [`Self::dispatch()`] is called from inside hooks and timers, where there is no good
/// place to return an error. So the first screen error is parked and the caller collects
/// it with [`Self::take_error()`] once the current event is handled.
#[allow(missing_debug_implementations)]
pub struct RenderDispatcher<R, S> {
    renderer: Arc<R>,
    screen: S,
    settings: Arc<PromptSettings>,
    frame_count: usize,
    maybe_error: Option<miette::Report>,
}

impl<R, S: Screen> RenderDispatcher<R, S> {
    pub fn new(renderer: Arc<R>, screen: S, settings: Arc<PromptSettings>) -> Self {
        Self {
            renderer,
            screen,
            settings,
            frame_count: 0,
            maybe_error: None,
        }
    }

    #[must_use]
    pub fn derive_render_state<H: AnswerHooks>(
        &self,
        state: &PromptState,
        hooks: &H,
    ) -> RenderState {
        derive_render_state(&self.settings, state, hooks)
    }

    /// Renders `state` and hands the result to the screen.
    pub fn dispatch<C, H>(&mut self, state: &PromptState, config: &C, hooks: &H)
    where
        C: ?Sized,
        R: Renderer<C>,
        H: AnswerHooks,
    {
        let render_state = self.derive_render_state(state, hooks);
        let content = self.renderer.render(&render_state, config);
        self.frame_count += 1;
        if let Err(report) = self.screen.render(&content, render_state.error.as_deref()) {
            tracing::error!(message = "Failed to render prompt frame", error = ?report);
            if self.maybe_error.is_none() {
                self.maybe_error = Some(report);
            }
        }
    }

    /// Finalize the screen.
    ///
    /// # Errors
    ///
    /// If the screen fails to finalize.
    pub fn finish(&mut self) -> miette::Result<()> { self.screen.done() }

    /// Returns the first screen error since the last call, if any.
    ///
    /// # Errors
    ///
    /// The parked screen error.
    pub fn take_error(&mut self) -> miette::Result<()> {
        match self.maybe_error.take() {
            Some(report) => Err(report),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn frame_count(&self) -> usize { self.frame_count }
}

/// Derives the [`RenderState`] for `state`.
#[must_use]
pub fn derive_render_state<H: AnswerHooks>(
    settings: &PromptSettings,
    state: &PromptState,
    hooks: &H,
) -> RenderState {
    let colorize = settings.colorize;

    let prefix = match state.status {
        PromptStatus::Loading => paint!(
            colorize,
            settings.spinner_template.glyph_for(state.loading_increment),
            yellow
        ),
        PromptStatus::Idle | PromptStatus::Done => {
            paint!(colorize, settings.ready_glyph.as_str(), green)
        }
    };

    let message = match &state.message {
        PromptMessage::Pending => settings.loading_message.clone(),
        PromptMessage::Ready(it) => it.clone(),
    };

    let is_final = state.status == PromptStatus::Done;
    let value = hooks.transformer(&state.value, is_final);

    let error = state.error.as_ref().map(|error| {
        let marker = paint!(colorize, settings.error_marker.as_str(), red);
        format!("{marker} {error}")
    });

    RenderState {
        prefix,
        status: state.status,
        message,
        value,
        default: state.default.clone(),
        error,
        loading_increment: state.loading_increment,
    }
}
