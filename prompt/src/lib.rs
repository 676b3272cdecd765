// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `r3bl_prompt`
//!
//! An async engine that drives a single interactive question and answer exchange at the
//! terminal. It does not know what your prompt looks like. You supply:
//!
//! 1. A [`PromptConfig`], which holds the hooks that are fixed for the lifetime of the
//!    prompt (keypress handling, what happens on `Enter`, how the raw value is derived
//!    from the state, and a synchronous structural validator).
//! 2. A render function (see [`Renderer`]) that turns a data only [`RenderState`] into a
//!    string.
//! 3. Per run [`AnswerHooks`], which map the raw buffer to a typed answer (`filter`),
//!    decide whether the typed answer is acceptable (`validate`), and format the buffer
//!    for display (`transformer`).
//!
//! The engine owns the [`PromptState`] and re-renders after every mutation. On submit it
//! pauses the [`LineReader`], runs the filter then validate chain, and only shows a
//! spinner if that chain takes longer than [`PromptSettings::loader_show_delay`].
//!
//! ```no_run
//! use r3bl_prompt::{create_prompt, PromptConfig, PromptOptions, RenderState};
//!
//! struct Input;
//! impl PromptConfig for Input {}
//!
//! # async fn example() -> miette::Result<()> {
//! let prompt = create_prompt(Input, |state: &RenderState, _: &Input| {
//!     format!("{} {} {}", state.prefix, state.message, state.value)
//! });
//! let name = prompt
//!     .run_in_terminal(PromptOptions::new("What is your name?").with_default("anon"))
//!     .await?;
//! println!("Hello {name}");
//! # Ok(())
//! # }
//! ```
//!
//! # Data flow
//!
//! ```text
//! Prompt::run() ─► StateManager::execute()
//!                    │  resolve message (literal or deferred)
//!                    ▼
//!   LineReader ──► keypress / line ──► StateStore::set_state() ──► RenderDispatcher ──► Screen
//!                    │ submit
//!                    ▼
//!   run_submit_pipeline() (filter ─► validate_raw ─► validate) raced with LoaderScheduler
//!                    │ done
//!                    ▼
//!   detach reader ─► Screen::done() ─► CompletionSlot::fire()
//! ```

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod completion;
pub mod decl_macros;
pub mod error;
pub mod hooks;
pub mod loader;
pub mod log;
pub mod prompt_factory;
pub mod render_dispatcher;
pub mod settings;
pub mod state_manager;
pub mod state_store;
pub mod submit_pipeline;
pub mod terminal_io;
pub mod test_fixtures;

// Re-export.
pub use completion::*;
pub use error::*;
pub use hooks::*;
pub use loader::*;
pub use log::*;
pub use prompt_factory::*;
pub use render_dispatcher::*;
pub use settings::*;
pub use state_manager::*;
pub use state_store::*;
pub use submit_pipeline::*;
pub use terminal_io::*;
pub use test_fixtures::*;
