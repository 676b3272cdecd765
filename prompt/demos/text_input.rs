// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Asks for a name, then for a port number. The port lookup is slow on purpose so that
//! the spinner shows up. Logs go to `text_input_demo.log`.
//!
//! ```sh
//! cargo run --example text_input
//! ```

use std::time::Duration;

use crossterm::style::Stylize;
use r3bl_prompt::{AnswerHooks, LoggingConfig, MessageSource, PromptConfig, PromptOptions,
                  PromptState, RenderState, Validation, create_prompt, init_logging};

struct TextInput;
impl PromptConfig for TextInput {}

fn render(state: &RenderState, _: &TextInput) -> String {
    let default = if state.default.is_empty() || !state.value.is_empty() {
        String::new()
    } else {
        format!("({}) ", state.default).dark_grey().to_string()
    };
    format!(
        "{} {} {default}{}",
        state.prefix,
        state.message.as_str().bold(),
        state.value.as_str().cyan()
    )
}

struct Port;

impl AnswerHooks for Port {
    type Value = u16;

    async fn filter(&self, raw_value: String) -> miette::Result<u16> {
        raw_value.trim().parse().map_err(|_| {
            miette::miette!(help = "Use a number from 1 to 65535", "{raw_value} is not a port")
        })
    }

    async fn validate(&self, port: &u16, _: &PromptState) -> miette::Result<Validation> {
        // Pretend to check whether the port is free.
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        Ok(if *port < 1024 {
            "ports below 1024 need root".into()
        } else {
            Validation::Valid
        })
    }

    fn transformer(&self, value: &str, is_final: bool) -> String {
        if is_final {
            value.green().to_string()
        } else {
            value.to_string()
        }
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let _guard = init_logging(LoggingConfig::new_file(Some(
        "text_input_demo.log".to_string(),
    )))?;

    let prompt = create_prompt(TextInput, render);

    let name = prompt
        .run_in_terminal(PromptOptions::new("What is your name?").with_default("anon"))
        .await?;

    let message = MessageSource::deferred(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        Ok(format!("Which port should we use, {name}?"))
    });
    let port = prompt
        .run_in_terminal(
            PromptOptions::new(message)
                .with_hooks(Port)
                .with_default("8080"),
        )
        .await?;

    tracing::info!(message = "Demo finished", port);
    println!("Listening on {port}");
    Ok(())
}
