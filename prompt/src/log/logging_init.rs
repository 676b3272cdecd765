// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use tracing::dispatcher;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use super::{DisplayPreference, LogDestination, LoggingConfig, LoggingScope,
            rolling_file_appender_impl};

/// Compact, single line events with no timestamps or source locations.
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true)
    };
}

pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Installs a subscriber built from `logging_config`.
///
/// # Returns
///
/// 1. [`LoggingScope::Global`]: [`None`]. The subscriber lasts for the life of the process
///    and can't be replaced.
/// 2. [`LoggingScope::ThreadLocal`]: a guard. The previous subscriber for this thread is
///    restored when it is dropped.
///
/// # Errors
///
/// If the log file can't be created.
///
/// # Panics
///
/// If [`LoggingScope::Global`] is used when a global subscriber is already installed.
pub fn init_logging(
    logging_config: LoggingConfig,
) -> miette::Result<Option<dispatcher::DefaultGuard>> {
    let scope = logging_config.scope;
    let layers = try_create_layers(&logging_config)?;
    Ok(match scope {
        LoggingScope::Global => {
            tracing_subscriber::registry().with(layers).init();
            None
        }
        LoggingScope::ThreadLocal => {
            Some(tracing_subscriber::registry().with(layers).set_default())
        }
    })
}

/// The level filter, followed by a display layer and a file layer for each that
/// `logging_config` asks for. Does not install anything.
///
/// # Errors
///
/// If the log file can't be created.
pub fn try_create_layers(
    logging_config: &LoggingConfig,
) -> miette::Result<Vec<Box<DynLayer<tracing_subscriber::Registry>>>> {
    let level_filter = logging_config.level_filter;
    let mut acc: Vec<Box<DynLayer<tracing_subscriber::Registry>>> =
        vec![Box::new(level_filter)];

    if let Some(layer) = try_create_display_layer(level_filter, &logging_config.destination)? {
        acc.push(layer);
    }

    if let Some(layer) = try_create_file_layer(level_filter, &logging_config.destination)? {
        acc.push(layer);
    }

    Ok(acc)
}

/// # Errors
///
/// Never fails today. It returns a [`miette::Result`] to match
/// [`try_create_file_layer()`].
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    destination: &LogDestination,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!();

    Ok(match destination {
        LogDestination::Display(display_preference)
        | LogDestination::DisplayAndFile(display_preference, _) => match display_preference {
            DisplayPreference::Stdout => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stdout)
                    .with_filter(level_filter),
            )),
            DisplayPreference::Stderr => Some(Box::new(
                fmt_layer
                    .with_writer(std::io::stderr)
                    .with_filter(level_filter),
            )),
        },
        LogDestination::None | LogDestination::File(_) => None,
    })
}

/// # Errors
///
/// If the log file can't be created.
pub fn try_create_file_layer<S>(
    level_filter: LevelFilter,
    destination: &LogDestination,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!();

    Ok(match destination {
        LogDestination::File(file_path) | LogDestination::DisplayAndFile(_, file_path) => {
            let file = rolling_file_appender_impl::try_create(file_path)?;
            Some(Box::new(
                fmt_layer
                    .with_ansi(false)
                    .with_writer(file)
                    .with_filter(level_filter),
            ))
        }
        LogDestination::None | LogDestination::Display(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use tempfile::tempdir;

    use super::*;

    fn temp_log_file(dir: &tempfile::TempDir) -> String {
        dir.path()
            .join("prompt_test.log")
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_display_layer() {
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(
                LevelFilter::DEBUG,
                &LogDestination::Display(DisplayPreference::Stderr),
            )
            .unwrap();
        assert!(layer.is_some());

        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_display_layer(LevelFilter::DEBUG, &LogDestination::None).unwrap();
        assert!(layer.is_none());
    }

    #[test]
    fn test_file_layer_creates_file() {
        let dir = tempdir().unwrap();
        let file_path = temp_log_file(&dir);
        let layer: Option<Box<DynLayer<tracing_subscriber::Registry>>> =
            try_create_file_layer(LevelFilter::DEBUG, &LogDestination::File(file_path.clone()))
                .unwrap();
        assert!(layer.is_some());
        assert!(std::path::Path::new(&file_path).exists());
    }

    #[test]
    fn test_layer_count() {
        let dir = tempdir().unwrap();
        let logging_config = LoggingConfig {
            destination: LogDestination::DisplayAndFile(
                DisplayPreference::Stdout,
                temp_log_file(&dir),
            ),
            level_filter: LevelFilter::DEBUG,
            scope: LoggingScope::ThreadLocal,
        };
        assert_eq!(try_create_layers(&logging_config).unwrap().len(), 3);

        let logging_config = LoggingConfig {
            destination: LogDestination::None,
            ..logging_config
        };
        assert_eq!(try_create_layers(&logging_config).unwrap().len(), 1);
    }

    #[test]
    #[serial]
    fn test_thread_local_logging_writes_to_file() {
        let dir = tempdir().unwrap();
        let file_path = temp_log_file(&dir);
        let logging_config =
            LoggingConfig::new_file(Some(file_path.clone())).with_scope(LoggingScope::ThreadLocal);

        let guard = init_logging(logging_config).unwrap();
        assert!(guard.is_some());
        tracing::info!(message = "prompt log line");
        drop(guard);

        let contents = std::fs::read_to_string(&file_path).unwrap();
        assert!(contents.contains("prompt log line"));
    }
}
