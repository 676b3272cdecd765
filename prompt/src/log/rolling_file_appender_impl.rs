// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Appender that writes to `path_str` and never rotates. Wrapping it in
/// `tracing_appender::non_blocking()` loses lines written just before exit, so it is used
/// as is.
///
/// # Errors
///
/// - If `path_str` has no parent folder or no UTF-8 file name.
/// - If the folder can't be created or the file can't be opened for appending.
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = PathBuf::from(path_str);

    let parent = path.parent().ok_or_else(|| {
        miette::miette!(
            help = "Pass a path to a file, eg: `/tmp/prompt.log`",
            "Can't access the folder of log file {}",
            path.display()
        )
    })?;

    let file_name = path.file_name().and_then(|it| it.to_str()).ok_or_else(|| {
        miette::miette!(
            help = "Pass a path to a file, eg: `/tmp/prompt.log`",
            "Can't access the file name of log file {}",
            path.display()
        )
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(parent)
        .into_diagnostic()
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_try_create_in_temp_dir() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("prompt.log");
        let it = try_create(file_path.to_str().unwrap());
        assert!(it.is_ok());
        assert!(file_path.exists());
    }

    #[test]
    fn test_try_create_without_file_name_fails() {
        assert!(try_create("/").is_err());
    }

    #[test]
    fn test_try_create_under_a_regular_file_fails() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_folder");
        std::fs::write(&blocker, "").unwrap();
        let file_path = blocker.join("prompt.log");
        assert!(try_create(file_path.to_str().unwrap()).is_err());
    }
}
