// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Simple macro to create a [`Result`] with an [`Ok`] variant. It is just syntactic sugar
/// that helps having to write `Ok(())`.
/// - If no arg is passed in then it will return `Ok(())`.
/// - If an arg is passed in then it will return `Ok($arg)`.
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

/// Wraps `$text` in the given crossterm color when `$colorize` is true, otherwise
/// returns it unchanged. Both branches produce a [`String`].
#[macro_export]
macro_rules! paint {
    ($colorize:expr, $text:expr, $color:ident) => {
        if $colorize {
            crossterm::style::Stylize::$color($text).to_string()
        } else {
            $text.to_string()
        }
    };
}
