// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

pub const LOADER_SHOW_DELAY_MS: u64 = 500;
pub const LOADER_SHOW_DELAY: Duration = Duration::from_millis(LOADER_SHOW_DELAY_MS);

pub const SPINNER_TICK_MS: u64 = 85;
pub const SPINNER_TICK_INTERVAL: Duration = Duration::from_millis(SPINNER_TICK_MS);

/// More info: <https://www.unicode.org/charts/script/chart_Braille.html>
pub const BRAILLE_DOTS: [&str; 34] = [
    "⠁", "⠃", "⡇", "⠇", "⡎", "⢟", "⡯", "⡗", "⡞", "⡟", "⡷", "⡾", "⡾", "⣕", "⣗", "⣝", "⡣",
    "⡮", "⡯", "⡳", "⡵", "⣞", "⣟", "⣧", "⣮", "⣯", "⣷", "⣿", "⣼", "⡟", "⡏", "⠇", "⠃", "⠁",
];

pub const BLOCK_DOTS: [&str; 8] = ["█", "▓", "▒", "░", "░", "▒", "▓", "█"];
