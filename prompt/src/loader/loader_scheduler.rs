// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{pin::Pin, time::Duration};

use tokio::time::{Instant, Interval, MissedTickBehavior, Sleep, interval_at, sleep};

use crate::PromptSettings;

/// What the [`LoaderScheduler`] asks its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderEvent {
    /// The show delay elapsed. Switch the prompt to loading.
    Show,
    /// Advance the spinner by one frame.
    Tick,
}

#[derive(Debug)]
enum LoaderPhase {
    Idle,
    Pending(Pin<Box<Sleep>>),
    Running(Interval),
}

/// A cancellable timer that drives the spinner while a submission is in flight.
///
/// 1. [`Self::arm()`] starts the show delay.
/// 2. If the delay elapses, [`Self::next_event()`] yields [`LoaderEvent::Show`] once,
///    then [`LoaderEvent::Tick`] every tick interval.
/// 3. [`Self::cancel()`] stops it. If it is cancelled before the show delay elapses,
///    nothing is ever yielded, so fast submissions never flash a spinner.
///
/// The scheduler holds no reference to the prompt state. It is meant to be raced against
/// the submission inside [`tokio::select!`], and [`Self::next_event()`] is cancel safe:
/// the pending sleep and the interval live in `self`, so dropping the future loses no
/// progress. With an [`Self::is_idle()`] scheduler, [`Self::next_event()`] never
/// completes.
#[derive(Debug)]
pub struct LoaderScheduler {
    show_delay: Duration,
    tick_interval: Duration,
    phase: LoaderPhase,
}

impl LoaderScheduler {
    #[must_use]
    pub fn new(show_delay: Duration, tick_interval: Duration) -> Self {
        Self {
            show_delay,
            tick_interval,
            phase: LoaderPhase::Idle,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &PromptSettings) -> Self {
        Self::new(settings.loader_show_delay, settings.spinner_tick_interval)
    }

    /// Starts (or restarts) the show delay.
    pub fn arm(&mut self) { self.phase = LoaderPhase::Pending(Box::pin(sleep(self.show_delay))); }

    /// Stops the scheduler, whether it is waiting to show or already ticking.
    pub fn cancel(&mut self) { self.phase = LoaderPhase::Idle; }

    #[must_use]
    pub fn is_idle(&self) -> bool { matches!(self.phase, LoaderPhase::Idle) }

    #[must_use]
    pub fn is_pending(&self) -> bool { matches!(self.phase, LoaderPhase::Pending(_)) }

    #[must_use]
    pub fn is_running(&self) -> bool { matches!(self.phase, LoaderPhase::Running(_)) }

    pub async fn next_event(&mut self) -> LoaderEvent {
        match &mut self.phase {
            LoaderPhase::Idle => std::future::pending().await,
            LoaderPhase::Pending(show_delay) => {
                show_delay.as_mut().await;
                let mut ticks =
                    interval_at(Instant::now() + self.tick_interval, self.tick_interval);
                ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.phase = LoaderPhase::Running(ticks);
                LoaderEvent::Show
            }
            LoaderPhase::Running(ticks) => {
                ticks.tick().await;
                LoaderEvent::Tick
            }
        }
    }
}
