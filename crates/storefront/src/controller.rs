//! Input controller: turns control events into filter state changes and
//! decides when a render pass runs.
//!
//! Category and sort changes dispatch a pass immediately. Search input is
//! debounced: every keystroke restarts a quiet period, and only the last
//! value within it triggers a pass.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use showcase_core::CategoryFilter;
use tokio::time::{Instant, Sleep};

use crate::catalog::engine::{FilterState, SortOrder};

/// A change made through one of the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Search(String),
    Category(CategoryFilter),
    Sort(SortOrder),
}

/// When the pass for an event should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Run a pass now.
    Now,
    /// A pass is scheduled for when the debounce period elapses.
    Deferred,
}

/// Cancellable single-shot timer.
///
/// Scheduling while pending replaces the deadline. [`Debouncer::fired`] is
/// cancel-safe and stays pending while nothing is scheduled, so it can sit in
/// a `tokio::select!` loop.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    sleep: Option<Pin<Box<Sleep>>>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, sleep: None }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Start (or restart) the quiet period.
    pub fn schedule(&mut self) {
        let deadline = Instant::now() + self.delay;
        match self.sleep.as_mut() {
            Some(sleep) => sleep.as_mut().reset(deadline),
            None => self.sleep = Some(Box::pin(tokio::time::sleep_until(deadline))),
        }
    }

    pub fn cancel(&mut self) {
        self.sleep = None;
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.sleep.is_some()
    }

    /// Resolves once the scheduled deadline passes, then disarms.
    pub async fn fired(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

/// Holds the current filter state for one page.
#[derive(Debug)]
pub struct InputController {
    state: FilterState,
    debounce: Debouncer,
}

impl InputController {
    #[must_use]
    pub fn new(search_debounce: Duration) -> Self {
        Self {
            state: FilterState::default(),
            debounce: Debouncer::new(search_debounce),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &FilterState {
        &self.state
    }

    /// Apply an event and say when its pass should run.
    ///
    /// A zero debounce period makes search immediate.
    pub fn handle(&mut self, event: FilterEvent) -> Dispatch {
        match event {
            FilterEvent::Search(text) => {
                self.state.search_text = text;
                if self.debounce.delay().is_zero() {
                    return Dispatch::Now;
                }
                self.debounce.schedule();
                Dispatch::Deferred
            }
            FilterEvent::Category(category) => {
                self.state.category = category;
                Dispatch::Now
            }
            FilterEvent::Sort(order) => {
                self.state.sort_order = order;
                Dispatch::Now
            }
        }
    }

    #[must_use]
    pub const fn has_deferred(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Future that completes when a deferred pass is due.
    pub fn deferred(&mut self) -> impl Future<Output = ()> + '_ {
        self.debounce.fired()
    }
}
