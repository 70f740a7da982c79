//! Time Entry Tracker
//!
//! Single-writer state machine over one open time entry per user:
//!
//! ```text
//! Idle -> Starting -> Running -> Stopping -> Idle
//!                                    \-> StopPending -> Stopping ...
//! ```
//!
//! `started_at` is the only source of truth for elapsed time; nothing is
//! persisted while running. A failed stop keeps the entry in `StopPending`
//! so it can be retried instead of being dropped.
//!
//! A `start` that arrives while a lookup is in flight is queued: if the
//! lookup finds nothing, the queued start creates the entry.

use std::cell::{Cell, RefCell};

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::models::{Settlement, TimeEntry};
use crate::repository::TimeEntryStore;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TrackerState {
    #[default]
    Idle,
    Starting,
    Running(TimeEntry),
    Stopping(TimeEntry),
    StopPending(TimeEntry),
}

impl TrackerState {
    pub fn entry(&self) -> Option<&TimeEntry> {
        match self {
            TrackerState::Running(e) | TrackerState::Stopping(e) | TrackerState::StopPending(e) => Some(e),
            TrackerState::Idle | TrackerState::Starting => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TrackerState::Running(_))
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, TrackerState::Starting | TrackerState::Stopping(_))
    }

    /// Seconds since the entry started, for display
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<f64> {
        self.entry().map(|e| elapsed_between(e.started_at, now))
    }
}

/// Result of a start or resume request
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// An open entry already existed
    Resumed(TimeEntry),
    /// A new entry was created
    Created(TimeEntry),
    /// No open entry (resume only)
    NothingOpen,
    /// Tracker was not idle; nothing was done
    AlreadyActive,
    /// A lookup was in flight; it creates the entry if it finds none
    Queued,
}

fn elapsed_between(started_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let millis = (now - started_at).num_milliseconds().max(0);
    millis as f64 / 1000.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rate-per-hour proration, rounded to cents
pub fn earnings_for(seconds: f64, hourly_rate: f64) -> f64 {
    round2(seconds / 3600.0 * hourly_rate)
}

/// Stop values for an entry started at `started_at`
pub fn settle(started_at: DateTime<Utc>, now: DateTime<Utc>, hourly_rate: f64) -> Settlement {
    let duration_seconds = (now - started_at).num_seconds().max(0);
    Settlement {
        ended_at: now,
        duration_seconds,
        earnings: earnings_for(duration_seconds as f64, hourly_rate),
    }
}

type Observer = Box<dyn Fn(&TrackerState)>;

/// Drives [`TrackerState`] against a [`TimeEntryStore`].
///
/// Methods take `&self`; state is borrowed only between awaits.
pub struct TimeTracker<S> {
    store: S,
    user_id: String,
    hourly_rate: f64,
    state: RefCell<TrackerState>,
    /// Start time of a start queued behind an in-flight lookup
    queued_start: Cell<Option<DateTime<Utc>>>,
    observer: Option<Observer>,
}

impl<S: TimeEntryStore> TimeTracker<S> {
    pub fn new(store: S, user_id: impl Into<String>, hourly_rate: f64) -> Self {
        Self {
            store,
            user_id: user_id.into(),
            hourly_rate,
            state: RefCell::new(TrackerState::Idle),
            queued_start: Cell::new(None),
            observer: None,
        }
    }

    /// Called after every transition
    pub fn with_observer(mut self, observer: impl Fn(&TrackerState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    /// Resume the open entry, or create one
    pub async fn start(&self, now: DateTime<Utc>) -> AppResult<StartOutcome> {
        if !self.begin_start() {
            if *self.state.borrow() == TrackerState::Starting {
                tracing::debug!("start queued behind in-flight lookup");
                self.queued_start.set(Some(now));
                return Ok(StartOutcome::Queued);
            }
            return Ok(StartOutcome::AlreadyActive);
        }

        let existing = match self.store.find_open(&self.user_id).await {
            Ok(existing) => existing,
            Err(e) => return Err(self.fail_start(e)),
        };
        if let Some(entry) = existing {
            tracing::info!(entry = %entry.id, "resumed open time entry");
            self.transition(TrackerState::Running(entry.clone()));
            return Ok(StartOutcome::Resumed(entry));
        }

        self.create(now).await
    }

    async fn create(&self, now: DateTime<Utc>) -> AppResult<StartOutcome> {
        match self.store.create(&self.user_id, now).await {
            Ok(entry) => {
                tracing::info!(entry = %entry.id, "created time entry");
                self.transition(TrackerState::Running(entry.clone()));
                Ok(StartOutcome::Created(entry))
            }
            Err(e) => Err(self.fail_start(e)),
        }
    }

    /// Pick up an open entry without creating one
    pub async fn resume(&self) -> AppResult<StartOutcome> {
        if !self.begin_start() {
            return Ok(StartOutcome::AlreadyActive);
        }
        match self.store.find_open(&self.user_id).await {
            Ok(Some(entry)) => {
                self.transition(TrackerState::Running(entry.clone()));
                Ok(StartOutcome::Resumed(entry))
            }
            Ok(None) => match self.queued_start.take() {
                Some(at) => self.create(at).await,
                None => {
                    self.transition(TrackerState::Idle);
                    Ok(StartOutcome::NothingOpen)
                }
            },
            Err(e) => Err(self.fail_start(e)),
        }
    }

    /// Settle the running (or stop-pending) entry
    pub async fn stop(&self, now: DateTime<Utc>) -> AppResult<Settlement> {
        let entry = match self.state() {
            TrackerState::Running(e) | TrackerState::StopPending(e) => e,
            TrackerState::Stopping(_) => {
                return Err(AppError::Conflict("parada já em andamento".to_string()));
            }
            TrackerState::Idle | TrackerState::Starting => {
                return Err(AppError::NotFound("nenhum timer ativo".to_string()));
            }
        };

        let settlement = settle(entry.started_at, now, self.hourly_rate);
        self.transition(TrackerState::Stopping(entry.clone()));

        match self.store.settle(&entry.id, &settlement).await {
            Ok(_) => {
                tracing::info!(
                    entry = %entry.id,
                    duration = settlement.duration_seconds,
                    earnings = settlement.earnings,
                    "stopped time entry"
                );
                self.transition(TrackerState::Idle);
                Ok(settlement)
            }
            Err(e) => {
                tracing::error!(entry = %entry.id, error = %e, "failed to stop time entry");
                self.transition(TrackerState::StopPending(entry));
                Err(e)
            }
        }
    }

    fn begin_start(&self) -> bool {
        if *self.state.borrow() != TrackerState::Idle {
            return false;
        }
        self.transition(TrackerState::Starting);
        true
    }

    fn fail_start(&self, e: AppError) -> AppError {
        tracing::error!(error = %e, "failed to start tracking");
        self.transition(TrackerState::Idle);
        e
    }

    fn transition(&self, next: TrackerState) {
        if next != TrackerState::Starting {
            self.queued_start.set(None);
        }
        *self.state.borrow_mut() = next;
        if let Some(observer) = &self.observer {
            let state = self.state.borrow();
            observer(&*state);
        }
    }
}
