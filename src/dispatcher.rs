//! Reminder dispatcher background loop.
//!
//! Spawns a tokio task that periodically reloads tasks, finds reminders whose
//! fire instant falls between the previous tick and now, and sends them on a
//! channel. Delivery to a device is up to the receiver.

use crate::agenda::{self, ScheduledReminder};
use crate::config::DispatcherConfig;
use crate::error::{Result, TicklerError};
use crate::model::Task;
use chrono::NaiveDateTime;
use std::collections::{HashSet, VecDeque};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Default interval between dispatcher ticks (seconds).
const DEFAULT_TICK_SECS: u64 = 30;

/// Default number of delivered run keys kept for dedupe.
const DEFAULT_DELIVERED_CAPACITY: usize = 1024;

/// Longest gap the dispatcher catches up on after a stall (e.g. system sleep).
const MAX_CATCH_UP_SECS: i64 = 24 * 3600;

/// Callback that yields the current task list on every tick.
pub type TaskSource = Box<dyn Fn() -> Result<Vec<Task>> + Send + Sync>;

/// Background dispatcher that emits due reminders.
pub struct ReminderDispatcher {
    /// Task loader.
    source: TaskSource,
    /// Channel for due reminders.
    result_tx: mpsc::UnboundedSender<ScheduledReminder>,
    /// Seconds between ticks.
    tick_secs: u64,
    /// Instant the previous tick covered up to.
    last_tick: Option<NaiveDateTime>,
    /// Delivered run keys in delivery order.
    delivered_order: VecDeque<String>,
    /// Delivered run keys for lookup.
    delivered: HashSet<String>,
    /// Max delivered run keys remembered.
    delivered_capacity: usize,
}

impl ReminderDispatcher {
    /// Create a dispatcher reading tasks from `source` and sending on `result_tx`.
    pub fn new(source: TaskSource, result_tx: mpsc::UnboundedSender<ScheduledReminder>) -> Self {
        Self {
            source,
            result_tx,
            tick_secs: DEFAULT_TICK_SECS,
            last_tick: None,
            delivered_order: VecDeque::new(),
            delivered: HashSet::new(),
            delivered_capacity: DEFAULT_DELIVERED_CAPACITY,
        }
    }

    /// Apply `[dispatcher]` settings.
    #[must_use]
    pub fn with_config(self, config: &DispatcherConfig) -> Self {
        self.with_tick_secs(config.tick_secs)
            .with_delivered_capacity(config.delivered_capacity)
    }

    /// Override the tick interval.
    #[must_use]
    pub fn with_tick_secs(mut self, secs: u64) -> Self {
        self.tick_secs = secs.max(1);
        self
    }

    /// Override how many delivered run keys are remembered.
    #[must_use]
    pub fn with_delivered_capacity(mut self, capacity: usize) -> Self {
        self.delivered_capacity = capacity.max(1);
        self
    }

    /// Start the window at `at` instead of one tick before the first tick.
    #[must_use]
    pub fn starting_at(mut self, at: NaiveDateTime) -> Self {
        self.last_tick = Some(at);
        self
    }

    /// Run one tick as if the current time were `now`.
    ///
    /// Returns the number of reminders sent.
    ///
    /// # Errors
    /// Returns [`TicklerError::Dispatch`] when the receiver has gone away, or
    /// the task source error if loading fails.
    pub fn tick_at(&mut self, now: NaiveDateTime) -> Result<usize> {
        let window_start = self.window_start(now);
        let Some(after) = window_start else {
            debug!("clock did not advance past {now}, skipping tick");
            return Ok(0);
        };

        let tasks = (self.source)()?;
        let due = agenda::reminders_between(&tasks, after, now);
        self.last_tick = Some(now);

        let mut sent = 0;
        for reminder in due {
            let run_key = build_run_key(&reminder.task_id, reminder.at);
            if self.delivered.contains(&run_key) {
                debug!("suppressing duplicate reminder '{run_key}'");
                continue;
            }
            info!("reminder due: {} at {}", reminder.title, reminder.at);
            if self.result_tx.send(reminder).is_err() {
                return Err(TicklerError::Dispatch(
                    "reminder channel closed".to_owned(),
                ));
            }
            self.remember(run_key);
            sent += 1;
        }
        Ok(sent)
    }

    /// Start the dispatcher background loop.
    pub fn run(mut self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            info!("reminder dispatcher started, ticking every {}s", self.tick_secs);
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(self.tick_secs));

            loop {
                interval.tick().await;
                if self.result_tx.is_closed() {
                    debug!("reminder channel closed, stopping dispatcher");
                    return;
                }
                let now = chrono::Local::now().naive_local();
                match self.tick_at(now) {
                    Ok(_) => {}
                    Err(TicklerError::Dispatch(msg)) => {
                        debug!("{msg}, stopping dispatcher");
                        return;
                    }
                    Err(e) => error!("reminder tick failed: {e}"),
                }
            }
        })
    }

    fn window_start(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let tick_secs = i64::try_from(self.tick_secs)
            .unwrap_or(MAX_CATCH_UP_SECS)
            .min(MAX_CATCH_UP_SECS);
        let tick = chrono::Duration::seconds(tick_secs);
        let earliest = now - chrono::Duration::seconds(MAX_CATCH_UP_SECS);
        match self.last_tick {
            None => Some(now - tick),
            Some(last) if last >= now => None,
            Some(last) if last < earliest => {
                warn!("dispatcher stalled since {last}, skipping reminders older than 24h");
                Some(earliest)
            }
            Some(last) => Some(last),
        }
    }

    fn remember(&mut self, run_key: String) {
        self.delivered.insert(run_key.clone());
        self.delivered_order.push_back(run_key);
        while self.delivered_order.len() > self.delivered_capacity {
            if let Some(old) = self.delivered_order.pop_front() {
                self.delivered.remove(&old);
            }
        }
    }
}

pub(crate) fn build_run_key(task_id: &str, at: NaiveDateTime) -> String {
    format!("{task_id}:{}", at.format("%Y-%m-%dT%H:%M"))
}
