//! Tickler: recurring task occurrence and reminder calculation for a to-do list.
//!
//! # Architecture
//!
//! - **Model**: tasks, list types and reminder rules
//! - **Occurrence**: whether a task appears on a date, and when it next does
//! - **Reminder**: whether and when a task's reminders fire on a date
//! - **Reminder form**: flat string forms edited by clients, converted to typed rules
//! - **Agenda**: per-day views and upcoming reminder listings
//! - **Store**: JSON task persistence
//! - **Dispatcher**: background loop emitting due reminders on a channel

pub mod agenda;
pub mod calendar;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod occurrence;
pub mod reminder;
pub mod reminder_form;
pub mod store;
pub mod tickler_dirs;

pub use agenda::{AgendaDay, ScheduledReminder};
pub use config::TicklerConfig;
pub use dispatcher::ReminderDispatcher;
pub use error::{Result, TicklerError};
pub use model::{ListType, Reminder, ReminderRule, ReminderTime, Task, Weekday};
pub use store::TaskStore;
