//! Shared helpers for integration tests.

use chrono::{NaiveDate, NaiveDateTime};
use tickler::{ListType, Task};

/// Build a date, panicking on invalid input.
pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// Build a date-time at `hour:min`.
pub(crate) fn at(y: i32, m: u32, d: u32, hour: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(hour, min, 0).expect("valid time")
}

/// A task with a fixed, readable ID.
pub(crate) fn task(id: &str, list_type: ListType) -> Task {
    let mut task = Task::new(id, list_type);
    task.id = id.to_owned();
    task
}
