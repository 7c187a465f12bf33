//! Task occurrence calculation.
//!
//! Decides whether a task "appears" on a calendar date given its list type,
//! due date and explicit weekday, and finds the next date it appears on.
//!
//! For recurring lists the due date is the anchor: nothing occurs before it.

use crate::calendar;
use crate::model::{ListType, Task, Weekday};
use chrono::{Datelike, Days, NaiveDate};

/// Upper bound on the days scanned by [`next_occurrence`].
///
/// Every valid recurring task occurs at least once in any 366-day window
/// starting on or after its anchor.
const MAX_SCAN_DAYS: u64 = 366;

/// Returns `true` if `task` appears on `date`.
#[must_use]
pub fn occurs_on(task: &Task, date: NaiveDate) -> bool {
    if let Some(anchor) = task.due_date {
        if task.list_type.is_recurring() && date < anchor {
            return false;
        }
    }

    match task.list_type {
        ListType::Standard => task.due_date == Some(date),
        ListType::Daily => true,
        ListType::Weekly => task
            .effective_weekday()
            .is_some_and(|wd| Weekday::from(date.weekday()) == wd),
        ListType::Monthly => task
            .due_date
            .is_some_and(|due| calendar::matches_day_of_month(date, due.day())),
        ListType::Yearly => task
            .due_date
            .is_some_and(|due| calendar::matches_month_day(date, due.month(), due.day())),
    }
}

/// First date on or after `from` on which `task` occurs.
///
/// Returns `None` for undated standard tasks, standard tasks already past
/// due, and recurring tasks missing their anchor.
#[must_use]
pub fn next_occurrence(task: &Task, from: NaiveDate) -> Option<NaiveDate> {
    if task.list_type == ListType::Standard {
        return task.due_date.filter(|due| *due >= from);
    }

    // Recurrence cannot start before the anchor.
    let start = match task.due_date {
        Some(anchor) if anchor > from => anchor,
        _ => from,
    };

    (0..=MAX_SCAN_DAYS)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .find(|date| occurs_on(task, *date))
}

/// All dates in `start..=end` on which `task` occurs, ascending.
#[must_use]
pub fn occurrences_between(task: &Task, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if end < start {
        return Vec::new();
    }
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| occurs_on(task, *date))
        .collect()
}

/// Returns `true` for an incomplete standard task whose due date has passed.
///
/// Recurring tasks are never overdue; they simply occur again.
#[must_use]
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.completed
        && task.list_type == ListType::Standard
        && task.due_date.is_some_and(|due| due < today)
}
