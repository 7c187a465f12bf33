//! Reminder firing calculation.
//!
//! Evaluates a task's [`ReminderRule`]s against calendar dates. Rules are
//! independent: a reminder fires on a date if any rule fires on it.

use crate::agenda::MAX_HORIZON_DAYS;
use crate::calendar;
use crate::model::{ReminderRule, Task, Weekday};
use crate::occurrence;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

/// Returns `true` if `rule` fires on `date` for `task`.
///
/// Completion is not considered here; see [`reminds_on`].
#[must_use]
pub fn rule_fires_on(task: &Task, rule: &ReminderRule, date: NaiveDate) -> bool {
    match rule {
        ReminderRule::SpecificDate { date: at } => *at == date,
        ReminderRule::EveryDay => true,
        ReminderRule::EveryWeek { weekday } => Weekday::from(date.weekday()) == *weekday,
        ReminderRule::EveryMonth { day } => calendar::matches_day_of_month(date, u32::from(*day)),
        ReminderRule::EveryYear { month, day } => {
            calendar::matches_month_day(date, u32::from(*month), u32::from(*day))
        }
        ReminderRule::DaysBeforeDue { days } => date
            .checked_add_days(Days::new(u64::from(*days)))
            .is_some_and(|target| occurrence::occurs_on(task, target)),
    }
}

/// Returns `true` if any reminder of `task` fires on `date`.
///
/// Completed tasks never remind.
#[must_use]
pub fn reminds_on(task: &Task, date: NaiveDate) -> bool {
    !task.completed
        && task
            .reminders
            .iter()
            .any(|r| rule_fires_on(task, &r.rule, date))
}

/// Fire instants of `task`'s reminders on `date`, sorted and de-duplicated.
#[must_use]
pub fn reminder_times_on(task: &Task, date: NaiveDate) -> Vec<NaiveDateTime> {
    if task.completed {
        return Vec::new();
    }
    let mut times: Vec<NaiveDateTime> = task
        .reminders
        .iter()
        .filter(|r| rule_fires_on(task, &r.rule, date))
        .map(|r| date.and_time(r.time.as_naive_time()))
        .collect();
    times.sort_unstable();
    times.dedup();
    times
}

/// First reminder instant strictly after `after`, looking at most
/// `horizon_days` days past `after`'s date.
///
/// `horizon_days` is clamped to [`MAX_HORIZON_DAYS`].
#[must_use]
pub fn next_reminder_after(
    task: &Task,
    after: NaiveDateTime,
    horizon_days: u32,
) -> Option<NaiveDateTime> {
    if task.completed || task.reminders.is_empty() {
        return None;
    }
    let start = after.date();
    (0..=u64::from(horizon_days.min(MAX_HORIZON_DAYS)))
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .find_map(|date| {
            reminder_times_on(task, date)
                .into_iter()
                .find(|at| *at > after)
        })
}
