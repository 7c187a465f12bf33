//! Day views and upcoming reminder listings built on top of the occurrence
//! and reminder calculators.

use crate::model::Task;
use crate::{occurrence, reminder};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Longest lookahead accepted by [`upcoming_reminders`] and
/// [`reminder::next_reminder_after`]; larger horizons are clamped to it.
pub const MAX_HORIZON_DAYS: u32 = 3660;

/// One reminder instant for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledReminder {
    /// Owning task ID.
    pub task_id: String,
    /// Task title at the time of calculation.
    pub title: String,
    /// When the reminder fires (local wall-clock time).
    pub at: NaiveDateTime,
}

/// Everything relevant to a single calendar day.
#[derive(Debug, Clone, Serialize)]
pub struct AgendaDay {
    /// The day described.
    pub date: NaiveDate,
    /// IDs of tasks that occur on the day, in input order.
    pub due: Vec<String>,
    /// IDs of open standard tasks whose due date has passed.
    pub overdue: Vec<String>,
    /// Reminders firing on the day, sorted by time.
    pub reminders: Vec<ScheduledReminder>,
}

impl AgendaDay {
    /// Build the agenda for `date`.
    #[must_use]
    pub fn build(tasks: &[Task], date: NaiveDate) -> Self {
        let due = tasks
            .iter()
            .filter(|t| occurrence::occurs_on(t, date))
            .map(|t| t.id.clone())
            .collect();
        let overdue = tasks
            .iter()
            .filter(|t| occurrence::is_overdue(t, date))
            .map(|t| t.id.clone())
            .collect();

        let mut reminders: Vec<ScheduledReminder> = tasks
            .iter()
            .flat_map(|t| {
                reminder::reminder_times_on(t, date)
                    .into_iter()
                    .map(move |at| ScheduledReminder {
                        task_id: t.id.clone(),
                        title: t.title.clone(),
                        at,
                    })
            })
            .collect();
        sort_reminders(&mut reminders);

        Self {
            date,
            due,
            overdue,
            reminders,
        }
    }

    /// Returns `true` when nothing is due, overdue or reminding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.due.is_empty() && self.overdue.is_empty() && self.reminders.is_empty()
    }
}

/// All reminder instants in `(from, from + horizon_days]`, sorted by time and
/// then task ID.
///
/// `horizon_days` is clamped to [`MAX_HORIZON_DAYS`].
#[must_use]
pub fn upcoming_reminders(
    tasks: &[Task],
    from: NaiveDateTime,
    horizon_days: u32,
) -> Vec<ScheduledReminder> {
    let days = horizon_days.min(MAX_HORIZON_DAYS);
    let until = from
        .checked_add_signed(chrono::Duration::days(i64::from(days)))
        .unwrap_or(NaiveDateTime::MAX);
    reminders_between(tasks, from, until)
}

/// All reminder instants in the half-open window `(after, until]`.
#[must_use]
pub fn reminders_between(
    tasks: &[Task],
    after: NaiveDateTime,
    until: NaiveDateTime,
) -> Vec<ScheduledReminder> {
    if until <= after {
        return Vec::new();
    }
    let mut out = Vec::new();
    let mut date = after.date();
    while date <= until.date() {
        for task in tasks {
            for at in reminder::reminder_times_on(task, date) {
                if at > after && at <= until {
                    out.push(ScheduledReminder {
                        task_id: task.id.clone(),
                        title: task.title.clone(),
                        at,
                    });
                }
            }
        }
        match date.checked_add_days(Days::new(1)) {
            Some(next) => date = next,
            None => break,
        }
    }
    sort_reminders(&mut out);
    out
}

fn sort_reminders(reminders: &mut [ScheduledReminder]) {
    reminders.sort_by(|a, b| a.at.cmp(&b.at).then_with(|| a.task_id.cmp(&b.task_id)));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::model::{ListType, Reminder, ReminderRule, ReminderTime, Weekday};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task_with_id(id: &str, list_type: ListType) -> Task {
        let mut t = Task::new(id, list_type);
        t.id = id.to_owned();
        t
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task_with_id("dentist", ListType::Standard)
                .with_due_date(d(2025, 3, 10))
                .with_reminder(Reminder::new(
                    ReminderRule::DaysBeforeDue { days: 1 },
                    ReminderTime { hour: 19, min: 0 },
                )),
            task_with_id("stretch", ListType::Daily).with_reminder(Reminder::new(
                ReminderRule::EveryDay,
                ReminderTime { hour: 7, min: 30 },
            )),
            task_with_id("bins", ListType::Weekly).with_day_of_week(Weekday::Tue),
            task_with_id("taxes", ListType::Standard).with_due_date(d(2025, 3, 1)),
        ]
    }

    #[test]
    fn agenda_lists_due_and_overdue() {
        let tasks = sample_tasks();
        let day = AgendaDay::build(&tasks, d(2025, 3, 10));
        assert_eq!(day.due, vec!["dentist", "stretch"]);
        assert_eq!(day.overdue, vec!["taxes"]);
        assert_eq!(day.reminders.len(), 1);
        assert_eq!(day.reminders[0].task_id, "stretch");
    }

    #[test]
    fn agenda_reminders_are_sorted_by_time() {
        let tasks = sample_tasks();
        let day = AgendaDay::build(&tasks, d(2025, 3, 9));
        let ids: Vec<&str> = day.reminders.iter().map(|r| r.task_id.as_str()).collect();
        assert_eq!(ids, vec!["stretch", "dentist"]);
    }

    #[test]
    fn empty_agenda() {
        let day = AgendaDay::build(&[], d(2025, 3, 9));
        assert!(day.is_empty());
        assert_eq!(day.date, d(2025, 3, 9));
    }

    #[test]
    fn same_instant_reminders_are_ordered_by_task_id() {
        let nine = ReminderTime { hour: 9, min: 0 };
        let tasks = vec![
            task_with_id("b", ListType::Daily)
                .with_reminder(Reminder::new(ReminderRule::EveryDay, nine)),
            task_with_id("a", ListType::Daily)
                .with_reminder(Reminder::new(ReminderRule::EveryDay, nine)),
        ];
        let from = d(2025, 3, 9).and_hms_opt(12, 0, 0).unwrap();
        let ids: Vec<String> = upcoming_reminders(&tasks, from, 1)
            .into_iter()
            .map(|r| r.task_id)
            .collect();
        assert_eq!(ids, vec!["a", "b"]);

        let day = AgendaDay::build(&tasks, d(2025, 3, 10));
        let ids: Vec<&str> = day.reminders.iter().map(|r| r.task_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn huge_horizon_is_clamped() {
        let tasks = vec![task_with_id("pills", ListType::Daily).with_reminder(Reminder::new(
            ReminderRule::EveryDay,
            ReminderTime { hour: 9, min: 0 },
        ))];
        let from = d(2025, 3, 10).and_hms_opt(0, 0, 0).unwrap();
        let upcoming = upcoming_reminders(&tasks, from, 200_000_000);
        assert_eq!(upcoming.len(), MAX_HORIZON_DAYS as usize);
    }

    #[test]
    fn horizon_past_the_end_of_time_does_not_overflow() {
        let tasks = vec![task_with_id("pills", ListType::Daily).with_reminder(Reminder::new(
            ReminderRule::EveryDay,
            ReminderTime { hour: 9, min: 0 },
        ))];
        let from = NaiveDateTime::MAX - chrono::Duration::days(2);
        let upcoming = upcoming_reminders(&tasks, from, 14);
        assert!(upcoming.len() <= 3);
        assert!(upcoming.iter().all(|r| r.at > from));
    }

    #[test]
    fn upcoming_reminders_window_is_half_open() {
        let tasks = sample_tasks();
        let from = d(2025, 3, 9).and_hms_opt(7, 30, 0).unwrap();
        let upcoming = upcoming_reminders(&tasks, from, 1);
        let got: Vec<(String, NaiveDateTime)> = upcoming
            .into_iter()
            .map(|r| (r.task_id, r.at))
            .collect();
        assert_eq!(
            got,
            vec![
                ("dentist".to_owned(), d(2025, 3, 9).and_hms_opt(19, 0, 0).unwrap()),
                ("stretch".to_owned(), d(2025, 3, 10).and_hms_opt(7, 30, 0).unwrap()),
            ]
        );
    }

    #[test]
    fn reminders_between_empty_for_reversed_window() {
        let tasks = sample_tasks();
        let at = d(2025, 3, 9).and_hms_opt(0, 0, 0).unwrap();
        assert!(reminders_between(&tasks, at, at).is_empty());
    }
}
