//! Occurrence and reminder behaviour over whole calendar ranges.

use crate::helpers::{date, task};
use chrono::Days;
use tickler::model::{Reminder, ReminderRule, ReminderTime};
use tickler::{ListType, Weekday, occurrence, reminder};

#[test]
fn monthly_end_of_month_task_occurs_once_every_month() {
    let rent = task("rent", ListType::Monthly).with_due_date(date(2025, 1, 31));
    let dates = occurrence::occurrences_between(&rent, date(2025, 1, 1), date(2025, 12, 31));
    assert_eq!(dates.len(), 12);
    assert_eq!(dates[1], date(2025, 2, 28));
    assert_eq!(dates[3], date(2025, 4, 30));
}

#[test]
fn leap_day_anniversary_over_five_years() {
    let birthday = task("birthday", ListType::Yearly).with_due_date(date(2024, 2, 29));
    let dates = occurrence::occurrences_between(&birthday, date(2024, 1, 1), date(2028, 12, 31));
    assert_eq!(
        dates,
        vec![
            date(2024, 2, 29),
            date(2025, 2, 28),
            date(2026, 2, 28),
            date(2027, 2, 28),
            date(2028, 2, 29),
        ]
    );
}

#[test]
fn daily_and_weekly_counts_for_a_year() {
    let daily = task("stretch", ListType::Daily).with_due_date(date(2025, 1, 1));
    let weekly = task("review", ListType::Weekly).with_due_date(date(2025, 1, 1));
    let start = date(2025, 1, 1);
    let end = date(2025, 12, 31);
    assert_eq!(occurrence::occurrences_between(&daily, start, end).len(), 365);
    // 2025 starts on a Wednesday, so it has 53 of them.
    assert_eq!(occurrence::occurrences_between(&weekly, start, end).len(), 53);
}

#[test]
fn next_occurrence_agrees_with_range_scan() {
    let tasks = vec![
        task("a", ListType::Standard).with_due_date(date(2025, 6, 15)),
        task("b", ListType::Daily).with_due_date(date(2025, 3, 3)),
        task("c", ListType::Weekly).with_day_of_week(Weekday::Sun),
        task("d", ListType::Monthly).with_due_date(date(2025, 1, 30)),
        task("e", ListType::Yearly).with_due_date(date(2024, 2, 29)),
    ];
    let mut day = date(2025, 1, 1);
    while day <= date(2025, 12, 31) {
        for t in &tasks {
            let horizon = day.checked_add_days(Days::new(366)).unwrap();
            let expected = occurrence::occurrences_between(t, day, horizon).first().copied();
            assert_eq!(
                occurrence::next_occurrence(t, day),
                expected,
                "task {} from {day}",
                t.id
            );
        }
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn days_before_a_weekly_task_fires_the_day_before_each_occurrence() {
    let bins = task("bins", ListType::Weekly)
        .with_day_of_week(Weekday::Fri)
        .with_reminder(Reminder::new(
            ReminderRule::DaysBeforeDue { days: 1 },
            ReminderTime { hour: 20, min: 0 },
        ));
    let fired: Vec<_> = date(2025, 3, 1)
        .iter_days()
        .take_while(|d| *d <= date(2025, 3, 31))
        .filter(|d| reminder::reminds_on(&bins, *d))
        .collect();
    assert_eq!(
        fired,
        vec![date(2025, 3, 6), date(2025, 3, 13), date(2025, 3, 20), date(2025, 3, 27)]
    );
}

#[test]
fn mixed_rules_fire_independently() {
    let t = task("mixed", ListType::Standard)
        .with_due_date(date(2025, 12, 24))
        .with_reminder(Reminder::new(
            ReminderRule::EveryYear { month: 12, day: 1 },
            ReminderTime { hour: 9, min: 0 },
        ))
        .with_reminder(Reminder::new(
            ReminderRule::EveryMonth { day: 15 },
            ReminderTime { hour: 9, min: 0 },
        ))
        .with_reminder(Reminder::new(
            ReminderRule::DaysBeforeDue { days: 7 },
            ReminderTime { hour: 9, min: 0 },
        ));
    let fired: Vec<_> = date(2025, 11, 20)
        .iter_days()
        .take_while(|d| *d <= date(2025, 12, 31))
        .filter(|d| reminder::reminds_on(&t, *d))
        .collect();
    assert_eq!(
        fired,
        vec![date(2025, 12, 1), date(2025, 12, 15), date(2025, 12, 17)]
    );
}
