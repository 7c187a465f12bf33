//! Store persistence feeding agenda views and the reminder dispatcher.

use crate::helpers::{at, date, task};
use tickler::agenda::{self, AgendaDay};
use tickler::model::{Reminder, ReminderRule, ReminderTime};
use tickler::{ListType, ReminderDispatcher, TaskStore, TicklerConfig, Weekday};
use tokio::sync::mpsc;

fn seeded_store(path: &std::path::Path) -> TaskStore {
    let mut store = TaskStore::open(path).unwrap();
    store
        .upsert(
            task("rent", ListType::Monthly)
                .with_due_date(date(2025, 1, 1))
                .with_reminder(Reminder::new(
                    ReminderRule::DaysBeforeDue { days: 3 },
                    ReminderTime { hour: 9, min: 0 },
                )),
        )
        .unwrap();
    store
        .upsert(
            task("bins", ListType::Weekly)
                .with_day_of_week(Weekday::Mon)
                .with_reminder(Reminder::new(
                    ReminderRule::DaysBeforeDue { days: 1 },
                    ReminderTime { hour: 20, min: 0 },
                )),
        )
        .unwrap();
    store
        .upsert(task("passport", ListType::Standard).with_due_date(date(2025, 2, 20)))
        .unwrap();
    store.save().unwrap();
    store
}

#[test]
fn agenda_from_reopened_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    seeded_store(&path);

    let store = TaskStore::open(&path).unwrap();
    // 2025-03-01 is a Saturday.
    let day = AgendaDay::build(store.tasks(), date(2025, 3, 1));
    assert_eq!(day.due, vec!["rent"]);
    assert_eq!(day.overdue, vec!["passport"]);
    assert!(day.reminders.is_empty());

    let sunday = AgendaDay::build(store.tasks(), date(2025, 3, 2));
    assert_eq!(sunday.reminders.len(), 1);
    assert_eq!(sunday.reminders[0].task_id, "bins");
}

#[test]
fn completing_a_task_silences_its_reminders() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    let mut store = seeded_store(&path);

    let from = at(2025, 2, 25, 0, 0);
    let before = agenda::upcoming_reminders(store.tasks(), from, 7);
    assert!(before.iter().any(|r| r.task_id == "rent"));

    assert!(store.set_completed("rent", true));
    store.save().unwrap();

    let reopened = TaskStore::open(&path).unwrap();
    let after = agenda::upcoming_reminders(reopened.tasks(), from, 7);
    assert!(after.iter().all(|r| r.task_id != "rent"));
    assert!(after.iter().any(|r| r.task_id == "bins"));
}

#[test]
fn dispatcher_reads_from_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    seeded_store(&path);

    let config = TicklerConfig::default();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let source_path = path.clone();
    let mut dispatcher = ReminderDispatcher::new(
        Box::new(move || Ok(TaskStore::open(&source_path)?.tasks().to_vec())),
        tx,
    )
    .with_config(&config.dispatcher)
    .starting_at(at(2025, 2, 26, 8, 0));

    // Rent is due 2025-03-01; three days before is 2025-02-26 at 09:00.
    assert_eq!(dispatcher.tick_at(at(2025, 2, 26, 9, 0)).unwrap(), 1);
    let due = rx.try_recv().unwrap();
    assert_eq!(due.task_id, "rent");
    assert_eq!(due.at, at(2025, 2, 26, 9, 0));
}
