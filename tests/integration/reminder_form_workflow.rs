//! Client form editing workflows for reminders.

use crate::helpers::{date, task};
use tickler::reminder_form::{
    self, ReminderForm, ReminderKind, ValidationError, format_reminder, forms_from_reminders,
};
use tickler::{ListType, reminder};

/// Form input from a client → typed reminder → attached task → fires on the right day.
#[test]
fn test_full_reminder_creation_workflow() {
    let form = ReminderForm {
        kind: ReminderKind::DaysBefore,
        days_before: "2".to_owned(),
        hour: "18".to_owned(),
        min: "30".to_owned(),
        ..ReminderForm::default()
    };
    assert!(form.validate().is_ok());

    let r = form.to_reminder().unwrap();
    assert_eq!(format_reminder(&r), "2 day(s) before due at 18:30");

    let t = task("report", ListType::Standard)
        .with_due_date(date(2025, 5, 12))
        .with_reminder(r);
    assert!(reminder::reminds_on(&t, date(2025, 5, 10)));
    assert!(!reminder::reminds_on(&t, date(2025, 5, 11)));
}

/// Existing reminders → forms → edit → back to reminders.
#[test]
fn test_full_reminder_editing_workflow() {
    let mut t = task("gym", ListType::Standard);
    t.reminders = reminder_form::reminders_from_forms(&[ReminderForm {
        kind: ReminderKind::EveryWeek,
        weekday: "tue".to_owned(),
        ..ReminderForm::default()
    }])
    .unwrap();

    let mut forms = forms_from_reminders(&t.reminders);
    assert_eq!(forms.len(), 1);
    assert_eq!(forms[0].weekday, "tue");

    forms[0].weekday = "thursday".to_owned();
    forms[0].hour = "6".to_owned();
    t.reminders = reminder_form::reminders_from_forms(&forms).unwrap();

    assert_eq!(format_reminder(&t.reminders[0]), "Every Thursday at 06:00");
    // 2025-03-13 is a Thursday.
    assert!(reminder::reminds_on(&t, date(2025, 3, 13)));
}

#[test]
fn test_forms_survive_json_between_clients() {
    let json = r#"{"kind":"EVERY_YEAR","month":"2","day":"29","hour":"8"}"#;
    let form: ReminderForm = serde_json::from_str(json).unwrap();
    assert_eq!(form.min, "0");
    let r = form.to_reminder().unwrap();
    assert_eq!(format_reminder(&r), "Every year on February 29 at 08:00");
}

#[test]
fn test_first_invalid_form_stops_conversion() {
    let forms = vec![
        ReminderForm::default(),
        ReminderForm {
            kind: ReminderKind::SpecificDate,
            date: "2025-13-01".to_owned(),
            ..ReminderForm::default()
        },
        ReminderForm {
            kind: ReminderKind::EveryMonth,
            day: "0".to_owned(),
            ..ReminderForm::default()
        },
    ];
    let err = reminder_form::reminders_from_forms(&forms).unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.error, ValidationError::DateInvalid);
}
