//! Flat form representation of reminders.
//!
//! Web and mobile clients edit reminders as a handful of string fields. This
//! module converts between that form and the typed [`Reminder`], validating
//! user input on the way in and formatting rules for display.

use crate::model::{Reminder, ReminderRule, ReminderTime, Weekday};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which reminder rule a form describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderKind {
    /// Fire once on `date`.
    SpecificDate,
    /// Fire every day.
    #[default]
    EveryDay,
    /// Fire weekly on `weekday`.
    EveryWeek,
    /// Fire monthly on `day`.
    EveryMonth,
    /// Fire yearly on `month`/`day`.
    EveryYear,
    /// Fire `days_before` days before each occurrence.
    DaysBefore,
}

/// Form representation of a reminder (uses Strings for user input).
///
/// Only the fields relevant to `kind` are read; the rest may hold anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderForm {
    /// Rule kind.
    pub kind: ReminderKind,
    /// ISO date (`YYYY-MM-DD`) for [`ReminderKind::SpecificDate`].
    pub date: String,
    /// Weekday name for [`ReminderKind::EveryWeek`].
    pub weekday: String,
    /// Day of month for [`ReminderKind::EveryMonth`] and [`ReminderKind::EveryYear`].
    pub day: String,
    /// Month (1-12) for [`ReminderKind::EveryYear`].
    pub month: String,
    /// Day offset for [`ReminderKind::DaysBefore`].
    pub days_before: String,
    /// Hour (0-23).
    pub hour: String,
    /// Minute (0-59).
    pub min: String,
}

impl Default for ReminderForm {
    fn default() -> Self {
        Self {
            kind: ReminderKind::default(),
            date: String::new(),
            weekday: String::new(),
            day: String::new(),
            month: String::new(),
            days_before: String::new(),
            hour: "9".to_owned(),
            min: "0".to_owned(),
        }
    }
}

/// Validation error for reminder forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Date is not a valid `YYYY-MM-DD` date.
    DateInvalid,
    /// Weekday is not a recognized name.
    WeekdayInvalid,
    /// Day of month is not a number 1-31.
    DayInvalid,
    /// Month is not a number 1-12.
    MonthInvalid,
    /// Month and day do not name a calendar day (e.g. 4/31).
    MonthDayInvalid,
    /// Days-before is not a non-negative integer.
    DaysBeforeInvalid,
    /// Hour is not a number 0-23.
    HourInvalid,
    /// Minute is not a number 0-59.
    MinuteInvalid,
    /// Reminder spec names no known kind.
    KindUnknown(String),
    /// Reminder spec time is not `HH:MM`.
    TimeFormatInvalid,
    /// Yearly reminder spec is not `MM-DD`.
    MonthDayFormatInvalid,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateInvalid => write!(f, "Date must be in YYYY-MM-DD format"),
            Self::WeekdayInvalid => {
                write!(f, "Invalid weekday (use mon, tue, wed, thu, fri, sat, sun)")
            }
            Self::DayInvalid => write!(f, "Day must be a number between 1 and 31"),
            Self::MonthInvalid => write!(f, "Month must be a number between 1 and 12"),
            Self::MonthDayInvalid => write!(f, "That day does not exist in the chosen month"),
            Self::DaysBeforeInvalid => write!(f, "Days before must be a non-negative number"),
            Self::HourInvalid => write!(f, "Hour must be a number between 0 and 23"),
            Self::MinuteInvalid => write!(f, "Minute must be a number between 0 and 59"),
            Self::KindUnknown(kind) => write!(
                f,
                "Unknown reminder kind '{kind}' (use daily, date, week, month, year, before)"
            ),
            Self::TimeFormatInvalid => write!(f, "Reminder time must be in HH:MM format"),
            Self::MonthDayFormatInvalid => write!(f, "Yearly reminder must be in MM-DD format"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation failure at a position in a list of forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedValidationError {
    /// Position of the offending form.
    pub index: usize,
    /// What was wrong with it.
    pub error: ValidationError,
}

impl std::fmt::Display for IndexedValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "reminder {}: {}", self.index + 1, self.error)
    }
}

impl std::error::Error for IndexedValidationError {}

impl ReminderForm {
    /// Create an empty form with the default kind and time.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a form from an existing reminder.
    #[must_use]
    pub fn from_reminder(reminder: &Reminder) -> Self {
        let mut form = Self {
            hour: reminder.time.hour.to_string(),
            min: reminder.time.min.to_string(),
            ..Self::default()
        };
        match &reminder.rule {
            ReminderRule::SpecificDate { date } => {
                form.kind = ReminderKind::SpecificDate;
                form.date = date.format("%Y-%m-%d").to_string();
            }
            ReminderRule::EveryDay => form.kind = ReminderKind::EveryDay,
            ReminderRule::EveryWeek { weekday } => {
                form.kind = ReminderKind::EveryWeek;
                form.weekday = weekday.short_name().to_owned();
            }
            ReminderRule::EveryMonth { day } => {
                form.kind = ReminderKind::EveryMonth;
                form.day = day.to_string();
            }
            ReminderRule::EveryYear { month, day } => {
                form.kind = ReminderKind::EveryYear;
                form.month = month.to_string();
                form.day = day.to_string();
            }
            ReminderRule::DaysBeforeDue { days } => {
                form.kind = ReminderKind::DaysBefore;
                form.days_before = days.to_string();
            }
        }
        form
    }

    /// Convert the form to a reminder.
    ///
    /// # Errors
    /// Returns the first validation error found.
    pub fn to_reminder(&self) -> Result<Reminder, ValidationError> {
        let time = self.parse_time()?;
        let rule = match self.kind {
            ReminderKind::SpecificDate => ReminderRule::SpecificDate {
                date: NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
                    .map_err(|_| ValidationError::DateInvalid)?,
            },
            ReminderKind::EveryDay => ReminderRule::EveryDay,
            ReminderKind::EveryWeek => ReminderRule::EveryWeek {
                weekday: self
                    .weekday
                    .parse::<Weekday>()
                    .map_err(|_| ValidationError::WeekdayInvalid)?,
            },
            ReminderKind::EveryMonth => ReminderRule::EveryMonth {
                day: parse_day(&self.day)?,
            },
            ReminderKind::EveryYear => {
                let month = self
                    .month
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .filter(|m| (1..=12).contains(m))
                    .ok_or(ValidationError::MonthInvalid)?;
                let day = parse_day(&self.day)?;
                if !crate::calendar::is_valid_month_day(u32::from(month), u32::from(day)) {
                    return Err(ValidationError::MonthDayInvalid);
                }
                ReminderRule::EveryYear { month, day }
            }
            ReminderKind::DaysBefore => ReminderRule::DaysBeforeDue {
                days: self
                    .days_before
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| ValidationError::DaysBeforeInvalid)?,
            },
        };
        Ok(Reminder { rule, time })
    }

    /// Parse a compact `kind[:value][@HH:MM]` spec such as `daily@09:00`,
    /// `date:2025-07-04`, `week:mon@18:30`, `month:15`, `year:12-25` or
    /// `before:2@20:00`. Without `@HH:MM` the form uses `default_time`.
    ///
    /// Only the spec's shape is checked here; field values are checked by
    /// [`to_reminder`](Self::to_reminder).
    ///
    /// # Errors
    /// Returns an error for an unknown kind or a malformed time or month-day.
    pub fn parse_spec(spec: &str, default_time: ReminderTime) -> Result<Self, ValidationError> {
        let (rule, time) = match spec.trim().split_once('@') {
            Some((rule, time)) => (rule, Some(time)),
            None => (spec.trim(), None),
        };
        let (kind, value) = rule.split_once(':').unwrap_or((rule, ""));

        let mut form = Self {
            hour: default_time.hour.to_string(),
            min: default_time.min.to_string(),
            ..Self::default()
        };
        if let Some(time) = time {
            let (hour, min) = time
                .split_once(':')
                .ok_or(ValidationError::TimeFormatInvalid)?;
            form.hour = hour.to_owned();
            form.min = min.to_owned();
        }

        match kind.trim().to_lowercase().as_str() {
            "daily" | "day" => form.kind = ReminderKind::EveryDay,
            "date" => {
                form.kind = ReminderKind::SpecificDate;
                form.date = value.to_owned();
            }
            "week" | "weekly" => {
                form.kind = ReminderKind::EveryWeek;
                form.weekday = value.to_owned();
            }
            "month" | "monthly" => {
                form.kind = ReminderKind::EveryMonth;
                form.day = value.to_owned();
            }
            "year" | "yearly" => {
                form.kind = ReminderKind::EveryYear;
                let (month, day) = value
                    .split_once('-')
                    .ok_or(ValidationError::MonthDayFormatInvalid)?;
                form.month = month.to_owned();
                form.day = day.to_owned();
            }
            "before" => {
                form.kind = ReminderKind::DaysBefore;
                form.days_before = value.to_owned();
            }
            other => return Err(ValidationError::KindUnknown(other.to_owned())),
        }
        Ok(form)
    }

    /// Validate the form.
    ///
    /// # Errors
    /// Returns the first validation error found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.to_reminder().map(|_| ())
    }

    fn parse_time(&self) -> Result<ReminderTime, ValidationError> {
        let hour = self
            .hour
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|h| *h <= 23)
            .ok_or(ValidationError::HourInvalid)?;
        let min = self
            .min
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|m| *m <= 59)
            .ok_or(ValidationError::MinuteInvalid)?;
        Ok(ReminderTime { hour, min })
    }
}

fn parse_day(s: &str) -> Result<u8, ValidationError> {
    s.trim()
        .parse::<u8>()
        .ok()
        .filter(|d| (1..=31).contains(d))
        .ok_or(ValidationError::DayInvalid)
}

/// Convert a list of forms, failing on the first invalid entry.
///
/// # Errors
/// Returns the index and error of the first invalid form.
pub fn reminders_from_forms(forms: &[ReminderForm]) -> Result<Vec<Reminder>, IndexedValidationError> {
    forms
        .iter()
        .enumerate()
        .map(|(index, form)| {
            form.to_reminder()
                .map_err(|error| IndexedValidationError { index, error })
        })
        .collect()
}

/// Convert reminders to forms for editing.
#[must_use]
pub fn forms_from_reminders(reminders: &[Reminder]) -> Vec<ReminderForm> {
    reminders.iter().map(ReminderForm::from_reminder).collect()
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format a rule for human-readable display.
#[must_use]
pub fn format_rule(rule: &ReminderRule) -> String {
    match rule {
        ReminderRule::SpecificDate { date } => format!("On {}", date.format("%Y-%m-%d")),
        ReminderRule::EveryDay => "Every day".to_owned(),
        ReminderRule::EveryWeek { weekday } => format!("Every {weekday}"),
        ReminderRule::EveryMonth { day } => format!("Monthly on day {day}"),
        ReminderRule::EveryYear { month, day } => {
            let name = usize::from(*month)
                .checked_sub(1)
                .and_then(|i| MONTH_NAMES.get(i))
                .copied()
                .unwrap_or("?");
            format!("Every year on {name} {day}")
        }
        ReminderRule::DaysBeforeDue { days: 0 } => "On the due date".to_owned(),
        ReminderRule::DaysBeforeDue { days } => format!("{days} day(s) before due"),
    }
}

/// Format a reminder (rule and time) for human-readable display.
#[must_use]
pub fn format_reminder(reminder: &Reminder) -> String {
    format!("{} at {}", format_rule(&reminder.rule), reminder.time)
}
