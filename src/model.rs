//! Task, list-type and reminder rule definitions.
//!
//! Defines the [`Task`] type along with [`ListType`] for recurrence and the
//! [`ReminderRule`] enum describing when a reminder fires.

use crate::calendar;
use crate::error::{Result, TicklerError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Recurrence of the list a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListType {
    /// Plain list: the task appears on its due date only.
    #[default]
    Standard,
    /// Appears every day.
    Daily,
    /// Appears once a week.
    Weekly,
    /// Appears on the due date's day of month.
    Monthly,
    /// Appears on the due date's anniversary.
    Yearly,
}

impl ListType {
    /// Whether tasks in this list repeat.
    #[must_use]
    pub fn is_recurring(self) -> bool {
        !matches!(self, Self::Standard)
    }
}

impl std::fmt::Display for ListType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Standard => "standard",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ListType {
    type Err = TicklerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "none" => Ok(Self::Standard),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(TicklerError::Validation(format!("unknown list type: {other}"))),
        }
    }
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Short lowercase name (`"mon"`).
    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }

    /// Capitalized full name (`"Monday"`).
    #[must_use]
    pub fn full_name(self) -> &'static str {
        match self {
            Self::Mon => "Monday",
            Self::Tue => "Tuesday",
            Self::Wed => "Wednesday",
            Self::Thu => "Thursday",
            Self::Fri => "Friday",
            Self::Sat => "Saturday",
            Self::Sun => "Sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(wd: chrono::Weekday) -> Self {
        match wd {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(wd: Weekday) -> Self {
        match wd {
            Weekday::Mon => Self::Mon,
            Weekday::Tue => Self::Tue,
            Weekday::Wed => Self::Wed,
            Weekday::Thu => Self::Thu,
            Weekday::Fri => Self::Fri,
            Weekday::Sat => Self::Sat,
            Weekday::Sun => Self::Sun,
        }
    }
}

impl std::str::FromStr for Weekday {
    type Err = TicklerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mon" | "monday" => Ok(Self::Mon),
            "tue" | "tuesday" => Ok(Self::Tue),
            "wed" | "wednesday" => Ok(Self::Wed),
            "thu" | "thursday" => Ok(Self::Thu),
            "fri" | "friday" => Ok(Self::Fri),
            "sat" | "saturday" => Ok(Self::Sat),
            "sun" | "sunday" => Ok(Self::Sun),
            other => Err(TicklerError::Validation(format!("unknown weekday: {other}"))),
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.full_name())
    }
}

/// Wall-clock time a reminder fires at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReminderTime {
    /// Hour of day (0-23).
    pub hour: u8,
    /// Minute of hour (0-59).
    pub min: u8,
}

impl ReminderTime {
    /// Checked constructor.
    ///
    /// # Errors
    /// Returns [`TicklerError::Validation`] when the hour or minute is out of range.
    pub fn new(hour: u8, min: u8) -> Result<Self> {
        let time = Self { hour, min };
        time.validate()?;
        Ok(time)
    }

    /// # Errors
    /// Returns [`TicklerError::Validation`] when the hour or minute is out of range.
    pub fn validate(&self) -> Result<()> {
        if self.hour > 23 {
            return Err(TicklerError::Validation(format!(
                "reminder hour {} out of range 0-23",
                self.hour
            )));
        }
        if self.min > 59 {
            return Err(TicklerError::Validation(format!(
                "reminder minute {} out of range 0-59",
                self.min
            )));
        }
        Ok(())
    }

    /// As a `chrono` time of day. Out-of-range values yield midnight.
    #[must_use]
    pub fn as_naive_time(&self) -> chrono::NaiveTime {
        chrono::NaiveTime::from_hms_opt(u32::from(self.hour), u32::from(self.min), 0)
            .unwrap_or(chrono::NaiveTime::MIN)
    }
}

impl std::fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.min)
    }
}

/// When a reminder fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReminderRule {
    /// Once, on a fixed date.
    SpecificDate {
        /// The date to fire on.
        date: NaiveDate,
    },
    /// Every day.
    EveryDay,
    /// Every week on the given weekday.
    EveryWeek {
        /// Day of the week.
        weekday: Weekday,
    },
    /// Every month on the given day (clamped to short months).
    EveryMonth {
        /// Day of month (1-31).
        day: u8,
    },
    /// Every year on the given month and day.
    EveryYear {
        /// Month (1-12).
        month: u8,
        /// Day of month (1-31).
        day: u8,
    },
    /// A number of days before each occurrence of the task.
    DaysBeforeDue {
        /// Days before the occurrence; 0 fires on the day itself.
        days: u16,
    },
}

impl ReminderRule {
    /// # Errors
    /// Returns [`TicklerError::Validation`] for an out-of-range day or month.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::SpecificDate { .. } | Self::EveryDay | Self::EveryWeek { .. } => Ok(()),
            Self::EveryMonth { day } => {
                if (1..=31).contains(day) {
                    Ok(())
                } else {
                    Err(TicklerError::Validation(format!(
                        "day of month {day} out of range 1-31"
                    )))
                }
            }
            Self::EveryYear { month, day } => {
                if calendar::is_valid_month_day(u32::from(*month), u32::from(*day)) {
                    Ok(())
                } else {
                    Err(TicklerError::Validation(format!(
                        "{month}/{day} is not a calendar day"
                    )))
                }
            }
            Self::DaysBeforeDue { .. } => Ok(()),
        }
    }
}

/// A reminder rule paired with its fire time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// When the reminder fires.
    pub rule: ReminderRule,
    /// Wall-clock time on the firing day.
    pub time: ReminderTime,
}

impl Reminder {
    /// Pair a rule with a time.
    #[must_use]
    pub fn new(rule: ReminderRule, time: ReminderTime) -> Self {
        Self { rule, time }
    }

    /// # Errors
    /// Returns [`TicklerError::Validation`] when the rule or time is out of range.
    pub fn validate(&self) -> Result<()> {
        self.rule.validate()?;
        self.time.validate()
    }
}

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier.
    pub id: String,
    /// User-visible title.
    pub title: String,
    /// Recurrence inherited from the owning list.
    #[serde(default)]
    pub list_type: ListType,
    /// Due date; anchors recurrence for recurring lists.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Explicit weekday for weekly lists.
    #[serde(default)]
    pub day_of_week: Option<Weekday>,
    /// Reminder rules.
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    /// Whether the task has been checked off.
    #[serde(default)]
    pub completed: bool,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation timestamp.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new open task with a fresh UUID.
    pub fn new(title: impl Into<String>, list_type: ListType) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            list_type,
            due_date: None,
            day_of_week: None,
            reminders: Vec::new(),
            completed: false,
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Set the due date.
    #[must_use]
    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    /// Set the explicit weekday.
    #[must_use]
    pub fn with_day_of_week(mut self, weekday: Weekday) -> Self {
        self.day_of_week = Some(weekday);
        self
    }

    /// Append a reminder.
    #[must_use]
    pub fn with_reminder(mut self, reminder: Reminder) -> Self {
        self.reminders.push(reminder);
        self
    }

    /// Weekday a weekly task lands on: the explicit weekday, else the due date's.
    #[must_use]
    pub fn effective_weekday(&self) -> Option<Weekday> {
        use chrono::Datelike;

        self.day_of_week
            .or_else(|| self.due_date.map(|d| Weekday::from(d.weekday())))
    }

    /// Check the task is internally consistent.
    ///
    /// # Errors
    /// Returns [`TicklerError::Validation`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(TicklerError::Validation("task title cannot be empty".to_owned()));
        }
        match self.list_type {
            ListType::Monthly | ListType::Yearly if self.due_date.is_none() => {
                return Err(TicklerError::Validation(format!(
                    "{} tasks need a due date",
                    self.list_type
                )));
            }
            ListType::Weekly if self.effective_weekday().is_none() => {
                return Err(TicklerError::Validation(
                    "weekly tasks need a day of week or a due date".to_owned(),
                ));
            }
            _ => {}
        }
        for reminder in &self.reminders {
            reminder.validate()?;
        }
        Ok(())
    }
}
