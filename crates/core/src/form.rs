//! Form-state transitions for the event editor.
//!
//! The canonical `HH:MM:SS` string is the only stored time; the 12-hour
//! picker triple is projected from it on demand and written back through
//! [`TimePickerValue::to_canonical`]. There is no stored duplicate to keep
//! in sync, so the two directions cannot loop.

use chrono::{NaiveTime, Timelike};

use crate::coerce::ensure_time_with_seconds;
use crate::errors::{EventFormError, EventFormResult};
use crate::models::event::{
    EndCondition, EventFormState, Recurrence, RecurrenceEndMode, RecurrencePattern,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

/// The `(hour, minute, AM/PM)` triple shown by the picker controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePickerValue {
    /// Displayed hour, 1 through 12.
    pub hour12: u8,
    pub minute: u8,
    pub meridiem: Meridiem,
}

impl TimePickerValue {
    /// Canonical `HH:MM:00`. 12 AM maps to hour 00, 12 PM stays 12.
    pub fn to_canonical(&self) -> String {
        let mut hour = u32::from(self.hour12 % 12);
        if self.meridiem == Meridiem::Pm {
            hour += 12;
        }
        format!("{:02}:{:02}:00", hour, self.minute)
    }

    /// Decomposes a canonical time back into the picker triple. `00:xx`
    /// reads as 12 AM and `12:xx` as 12 PM.
    pub fn from_canonical(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let time = NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .ok()?;
        let hour12 = match time.hour() % 12 {
            0 => 12,
            hour => hour as u8,
        };
        let meridiem = if time.hour() >= 12 {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        Some(Self {
            hour12,
            minute: time.minute() as u8,
            meridiem,
        })
    }
}

impl EventFormState {
    /// Switches the recurrence pattern. The end condition carries across
    /// recurring patterns; the weekday list only survives within weekly;
    /// switching to `none` discards everything.
    pub fn set_recurrence_pattern(&mut self, pattern: RecurrencePattern) {
        self.recurrence = Recurrence::from_pattern(
            pattern,
            self.recurrence.days().to_vec(),
            self.recurrence.end_condition(),
        );
    }

    /// Adds or removes a weekday on a weekly rule. Ignored for every other
    /// pattern and for indices outside 0..=6.
    pub fn toggle_recurrence_day(&mut self, day: u8) {
        if day > 6 {
            return;
        }
        if let Recurrence::Weekly { days, .. } = &mut self.recurrence {
            match days.iter().position(|d| *d == day) {
                Some(index) => {
                    days.remove(index);
                }
                None => {
                    days.push(day);
                    days.sort_unstable();
                }
            }
        }
    }

    /// Selects which end field is authoritative, discarding the other
    /// mode's value. `None` clears the end condition entirely. No-op while
    /// the pattern is `none`.
    pub fn set_recurrence_end_mode(&mut self, mode: Option<RecurrenceEndMode>) {
        let current = self.recurrence.end_condition();
        let end = match mode {
            None => EndCondition::Never,
            Some(RecurrenceEndMode::Date) => match current {
                EndCondition::OnDate(date) => EndCondition::OnDate(date),
                _ => EndCondition::OnDate(String::new()),
            },
            Some(RecurrenceEndMode::Occurrences) => match current {
                EndCondition::AfterCount(count) => EndCondition::AfterCount(count),
                _ => EndCondition::AfterCount(0),
            },
        };
        self.set_end_condition(end);
    }

    /// Writes the end date, switching the end mode to `date` if it was not
    /// already. No-op while the pattern is `none`.
    pub fn set_recurrence_end_date(&mut self, date: &str) {
        self.set_end_condition(EndCondition::OnDate(date.trim().to_string()));
    }

    /// Writes the occurrence count, switching the end mode to
    /// `occurrences`. Zero clears the end condition.
    pub fn set_recurrence_end_occurrences(&mut self, count: u32) {
        let end = if count == 0 {
            EndCondition::Never
        } else {
            EndCondition::AfterCount(count)
        };
        self.set_end_condition(end);
    }

    pub fn set_start_time_picker(&mut self, picker: TimePickerValue) {
        self.start_time = picker.to_canonical();
    }

    pub fn set_end_time_picker(&mut self, picker: TimePickerValue) {
        self.end_time = picker.to_canonical();
    }

    /// Pure projection of the stored canonical start time for the picker
    /// controls; `None` while the time is unset.
    pub fn start_time_picker(&self) -> Option<TimePickerValue> {
        TimePickerValue::from_canonical(&self.start_time)
    }

    pub fn end_time_picker(&self) -> Option<TimePickerValue> {
        TimePickerValue::from_canonical(&self.end_time)
    }

    /// Client-side checks run before any network call; a failure blocks
    /// submission.
    pub fn validate_for_submit(&self) -> EventFormResult<()> {
        if self.bar_id.trim().is_empty() {
            return Err(EventFormError::MissingField("bar_id"));
        }
        if self.title.trim().is_empty() {
            return Err(EventFormError::MissingField("title"));
        }
        if self.event_tag_id.trim().is_empty() {
            return Err(EventFormError::MissingField("event_tag_id"));
        }
        if self.start_date.trim().is_empty() {
            return Err(EventFormError::MissingField("start_date"));
        }
        if ensure_time_with_seconds(&self.start_time).is_none() {
            return Err(EventFormError::MissingField("start_time"));
        }
        if let Recurrence::Weekly { days, .. } = &self.recurrence {
            if days.is_empty() {
                return Err(EventFormError::Validation(
                    "weekly events need at least one weekday".to_string(),
                ));
            }
        }
        match self.recurrence.end_condition() {
            EndCondition::OnDate(date) if date.trim().is_empty() => {
                Err(EventFormError::Validation(
                    "select an end date or a different end mode".to_string(),
                ))
            }
            EndCondition::AfterCount(0) => Err(EventFormError::Validation(
                "occurrence count must be positive".to_string(),
            )),
            _ => Ok(()),
        }
    }

    fn set_end_condition(&mut self, end: EndCondition) {
        // from_pattern drops the condition when the pattern is none
        self.recurrence = Recurrence::from_pattern(
            self.recurrence.pattern(),
            self.recurrence.days().to_vec(),
            end,
        );
    }
}
