use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurrencePattern {
    /// Parses the wire value. Anything outside the closed enum is `None`,
    /// so callers keep their current pattern instead of guessing.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceEndMode {
    Date,
    Occurrences,
}

impl RecurrenceEndMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "date" => Some(Self::Date),
            "occurrences" => Some(Self::Occurrences),
            _ => None,
        }
    }
}

/// How a recurring series terminates. `OnDate("")` and `AfterCount(0)`
/// mean the mode is selected but its value has not been entered yet; the
/// accessors and the wire builders treat those as unset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EndCondition {
    #[default]
    Never,
    OnDate(String),
    AfterCount(u32),
}

/// Recurrence rule as a sum type: the weekday list only exists on `Weekly`
/// and no end condition exists on `None`, so the form never has to clear
/// stale fields reactively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    None,
    Daily(EndCondition),
    Weekly { days: Vec<u8>, end: EndCondition },
    Monthly(EndCondition),
    Yearly(EndCondition),
}

impl Recurrence {
    /// Builds a rule from the flat wire fields. An explicit end mode wins;
    /// otherwise the mode is inferred from whichever end value is present.
    pub fn from_parts(
        pattern: RecurrencePattern,
        days: Vec<u8>,
        mode: Option<RecurrenceEndMode>,
        end_date: Option<String>,
        end_occurrences: Option<u32>,
    ) -> Self {
        let end_date = end_date.filter(|d| !d.trim().is_empty());
        let end_occurrences = end_occurrences.filter(|n| *n > 0);

        let end = match mode {
            Some(RecurrenceEndMode::Date) => {
                end_date.map(EndCondition::OnDate).unwrap_or_default()
            }
            Some(RecurrenceEndMode::Occurrences) => end_occurrences
                .map(EndCondition::AfterCount)
                .unwrap_or_default(),
            None => match (end_date, end_occurrences) {
                (Some(date), _) => EndCondition::OnDate(date),
                (None, Some(count)) => EndCondition::AfterCount(count),
                (None, None) => EndCondition::Never,
            },
        };

        Self::from_pattern(pattern, days, end)
    }

    /// Builds a rule for the given pattern, discarding whatever the pattern
    /// cannot carry (days outside weekly, end conditions on `none`).
    pub fn from_pattern(pattern: RecurrencePattern, days: Vec<u8>, end: EndCondition) -> Self {
        match pattern {
            RecurrencePattern::None => Self::None,
            RecurrencePattern::Daily => Self::Daily(end),
            RecurrencePattern::Weekly => Self::Weekly {
                days: sanitize_days(days),
                end,
            },
            RecurrencePattern::Monthly => Self::Monthly(end),
            RecurrencePattern::Yearly => Self::Yearly(end),
        }
    }

    pub fn pattern(&self) -> RecurrencePattern {
        match self {
            Self::None => RecurrencePattern::None,
            Self::Daily(_) => RecurrencePattern::Daily,
            Self::Weekly { .. } => RecurrencePattern::Weekly,
            Self::Monthly(_) => RecurrencePattern::Monthly,
            Self::Yearly(_) => RecurrencePattern::Yearly,
        }
    }

    pub fn days(&self) -> &[u8] {
        match self {
            Self::Weekly { days, .. } => days,
            _ => &[],
        }
    }

    pub fn end_condition(&self) -> EndCondition {
        match self {
            Self::None => EndCondition::Never,
            Self::Daily(end) | Self::Monthly(end) | Self::Yearly(end) => end.clone(),
            Self::Weekly { end, .. } => end.clone(),
        }
    }

    pub fn end_mode(&self) -> Option<RecurrenceEndMode> {
        match self.end_condition() {
            EndCondition::Never => None,
            EndCondition::OnDate(_) => Some(RecurrenceEndMode::Date),
            EndCondition::AfterCount(_) => Some(RecurrenceEndMode::Occurrences),
        }
    }

    pub fn end_date(&self) -> Option<String> {
        match self.end_condition() {
            EndCondition::OnDate(date) if !date.trim().is_empty() => Some(date),
            _ => None,
        }
    }

    pub fn end_occurrences(&self) -> Option<u32> {
        match self.end_condition() {
            EndCondition::AfterCount(count) if count > 0 => Some(count),
            _ => None,
        }
    }
}

/// Weekday indices are 0 (Sunday) through 6 (Saturday); anything else is
/// dropped. The list is kept sorted and deduplicated.
pub(crate) fn sanitize_days(days: Vec<u8>) -> Vec<u8> {
    let mut days: Vec<u8> = days.into_iter().filter(|d| *d <= 6).collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Create/edit form for a recurring master event. Time fields hold the
/// canonical `HH:MM:SS` wire format, with the empty string meaning "unset";
/// the 12-hour picker view is derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFormState {
    pub bar_id: String,
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub start_time: String,
    pub end_time: String,
    pub image_url: Option<String>,
    pub external_link: Option<String>,
    pub event_tag_id: String,
    pub recurrence: Recurrence,
}

impl EventFormState {
    pub fn initial() -> Self {
        Self::initial_on(Local::now().date_naive())
    }

    pub fn initial_on(today: NaiveDate) -> Self {
        Self {
            bar_id: String::new(),
            title: String::new(),
            description: String::new(),
            start_date: today.format("%Y-%m-%d").to_string(),
            start_time: String::new(),
            end_time: String::new(),
            image_url: None,
            external_link: None,
            event_tag_id: String::new(),
            recurrence: Recurrence::None,
        }
    }

    pub fn recurrence_pattern(&self) -> RecurrencePattern {
        self.recurrence.pattern()
    }

    pub fn recurrence_days(&self) -> &[u8] {
        self.recurrence.days()
    }

    pub fn recurrence_end_mode(&self) -> Option<RecurrenceEndMode> {
        self.recurrence.end_mode()
    }

    pub fn recurrence_end_date(&self) -> Option<String> {
        self.recurrence.end_date()
    }

    pub fn recurrence_end_occurrences(&self) -> Option<u32> {
        self.recurrence.end_occurrences()
    }
}

/// Edit-mode view of a master event: the create form plus a flag that
/// cancels the whole series. On the wire the flag travels as
/// `cancel_all_instances`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterEventEditFormState {
    pub event: EventFormState,
    pub is_cancelled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMasterEventRequest {
    pub bar_id: String,
    pub title: String,
    pub description: String,
    pub recurrence_start_date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub image_url: Option<String>,
    pub event_tag_id: String,
    pub external_link: Option<String>,
    pub recurrence_pattern: RecurrencePattern,
    pub recurrence_days: Vec<u8>,
    pub recurrence_end_date: Option<String>,
    pub recurrence_end_occurrences: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMasterEventRequest {
    pub bar_id: String,
    pub title: String,
    pub description: String,
    pub recurrence_start_date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub image_url: Option<String>,
    pub event_tag_id: String,
    pub external_link: Option<String>,
    pub recurrence_pattern: RecurrencePattern,
    pub recurrence_days: Vec<u8>,
    pub recurrence_end_date: Option<String>,
    pub recurrence_end_occurrences: Option<u32>,
    pub cancel_all_instances: bool,
    pub regenerate_instances: bool,
}
