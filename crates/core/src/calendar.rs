//! Calendar display projection: date grouping and month-grid construction.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Sorts events with no start time after every timed event. Lexicographic
/// comparison is valid because canonical times are zero-padded.
const UNTIMED_SORT_KEY: &str = "99:99";

/// One row of the dashboard calendar, already normalized from whatever the
/// backend sent. Numeric upstream ids are stringified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Groups events by their `YYYY-MM-DD` date, each day sorted ascending by
/// start time with untimed events last. The sort is stable, so equal times
/// keep their arrival order.
pub fn group_events_by_date(events: Vec<CalendarEvent>) -> BTreeMap<String, Vec<CalendarEvent>> {
    let mut groups: BTreeMap<String, Vec<CalendarEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(event.date.clone()).or_default().push(event);
    }
    for day in groups.values_mut() {
        day.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
    }
    groups
}

fn sort_key(event: &CalendarEvent) -> &str {
    event.start_time.as_deref().unwrap_or(UNTIMED_SORT_KEY)
}

/// Cells of a month grid for a static 7-column layout: leading `None`s for
/// the weekday offset of day 1 (0 = Sunday), one `Some(day)` per day, then
/// trailing `None`s padding the last week. The result length is always a
/// multiple of 7. Invalid year/month yields an empty grid.
pub fn month_matrix(year: i32, month: u32) -> Vec<Option<u32>> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let leading = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first);

    let mut cells: Vec<Option<u32>> = Vec::with_capacity(42);
    cells.resize(leading, None);
    cells.extend((1..=days).map(Some));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }
    cells
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    match next_month {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        None => 0,
    }
}
