//! The point-history projection.
//!
//! Merges a student's approved activities and attendance check-ins into one
//! chronologically ordered feed. This is a pure read projection: callers
//! fetch the rows, map them through [`activity_entry`] / [`attendance_entry`],
//! and sort with [`merge`]. Unapproved activities must never be fed in.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::activity::ActivityKind;
use crate::types::{DbId, Timestamp};

/// Display label for attendance entries in the feed.
pub const ATTENDANCE_DISPLAY_NAME: &str = "Attendance Check";

/// Which store a history entry was projected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistorySource {
    Activity,
    Attendance,
}

/// One entry of the unified feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: DbId,
    pub source: HistorySource,
    pub name: String,
    pub content: String,
    pub date: NaiveDate,
    /// Unix timestamp used as the sort key.
    pub timestamp: i64,
}

/// Project an approved activity record into the feed shape.
pub fn activity_entry(
    id: DbId,
    kind: ActivityKind,
    content: &str,
    created_at: Timestamp,
) -> HistoryEntry {
    HistoryEntry {
        id,
        source: HistorySource::Activity,
        name: kind.display_name().to_string(),
        content: content.to_string(),
        date: created_at.date_naive(),
        timestamp: created_at.timestamp(),
    }
}

/// Project an attendance record into the feed shape.
///
/// Attendance carries only a date; its timestamp is midnight UTC of that
/// date so it sorts stably against activity timestamps.
pub fn attendance_entry(id: DbId, date: NaiveDate) -> HistoryEntry {
    let midnight = date.and_time(NaiveTime::MIN).and_utc();
    HistoryEntry {
        id,
        source: HistorySource::Attendance,
        name: ATTENDANCE_DISPLAY_NAME.to_string(),
        content: ATTENDANCE_DISPLAY_NAME.to_string(),
        date,
        timestamp: midnight.timestamp(),
    }
}

/// Sort a combined feed ascending by timestamp (id as a stable tiebreak).
pub fn merge(mut entries: Vec<HistoryEntry>) -> Vec<HistoryEntry> {
    entries.sort_by_key(|e| (e.timestamp, e.id));
    entries
}
