//! The closed vocabulary of devotional activity kinds.

use serde::{Deserialize, Serialize};

/// Kind of a submitted activity record.
///
/// Stored as text in the `activities` table (CHECK-constrained to this set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Prayer,
    ScriptureReading,
    Transcription,
    QuietTime,
    Other,
}

impl ActivityKind {
    /// The database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Prayer => "prayer",
            ActivityKind::ScriptureReading => "scripture_reading",
            ActivityKind::Transcription => "transcription",
            ActivityKind::QuietTime => "quiet_time",
            ActivityKind::Other => "other",
        }
    }

    /// Parse the database / wire representation.
    pub fn parse(s: &str) -> Option<ActivityKind> {
        match s {
            "prayer" => Some(ActivityKind::Prayer),
            "scripture_reading" => Some(ActivityKind::ScriptureReading),
            "transcription" => Some(ActivityKind::Transcription),
            "quiet_time" => Some(ActivityKind::QuietTime),
            "other" => Some(ActivityKind::Other),
            _ => None,
        }
    }

    /// Human-readable label used in the history feed.
    pub fn display_name(self) -> &'static str {
        match self {
            ActivityKind::Prayer => "Prayer",
            ActivityKind::ScriptureReading => "Scripture Reading",
            ActivityKind::Transcription => "Bible Transcription",
            ActivityKind::QuietTime => "Quiet Time",
            ActivityKind::Other => "Other",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default point value for a newly submitted activity.
pub const DEFAULT_ACTIVITY_POINTS: i32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for kind in [
            ActivityKind::Prayer,
            ActivityKind::ScriptureReading,
            ActivityKind::Transcription,
            ActivityKind::QuietTime,
            ActivityKind::Other,
        ] {
            assert_eq!(ActivityKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert_eq!(ActivityKind::parse("fasting"), None);
        assert_eq!(ActivityKind::parse("Prayer"), None);
    }
}
