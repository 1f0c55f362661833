use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::calculator::record_activity;
use crate::error::StreakError;

/// Activity categories that maintain independent streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Journal,
    SelfCare,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Journal => "journal",
            ActivityKind::SelfCare => "self_care",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A running streak: consecutive calendar days with a qualifying activity.
///
/// Owned by the persistence collaborator; the calculator only computes the
/// next value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRecord {
    pub count: u32,
    /// Calendar date of the most recent activity, time-of-day stripped.
    pub last_activity: Option<NaiveDate>,
}

/// Per-user streak state, one record per activity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStreaks {
    #[serde(default)]
    pub journal: StreakRecord,
    #[serde(default)]
    pub self_care: StreakRecord,
}

impl UserStreaks {
    pub fn get(&self, kind: ActivityKind) -> StreakRecord {
        match kind {
            ActivityKind::Journal => self.journal,
            ActivityKind::SelfCare => self.self_care,
        }
    }

    /// Apply today's activity to the matching streak and return the
    /// updated record.
    ///
    /// # Errors
    /// Returns `InvalidTemporalOrder` when `today` precedes the recorded
    /// date.
    pub fn record(
        &mut self,
        kind: ActivityKind,
        today: NaiveDate,
    ) -> Result<StreakRecord, StreakError> {
        let slot = match kind {
            ActivityKind::Journal => &mut self.journal,
            ActivityKind::SelfCare => &mut self.self_care,
        };
        *slot = record_activity(slot, today)?;
        Ok(*slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn kinds_are_independent() {
        let mut streaks = UserStreaks::default();
        streaks.record(ActivityKind::Journal, d(1)).unwrap();
        streaks.record(ActivityKind::Journal, d(2)).unwrap();
        streaks.record(ActivityKind::SelfCare, d(2)).unwrap();

        assert_eq!(streaks.journal.count, 2);
        assert_eq!(streaks.self_care.count, 1);
        assert_eq!(streaks.get(ActivityKind::Journal).last_activity, Some(d(2)));
    }

    #[test]
    fn kind_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&ActivityKind::SelfCare).unwrap(),
            "\"self_care\""
        );
        assert_eq!(ActivityKind::SelfCare.as_str(), "self_care");
    }
}
