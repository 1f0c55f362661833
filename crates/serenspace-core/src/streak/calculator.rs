//! Streak calculation over calendar dates.
//!
//! Both operations are pure and perform no I/O. The caller supplies
//! `today` from a single consistent clock source per call and persists the
//! returned record itself.
//!
//! `record_activity` is the canonical incremental algorithm;
//! `consecutive_day_count` derives a streak from a historical activity log
//! and serves as a cached/derived view only.

use chrono::NaiveDate;

use super::record::StreakRecord;
use crate::error::StreakError;

/// Compute the updated streak for an activity recorded on `today`.
///
/// Rules, by whole-day gap between `today` and the recorded date:
/// gap 0 returns the input unchanged (no double-counting same-day
/// activity), gap 1 increments the count, and a larger gap resets the
/// count to 1. A first-ever activity starts the streak at 1.
///
/// # Errors
/// Returns `InvalidTemporalOrder` when `today` precedes the recorded
/// date. The caller must not silently accept this.
pub fn record_activity(
    record: &StreakRecord,
    today: NaiveDate,
) -> Result<StreakRecord, StreakError> {
    let Some(last) = record.last_activity else {
        return Ok(StreakRecord {
            count: 1,
            last_activity: Some(today),
        });
    };

    let gap_days = (today - last).num_days();
    match gap_days {
        0 => Ok(*record),
        1 => Ok(StreakRecord {
            count: record.count + 1,
            last_activity: Some(today),
        }),
        gap if gap > 1 => Ok(StreakRecord {
            count: 1,
            last_activity: Some(today),
        }),
        _ => Err(StreakError::InvalidTemporalOrder { last, today }),
    }
}

/// Derive a streak from an activity log rather than incremental updates.
///
/// Entries are deduplicated per calendar day and walked backward from
/// `today` one day at a time; the first missing day ends the count.
/// Returns 0 for an empty log, and 0 when there is no entry for `today`.
pub fn consecutive_day_count(entries: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut days = entries.to_vec();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let mut expected = today;
    let mut count = 0;
    for day in days {
        if day != expected {
            break;
        }
        count += 1;
        expected = match expected.pred_opt() {
            Some(prev) => prev,
            None => break,
        };
    }
    count
}
