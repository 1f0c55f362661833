mod calculator;
mod record;

pub use calculator::{consecutive_day_count, record_activity};
pub use record::{ActivityKind, StreakRecord, UserStreaks};
