use clap::{Subcommand, ValueEnum};
use serde_json::json;
use serenspace_core::storage::Database;
use serenspace_core::{consecutive_day_count, ActivityKind, Clock, Event, SystemClock};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Journal,
    #[value(alias = "selfcare")]
    SelfCare,
}

impl From<KindArg> for ActivityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Journal => ActivityKind::Journal,
            KindArg::SelfCare => ActivityKind::SelfCare,
        }
    }
}

#[derive(Subcommand)]
pub enum StreakAction {
    /// Record today's activity and update the streak
    Record {
        /// Activity kind
        #[arg(long, value_enum)]
        kind: KindArg,
    },
    /// Print both streaks as JSON
    Show,
    /// Recompute a streak from the activity log (derived view)
    Replay {
        /// Activity kind
        #[arg(long, value_enum)]
        kind: KindArg,
    },
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let clock = SystemClock;
    let db = Database::open()?;

    match action {
        StreakAction::Record { kind } => {
            let kind = ActivityKind::from(kind);
            let today = clock.today();
            db.log_activity(kind, today)?;
            let record = db.streak(kind)?;
            let updated = serenspace_core::record_activity(&record, today)?;
            db.set_streak(kind, &updated)?;
            let event = Event::StreakUpdated {
                kind,
                streak: updated,
                at: clock.now(),
            };
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        StreakAction::Show => {
            let streaks = db.user_streaks()?;
            println!("{}", serde_json::to_string_pretty(&streaks)?);
        }
        StreakAction::Replay { kind } => {
            let kind = ActivityKind::from(kind);
            let dates = db.activity_dates(kind)?;
            let derived = consecutive_day_count(&dates, clock.today());
            let out = json!({
                "kind": kind,
                "derived_streak": derived,
                "logged_days": dates.len(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}
