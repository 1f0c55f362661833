use std::thread;
use std::time::Duration;

use clap::Subcommand;
use serenspace_core::storage::{Config, Database};
use serenspace_core::{
    ActivityKind, BreathingProfile, BreathingSequencer, Clock, Event, SessionStatus, SystemClock,
};

const SESSION_KEY: &str = "breathing_session";

#[derive(Subcommand)]
pub enum BreatheAction {
    /// List available breathing exercises
    List,
    /// Create a session for an exercise
    Start {
        /// Profile id (e.g. "box", "478", "calm")
        #[arg(long)]
        profile: Option<String>,
        /// Number of cycles to complete
        #[arg(long)]
        cycles: Option<u32>,
    },
    /// Run a guided session in the foreground
    Run {
        /// Profile id
        #[arg(long)]
        profile: Option<String>,
        /// Number of cycles to complete
        #[arg(long)]
        cycles: Option<u32>,
    },
    /// Advance the stored session by one second
    Tick,
    /// Pause the stored session
    Pause,
    /// Resume a paused session
    Resume,
    /// Reset the session to the start of its exercise
    Reset,
    /// Print current session state as JSON
    Status,
    /// Switch the session to a different exercise
    Switch {
        /// Profile id
        #[arg(long)]
        profile: String,
    },
    /// Change the target cycle count for the stored session
    Cycles {
        /// New target
        count: u32,
    },
}

fn find_profile(config: &Config, id: &str) -> Result<BreathingProfile, Box<dyn std::error::Error>> {
    if let Some(profile) = config.custom_profiles.iter().find(|p| p.id == id) {
        return Ok(profile.clone());
    }
    BreathingProfile::by_id(id).ok_or_else(|| format!("unknown profile: {id}").into())
}

fn load_session(db: &Database) -> Result<Option<BreathingSequencer>, Box<dyn std::error::Error>> {
    match db.kv_get(SESSION_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

fn require_session(db: &Database) -> Result<BreathingSequencer, Box<dyn std::error::Error>> {
    load_session(db)?.ok_or_else(|| "no active session; run `breathe start` first".into())
}

fn save_session(
    db: &Database,
    session: &BreathingSequencer,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string(session)?;
    db.kv_set(SESSION_KEY, &json)?;
    Ok(())
}

fn print_event(event: &Event) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}

/// A finished exercise counts as today's self-care activity.
fn record_completion(
    db: &Database,
    clock: &dyn Clock,
) -> Result<Event, Box<dyn std::error::Error>> {
    let today = clock.today();
    db.log_activity(ActivityKind::SelfCare, today)?;
    let record = db.streak(ActivityKind::SelfCare)?;
    let updated = serenspace_core::record_activity(&record, today)?;
    db.set_streak(ActivityKind::SelfCare, &updated)?;
    Ok(Event::StreakUpdated {
        kind: ActivityKind::SelfCare,
        streak: updated,
        at: clock.now(),
    })
}

pub fn run(action: BreatheAction) -> Result<(), Box<dyn std::error::Error>> {
    let clock = SystemClock;
    match action {
        BreatheAction::List => {
            let config = Config::load();
            for profile in BreathingProfile::builtin()
                .iter()
                .chain(config.custom_profiles.iter())
            {
                let p = &profile.phases;
                println!(
                    "{:<6} {:<18} {}-{}-{}-{} ({}s cycle)  {}",
                    profile.id,
                    profile.name,
                    p.inhale,
                    p.hold,
                    p.exhale,
                    p.hold2,
                    p.cycle_secs(),
                    profile.description,
                );
            }
        }
        BreatheAction::Start { profile, cycles } => {
            let config = Config::load();
            let db = Database::open()?;
            let id = profile.unwrap_or_else(|| config.session.default_profile.clone());
            let cycles = cycles.unwrap_or(config.session.target_cycles);
            let profile = find_profile(&config, &id)?;
            let mut session = BreathingSequencer::new(profile, cycles)?;
            let event = session.start(clock.now())?;
            save_session(&db, &session)?;
            if let Some(event) = event {
                print_event(&event)?;
            }
        }
        BreatheAction::Run { profile, cycles } => {
            let config = Config::load();
            let db = Database::open()?;
            let id = profile.unwrap_or_else(|| config.session.default_profile.clone());
            let cycles = cycles.unwrap_or(config.session.target_cycles);
            let profile = find_profile(&config, &id)?;
            let mut session = BreathingSequencer::new(profile, cycles)?;
            session.start(clock.now())?;

            println!(
                "{}  {}s",
                session.phase().label(),
                session.remaining_secs()
            );
            // Single in-process cadence: sleep a full second, then inject
            // one tick. Resuming therefore never double-decrements.
            while session.status() == SessionStatus::Running {
                thread::sleep(Duration::from_secs(1));
                match session.tick(clock.now()) {
                    Some(Event::PhaseAdvanced {
                        phase,
                        duration_secs,
                        ..
                    }) => {
                        println!("{}  {duration_secs}s", phase.label());
                    }
                    Some(Event::CycleCompleted {
                        completed_cycles,
                        target_cycles,
                        ..
                    }) => {
                        println!("Cycle {completed_cycles} of {target_cycles} complete");
                        println!(
                            "{}  {}s",
                            session.phase().label(),
                            session.remaining_secs()
                        );
                    }
                    Some(Event::SessionCompleted { cycles, .. }) => {
                        if config.notifications.enabled {
                            println!(
                                "Exercise completed! You've finished {cycles} cycles of breathing."
                            );
                        }
                    }
                    _ => {}
                }
            }
            save_session(&db, &session)?;
            if session.status() == SessionStatus::Completed {
                let event = record_completion(&db, &clock)?;
                print_event(&event)?;
            }
        }
        BreatheAction::Tick => {
            let db = Database::open()?;
            let mut session = require_session(&db)?;
            let event = session.tick(clock.now());
            save_session(&db, &session)?;
            match event {
                Some(event) => {
                    print_event(&event)?;
                    if matches!(event, Event::SessionCompleted { .. }) {
                        let streak_event = record_completion(&db, &clock)?;
                        print_event(&streak_event)?;
                    }
                }
                None => print_event(&session.snapshot(clock.now()))?,
            }
        }
        BreatheAction::Pause => {
            let db = Database::open()?;
            let mut session = require_session(&db)?;
            let event = session.pause(clock.now());
            save_session(&db, &session)?;
            match event {
                Some(event) => print_event(&event)?,
                None => print_event(&session.snapshot(clock.now()))?,
            }
        }
        BreatheAction::Resume => {
            let db = Database::open()?;
            let mut session = require_session(&db)?;
            let event = session.start(clock.now())?;
            save_session(&db, &session)?;
            match event {
                Some(event) => print_event(&event)?,
                None => print_event(&session.snapshot(clock.now()))?,
            }
        }
        BreatheAction::Reset => {
            let db = Database::open()?;
            let mut session = require_session(&db)?;
            let event = session.reset(clock.now());
            save_session(&db, &session)?;
            print_event(&event)?;
        }
        BreatheAction::Status => {
            let db = Database::open()?;
            let session = require_session(&db)?;
            print_event(&session.snapshot(clock.now()))?;
        }
        BreatheAction::Switch { profile } => {
            let config = Config::load();
            let db = Database::open()?;
            let mut session = require_session(&db)?;
            let new_profile = find_profile(&config, &profile)?;
            let event = session.switch_profile(new_profile, clock.now())?;
            save_session(&db, &session)?;
            print_event(&event)?;
        }
        BreatheAction::Cycles { count } => {
            let db = Database::open()?;
            let mut session = require_session(&db)?;
            session.set_target_cycles(count);
            save_session(&db, &session)?;
            print_event(&session.snapshot(clock.now()))?;
        }
    }

    Ok(())
}
