mod profile;
mod sequencer;

pub use profile::{BreathingProfile, Phase, PhaseDurations};
pub use sequencer::{BreathingSequencer, SessionStatus};
