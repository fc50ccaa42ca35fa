use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEvent {
    /// The single gameplay button: start, flap, or restart depending on the phase.
    Action,
    /// The bird hit a pipe or the floor.
    Crash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseEffect {
    None,
    /// A run begins from the menu; the spawn clock starts now.
    StartRun,
    Flap,
    ResetSession,
    RecordHighScore,
}

impl GamePhase {
    /// Pure transition function for the phase state machine.
    ///
    /// Side effects are reported via `PhaseEffect` so the session applies them in one place.
    pub fn handle(self, event: PhaseEvent) -> (GamePhase, PhaseEffect) {
        match (self, event) {
            (GamePhase::Menu, PhaseEvent::Action) => (GamePhase::Playing, PhaseEffect::StartRun),

            (GamePhase::Playing, PhaseEvent::Action) => (GamePhase::Playing, PhaseEffect::Flap),
            (GamePhase::Playing, PhaseEvent::Crash) => {
                (GamePhase::GameOver, PhaseEffect::RecordHighScore)
            }

            (GamePhase::GameOver, PhaseEvent::Action) => {
                (GamePhase::Playing, PhaseEffect::ResetSession)
            }

            // Ignore irrelevant events in the current phase.
            (phase, _) => (phase, PhaseEffect::None),
        }
    }

    pub fn is_playing(self) -> bool {
        matches!(self, GamePhase::Playing)
    }
}
