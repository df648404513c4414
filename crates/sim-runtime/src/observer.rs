//! Hooks for consumers that repaint or react to simulation output.

use sim_core::{Achievement, GameOverSummary, Milestone, PlayerState};

/// Something worth surfacing to the player once.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    Milestone(Milestone),
    Achievement(Achievement),
    Event(String),
    BoardReady(String),
    WentPublic(String),
    GameOver(GameOverSummary),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::Milestone(m) => m.message().to_string(),
            Notice::Achievement(a) => format!("Achievement unlocked: {}", a.title()),
            Notice::Event(title) => title.clone(),
            Notice::BoardReady(name) => format!("{name}: Advanced to Board level."),
            Notice::WentPublic(name) => format!("{name} is now public!"),
            Notice::GameOver(s) => format!(
                "Bankrupt after {} days (peak net worth {:.0})",
                s.days_survived, s.high_net
            ),
        }
    }
}

/// Receives a repaint after every ledger entry and each notice as it happens.
pub trait Observer: Send {
    fn state_changed(&mut self, _state: &PlayerState) {}
    fn notice(&mut self, _notice: &Notice) {}
}
