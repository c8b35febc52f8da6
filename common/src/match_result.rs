use serde::{Deserialize, Serialize};

/// Aggregated outcome of one fixture, counted from the point of view of `agent_a`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    agent_a: String,
    agent_b: String,
    wins: usize,
    losses: usize,
    draws: usize,
}

impl MatchResult {
    pub fn new(agent_a: String, agent_b: String, wins: usize, losses: usize, draws: usize) -> Self {
        Self {
            agent_a,
            agent_b,
            wins,
            losses,
            draws,
        }
    }

    pub fn agent_a(&self) -> &str {
        &self.agent_a
    }

    pub fn agent_b(&self) -> &str {
        &self.agent_b
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    pub fn losses(&self) -> usize {
        self.losses
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn games_played(&self) -> usize {
        self.wins + self.losses + self.draws
    }
}
