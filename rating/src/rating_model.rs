use anyhow::Result;
use common::MatchResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentRating {
    pub name: String,
    pub mean: f64,
    pub uncertainty: f64,
}

/// Skill estimates per agent name. Names are created at the model's default the first time they are seen.
pub trait RatingModel {
    fn register(&mut self, name: &str);

    fn record(&mut self, result: &MatchResult);

    fn save(&self) -> Result<()>;

    /// Every known agent, ordered by name.
    fn report(&self) -> Vec<AgentRating>;
}
