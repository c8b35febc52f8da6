use anyhow::Result;
use common::MatchResult;
use log::info;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{AgentRating, RatingModel, RatingPersistance};

pub const DEFAULT_ELO_RATING: f64 = 1500.0;
pub const ELO_K_FACTOR: f64 = 16.0;

/// Logistic rating, one scalar per agent.
pub struct EloRating {
    ratings: BTreeMap<String, f64>,
    persistance: RatingPersistance,
}

impl EloRating {
    pub fn new(path: PathBuf) -> Self {
        Self {
            ratings: BTreeMap::new(),
            persistance: RatingPersistance::new(path),
        }
    }

    /// Restores the snapshot at `path` if there is one, then adds any of `members` it does not know yet.
    pub fn load(path: PathBuf, members: &[String]) -> Result<Self> {
        let persistance = RatingPersistance::new(path);
        let ratings = match persistance.load::<f64>()? {
            Some(ratings) => {
                info!(
                    "Loaded {} Elo ratings from {:?}",
                    ratings.len(),
                    persistance.path()
                );
                ratings
            }
            None => BTreeMap::new(),
        };

        let mut elo = Self {
            ratings,
            persistance,
        };

        for member in members {
            elo.register(member);
        }

        Ok(elo)
    }

    pub fn rating(&mut self, name: &str) -> f64 {
        *self
            .ratings
            .entry(name.to_string())
            .or_insert(DEFAULT_ELO_RATING)
    }

    pub fn ratings(&self) -> &BTreeMap<String, f64> {
        &self.ratings
    }

    /// Probability-like share of points `a` is expected to take from a game against `b`.
    pub fn expected_score(&mut self, a: &str, b: &str) -> f64 {
        let rating_a = self.rating(a);
        let rating_b = self.rating(b);

        expected_score(rating_a, rating_b)
    }

    /// `a_wins` counts a draw as half a win.
    pub fn update(&mut self, a: &str, b: &str, games_played: usize, a_wins: f64) {
        let rating_a = self.rating(a);
        let rating_b = self.rating(b);
        let games_played = games_played as f64;

        let expected_a = expected_score(rating_a, rating_b) * games_played;
        let expected_b = expected_score(rating_b, rating_a) * games_played;
        let b_wins = games_played - a_wins;

        self.ratings
            .insert(a.to_string(), rating_a + ELO_K_FACTOR * (a_wins - expected_a));
        self.ratings
            .insert(b.to_string(), rating_b + ELO_K_FACTOR * (b_wins - expected_b));
    }

    pub fn reset(&mut self) {
        for rating in self.ratings.values_mut() {
            *rating = DEFAULT_ELO_RATING;
        }
    }
}

fn expected_score(rating_a: f64, rating_b: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((rating_b - rating_a) / 400.0))
}

impl RatingModel for EloRating {
    fn register(&mut self, name: &str) {
        self.rating(name);
    }

    fn record(&mut self, result: &MatchResult) {
        let a_wins = result.wins() as f64 + result.draws() as f64 * 0.5;

        self.update(
            result.agent_a(),
            result.agent_b(),
            result.games_played(),
            a_wins,
        );
    }

    fn save(&self) -> Result<()> {
        self.persistance.save(&self.ratings)
    }

    fn report(&self) -> Vec<AgentRating> {
        self.ratings
            .iter()
            .map(|(name, rating)| AgentRating {
                name: name.clone(),
                mean: *rating,
                uncertainty: 0.0,
            })
            .collect()
    }
}
