use anyhow::Result;
use common::{norm_cdf, norm_pdf, norm_ppf, MatchResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::{AgentRating, RatingModel, RatingPersistance};

pub const DEFAULT_MU: f64 = 25.0;
pub const DEFAULT_SIGMA: f64 = DEFAULT_MU / 3.0;
pub const DEFAULT_DRAW_PROBABILITY: f64 = 0.10;

/// Belief about an agent's skill.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub mu: f64,
    pub sigma: f64,
}

impl Default for Gaussian {
    fn default() -> Self {
        Self {
            mu: DEFAULT_MU,
            sigma: DEFAULT_SIGMA,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrueSkillEnv {
    pub beta: f64,
    pub tau: f64,
    pub draw_probability: f64,
}

impl Default for TrueSkillEnv {
    fn default() -> Self {
        Self {
            beta: DEFAULT_SIGMA / 2.0,
            tau: DEFAULT_SIGMA / 100.0,
            draw_probability: DEFAULT_DRAW_PROBABILITY,
        }
    }
}

impl TrueSkillEnv {
    /// Performance difference below which a two player game is expected to be drawn.
    pub fn draw_margin(&self) -> f64 {
        norm_ppf((self.draw_probability + 1.0) / 2.0) * 2f64.sqrt() * self.beta
    }

    /// Posterior beliefs after `winner` beat `loser`, or after a draw between them when `drawn`.
    pub fn rate_1vs1(&self, winner: Gaussian, loser: Gaussian, drawn: bool) -> (Gaussian, Gaussian) {
        let winner_var = winner.sigma.powi(2) + self.tau.powi(2);
        let loser_var = loser.sigma.powi(2) + self.tau.powi(2);

        let c_squared = 2.0 * self.beta.powi(2) + winner_var + loser_var;
        let c = c_squared.sqrt();

        let diff = (winner.mu - loser.mu) / c;
        let margin = self.draw_margin() / c;

        let (v, w) = if drawn {
            (v_draw(diff, margin), w_draw(diff, margin))
        } else {
            (v_win(diff, margin), w_win(diff, margin))
        };

        let winner = Gaussian {
            mu: winner.mu + winner_var / c * v,
            sigma: (winner_var * (1.0 - winner_var / c_squared * w)).sqrt(),
        };

        let loser = Gaussian {
            mu: loser.mu - loser_var / c * v,
            sigma: (loser_var * (1.0 - loser_var / c_squared * w)).sqrt(),
        };

        (winner, loser)
    }
}

fn v_win(diff: f64, margin: f64) -> f64 {
    let x = diff - margin;
    let denom = norm_cdf(x);

    if denom == 0.0 {
        -x
    } else {
        norm_pdf(x) / denom
    }
}

fn w_win(diff: f64, margin: f64) -> f64 {
    let x = diff - margin;

    if norm_cdf(x) == 0.0 {
        return if x < 0.0 { 1.0 } else { 0.0 };
    }

    let v = v_win(diff, margin);
    v * (v + x)
}

fn v_draw(diff: f64, margin: f64) -> f64 {
    let abs_diff = diff.abs();
    let a = margin - abs_diff;
    let b = -margin - abs_diff;
    let denom = norm_cdf(a) - norm_cdf(b);

    let v = if denom == 0.0 {
        a
    } else {
        (norm_pdf(b) - norm_pdf(a)) / denom
    };

    if diff < 0.0 {
        -v
    } else {
        v
    }
}

fn w_draw(diff: f64, margin: f64) -> f64 {
    let abs_diff = diff.abs();
    let a = margin - abs_diff;
    let b = -margin - abs_diff;
    let denom = norm_cdf(a) - norm_cdf(b);

    if denom == 0.0 {
        return 1.0;
    }

    let v = v_draw(abs_diff, margin);
    v.powi(2) + (a * norm_pdf(a) - b * norm_pdf(b)) / denom
}

/// Gaussian-belief rating updated once per game rather than once per match.
pub struct TrueSkill {
    ratings: BTreeMap<String, Gaussian>,
    env: TrueSkillEnv,
    persistance: RatingPersistance,
}

impl TrueSkill {
    pub fn new(path: PathBuf) -> Self {
        Self {
            ratings: BTreeMap::new(),
            env: TrueSkillEnv::default(),
            persistance: RatingPersistance::new(path),
        }
    }

    pub fn load(path: PathBuf, members: &[String]) -> Result<Self> {
        let persistance = RatingPersistance::new(path);
        let ratings = match persistance.load::<Gaussian>()? {
            Some(ratings) => {
                info!(
                    "Loaded {} TrueSkill ratings from {:?}",
                    ratings.len(),
                    persistance.path()
                );
                ratings
            }
            None => BTreeMap::new(),
        };

        let mut trueskill = Self {
            ratings,
            env: TrueSkillEnv::default(),
            persistance,
        };

        for member in members {
            trueskill.register(member);
        }

        Ok(trueskill)
    }

    pub fn rating(&mut self, name: &str) -> Gaussian {
        *self.ratings.entry(name.to_string()).or_default()
    }

    pub fn ratings(&self) -> &BTreeMap<String, Gaussian> {
        &self.ratings
    }

    fn rate(&mut self, winner: &str, loser: &str, drawn: bool) {
        let winner_rating = self.rating(winner);
        let loser_rating = self.rating(loser);
        let (winner_rating, loser_rating) = self.env.rate_1vs1(winner_rating, loser_rating, drawn);

        self.ratings.insert(winner.to_string(), winner_rating);
        self.ratings.insert(loser.to_string(), loser_rating);
    }
}

impl RatingModel for TrueSkill {
    fn register(&mut self, name: &str) {
        self.rating(name);
    }

    fn record(&mut self, result: &MatchResult) {
        let (a, b) = (result.agent_a(), result.agent_b());

        for _ in 0..result.wins() {
            self.rate(a, b, false);
        }

        for _ in 0..result.losses() {
            self.rate(b, a, false);
        }

        for _ in 0..result.draws() {
            self.rate(a, b, true);
        }
    }

    fn save(&self) -> Result<()> {
        self.persistance.save(&self.ratings)
    }

    fn report(&self) -> Vec<AgentRating> {
        self.ratings
            .iter()
            .map(|(name, rating)| AgentRating {
                name: name.clone(),
                mean: rating.mu,
                uncertainty: rating.sigma,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_draw_margin() {
        assert_approx_eq!(TrueSkillEnv::default().draw_margin(), 0.740_466, 1e-5);
    }

    #[test]
    fn test_win_between_newcomers() {
        let env = TrueSkillEnv::default();
        let (winner, loser) = env.rate_1vs1(Gaussian::default(), Gaussian::default(), false);

        assert_approx_eq!(winner.mu, 29.395_832, 1e-4);
        assert_approx_eq!(loser.mu, 20.604_168, 1e-4);
        assert_approx_eq!(winner.sigma, 7.171_476, 1e-4);
        assert_approx_eq!(loser.sigma, 7.171_476, 1e-4);
    }

    #[test]
    fn test_draw_between_newcomers() {
        let env = TrueSkillEnv::default();
        let (a, b) = env.rate_1vs1(Gaussian::default(), Gaussian::default(), true);

        assert_approx_eq!(a.mu, 25.0, 1e-6);
        assert_approx_eq!(b.mu, 25.0, 1e-6);
        assert_approx_eq!(a.sigma, 6.457_516, 1e-4);
    }

    #[test]
    fn test_draw_pulls_means_together() {
        let env = TrueSkillEnv::default();
        let strong = Gaussian { mu: 30.0, sigma: 4.0 };
        let weak = Gaussian { mu: 20.0, sigma: 5.0 };

        let (strong, weak) = env.rate_1vs1(strong, weak, true);

        assert_approx_eq!(strong.mu, 27.891_577, 1e-4);
        assert_approx_eq!(weak.mu, 23.293_897, 1e-4);
        assert_approx_eq!(strong.sigma, 3.554_151, 1e-4);
        assert_approx_eq!(weak.sigma, 4.095_106, 1e-4);
    }

    #[test]
    fn test_record_updates_once_per_game() {
        let mut trueskill = TrueSkill::new(PathBuf::from("unused.json"));
        trueskill.record(&MatchResult::new("A".into(), "B".into(), 2, 0, 0));

        let a = trueskill.rating("A");
        let b = trueskill.rating("B");

        assert!(a.mu > 29.4);
        assert!(b.mu < 20.6);
        assert!(a.sigma < 7.17);
    }

    #[test]
    fn test_losses_credit_the_opponent() {
        let mut trueskill = TrueSkill::new(PathBuf::from("unused.json"));
        trueskill.record(&MatchResult::new("A".into(), "B".into(), 0, 1, 0));

        assert_approx_eq!(trueskill.rating("B").mu, 29.395_832, 1e-4);
        assert_approx_eq!(trueskill.rating("A").mu, 20.604_168, 1e-4);
    }

    #[test]
    fn test_uncertainty_shrinks_over_time() {
        let mut trueskill = TrueSkill::new(PathBuf::from("unused.json"));
        let mut last = trueskill.rating("A").sigma;

        for _ in 0..10 {
            trueskill.record(&MatchResult::new("A".into(), "B".into(), 1, 0, 1));
            let sigma = trueskill.rating("A").sigma;
            assert!(sigma < last);
            last = sigma;
        }
    }

    #[test]
    fn test_report_includes_uncertainty() {
        let mut trueskill = TrueSkill::new(PathBuf::from("unused.json"));
        trueskill.register("random");

        assert_eq!(
            trueskill.report(),
            vec![AgentRating {
                name: "random".to_string(),
                mean: DEFAULT_MU,
                uncertainty: DEFAULT_SIGMA,
            }]
        );
    }
}
