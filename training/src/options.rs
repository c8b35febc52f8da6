use anyhow::{anyhow, Result};
use common::Config;
use qlearning::Hyperparameters;
use rating::{EloRating, RatingModel, TrueSkill};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingKind {
    Elo,
    TrueSkill,
}

impl RatingKind {
    fn default_path(&self) -> &'static str {
        match self {
            RatingKind::Elo => DEFAULT_ELO_PATH,
            RatingKind::TrueSkill => DEFAULT_TRUESKILL_PATH,
        }
    }
}

impl FromStr for RatingKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "elo" => Ok(RatingKind::Elo),
            "trueskill" => Ok(RatingKind::TrueSkill),
            _ => Err(anyhow!("Unknown rating {:?}. Expected elo or trueskill", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingMode {
    Sequential,
    Concurrent,
}

impl FromStr for TrainingMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sequential" => Ok(TrainingMode::Sequential),
            "concurrent" => Ok(TrainingMode::Concurrent),
            _ => Err(anyhow!(
                "Unknown training mode {:?}. Expected sequential or concurrent",
                s
            )),
        }
    }
}

impl Display for TrainingMode {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            TrainingMode::Sequential => write!(f, "sequential"),
            TrainingMode::Concurrent => write!(f, "concurrent"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrainingOptions {
    pub strategies: Vec<String>,
    pub rounds: usize,
    pub ordered_fixtures: bool,
    pub parallelism: usize,
    pub checkpoint_interval: usize,
    pub seed: Option<u64>,
    pub hyperparameters: Hyperparameters,
    pub rating: RatingKind,
    pub rating_path: PathBuf,
    pub table_dir: PathBuf,
    pub checkpoint_log: PathBuf,
    pub report_path: PathBuf,
}

impl TrainingOptions {
    /// Loads the persisted snapshot of the configured rating model and registers every configured strategy.
    pub fn load_rating_model(&self) -> Result<Box<dyn RatingModel>> {
        let members = &self.strategies;
        let path = self.rating_path.clone();

        Ok(match self.rating {
            RatingKind::Elo => Box::new(EloRating::load(path, members)?),
            RatingKind::TrueSkill => Box::new(TrueSkill::load(path, members)?),
        })
    }
}

impl Config for TrainingOptions {
    fn load(config: &common::ConfigLoader) -> Result<Self> {
        let defaults = Hyperparameters::default();
        let rating = config
            .get("rating")
            .and_then(|v| v.as_string())
            .map(|v| v.parse::<RatingKind>())
            .transpose()?
            .unwrap_or(RatingKind::Elo);

        Ok(Self {
            strategies: config
                .get("strategies")
                .and_then(|v| v.as_list())
                .unwrap_or_else(|| vec!["random".to_string(), "QLearning".to_string()]),
            rounds: config
                .get("rounds")
                .and_then(|v| v.as_usize())
                .unwrap_or(DEFAULT_ROUNDS),
            ordered_fixtures: config
                .get("ordered_fixtures")
                .and_then(|v| v.as_bool())
                .unwrap_or(true),
            parallelism: config
                .get("parallelism")
                .and_then(|v| v.as_usize())
                .unwrap_or(DEFAULT_PARALLELISM),
            checkpoint_interval: config
                .get("checkpoint_interval")
                .and_then(|v| v.as_usize())
                .unwrap_or(DEFAULT_CHECKPOINT_INTERVAL),
            seed: config
                .get("seed")
                .and_then(|v| v.as_usize())
                .map(|v| v as u64),
            hyperparameters: Hyperparameters::new(
                config
                    .get("alpha")
                    .and_then(|v| v.as_f32())
                    .unwrap_or(defaults.alpha()),
                config
                    .get("gamma")
                    .and_then(|v| v.as_f32())
                    .unwrap_or(defaults.gamma()),
                config
                    .get("epsilon")
                    .and_then(|v| v.as_f32())
                    .unwrap_or(defaults.epsilon()),
            )?,
            rating,
            rating_path: config.get_relative_path("rating_path", rating.default_path())?,
            table_dir: config.get_relative_path("table_dir", DEFAULT_TABLE_DIR)?,
            checkpoint_log: config.get_relative_path("checkpoint_log", DEFAULT_CHECKPOINT_LOG)?,
            report_path: config.get_relative_path("report_path", DEFAULT_REPORT_PATH)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ConfigLoader;

    fn load(conf: &str) -> Result<TrainingOptions> {
        ConfigLoader::from_hocon_str(conf, "training".to_string())?.load()
    }

    #[test]
    fn test_defaults() {
        let options = load("training { }").unwrap();

        assert_eq!(options.strategies, vec!["random", "QLearning"]);
        assert_eq!(options.rounds, 100_000);
        assert!(options.ordered_fixtures);
        assert_eq!(options.parallelism, 8);
        assert_eq!(options.checkpoint_interval, 5000);
        assert_eq!(options.seed, None);
        assert_eq!(options.hyperparameters, Hyperparameters::default());
        assert_eq!(options.rating, RatingKind::Elo);
        assert!(options.rating_path.ends_with("matching/strategy_rating.json"));
        assert!(options.table_dir.ends_with("strategy/QL_dict"));
    }

    #[test]
    fn test_overrides() {
        let options = load(
            r#"
            training {
                strategies = ["maximize", "minimize"]
                rounds = 4
                ordered_fixtures = false
                parallelism = 2
                seed = 7
                alpha = 0.25
                rating = "trueskill"
                table_dir = "/tmp/tables"
            }
            "#,
        )
        .unwrap();

        assert_eq!(options.strategies, vec!["maximize", "minimize"]);
        assert_eq!(options.rounds, 4);
        assert!(!options.ordered_fixtures);
        assert_eq!(options.parallelism, 2);
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.hyperparameters.alpha(), 0.25);
        assert_eq!(options.rating, RatingKind::TrueSkill);
        assert!(options.rating_path.ends_with("matching/trueskill.json"));
        assert_eq!(options.table_dir, PathBuf::from("/tmp/tables"));
    }

    #[test]
    fn test_unknown_rating_fails() {
        assert!(load(r#"training { rating = "glicko" }"#).is_err());
    }

    #[test]
    fn test_out_of_range_hyperparameter_fails() {
        assert!(load("training { epsilon = 1.5 }").is_err());
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("concurrent".parse::<TrainingMode>().unwrap(), TrainingMode::Concurrent);
        assert!("parallel".parse::<TrainingMode>().is_err());
    }
}
