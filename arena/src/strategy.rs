use anyhow::{anyhow, Result};
use qlearning::{Hyperparameters, QLearningAgent};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use super::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrategyKind {
    #[serde(rename = "random")]
    Random,
    #[serde(rename = "maximize")]
    Maximize,
    #[serde(rename = "minimize")]
    Minimize,
    QLearning,
}

impl StrategyKind {
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Random => "random",
            StrategyKind::Maximize => "maximize",
            StrategyKind::Minimize => "minimize",
            StrategyKind::QLearning => "QLearning",
        }
    }

    pub fn is_learning(&self) -> bool {
        matches!(self, StrategyKind::QLearning)
    }

    pub fn create<R: Rng>(&self, hyperparameters: &Hyperparameters, rng: R) -> Player<R> {
        match self {
            StrategyKind::Random => Player::Random(rng),
            StrategyKind::Maximize => Player::Maximize(rng),
            StrategyKind::Minimize => Player::Minimize(rng),
            StrategyKind::QLearning => Player::QLearning(QLearningAgent::new(*hyperparameters, rng)),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(StrategyKind::Random),
            "maximize" => Ok(StrategyKind::Maximize),
            "minimize" => Ok(StrategyKind::Minimize),
            "QLearning" => Ok(StrategyKind::QLearning),
            _ => Err(anyhow!(
                "Unknown strategy {:?}. Expected one of random, maximize, minimize, QLearning",
                s
            )),
        }
    }
}

impl Display for StrategyKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses every name up front so a bad name fails before any game is played.
pub fn parse_strategies<I, S>(names: I) -> Result<Vec<StrategyKind>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names.into_iter().map(|name| name.as_ref().parse()).collect()
}
