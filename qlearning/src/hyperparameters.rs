use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Learning rate, discount and exploration rate. Fixed for the lifetime of an agent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    alpha: f32,
    gamma: f32,
    epsilon: f32,
}

impl Hyperparameters {
    pub fn new(alpha: f32, gamma: f32, epsilon: f32) -> Result<Self> {
        for (name, value) in [("alpha", alpha), ("gamma", gamma), ("epsilon", epsilon)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("{} must be within [0, 1], got {}", name, value));
            }
        }

        Ok(Self {
            alpha,
            gamma,
            epsilon,
        })
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn gamma(&self) -> f32 {
        self.gamma
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Tables learned under different hyperparameters are kept in different files.
    pub fn table_file_name(&self) -> String {
        format!(
            "q_table-{}-{}-{}.json.gz",
            self.alpha, self.gamma, self.epsilon
        )
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            gamma: 0.9,
            epsilon: 0.1,
        }
    }
}
