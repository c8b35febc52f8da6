mod match_runner;
mod player;
mod strategy;

pub use match_runner::*;
pub use player::*;
pub use strategy::*;
