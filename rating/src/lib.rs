mod elo;
mod rating_model;
mod rating_persistance;
mod trueskill;

pub use elo::*;
pub use rating_model::*;
pub use rating_persistance::*;
pub use trueskill::*;
