pub mod action;
pub mod error;
pub mod game_state;
pub mod rules;

mod board;
mod constants;

use board::*;
use constants::*;

pub use action::*;
pub use error::*;
pub use game_state::*;
pub use rules::*;
