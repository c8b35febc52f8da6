mod checkpoint_log;
mod constants;
mod fixtures;
mod options;
mod training;

pub use checkpoint_log::*;
pub use constants::*;
pub use fixtures::*;
pub use options::*;
pub use training::*;
