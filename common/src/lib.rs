pub mod config;
pub mod fs;
pub mod match_result;
pub mod math;

pub use config::*;
pub use fs::*;
pub use match_result::*;
pub use math::*;
