mod agent;
mod hyperparameters;
mod state_codec;
mod table_actor;
mod table_persistance;
mod value_table;

pub use agent::*;
pub use hyperparameters::*;
pub use state_codec::*;
pub use table_actor::*;
pub use table_persistance::*;
pub use value_table::*;
