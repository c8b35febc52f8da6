use clap::{Args, Parser, Subcommand};
use training::TrainingMode;

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Othello Q-Learning Client")]
#[clap(about = "Trains tabular Q-learning agents through self-play and rates them", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Train(TrainCommand),
    Ratings(RatingsCommand),
}

#[derive(Args)]
pub struct TrainCommand {
    #[clap(short, long, default_value_t = String::from("training.conf"))]
    pub config: String,

    /// sequential or concurrent
    #[clap(short, long, default_value = "sequential")]
    pub mode: TrainingMode,
}

#[derive(Args)]
#[clap(about = "Prints the persisted ratings without training", long_about = None)]
pub struct RatingsCommand {
    #[clap(short, long, default_value_t = String::from("training.conf"))]
    pub config: String,
}
