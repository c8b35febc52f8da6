mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use common::{ConfigLoader, FsExt};
use dotenv::dotenv;
use env_logger::Env;
use log::info;
use rating::RatingModel;
use training::{Trainer, TrainingOptions};

fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Train(train_args) => {
            let options = load_options(&train_args.config)?;
            let engine = othello::Engine::new();

            Trainer::new(&engine, &options).train(train_args.mode)?;
        }
        Commands::Ratings(ratings_args) => {
            let options = load_options(&ratings_args.config)?;
            let rating = options.load_rating_model()?;

            info!("Ratings from {:?}", options.rating_path);

            for agent in rating.report() {
                println!("{:>12}: {:.3} ± {:.3}", agent.name, agent.mean, agent.uncertainty);
            }
        }
    }

    Ok(())
}

fn load_options(config: &str) -> Result<TrainingOptions> {
    let config_path = config.to_string().relative_to_cwd()?;
    let config = ConfigLoader::new(config_path, "training".to_string())?;

    config.load()
}
