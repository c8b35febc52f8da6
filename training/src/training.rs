use anyhow::{anyhow, Context, Result};
use arena::{parse_strategies, Fixture, MatchRunner};
use common::MatchResult;
use crossbeam::channel::unbounded;
use engine::{Bitboards, GameState, PlayerResult, PlayerScore, ValidActions};
use log::{debug, error, info};
use qlearning::{QTable, QTablePersistance, TableActor, TableStats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rating::{write_report, AgentRating, RatingModel};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::hash::Hash;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::{enumerate_fixtures, CheckpointLog, TrainingMode, TrainingOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrainingPhase {
    Init,
    Running,
    Checkpointing,
    Finalizing,
    Done,
}

/// Drives a full training run: restore state, play every fixture, checkpoint, persist and report.
pub struct Trainer<'a, E> {
    engine: &'a E,
    options: &'a TrainingOptions,
    phase: TrainingPhase,
    processed: usize,
    started: Instant,
}

impl<'a, E> Trainer<'a, E>
where
    E: ValidActions + Bitboards + PlayerScore + PlayerResult + Sync,
    E::State: GameState,
    E::Action: Clone + Eq + Hash + Serialize + DeserializeOwned + Send + 'static,
{
    pub fn new(engine: &'a E, options: &'a TrainingOptions) -> Self {
        Self {
            engine,
            options,
            phase: TrainingPhase::Init,
            processed: 0,
            started: Instant::now(),
        }
    }

    pub fn phase(&self) -> TrainingPhase {
        self.phase
    }

    /// Number of fixtures processed so far, void fixtures included.
    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn train(&mut self, mode: TrainingMode) -> Result<Vec<AgentRating>> {
        let options = self.options;
        info!("Starting {} training with options {:?}", mode, options);

        let strategies = parse_strategies(&options.strategies)?;
        let fixtures = enumerate_fixtures(&strategies, options.rounds, options.ordered_fixtures);

        let table_persistance = QTablePersistance::new(&options.table_dir, &options.hyperparameters);
        let table = table_persistance
            .load()?
            .unwrap_or_else(|| {
                info!(
                    "No value table at {:?}, starting empty",
                    table_persistance.file_path()
                );
                QTable::new()
            });

        let mut rating = options.load_rating_model()?;
        let checkpoint_log = CheckpointLog::new(options.checkpoint_log.clone(), options.checkpoint_interval);
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!("Enumerated {} fixtures", fixtures.len());

        self.processed = 0;
        self.started = Instant::now();
        self.transition(TrainingPhase::Running);

        let table = match mode {
            TrainingMode::Sequential => {
                self.run_sequential(fixtures, table, rating.as_mut(), &checkpoint_log, &mut rng)?
            }
            TrainingMode::Concurrent => {
                self.run_concurrent(fixtures, table, rating.as_mut(), &checkpoint_log, &mut rng)?
            }
        };

        self.transition(TrainingPhase::Finalizing);

        table_persistance.save(&table)?;
        rating.save()?;

        let report = rating.report();
        write_report(&options.report_path, &report)?;

        for agent in &report {
            info!(
                "{:>12}: {:.3} ± {:.3}",
                agent.name, agent.mean, agent.uncertainty
            );
        }

        info!(
            "Played {} fixtures ({} games) in {:.2}h",
            self.processed,
            self.processed * 2,
            self.started.elapsed().as_secs_f32() / (60 * 60) as f32
        );

        self.transition(TrainingPhase::Done);

        Ok(report)
    }

    fn run_sequential(
        &mut self,
        fixtures: Vec<Fixture>,
        mut table: QTable<E::Action>,
        rating: &mut dyn RatingModel,
        checkpoint_log: &CheckpointLog,
        rng: &mut StdRng,
    ) -> Result<QTable<E::Action>> {
        let runner = MatchRunner::new(self.engine, self.options.hyperparameters);

        for fixture in fixtures {
            let result = runner
                .run(&fixture, &mut table, rng)
                .with_context(|| format!("Failed to play fixture {}", fixture))?;

            self.complete(result, rating, checkpoint_log, || Ok(table.stats()))?;
        }

        Ok(table)
    }

    /// Workers pull fixtures from a shared queue and report back in completion order. Ratings and checkpoints are
    /// only touched here, on the calling thread. Any failure, on a worker or here, stops every worker before its
    /// next fixture.
    fn run_concurrent(
        &mut self,
        fixtures: Vec<Fixture>,
        table: QTable<E::Action>,
        rating: &mut dyn RatingModel,
        checkpoint_log: &CheckpointLog,
        rng: &mut StdRng,
    ) -> Result<QTable<E::Action>> {
        let parallelism = self.options.parallelism.max(1);
        let runner = MatchRunner::new(self.engine, self.options.hyperparameters);
        let actor = TableActor::spawn(table)?;
        let stats_handle = actor.handle();
        let abort = AtomicBool::new(false);

        let (fixture_tx, fixture_rx) = unbounded();
        for fixture in fixtures {
            fixture_tx
                .send(fixture)
                .map_err(|_| anyhow!("Failed to queue fixture"))?;
        }
        drop(fixture_tx);

        let (result_tx, result_rx) = unbounded();

        crossbeam::scope(|s| {
            for thread_num in 0..parallelism {
                let fixture_rx = fixture_rx.clone();
                let result_tx = result_tx.clone();
                let mut handle = actor.handle();
                let mut rng = StdRng::seed_from_u64(rng.gen());
                let runner = &runner;
                let abort = &abort;

                s.spawn(move |_| {
                    let _guard = AbortOnPanic(abort);
                    info!("Starting Thread: {}", thread_num);

                    for fixture in fixture_rx.iter() {
                        if abort.load(Ordering::SeqCst) {
                            break;
                        }

                        let result = runner
                            .run(&fixture, &mut handle, &mut rng)
                            .with_context(|| format!("Failed to play fixture {}", fixture));

                        let failed = result.is_err();
                        if result_tx.send(result).is_err() || failed {
                            break;
                        }
                    }
                });
            }

            drop(result_tx);

            let mut consume = || -> Result<()> {
                for result in result_rx.iter() {
                    if abort.load(Ordering::SeqCst) {
                        break;
                    }

                    self.complete(result?, rating, checkpoint_log, || stats_handle.stats())?;
                }

                Ok(())
            };

            let consumed = consume();
            if let Err(err) = &consumed {
                abort.store(true, Ordering::SeqCst);
                error!("Aborting training: {:?}", err);
            }

            consumed
        })
        .map_err(|_| anyhow!("A training worker panicked"))??;

        actor.shutdown()
    }

    /// Feeds one finished fixture into the rating model and writes a checkpoint when one is due.
    fn complete<F>(
        &mut self,
        result: Option<MatchResult>,
        rating: &mut dyn RatingModel,
        checkpoint_log: &CheckpointLog,
        table_stats: F,
    ) -> Result<()>
    where
        F: FnOnce() -> Result<TableStats>,
    {
        if let Some(result) = result {
            rating.record(&result);
        }

        self.processed += 1;

        if checkpoint_log.is_due(self.processed) {
            self.transition(TrainingPhase::Checkpointing);

            let stats = table_stats()?;
            checkpoint_log.append(&stats)?;

            let elapsed = self.started.elapsed().as_secs_f32();
            info!(
                "Time Elapsed: {:.2}h, Number of Fixtures Played: {}, FPM: {:.2}, Table Entries: {}, Mean Value: {}",
                elapsed / (60 * 60) as f32,
                self.processed,
                self.processed as f32 / elapsed.max(f32::EPSILON) * 60_f32,
                stats.entries,
                stats.mean
            );

            self.transition(TrainingPhase::Running);
        }

        Ok(())
    }

    fn transition(&mut self, phase: TrainingPhase) {
        if phase == TrainingPhase::Checkpointing || self.phase == TrainingPhase::Checkpointing {
            debug!("Training phase {:?} -> {:?}", self.phase, phase);
        } else {
            info!("Training phase {:?} -> {:?}", self.phase, phase);
        }

        self.phase = phase;
    }
}

/// Raises the abort flag when the owning worker unwinds.
struct AbortOnPanic<'a>(&'a AtomicBool);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.store(true, Ordering::SeqCst);
        }
    }
}
