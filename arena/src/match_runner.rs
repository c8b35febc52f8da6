use anyhow::{anyhow, Result};
use common::MatchResult;
use engine::{Bitboards, GameOutcome, GameState, PlayerResult, PlayerScore, ValidActions};
use log::debug;
use qlearning::{Hyperparameters, ValueStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use super::{Player, StrategyKind};

const FIRST_PLAYER: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fixture {
    pub agent_a: StrategyKind,
    pub agent_b: StrategyKind,
}

impl Fixture {
    pub fn new(agent_a: StrategyKind, agent_b: StrategyKind) -> Self {
        Self { agent_a, agent_b }
    }

    pub fn is_void(&self) -> bool {
        self.agent_a == self.agent_b
    }
}

impl Display for Fixture {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} vs {}", self.agent_a, self.agent_b)
    }
}

/// Plays a fixture as two games, one with each agent moving first.
pub struct MatchRunner<'a, E> {
    engine: &'a E,
    hyperparameters: Hyperparameters,
}

impl<'a, E> MatchRunner<'a, E>
where
    E: ValidActions + Bitboards + PlayerScore + PlayerResult,
    E::State: GameState,
    E::Action: Clone,
{
    pub fn new(engine: &'a E, hyperparameters: Hyperparameters) -> Self {
        Self {
            engine,
            hyperparameters,
        }
    }

    /// Returns `None` for a void fixture. Any learning done during the games is written to `store`.
    pub fn run<S, R>(&self, fixture: &Fixture, store: &mut S, rng: &mut R) -> Result<Option<MatchResult>>
    where
        S: ValueStore<E::Action>,
        R: Rng,
    {
        if fixture.is_void() {
            debug!("Skipping void fixture {}", fixture);
            return Ok(None);
        }

        let mut a = fixture
            .agent_a
            .create(&self.hyperparameters, StdRng::from_rng(&mut *rng)?);
        let mut b = fixture
            .agent_b
            .create(&self.hyperparameters, StdRng::from_rng(&mut *rng)?);

        let (mut wins, mut losses, mut draws) = (0, 0, 0);

        for a_moves_first in [true, false] {
            let outcome = if a_moves_first {
                self.play_game(&mut a, &mut b, store)?
            } else {
                invert(self.play_game(&mut b, &mut a, store)?)
            };

            match outcome {
                GameOutcome::Win => wins += 1,
                GameOutcome::Lose => losses += 1,
                GameOutcome::Draw => draws += 1,
            }
        }

        let result = MatchResult::new(
            fixture.agent_a.to_string(),
            fixture.agent_b.to_string(),
            wins,
            losses,
            draws,
        );

        debug!("{}: {:?}", fixture, result);

        Ok(Some(result))
    }

    /// Plays one game to the end and classifies it for `first`.
    fn play_game<S, R>(&self, first: &mut Player<R>, second: &mut Player<R>, store: &mut S) -> Result<GameOutcome>
    where
        S: ValueStore<E::Action>,
        R: Rng,
    {
        let mut game_state = E::State::initial();

        while self.engine.terminal_state(&game_state).is_none() {
            let player = if self.engine.player_to_move(&game_state) == FIRST_PLAYER {
                &mut *first
            } else {
                &mut *second
            };

            game_state = player.take_turn(self.engine, store, &game_state)?;
        }

        self.engine
            .result(&game_state, FIRST_PLAYER)
            .ok_or_else(|| anyhow!("Expected a terminal state"))
    }
}

fn invert(outcome: GameOutcome) -> GameOutcome {
    match outcome {
        GameOutcome::Win => GameOutcome::Lose,
        GameOutcome::Lose => GameOutcome::Win,
        GameOutcome::Draw => GameOutcome::Draw,
    }
}
