use anyhow::{anyhow, Result};
use engine::{Bitboards, GameEngine, PlayerScore, ValidActions};
use qlearning::{QLearningAgent, ValueStore};
use rand::seq::SliceRandom;
use rand::Rng;

/// A participant in a match. Heuristic players only need a source of randomness for tie breaks.
pub enum Player<R> {
    Random(R),
    Maximize(R),
    Minimize(R),
    QLearning(QLearningAgent<R>),
}

impl<R: Rng> Player<R> {
    /// Moves for whoever is to move in `game_state` and returns the resulting state.
    /// The learning player also updates `store` with what it observed.
    pub fn take_turn<E, S>(&mut self, engine: &E, store: &mut S, game_state: &E::State) -> Result<E::State>
    where
        E: GameEngine + ValidActions + Bitboards + PlayerScore,
        E::Action: Clone,
        S: ValueStore<E::Action>,
    {
        let action = match self {
            Player::QLearning(agent) => {
                let (next_game_state, _) = agent.play(engine, store, game_state)?;
                return Ok(next_game_state);
            }
            Player::Random(rng) => random_move(engine, game_state, rng)?,
            Player::Maximize(rng) => greedy_move(engine, game_state, rng, true)?,
            Player::Minimize(rng) => greedy_move(engine, game_state, rng, false)?,
        };

        Ok(engine.take_action(game_state, &action))
    }
}

fn random_move<E, R>(engine: &E, game_state: &E::State, rng: &mut R) -> Result<E::Action>
where
    E: ValidActions,
    E::Action: Clone,
    R: Rng,
{
    let player = engine.player_to_move(game_state);

    engine
        .valid_actions(game_state, player)
        .choose(rng)
        .cloned()
        .ok_or_else(|| anyhow!("Player {} has no legal move", player))
}

/// Picks the move leaving the mover with the most discs, or the fewest when `maximize` is false.
fn greedy_move<E, R>(engine: &E, game_state: &E::State, rng: &mut R, maximize: bool) -> Result<E::Action>
where
    E: ValidActions + PlayerScore,
    E::Action: Clone,
    R: Rng,
{
    let player = engine.player_to_move(game_state);

    let scored = engine
        .valid_actions(game_state, player)
        .into_iter()
        .map(|action| {
            let score = engine.score(&engine.take_action(game_state, &action), player);
            (action, score)
        })
        .collect::<Vec<_>>();

    let target = if maximize {
        scored.iter().map(|(_, score)| *score).max()
    } else {
        scored.iter().map(|(_, score)| *score).min()
    }
    .ok_or_else(|| anyhow!("Player {} has no legal move", player))?;

    let best = scored
        .into_iter()
        .filter(|(_, score)| *score == target)
        .map(|(action, _)| action)
        .collect::<Vec<_>>();

    best.choose(rng)
        .cloned()
        .ok_or_else(|| anyhow!("Player {} has no legal move", player))
}
