use anyhow::{anyhow, Result};
use engine::{opponent_of, Bitboards, GameEngine, PlayerScore, ValidActions};
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{Hyperparameters, StateCodec, StateKey, ValueStore};

/// One move made by the learning agent and what it led to.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition<A> {
    pub state: StateKey,
    pub action: A,
    pub reward: f32,
    pub next_state: StateKey,
    pub terminal: bool,
}

/// Epsilon-greedy tabular learner. The agent owns no table: values are read from and written to whichever
/// `ValueStore` the caller passes in, so the same agent works against a local table or the shared actor.
pub struct QLearningAgent<R> {
    hyperparameters: Hyperparameters,
    rng: R,
}

impl<R: Rng> QLearningAgent<R> {
    pub fn new(hyperparameters: Hyperparameters, rng: R) -> Self {
        Self {
            hyperparameters,
            rng,
        }
    }

    pub fn hyperparameters(&self) -> &Hyperparameters {
        &self.hyperparameters
    }

    pub fn choose_action<A, S>(&mut self, store: &S, state: &StateKey, actions: &[A]) -> Result<A>
    where
        A: Clone,
        S: ValueStore<A>,
    {
        if actions.is_empty() {
            return Err(anyhow!("Cannot choose an action without legal actions"));
        }

        if self.rng.gen::<f32>() < self.hyperparameters.epsilon() {
            return random_action(&mut self.rng, actions);
        }

        let values = store.values(state, actions)?;
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        // Unexplored states read all zeros, which makes every action a tie.
        let best = actions
            .iter()
            .zip(values)
            .filter(|(_, value)| *value == max)
            .map(|(action, _)| action.clone())
            .collect::<Vec<_>>();

        random_action(&mut self.rng, &best)
    }

    /// Applies `Q(s,a) <- (1-α)·Q(s,a) + α·(r + γ·v)` and returns the new estimate.
    ///
    /// `v` is the negated best value among the opponent's actions in the next state, since the opponent moves next.
    /// When the opponent has no action there, the negated value of repeating `action` from the next state is used instead.
    pub fn observe<A, S>(
        &self,
        store: &mut S,
        transition: &Transition<A>,
        opponent_actions: &[A],
    ) -> Result<f32>
    where
        A: Clone,
        S: ValueStore<A>,
    {
        let alpha = self.hyperparameters.alpha();
        let gamma = self.hyperparameters.gamma();

        let current = store.value(&transition.state, &transition.action)?;

        let next_value = if opponent_actions.is_empty() {
            -store.value(&transition.next_state, &transition.action)?
        } else {
            -store
                .values(&transition.next_state, opponent_actions)?
                .into_iter()
                .fold(f32::NEG_INFINITY, f32::max)
        };

        let updated = (1.0 - alpha) * current + alpha * (transition.reward + gamma * next_value);

        store.set_value(transition.state, transition.action.clone(), updated)?;

        Ok(updated)
    }

    /// Chooses and applies a move for the player to move in `game_state`, then learns from it.
    pub fn play<E, S>(
        &mut self,
        engine: &E,
        store: &mut S,
        game_state: &E::State,
    ) -> Result<(E::State, Transition<E::Action>)>
    where
        E: GameEngine + ValidActions + Bitboards + PlayerScore,
        E::Action: Clone,
        S: ValueStore<E::Action>,
    {
        let player = engine.player_to_move(game_state);
        let opponent = opponent_of(player);
        let state = engine.encode(game_state, player);
        let actions = engine.valid_actions(game_state, player);

        let action = self.choose_action(store, &state, &actions)?;
        let next_game_state = engine.take_action(game_state, &action);

        let transition = Transition {
            state,
            action,
            reward: terminal_reward(engine, &next_game_state, player),
            next_state: engine.encode(&next_game_state, opponent),
            terminal: engine.terminal_state(&next_game_state).is_some(),
        };

        let opponent_actions = engine.valid_actions(&next_game_state, opponent);
        let value = self.observe(store, &transition, &opponent_actions)?;

        trace!(
            "Player {} updated value to {} (reward {})",
            player,
            value,
            transition.reward
        );

        Ok((next_game_state, transition))
    }
}

/// Own discs minus opponent discs once the game is over, zero before that.
pub fn terminal_reward<E>(engine: &E, game_state: &E::State, player: usize) -> f32
where
    E: PlayerScore,
{
    if engine.terminal_state(game_state).is_none() {
        return 0.0;
    }

    let own = engine.score(game_state, player) as f32;
    let opponent = engine.score(game_state, opponent_of(player)) as f32;

    own - opponent
}

fn random_action<A: Clone, R: Rng>(rng: &mut R, actions: &[A]) -> Result<A> {
    actions
        .choose(rng)
        .cloned()
        .ok_or_else(|| anyhow!("Cannot choose an action without legal actions"))
}
