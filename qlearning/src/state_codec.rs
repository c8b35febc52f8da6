use engine::Bitboards;
use serde::{Deserialize, Serialize};

/// A board as seen by the player about to act: their own discs first, the opponent's second.
///
/// No symmetry reduction is applied. Rotations and reflections of a position are distinct keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateKey {
    own: u64,
    opponent: u64,
}

impl StateKey {
    pub fn new(own: u64, opponent: u64) -> Self {
        Self { own, opponent }
    }

    pub fn own(&self) -> u64 {
        self.own
    }

    pub fn opponent(&self) -> u64 {
        self.opponent
    }
}

pub trait StateCodec {
    type GameState;

    fn encode(&self, game_state: &Self::GameState, player: usize) -> StateKey;
}

impl<E: Bitboards> StateCodec for E {
    type GameState = E::State;

    fn encode(&self, game_state: &Self::GameState, player: usize) -> StateKey {
        let (own, opponent) = self.bitboards(game_state, player);
        StateKey::new(own, opponent)
    }
}
