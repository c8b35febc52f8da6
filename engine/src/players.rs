use super::GameEngine;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOutcome {
    Win,
    Lose,
    Draw,
}

pub trait PlayerScore: GameEngine {
    fn score(&self, game_state: &Self::State, player: usize) -> usize;
}

pub trait PlayerResult: GameEngine {
    /// Classifies a finished game for `player`. Returns `None` while the game is still in progress.
    fn result(&self, game_state: &Self::State, player: usize) -> Option<GameOutcome>;
}

/// Player 1 and player 2 alternate; any other id is a programming error.
pub fn opponent_of(player: usize) -> usize {
    debug_assert!(player == 1 || player == 2, "Invalid player id {}", player);
    3 - player
}
