pub trait GameEngine {
    type Action;
    type State;
    type Terminal;

    fn take_action(&self, game_state: &Self::State, action: &Self::Action) -> Self::State;
    fn player_to_move(&self, game_state: &Self::State) -> usize;
    fn move_number(&self, game_state: &Self::State) -> usize;
    fn terminal_state(&self, game_state: &Self::State) -> Option<Self::Terminal>;
}

/// Enumerates the actions `player` could legally take in `game_state`, regardless of whose turn it is.
pub trait ValidActions: GameEngine {
    fn valid_actions(&self, game_state: &Self::State, player: usize) -> Vec<Self::Action>;
}

/// Raw occupancy of the board seen from `player`, always ordered as `(own, opponent)`.
pub trait Bitboards: GameEngine {
    fn bitboards(&self, game_state: &Self::State, player: usize) -> (u64, u64);
}
