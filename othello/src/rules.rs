use engine::{Bitboards, GameEngine, GameOutcome, PlayerResult, PlayerScore, ValidActions};

use super::{Action, GameState, BLACK};

/// Final disc counts of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub black: usize,
    pub white: usize,
}

impl Score {
    pub fn for_player(&self, player: usize) -> (usize, usize) {
        if player == BLACK {
            (self.black, self.white)
        } else {
            (self.white, self.black)
        }
    }
}

#[derive(Default)]
pub struct Engine {}

impl Engine {
    pub fn new() -> Self {
        Self {}
    }
}

impl GameEngine for Engine {
    type Action = Action;
    type State = GameState;
    type Terminal = Score;

    fn take_action(&self, game_state: &Self::State, action: &Self::Action) -> Self::State {
        game_state.place(*action)
    }

    fn player_to_move(&self, game_state: &Self::State) -> usize {
        game_state.player_to_move()
    }

    fn move_number(&self, game_state: &Self::State) -> usize {
        game_state.number_of_discs() - 3
    }

    fn terminal_state(&self, game_state: &Self::State) -> Option<Self::Terminal> {
        if game_state.is_terminal() {
            let (black, white) = GameState::disk_counts(game_state.black_board, game_state.white_board);
            Some(Score { black, white })
        } else {
            None
        }
    }
}

impl ValidActions for Engine {
    fn valid_actions(&self, game_state: &Self::State, player: usize) -> Vec<Self::Action> {
        game_state.legal_actions(player)
    }
}

impl Bitboards for Engine {
    fn bitboards(&self, game_state: &Self::State, player: usize) -> (u64, u64) {
        game_state.boards_for(player)
    }
}

impl PlayerScore for Engine {
    fn score(&self, game_state: &Self::State, player: usize) -> usize {
        let (own, _) = game_state.boards_for(player);
        own.count_ones() as usize
    }
}

impl PlayerResult for Engine {
    fn result(&self, game_state: &Self::State, player: usize) -> Option<GameOutcome> {
        self.terminal_state(game_state).map(|score| {
            let (own, opponent) = score.for_player(player);
            match own.cmp(&opponent) {
                std::cmp::Ordering::Greater => GameOutcome::Win,
                std::cmp::Ordering::Less => GameOutcome::Lose,
                std::cmp::Ordering::Equal => GameOutcome::Draw,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WHITE;
    use engine::GameState as GameStateTrait;

    #[test]
    fn test_new_state_is_not_terminal() {
        let engine = Engine::new();
        let state = GameState::initial();

        assert!(engine.terminal_state(&state).is_none());
        assert!(engine.result(&state, BLACK).is_none());
        assert_eq!(engine.player_to_move(&state), BLACK);
        assert_eq!(engine.move_number(&state), 1);
    }

    #[test]
    fn test_take_action_switches_player() {
        let engine = Engine::new();
        let state = GameState::initial();
        let action = engine.valid_actions(&state, BLACK)[0];
        let state = engine.take_action(&state, &action);

        assert_eq!(engine.player_to_move(&state), WHITE);
        assert_eq!(engine.move_number(&state), 2);
        assert_eq!(engine.score(&state, BLACK), 4);
        assert_eq!(engine.score(&state, WHITE), 1);
    }

    #[test]
    fn test_result_for_both_players() {
        let engine = Engine::new();
        let black = u64::MAX << 24;
        let state = GameState::from_boards(black, !black, false);

        assert_eq!(engine.terminal_state(&state), Some(Score { black: 40, white: 24 }));
        assert_eq!(engine.result(&state, BLACK), Some(GameOutcome::Win));
        assert_eq!(engine.result(&state, WHITE), Some(GameOutcome::Lose));
    }

    #[test]
    fn test_result_draw() {
        let engine = Engine::new();
        let black = u64::MAX << 32;
        let state = GameState::from_boards(black, !black, true);

        assert_eq!(engine.result(&state, WHITE), Some(GameOutcome::Draw));
    }

    #[test]
    fn test_random_playout_reaches_terminal() {
        let engine = Engine::new();
        let mut state = GameState::initial();
        let mut moves = 0;

        while engine.terminal_state(&state).is_none() {
            let player = engine.player_to_move(&state);
            let actions = engine.valid_actions(&state, player);
            assert!(!actions.is_empty(), "The player to move must always have a move");
            state = engine.take_action(&state, &actions[moves % actions.len()]);
            moves += 1;
        }

        let score = engine.terminal_state(&state).unwrap();
        assert!(score.black + score.white <= 64);
        assert!(moves <= 60);
    }

    #[test]
    fn test_bitboards_are_mover_first() {
        let engine = Engine::new();
        let state = GameState::initial();
        let (own, opponent) = engine.bitboards(&state, WHITE);

        assert_eq!((own, opponent), (state.white_board, state.black_board));
    }
}
