use std::fmt::{self, Display, Formatter};

use super::{flips, legal_moves, squares, Action, MoveError, BOARD_SIZE, BOARD_WIDTH, INITIAL_BLACK, INITIAL_WHITE};

pub const BLACK: usize = 1;
pub const WHITE: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    pub p1_turn_to_move: bool,
    pub black_board: u64,
    pub white_board: u64,
}

impl engine::GameState for GameState {
    fn initial() -> Self {
        GameState {
            p1_turn_to_move: true,
            black_board: INITIAL_BLACK,
            white_board: INITIAL_WHITE,
        }
    }
}

impl GameState {
    pub fn from_boards(black_board: u64, white_board: u64, p1_turn_to_move: bool) -> Self {
        debug_assert_eq!(black_board & white_board, 0, "A square cannot hold two discs");

        Self {
            p1_turn_to_move,
            black_board,
            white_board,
        }
    }

    pub fn player_to_move(&self) -> usize {
        if self.p1_turn_to_move {
            BLACK
        } else {
            WHITE
        }
    }

    /// Boards for `player`, ordered as `(own, opponent)`.
    pub fn boards_for(&self, player: usize) -> (u64, u64) {
        if player == BLACK {
            (self.black_board, self.white_board)
        } else {
            (self.white_board, self.black_board)
        }
    }

    pub fn legal_actions(&self, player: usize) -> Vec<Action> {
        let (own, opponent) = self.boards_for(player);

        squares(legal_moves(own, opponent)).map(Action::from_square).collect()
    }

    pub fn has_legal_move(own: u64, opponent: u64) -> bool {
        legal_moves(own, opponent) != 0
    }

    pub fn disk_counts(own: u64, opponent: u64) -> (usize, usize) {
        (own.count_ones() as usize, opponent.count_ones() as usize)
    }

    /// Simulates `player` placing a disc on `action` without touching this state. Returns `(own, opponent)` boards.
    pub fn simulate(&self, player: usize, action: Action) -> (u64, u64) {
        let (own, opponent) = self.boards_for(player);
        let square = action.square();
        let flipped = flips(own, opponent, square);

        (own | flipped | (1 << square), opponent & !flipped)
    }

    /// Places a disc for the player to move, validating the square first.
    pub fn play(&self, square: usize) -> Result<Self, MoveError> {
        if square >= BOARD_SIZE {
            return Err(MoveError::OutOfRange(square));
        }

        let (own, opponent) = self.boards_for(self.player_to_move());
        let occupied = (own | opponent) & (1 << square) != 0;
        if occupied || flips(own, opponent, square) == 0 {
            return Err(MoveError::IllegalMove(square));
        }

        Ok(self.place(Action::from_square(square)))
    }

    /// Applies an action already known to be legal. The turn passes back to the mover when the opponent has no reply.
    pub fn place(&self, action: Action) -> Self {
        let mover = self.player_to_move();
        let (own, opponent) = self.simulate(mover, action);

        let (black_board, white_board) = if mover == BLACK {
            (own, opponent)
        } else {
            (opponent, own)
        };

        let opponent_can_move = Self::has_legal_move(opponent, own);
        let p1_turn_to_move = if opponent_can_move || !Self::has_legal_move(own, opponent) {
            mover != BLACK
        } else {
            mover == BLACK
        };

        Self {
            p1_turn_to_move,
            black_board,
            white_board,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !Self::has_legal_move(self.black_board, self.white_board)
            && !Self::has_legal_move(self.white_board, self.black_board)
    }

    pub fn number_of_discs(&self) -> usize {
        (self.black_board | self.white_board).count_ones() as usize
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "     a   b   c   d   e   f   g   h")?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for y in 0..BOARD_WIDTH {
            write!(f, " {} |", y + 1)?;
            for x in 0..BOARD_WIDTH {
                let bit = 1 << (y * BOARD_WIDTH + x);
                let p = if self.black_board & bit != 0 {
                    "X"
                } else if self.white_board & bit != 0 {
                    "O"
                } else {
                    " "
                };
                write!(f, " {} |", p)?;
            }
            writeln!(f)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        Ok(())
    }
}
