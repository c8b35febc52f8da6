use super::DIRECTIONS;

#[inline]
fn shift(bits: u64, direction: i32) -> u64 {
    if direction > 0 {
        bits << direction
    } else {
        bits >> -direction
    }
}

/// Every empty square where a disc of `own` would flank at least one disc of `opponent`.
pub fn legal_moves(own: u64, opponent: u64) -> u64 {
    let empty = !(own | opponent);
    let mut moves = 0;

    for (direction, mask) in DIRECTIONS {
        let opponent = opponent & mask;
        let mut run = shift(own, direction) & opponent;
        for _ in 0..5 {
            run |= shift(run, direction) & opponent;
        }

        moves |= shift(run, direction) & empty;
    }

    moves
}

/// The opposing discs flipped when `own` places a disc on `square`.
pub fn flips(own: u64, opponent: u64, square: usize) -> u64 {
    let placed = 1u64 << square;
    let mut flipped = 0;

    for (direction, mask) in DIRECTIONS {
        let opponent = opponent & mask;
        let mut line = 0;
        let mut cursor = shift(placed, direction);
        while cursor & opponent != 0 {
            line |= cursor;
            cursor = shift(cursor, direction);
        }

        if line != 0 && cursor & own != 0 {
            flipped |= line;
        }
    }

    flipped
}

pub fn squares(mut board: u64) -> impl Iterator<Item = usize> {
    std::iter::from_fn(move || {
        if board == 0 {
            return None;
        }

        let square = board.trailing_zeros() as usize;
        board &= board - 1;
        Some(square)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{INITIAL_BLACK, INITIAL_WHITE};

    #[test]
    fn test_opening_moves_for_black() {
        let moves = legal_moves(INITIAL_BLACK, INITIAL_WHITE);
        let expected = (1 << 19) | (1 << 26) | (1 << 37) | (1 << 44);

        assert_eq!(moves, expected);
    }

    #[test]
    fn test_opening_moves_for_white() {
        let moves = legal_moves(INITIAL_WHITE, INITIAL_BLACK);
        let expected = (1 << 20) | (1 << 29) | (1 << 34) | (1 << 43);

        assert_eq!(moves, expected);
    }

    #[test]
    fn test_flips_single_disc() {
        let flipped = flips(INITIAL_BLACK, INITIAL_WHITE, 19);

        assert_eq!(flipped, 1 << 27);
    }

    #[test]
    fn test_flips_nothing_on_illegal_square() {
        assert_eq!(flips(INITIAL_BLACK, INITIAL_WHITE, 0), 0);
    }

    #[test]
    fn test_no_wrap_around_right_edge() {
        // Own disc on h1 (7), opponent on a2 (8), empty b2 (9): a run may not continue across the edge.
        let own = 1 << 7;
        let opponent = 1 << 8;

        assert_eq!(legal_moves(own, opponent) & (1 << 9), 0);
    }

    #[test]
    fn test_squares_iterates_set_bits() {
        let board = (1 << 3) | (1 << 40) | (1 << 63);

        assert_eq!(squares(board).collect::<Vec<_>>(), vec![3, 40, 63]);
    }
}
