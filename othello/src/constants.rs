pub const BOARD_WIDTH: usize = 8;
pub const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_WIDTH;

pub const INITIAL_BLACK: u64 = (1 << 28) | (1 << 35);
pub const INITIAL_WHITE: u64 = (1 << 27) | (1 << 36);

// Opponent masks which stop a run of discs from wrapping around an edge of the board.
pub const HORIZONTAL_MASK: u64 = 0x7e7e_7e7e_7e7e_7e7e;
pub const VERTICAL_MASK: u64 = 0x00ff_ffff_ffff_ff00;
pub const DIAGONAL_MASK: u64 = 0x007e_7e7e_7e7e_7e00;

pub const DIRECTIONS: [(i32, u64); 8] = [
    (1, HORIZONTAL_MASK),
    (-1, HORIZONTAL_MASK),
    (8, VERTICAL_MASK),
    (-8, VERTICAL_MASK),
    (7, DIAGONAL_MASK),
    (-7, DIAGONAL_MASK),
    (9, DIAGONAL_MASK),
    (-9, DIAGONAL_MASK),
];
