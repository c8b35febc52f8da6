use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Square {0} is outside of the board")]
    OutOfRange(usize),
    #[error("Square {0} does not flip any opposing disc")]
    IllegalMove(usize),
}
