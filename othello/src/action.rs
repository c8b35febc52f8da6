use serde::de::Error;
use serde::de::{Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::anyhow;

use super::{MoveError, BOARD_SIZE, BOARD_WIDTH};

/// Placement of a disc on a square indexed `row * 8 + column`, `0..64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action(u8);

impl Action {
    pub fn new(square: usize) -> Result<Self, MoveError> {
        if square >= BOARD_SIZE {
            return Err(MoveError::OutOfRange(square));
        }

        Ok(Action(square as u8))
    }

    pub(crate) fn from_square(square: usize) -> Self {
        debug_assert!(square < BOARD_SIZE);
        Action(square as u8)
    }

    pub fn square(&self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for Action {
    type Error = MoveError;

    fn try_from(square: usize) -> Result<Self, Self::Error> {
        Action::new(square)
    }
}

/// Accepts either a square index (`19`) or algebraic notation (`d3`).
impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(square) = s.parse::<usize>() {
            return Ok(Action::new(square)?);
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(column @ 'a'..='h'), Some(row @ '1'..='8'), None) => {
                let column = column as usize - 'a' as usize;
                let row = row as usize - '1' as usize;
                Ok(Action::from_square(row * BOARD_WIDTH + column))
            }
            _ => Err(anyhow!("Action must be a square from 0-63 or a-h1-8, got {}", s)),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let column = (b'a' + (self.square() % BOARD_WIDTH) as u8) as char;
        let row = self.square() / BOARD_WIDTH + 1;
        write!(f, "{}{}", column, row)
    }
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.0)
    }
}

struct ActionVisitor {}

impl ActionVisitor {
    fn new() -> Self {
        Self {}
    }
}

impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("Expecting an integer from 0-63 that represents the square a disc was placed on.")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Action::new(v as usize).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_u8(ActionVisitor::new())
    }
}
