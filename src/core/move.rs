use super::types::Position;
use super::CELL_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 着手 (マスのインデックス)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Move(usize);

impl Move {
    pub fn new(index: usize) -> Option<Move> {
        (index < CELL_COUNT).then_some(Move(index))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn position(self) -> Position {
        Position::from_index(self.0)
    }
}

impl TryFrom<usize> for Move {
    type Error = String;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Move::new(index).ok_or_else(|| format!("cell index {} out of range", index))
    }
}

impl From<Move> for usize {
    fn from(mv: Move) -> Self {
        mv.0
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let pos = self.position();
        // a1 .. h8
        let file = (b'a' + pos.column as u8) as char;
        write!(f, "{}{}", file, pos.row + 1)
    }
}
