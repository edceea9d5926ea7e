use serde::{Deserialize, Serialize};
use std::fmt;

/// 石の色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

/// マスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    /// Accessible label of the cell.
    pub fn label(self) -> &'static str {
        match self {
            Cell::Black => "black",
            Cell::White => "white",
            Cell::Empty => "empty",
        }
    }
}

/// 盤面座標 (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }

    pub fn from_index(index: usize) -> Self {
        Position {
            row: index / super::BOARD_SIZE,
            column: index % super::BOARD_SIZE,
        }
    }

    pub fn index(self) -> usize {
        self.row * super::BOARD_SIZE + self.column
    }

    /// 一歩進めた座標。盤外なら None
    pub fn offset(self, delta_row: isize, delta_column: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(delta_row)?;
        let column = self.column.checked_add_signed(delta_column)?;
        if row < super::BOARD_SIZE && column < super::BOARD_SIZE {
            Some(Position { row, column })
        } else {
            None
        }
    }
}
