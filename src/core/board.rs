use super::types::{Cell, Position};
use super::CELL_COUNT;
use serde::{Deserialize, Serialize};

/// 盤面のスナップショット
///
/// The engine owns the real board; the player only ever reads copies of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Cell>", into = "Vec<Cell>")]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Board { cells }
    }

    /// Standard opening position.
    pub fn initial() -> Self {
        let mut board = Board::empty();
        board.set(Position::new(3, 3), Cell::White);
        board.set(Position::new(3, 4), Cell::Black);
        board.set(Position::new(4, 3), Cell::Black);
        board.set(Position::new(4, 4), Cell::White);
        board
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// 範囲外は None
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// (black, white)
    pub fn count(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(black, white), cell| match cell {
            Cell::Black => (black + 1, white),
            Cell::White => (black, white + 1),
            Cell::Empty => (black, white),
        })
    }
}

impl TryFrom<Vec<Cell>> for Board {
    type Error = String;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        let len = cells.len();
        let cells: [Cell; CELL_COUNT] = cells
            .try_into()
            .map_err(|_| format!("expected {} cells, got {}", CELL_COUNT, len))?;
        Ok(Board { cells })
    }
}

impl From<Board> for Vec<Cell> {
    fn from(board: Board) -> Self {
        board.cells.to_vec()
    }
}
