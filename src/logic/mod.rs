use crate::core::{Board, Cell, Move, Position, CELL_COUNT};

/// 8方向 (Δrow, Δcolumn)
pub const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// 人間側の手番は常に黒
const MOVER: Cell = Cell::Black;
const OPPONENT: Cell = Cell::White;

/// 着手可能判定
///
/// Only checks whether placing a black disc at `index` would capture at least
/// one line of white discs. Flipping is the engine's job.
pub fn is_legal(board: &Board, index: usize) -> bool {
    if board.cell(index) != Some(Cell::Empty) {
        return false;
    }

    let origin = Position::from_index(index);
    DIRECTIONS
        .iter()
        .any(|&(delta_row, delta_column)| captures_line(board, origin, delta_row, delta_column))
}

/// 合法手一覧 (インデックス順)
pub fn legal_moves(board: &Board) -> Vec<Move> {
    (0..CELL_COUNT)
        .filter(|&index| is_legal(board, index))
        .filter_map(Move::new)
        .collect()
}

fn captures_line(board: &Board, origin: Position, delta_row: isize, delta_column: isize) -> bool {
    let mut current = origin;
    let mut step = 1;

    while let Some(next) = current.offset(delta_row, delta_column) {
        let cell = board.get(next);
        if step == 1 && cell != OPPONENT {
            return false;
        }
        if cell == Cell::Empty {
            return false;
        }
        if cell == MOVER {
            return true;
        }
        current = next;
        step += 1;
    }

    false
}
