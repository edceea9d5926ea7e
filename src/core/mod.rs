pub mod board;
pub mod r#move;
pub mod types;

pub use board::Board;
pub use r#move::Move;
pub use types::{Cell, Color, Position};

pub const BOARD_SIZE: usize = 8;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
