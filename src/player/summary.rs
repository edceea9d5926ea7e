use crate::core::Board;
use std::fmt;

/// 人間(黒)から見た勝敗
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
    Draw,
}

impl Outcome {
    pub fn classify(black: usize, white: usize) -> Outcome {
        match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::Won,
            std::cmp::Ordering::Less => Outcome::Lost,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Won => write!(f, "won"),
            Outcome::Lost => write!(f, "lost"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Final tally shown in the game-over dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub black: usize,
    pub white: usize,
    pub outcome: Outcome,
}

impl GameSummary {
    pub fn from_board(board: &Board) -> Self {
        let (black, white) = board.count();
        GameSummary {
            black,
            white,
            outcome: Outcome::classify(black, white),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.outcome {
            Outcome::Won => "You won!",
            Outcome::Lost => "You lost!",
            Outcome::Draw => "Draw!",
        }
    }

    /// (label, score) rows of the score table.
    pub fn rows(&self) -> [(&'static str, usize); 2] {
        [("Your Score", self.black), ("Opponent's Score", self.white)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, CELL_COUNT};

    fn board_with_counts(black: usize, white: usize) -> Board {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for cell in cells.iter_mut().take(black) {
            *cell = Cell::Black;
        }
        for cell in cells.iter_mut().skip(black).take(white) {
            *cell = Cell::White;
        }
        Board::from_cells(cells)
    }

    #[test]
    fn test_classify() {
        assert_eq!(Outcome::classify(34, 30), Outcome::Won);
        assert_eq!(Outcome::classify(30, 30), Outcome::Draw);
        assert_eq!(Outcome::classify(10, 54), Outcome::Lost);
    }

    #[test]
    fn test_summary_from_board() {
        let summary = GameSummary::from_board(&board_with_counts(34, 30));
        assert_eq!(summary.outcome, Outcome::Won);
        assert_eq!(summary.title(), "You won!");
        assert_eq!(
            summary.rows(),
            [("Your Score", 34), ("Opponent's Score", 30)]
        );

        let summary = GameSummary::from_board(&board_with_counts(20, 20));
        assert_eq!(summary.outcome, Outcome::Draw);
        assert_eq!(summary.title(), "Draw!");
    }
}
