use crate::core::{Board, Cell, CELL_COUNT};
use crate::logic::legal_moves;
use crate::player::GameSummary;
use async_trait::async_trait;
use futures::future::BoxFuture;

pub mod input;
pub mod navigation;

#[cfg(test)]
pub mod testing;

pub use input::{InputRouter, UiEvent};
pub use navigation::{Arrow, KeyboardNavigator};

/// Completes when a toast should go away.
pub type Dismissal = BoxFuture<'static, ()>;

/// 1マス分の描画情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub cell: Cell,
    /// Reachable with Tab iff it is a legal move target.
    pub focusable: bool,
    pub label: &'static str,
}

impl Default for CellView {
    fn default() -> Self {
        CellView {
            cell: Cell::Empty,
            focusable: false,
            label: Cell::Empty.label(),
        }
    }
}

pub fn cell_views(board: &Board) -> [CellView; CELL_COUNT] {
    let mut views = [CellView::default(); CELL_COUNT];
    for (view, &cell) in views.iter_mut().zip(board.cells().iter()) {
        *view = CellView {
            cell,
            focusable: false,
            label: cell.label(),
        };
    }
    for mv in legal_moves(board) {
        views[mv.index()].focusable = true;
    }
    views
}

/// Services the human player needs from whatever is drawing the board.
///
/// Implementations must not call back into the player from these methods.
#[async_trait]
pub trait Ui: Send + Sync + 'static {
    /// Show a transient notice. With `dismiss`, the notice stays until that
    /// future completes; without it the UI picks its own display time.
    fn show_toast(&self, message: &str, dismiss: Option<Dismissal>);

    /// Show the game-over summary and wait until the user closes it.
    async fn show_dialog(&self, summary: &GameSummary) -> anyhow::Result<()>;

    fn render_cells(&self, views: &[CellView; CELL_COUNT]);

    /// Marks whether the board is currently accepting a move.
    fn set_player_turn(&self, active: bool);

    /// Called on every accepted move; stops anything that would silently
    /// restart the game underneath the player.
    fn prevent_restart(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Position;

    #[test]
    fn test_cell_views_mark_legal_cells_focusable() {
        let views = cell_views(&Board::initial());
        let focusable: Vec<usize> = (0..CELL_COUNT).filter(|&i| views[i].focusable).collect();
        assert_eq!(focusable, vec![19, 26, 37, 44]);

        let d4 = Position::new(3, 3).index();
        assert_eq!(views[d4].cell, Cell::White);
        assert_eq!(views[d4].label, "white");
        assert_eq!(views[0].label, "empty");
    }
}
