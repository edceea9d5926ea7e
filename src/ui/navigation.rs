use super::CellView;
use crate::core::{Position, BOARD_SIZE, CELL_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// 隣のマス (盤端は反対側へ回り込む)
pub fn neighbor(index: usize, arrow: Arrow) -> usize {
    let Position { row, column } = Position::from_index(index % CELL_COUNT);
    let wrap_back = BOARD_SIZE - 1;
    let (row, column) = match arrow {
        Arrow::Left => (row, (column + wrap_back) % BOARD_SIZE),
        Arrow::Right => (row, (column + 1) % BOARD_SIZE),
        Arrow::Up => ((row + wrap_back) % BOARD_SIZE, column),
        Arrow::Down => ((row + 1) % BOARD_SIZE, column),
    };
    Position::new(row, column).index()
}

/// Focus handling for the board grid. Never touches game state.
#[derive(Debug, Clone, Default)]
pub struct KeyboardNavigator {
    focus: usize,
    arrow_navigation: bool,
}

impl KeyboardNavigator {
    pub fn new(focus: usize) -> Self {
        KeyboardNavigator {
            focus: focus % CELL_COUNT,
            arrow_navigation: false,
        }
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    /// Focus ring is only drawn while this is set.
    pub fn is_arrow_navigation(&self) -> bool {
        self.arrow_navigation
    }

    pub fn arrow(&mut self, arrow: Arrow) -> usize {
        self.focus = neighbor(self.focus, arrow);
        self.arrow_navigation = true;
        self.focus
    }

    /// Moves to the next focusable cell after the current one, wrapping.
    /// Returns None (focus unchanged) when nothing is focusable.
    pub fn tab(&mut self, views: &[CellView; CELL_COUNT]) -> Option<usize> {
        let next = (1..=CELL_COUNT)
            .map(|step| (self.focus + step) % CELL_COUNT)
            .find(|&index| views[index].focusable)?;
        self.focus = next;
        self.arrow_navigation = true;
        Some(next)
    }

    /// ターン開始時: フォーカスが着手可能マスでなければ最初の候補へ移す。
    /// Arrow-navigation mode is left as it was.
    pub fn focus_first(&mut self, views: &[CellView; CELL_COUNT]) -> Option<usize> {
        if views[self.focus].focusable {
            return Some(self.focus);
        }
        let first = views.iter().position(|view| view.focusable)?;
        self.focus = first;
        Some(first)
    }

    pub fn pointer_activated(&mut self, index: usize) {
        self.focus = index % CELL_COUNT;
        self.arrow_navigation = false;
    }
}
