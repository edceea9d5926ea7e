use crate::core::{Cell, Position, BOARD_SIZE, CELL_COUNT};
use crate::player::GameSummary;
use crate::ui::{Arrow, CellView, Dismissal, KeyboardNavigator, Ui};
use async_trait::async_trait;
use crossterm::{cursor, queue, style::Stylize, terminal};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{debug, warn};

/// 盤面の描画開始行
const BOARD_TOP: u16 = 6;
/// 盤面の描画開始列 (行ラベル "NN |" の後)
const BOARD_LEFT: u16 = 4;
const CELL_WIDTH: u16 = 4;
/// 各行の間に空行を1行挟む
const ROW_HEIGHT: u16 = 2;

pub struct DisplayState {
    pub views: [CellView; CELL_COUNT],
    pub nav: KeyboardNavigator,
    pub player_turn: bool,
    pub status_msg: Option<String>,
    pub toast: Option<(u64, String)>,
    /// Toast held until its dismissal future completes; drawn on its own line.
    pub waiting: Option<(u64, String)>,
    pub dialog: Option<GameSummary>,
    pub exit_prompt: Option<&'static str>,
    out: Box<dyn Write + Send>,
}

impl DisplayState {
    fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            views: [CellView::default(); CELL_COUNT],
            nav: KeyboardNavigator::default(),
            player_turn: false,
            status_msg: None,
            toast: None,
            waiting: None,
            dialog: None,
            exit_prompt: None,
            out,
        }
    }

    fn redraw(&mut self) {
        if let Err(e) = self.draw() {
            warn!("terminal redraw failed: {}", e);
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let mut frame = String::new();

        frame.push_str("=== Reversi ===\r\n");
        let status = if self.player_turn {
            "Your turn (black)".to_string()
        } else {
            self.status_msg.clone().unwrap_or_default()
        };
        frame.push_str(&format!("{}\r\n", status.bold().yellow()));
        for slot in [&self.toast, &self.waiting] {
            match slot {
                Some((_, msg)) => {
                    frame.push_str(&format!("{}\r\n", msg.clone().black().on_white()))
                }
                None => frame.push_str("\r\n"),
            }
        }

        frame.push_str("    ");
        for column in 0..BOARD_SIZE {
            frame.push_str(&format!("  {} ", (b'a' + column as u8) as char));
        }
        frame.push_str("\r\n");
        frame.push_str(&format!("   +{}+\r\n", "----".repeat(BOARD_SIZE)));

        for row in 0..BOARD_SIZE {
            frame.push_str(&format!("{:2} |", row + 1));
            for column in 0..BOARD_SIZE {
                frame.push_str(&self.cell_text(Position::new(row, column).index()));
            }
            frame.push_str("|\r\n");

            if row < BOARD_SIZE - 1 {
                frame.push_str(&format!("   |{}|\r\n", "    ".repeat(BOARD_SIZE)));
            }
        }
        frame.push_str(&format!("   +{}+\r\n", "----".repeat(BOARD_SIZE)));

        let (black, white) = self.views.iter().fold((0, 0), |(b, w), view| match view.cell {
            Cell::Black => (b + 1, w),
            Cell::White => (b, w + 1),
            Cell::Empty => (b, w),
        });
        frame.push_str(&format!("Black: {}  White: {}\r\n", black, white));
        frame.push_str(
            "[Click]/[Enter]: Place | [Arrows]: Move | [Tab]: Next legal | [q]: Quit\r\n",
        );

        if let Some(summary) = &self.dialog {
            frame.push_str("\r\n");
            frame.push_str(&render_dialog(summary));
        }
        if let Some(prompt) = self.exit_prompt {
            frame.push_str(&format!("\r\n{} [y/n]\r\n", prompt.bold().red()));
        }

        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }

    fn cell_text(&self, index: usize) -> String {
        let view = self.views[index];
        let focused = self.nav.is_arrow_navigation() && self.nav.focus() == index;
        let target = self.player_turn && view.focusable;

        let char_str = match view.cell {
            Cell::Black => "●",
            Cell::White => "○",
            Cell::Empty if target => "+",
            Cell::Empty => ".",
        };
        let (prefix, suffix) = if focused { ("[", "]") } else { (" ", " ") };
        let cell_text = format!("{} {}{}", prefix, char_str, suffix);

        if focused {
            format!("{}", cell_text.yellow())
        } else if target {
            format!("{}", cell_text.green())
        } else {
            match view.cell {
                Cell::Black => format!("{}", cell_text.cyan()),
                Cell::White => format!("{}", cell_text.magenta()),
                Cell::Empty => cell_text,
            }
        }
    }
}

fn render_dialog(summary: &GameSummary) -> String {
    let width = 28;
    let mut text = format!("+{}+\r\n", "-".repeat(width));
    text.push_str(&format!("| {:<w$} |\r\n", summary.title(), w = width - 2));
    for (label, score) in summary.rows() {
        text.push_str(&format!("| {:<18}{:>8} |\r\n", label, score));
    }
    text.push_str(&format!("| {:<w$} |\r\n", "[Enter] close", w = width - 2));
    text.push_str(&format!("+{}+\r\n", "-".repeat(width)));
    text
}

/// 端末上のボード
///
/// crossterm implementation of [`Ui`]. Navigation and prompts are driven by
/// [`InputRouter`](crate::ui::InputRouter).
pub struct TerminalUi {
    state: Arc<Mutex<DisplayState>>,
    toast_seq: AtomicU64,
    toast_duration: Duration,
    dialog_closed: Notify,
    restart_allowed: AtomicBool,
}

impl TerminalUi {
    pub fn new(toast_duration: Duration) -> Self {
        Self::with_writer(Box::new(io::stdout()), toast_duration)
    }

    pub fn with_writer(out: Box<dyn Write + Send>, toast_duration: Duration) -> Self {
        Self {
            state: Arc::new(Mutex::new(DisplayState::new(out))),
            toast_seq: AtomicU64::new(0),
            toast_duration,
            dialog_closed: Notify::new(),
            restart_allowed: AtomicBool::new(true),
        }
    }

    fn lock(&self) -> MutexGuard<'_, DisplayState> {
        lock_state(&self.state)
    }

    fn update(&self, f: impl FnOnce(&mut DisplayState)) {
        let mut state = self.lock();
        f(&mut state);
        state.redraw();
    }

    /// Whether a dropped connection may silently start a fresh game.
    pub fn restart_allowed(&self) -> bool {
        self.restart_allowed.load(Ordering::SeqCst)
    }

    pub fn set_status(&self, msg: impl Into<String>) {
        let msg = msg.into();
        self.update(|state| state.status_msg = Some(msg));
    }

    pub fn focused(&self) -> usize {
        self.lock().nav.focus()
    }

    pub fn navigate(&self, arrow: Arrow) {
        self.update(|state| {
            state.nav.arrow(arrow);
        });
    }

    pub fn tab(&self) {
        self.update(|state| {
            let views = state.views;
            state.nav.tab(&views);
        });
    }

    pub fn pointer_activated(&self, index: usize) {
        self.update(|state| state.nav.pointer_activated(index));
    }

    /// Maps a terminal coordinate onto a board cell.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<usize> {
        cell_at(column, row)
    }

    pub fn dialog_open(&self) -> bool {
        self.lock().dialog.is_some()
    }

    /// Returns false when there was no dialog to close.
    pub fn close_dialog(&self) -> bool {
        let mut state = self.lock();
        if state.dialog.take().is_none() {
            return false;
        }
        state.redraw();
        self.dialog_closed.notify_one();
        true
    }

    pub fn exit_prompt_open(&self) -> bool {
        self.lock().exit_prompt.is_some()
    }

    pub fn set_exit_prompt(&self, prompt: Option<&'static str>) {
        self.update(|state| state.exit_prompt = prompt);
    }
}

pub fn cell_at(column: u16, row: u16) -> Option<usize> {
    let row_offset = row.checked_sub(BOARD_TOP)?;
    let column_offset = column.checked_sub(BOARD_LEFT)?;
    if row_offset % ROW_HEIGHT != 0 {
        return None;
    }
    let board_row = (row_offset / ROW_HEIGHT) as usize;
    let board_column = (column_offset / CELL_WIDTH) as usize;
    (board_row < BOARD_SIZE && board_column < BOARD_SIZE)
        .then(|| Position::new(board_row, board_column).index())
}

fn lock_state(state: &Mutex<DisplayState>) -> MutexGuard<'_, DisplayState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clear_toast(
    state: &Mutex<DisplayState>,
    id: u64,
    slot: impl FnOnce(&mut DisplayState) -> &mut Option<(u64, String)>,
) {
    let mut state = lock_state(state);
    let toast = slot(&mut *state);
    // a newer toast replaced this one already
    if matches!(toast, Some((current, _)) if *current == id) {
        *toast = None;
        state.redraw();
    }
}

#[async_trait]
impl Ui for TerminalUi {
    fn show_toast(&self, message: &str, dismiss: Option<Dismissal>) {
        let id = self.toast_seq.fetch_add(1, Ordering::SeqCst);
        let message = message.to_string();
        debug!(id, %message, held = dismiss.is_some(), "toast");

        let state = Arc::clone(&self.state);
        let duration = self.toast_duration;
        match dismiss {
            Some(dismiss) => {
                self.update(|state| state.waiting = Some((id, message)));
                tokio::spawn(async move {
                    dismiss.await;
                    clear_toast(&state, id, |state| &mut state.waiting);
                });
            }
            None => {
                self.update(|state| state.toast = Some((id, message)));
                tokio::spawn(async move {
                    tokio::time::sleep(duration).await;
                    clear_toast(&state, id, |state| &mut state.toast);
                });
            }
        }
    }

    /// The dialog is cleared by [`TerminalUi::close_dialog`].
    async fn show_dialog(&self, summary: &GameSummary) -> anyhow::Result<()> {
        self.update(|state| state.dialog = Some(summary.clone()));
        self.dialog_closed.notified().await;
        Ok(())
    }

    fn render_cells(&self, views: &[CellView; CELL_COUNT]) {
        self.update(|state| state.views = *views);
    }

    fn set_player_turn(&self, active: bool) {
        self.update(|state| {
            state.player_turn = active;
            if active {
                let views = state.views;
                state.nav.focus_first(&views);
            }
        });
    }

    fn prevent_restart(&self) {
        if self.restart_allowed.swap(false, Ordering::SeqCst) {
            debug!("restart disabled for the rest of the game");
        }
    }
}
