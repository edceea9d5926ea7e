use super::Arrow;
use crate::display::TerminalUi;
use crate::player::{Activation, HumanPlayer};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Input the router cares about, already stripped of terminal details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Key(KeyCode),
    /// Left button press at a terminal coordinate.
    Click { column: u16, row: u16 },
    Interrupt,
}

impl UiEvent {
    pub fn from_crossterm(event: Event) -> Option<UiEvent> {
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => Some(UiEvent::Interrupt),
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => Some(UiEvent::Key(code)),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => Some(UiEvent::Click { column, row }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads terminal events on a blocking thread until the receiver goes away.
pub fn spawn_event_reader() -> mpsc::UnboundedReceiver<UiEvent> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::task::spawn_blocking(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(Duration::from_millis(100)) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if let Some(ev) = UiEvent::from_crossterm(ev) {
                        if tx.send(ev).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    warn!("terminal read failed: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!("terminal poll failed: {}", e);
                break;
            }
        }
    });
    rx
}

/// Routes terminal input to the board, the dialog and the exit prompt.
pub struct InputRouter {
    player: Arc<HumanPlayer<TerminalUi>>,
    ui: Arc<TerminalUi>,
}

impl InputRouter {
    pub fn new(player: Arc<HumanPlayer<TerminalUi>>, ui: Arc<TerminalUi>) -> Self {
        Self { player, ui }
    }

    pub fn handle(&self, event: UiEvent) -> Flow {
        if self.ui.exit_prompt_open() {
            return match event {
                // 確認中の Ctrl-C は y と同じ
                UiEvent::Key(KeyCode::Char('y' | 'Y')) | UiEvent::Interrupt => Flow::Quit,
                UiEvent::Key(KeyCode::Char('n' | 'N') | KeyCode::Esc) => {
                    self.ui.set_exit_prompt(None);
                    Flow::Continue
                }
                _ => Flow::Continue,
            };
        }

        if event == UiEvent::Interrupt {
            return self.request_exit();
        }

        if self.ui.dialog_open() {
            if matches!(
                event,
                UiEvent::Key(KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
                    | UiEvent::Click { .. }
            ) {
                self.ui.close_dialog();
            }
            return Flow::Continue;
        }

        match event {
            UiEvent::Key(KeyCode::Char('q') | KeyCode::Esc) => self.request_exit(),
            UiEvent::Key(KeyCode::Up) => self.navigate(Arrow::Up),
            UiEvent::Key(KeyCode::Down) => self.navigate(Arrow::Down),
            UiEvent::Key(KeyCode::Left) => self.navigate(Arrow::Left),
            UiEvent::Key(KeyCode::Right) => self.navigate(Arrow::Right),
            UiEvent::Key(KeyCode::Tab) => {
                self.ui.tab();
                Flow::Continue
            }
            UiEvent::Key(KeyCode::Enter | KeyCode::Char(' ')) => {
                self.activate(self.ui.focused());
                Flow::Continue
            }
            UiEvent::Click { column, row } => {
                if let Some(index) = self.ui.cell_at(column, row) {
                    self.ui.pointer_activated(index);
                    self.activate(index);
                }
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn navigate(&self, arrow: Arrow) -> Flow {
        self.ui.navigate(arrow);
        Flow::Continue
    }

    fn activate(&self, index: usize) {
        let activation = self.player.activate_cell(index);
        if activation != Activation::Inert {
            debug!(index, ?activation, "cell activated");
        }
    }

    fn request_exit(&self) -> Flow {
        match self.player.progress().exit_confirmation() {
            Some(prompt) => {
                self.ui.set_exit_prompt(Some(prompt));
                Flow::Continue
            }
            None => Flow::Quit,
        }
    }
}
