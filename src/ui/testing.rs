//! Recording `Ui` double for async player tests.

use super::{CellView, Dismissal, Ui};
use crate::core::CELL_COUNT;
use crate::player::GameSummary;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct ToastRecord {
    pub message: String,
    pub shown_at: Instant,
    /// Only tracked for toasts with a dismissal future.
    pub dismissed_at: Arc<Mutex<Option<Instant>>>,
    pub auto_dismissed: bool,
}

impl ToastRecord {
    pub fn dismissed_at(&self) -> Option<Instant> {
        *self.dismissed_at.lock().unwrap()
    }
}

#[derive(Default)]
pub struct RecordingUi {
    pub toasts: Mutex<Vec<ToastRecord>>,
    pub renders: Mutex<Vec<(Instant, [CellView; CELL_COUNT])>>,
    pub dialogs: Mutex<Vec<(Instant, GameSummary)>>,
    pub player_turn: Mutex<Vec<bool>>,
    pub prevent_restart_calls: Mutex<usize>,
}

impl RecordingUi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn toast_messages(&self) -> Vec<String> {
        self.toasts
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.message.clone())
            .collect()
    }

    pub fn render_times(&self) -> Vec<Instant> {
        self.renders.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

#[async_trait]
impl Ui for RecordingUi {
    fn show_toast(&self, message: &str, dismiss: Option<Dismissal>) {
        let dismissed_at = Arc::new(Mutex::new(None));
        let auto_dismissed = dismiss.is_some();
        if let Some(dismiss) = dismiss {
            let slot = Arc::clone(&dismissed_at);
            tokio::spawn(async move {
                dismiss.await;
                *slot.lock().unwrap() = Some(Instant::now());
            });
        }
        self.toasts.lock().unwrap().push(ToastRecord {
            message: message.to_string(),
            shown_at: Instant::now(),
            dismissed_at,
            auto_dismissed,
        });
    }

    async fn show_dialog(&self, summary: &GameSummary) -> anyhow::Result<()> {
        self.dialogs
            .lock()
            .unwrap()
            .push((Instant::now(), summary.clone()));
        Ok(())
    }

    fn render_cells(&self, views: &[CellView; CELL_COUNT]) {
        self.renders.lock().unwrap().push((Instant::now(), *views));
    }

    fn set_player_turn(&self, active: bool) {
        self.player_turn.lock().unwrap().push(active);
    }

    fn prevent_restart(&self) {
        *self.prevent_restart_calls.lock().unwrap() += 1;
    }
}
