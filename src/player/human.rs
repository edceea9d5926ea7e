use crate::config::TimingConfig;
use crate::core::{Board, Cell, Color, Move};
use crate::error::PlayerError;
use crate::game::GameProgress;
use crate::logic::is_legal;
use crate::player::animation::AnimationSequencer;
use crate::player::opponent_wait::{OpponentWaitNotifier, WaitPhase};
use crate::player::{GameSummary, Player};
use crate::ui::{cell_views, Ui};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;
use tokio::time::sleep;
use tracing::{debug, info, warn};

pub const INVALID_MOVE: &str = "Invalid move!";
pub const TURN_SKIPPED: &str = "your turn was skipped";
pub const OPPONENT_SKIPPED: &str = "your opponent's turn was skipped";

/// What happened to a cell activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// No turn is pending.
    Inert,
    /// Occupied or off-board target, silently dropped.
    Ignored,
    /// Empty cell without a capture line.
    Rejected,
    Accepted(Move),
}

struct PendingTurn {
    board: Board,
    resolver: oneshot::Sender<Move>,
}

/// 人間プレイヤー
///
/// Turns UI input into driver-facing turn results. Every cell activation goes
/// through [`HumanPlayer::activate_cell`], which checks the single pending
/// turn, if any.
pub struct HumanPlayer<U: Ui> {
    ui: Arc<U>,
    timing: TimingConfig,
    progress: Arc<GameProgress>,
    pending: Mutex<Option<PendingTurn>>,
    animation: AnimationSequencer,
    opponent_wait: OpponentWaitNotifier<U>,
}

impl<U: Ui> HumanPlayer<U> {
    pub fn new(ui: Arc<U>, timing: TimingConfig, progress: Arc<GameProgress>) -> Self {
        Self {
            animation: AnimationSequencer::new(timing.animation()),
            opponent_wait: OpponentWaitNotifier::new(
                Arc::clone(&ui),
                timing.opponent_grace(),
                timing.opponent_dwell(),
            ),
            ui,
            timing,
            progress,
            pending: Mutex::new(None),
        }
    }

    pub fn progress(&self) -> &Arc<GameProgress> {
        &self.progress
    }

    pub fn opponent_wait_phase(&self) -> WaitPhase {
        self.opponent_wait.phase()
    }

    pub fn is_awaiting_move(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|turn| !turn.resolver.is_closed())
    }

    /// Single entry point for "the player picked this cell".
    pub fn activate_cell(&self, index: usize) -> Activation {
        let mut pending = self.lock_pending();
        let Some(turn) = pending.as_ref() else {
            return Activation::Inert;
        };

        if turn.board.cell(index) != Some(Cell::Empty) {
            return Activation::Ignored;
        }

        if !is_legal(&turn.board, index) {
            drop(pending);
            debug!(index, "rejected illegal move");
            self.ui.show_toast(INVALID_MOVE, None);
            return Activation::Rejected;
        }

        let (Some(turn), Some(mv)) = (pending.take(), Move::new(index)) else {
            return Activation::Ignored;
        };
        drop(pending);

        if turn.resolver.send(mv).is_err() {
            // get_turn was dropped by the driver
            warn!(%mv, "turn request no longer awaited");
            self.ui.set_player_turn(false);
            return Activation::Inert;
        }

        info!(%mv, "player move accepted");
        self.ui.set_player_turn(false);
        self.progress.start();
        self.ui.prevent_restart();
        Activation::Accepted(mv)
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<PendingTurn>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<U: Ui> Player for HumanPlayer<U> {
    fn set_color(&self, color: Color) -> Result<(), PlayerError> {
        if color != Color::Black {
            return Err(PlayerError::UnsupportedColor(color));
        }
        Ok(())
    }

    async fn get_turn(&self, board: &Board) -> Result<Move, PlayerError> {
        let (resolver, chosen) = oneshot::channel();
        {
            let mut pending = self.lock_pending();
            if pending
                .as_ref()
                .is_some_and(|turn| !turn.resolver.is_closed())
            {
                return Err(PlayerError::TurnAlreadyPending);
            }
            *pending = Some(PendingTurn {
                board: board.clone(),
                resolver,
            });
        }

        self.ui.set_player_turn(true);
        debug!("waiting for player move");

        chosen.await.map_err(|_| PlayerError::TurnAbandoned)
    }

    fn notify_before_opponent_turn(&self) {
        self.opponent_wait.arm();
    }

    fn notify_opponent_turn(&self) {
        self.opponent_wait.complete();
    }

    fn notify_skipped_turn(&self) {
        self.ui.show_toast(TURN_SKIPPED, None);
    }

    fn notify_opponent_skipped(&self) {
        self.ui.show_toast(OPPONENT_SKIPPED, None);
    }

    async fn notify_board_changed(&self, board: &Board) {
        self.animation.begin().await;
        self.ui.render_cells(&cell_views(board));
    }

    async fn notify_game_over(&self, board: &Board) -> Result<(), PlayerError> {
        self.progress.finish();

        self.animation.settled().await;
        sleep(self.timing.game_over_delay()).await;

        let summary = GameSummary::from_board(board);
        info!(
            black = summary.black,
            white = summary.white,
            outcome = %summary.outcome,
            "game over"
        );
        self.ui.show_dialog(&summary).await?;
        Ok(())
    }
}
