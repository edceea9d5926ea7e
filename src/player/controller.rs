use crate::core::{Board, Color, Move};
use crate::error::PlayerError;
use async_trait::async_trait;

/// プレイヤー操作のtrait
///
/// The game driver talks to humans and automated opponents through this
/// contract alone. Async methods are awaited by the driver before it moves on.
#[async_trait]
pub trait Player: Send + Sync {
    fn set_color(&self, color: Color) -> Result<(), PlayerError>;

    /// Resolves with exactly one legal move.
    async fn get_turn(&self, board: &Board) -> Result<Move, PlayerError>;

    fn notify_before_opponent_turn(&self);
    fn notify_opponent_turn(&self);
    fn notify_skipped_turn(&self);
    fn notify_opponent_skipped(&self);

    async fn notify_board_changed(&self, board: &Board);

    /// Returns once the player has seen (and closed) the result.
    async fn notify_game_over(&self, board: &Board) -> Result<(), PlayerError>;
}
