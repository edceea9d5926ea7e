use crate::core::Color;
use thiserror::Error;

/// Errors surfaced through the [`Player`](crate::player::Player) contract.
#[derive(Debug, Error)]
pub enum PlayerError {
    /// The human seat only plays black.
    #[error("unsupported color: {0}")]
    UnsupportedColor(Color),

    #[error("a turn is already pending")]
    TurnAlreadyPending,

    /// The player was torn down while the driver was still waiting for a move.
    #[error("turn request abandoned before a move was chosen")]
    TurnAbandoned,

    #[error(transparent)]
    Ui(#[from] anyhow::Error),
}
