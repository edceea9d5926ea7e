use crate::core::{Board, Color, Move};
use serde::{Deserialize, Serialize};

/// Server -> Client (one driver callback per message)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServerMessage {
    AssignColor { color: Color },
    YourTurn { board: Board },
    OpponentThinking,
    OpponentMoved,
    TurnSkipped,
    OpponentSkipped,
    BoardChanged { board: Board },
    GameOver { board: Board },
    Error { message: String },
}

/// Client -> Server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMessage {
    Join { name: String },
    MakeMove { cell: Move },
    GameOverAcknowledged,
}
