use crate::network::protocol::{ClientMessage, ServerMessage};
use crate::player::Player;
use anyhow::bail;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

/// What the session loop does after a message was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Continue,
    Send(ClientMessage),
    /// Send and end the session.
    Finish(ClientMessage),
}

/// Forwards one driver callback to the player.
///
/// Async callbacks are awaited here, so the next message is only read once the
/// player is done with this one.
pub async fn dispatch<P: Player + ?Sized>(player: &P, msg: ServerMessage) -> anyhow::Result<Reply> {
    let reply = match msg {
        ServerMessage::AssignColor { color } => {
            player.set_color(color)?;
            Reply::Continue
        }
        ServerMessage::YourTurn { board } => {
            let cell = player.get_turn(&board).await?;
            Reply::Send(ClientMessage::MakeMove { cell })
        }
        ServerMessage::OpponentThinking => {
            player.notify_before_opponent_turn();
            Reply::Continue
        }
        ServerMessage::OpponentMoved => {
            player.notify_opponent_turn();
            Reply::Continue
        }
        ServerMessage::TurnSkipped => {
            player.notify_skipped_turn();
            Reply::Continue
        }
        ServerMessage::OpponentSkipped => {
            player.notify_opponent_skipped();
            Reply::Continue
        }
        ServerMessage::BoardChanged { board } => {
            player.notify_board_changed(&board).await;
            Reply::Continue
        }
        ServerMessage::GameOver { board } => {
            player.notify_game_over(&board).await?;
            Reply::Finish(ClientMessage::GameOverAcknowledged)
        }
        ServerMessage::Error { message } => {
            warn!("server error: {}", message);
            Reply::Continue
        }
    };
    Ok(reply)
}

pub struct NetworkClient {
    stream: TcpStream,
}

impl NetworkClient {
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        info!("connected to {}", addr);
        Ok(Self { stream })
    }

    /// Plays one game. Returns once the game-over summary was dismissed.
    pub async fn run<P: Player + ?Sized>(&mut self, player: &P, name: &str) -> anyhow::Result<()> {
        let (reader, mut writer) = self.stream.split();
        let mut lines = BufReader::new(reader).lines();

        send(
            &mut writer,
            &ClientMessage::Join {
                name: name.to_string(),
            },
        )
        .await?;

        while let Some(line) = lines.next_line().await? {
            let msg: ServerMessage = serde_json::from_str(&line)?;
            debug!(?msg, "server message");

            match dispatch(player, msg).await? {
                Reply::Continue => {}
                Reply::Send(reply) => send(&mut writer, &reply).await?,
                Reply::Finish(reply) => {
                    send(&mut writer, &reply).await?;
                    return Ok(());
                }
            }
        }

        bail!("server closed the connection before the game ended")
    }
}

async fn send<W: AsyncWrite + Unpin>(writer: &mut W, msg: &ClientMessage) -> anyhow::Result<()> {
    let json = serde_json::to_string(msg)? + "\n";
    writer.write_all(json.as_bytes()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;
    use crate::core::{Board, Color, Move};
    use crate::error::PlayerError;
    use crate::game::GameProgress;
    use crate::player::{HumanPlayer, Outcome, WaitPhase};
    use crate::ui::testing::RecordingUi;
    use std::sync::Arc;
    use tokio::io::BufReader;
    use tokio::net::TcpListener;

    fn fast_timing() -> TimingConfig {
        TimingConfig {
            opponent_grace_ms: 50,
            opponent_dwell_ms: 10,
            animation_ms: 5,
            game_over_delay_ms: 1,
            toast_ms: 10,
        }
    }

    fn player(ui: &Arc<RecordingUi>) -> Arc<HumanPlayer<RecordingUi>> {
        Arc::new(HumanPlayer::new(
            Arc::clone(ui),
            fast_timing(),
            Arc::new(GameProgress::new()),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_notifications() {
        let ui = RecordingUi::new();
        let player = player(&ui);

        assert_eq!(
            dispatch(player.as_ref(), ServerMessage::OpponentThinking)
                .await
                .unwrap(),
            Reply::Continue
        );
        assert_eq!(player.opponent_wait_phase(), WaitPhase::Armed);
        dispatch(player.as_ref(), ServerMessage::OpponentMoved)
            .await
            .unwrap();
        assert_eq!(player.opponent_wait_phase(), WaitPhase::Cancelled);

        dispatch(
            player.as_ref(),
            ServerMessage::BoardChanged {
                board: Board::initial(),
            },
        )
        .await
        .unwrap();
        assert_eq!(ui.render_times().len(), 1);

        let reply = dispatch(
            player.as_ref(),
            ServerMessage::GameOver {
                board: Board::initial(),
            },
        )
        .await
        .unwrap();
        assert_eq!(reply, Reply::Finish(ClientMessage::GameOverAcknowledged));
        assert_eq!(ui.dialogs.lock().unwrap()[0].1.outcome, Outcome::Draw);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_rejects_white_seat() {
        let ui = RecordingUi::new();
        let player = player(&ui);
        let err = dispatch(
            player.as_ref(),
            ServerMessage::AssignColor {
                color: Color::White,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlayerError>(),
            Some(PlayerError::UnsupportedColor(Color::White))
        ));
    }

    #[tokio::test]
    async fn test_session_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        // minimal server: one move from the client, then game over
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let (reader, mut writer) = socket.split();
            let mut lines = BufReader::new(reader).lines();

            let join: ClientMessage =
                serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();

            for msg in [
                ServerMessage::AssignColor {
                    color: Color::Black,
                },
                ServerMessage::BoardChanged {
                    board: Board::initial(),
                },
                ServerMessage::YourTurn {
                    board: Board::initial(),
                },
            ] {
                let json = serde_json::to_string(&msg).unwrap() + "\n";
                writer.write_all(json.as_bytes()).await.unwrap();
            }

            let mv: ClientMessage =
                serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();

            for msg in [
                ServerMessage::OpponentThinking,
                ServerMessage::OpponentMoved,
                ServerMessage::GameOver {
                    board: Board::initial(),
                },
            ] {
                let json = serde_json::to_string(&msg).unwrap() + "\n";
                writer.write_all(json.as_bytes()).await.unwrap();
            }

            let ack: ClientMessage =
                serde_json::from_str(&lines.next_line().await.unwrap().unwrap()).unwrap();
            (join, mv, ack)
        });

        let ui = RecordingUi::new();
        let player = player(&ui);

        let session = tokio::spawn({
            let player = Arc::clone(&player);
            async move {
                let mut client = NetworkClient::connect(&addr).await?;
                client.run(player.as_ref(), "tester").await
            }
        });

        while !player.is_awaiting_move() {
            tokio::task::yield_now().await;
        }
        player.activate_cell(26);

        session.await.unwrap().unwrap();
        let (join, mv, ack) = server.await.unwrap();
        assert_eq!(
            join,
            ClientMessage::Join {
                name: "tester".to_string()
            }
        );
        assert_eq!(
            mv,
            ClientMessage::MakeMove {
                cell: Move::new(26).unwrap()
            }
        );
        assert_eq!(ack, ClientMessage::GameOverAcknowledged);
        assert!(!player.progress().is_in_progress());
        assert_eq!(ui.dialogs.lock().unwrap().len(), 1);
    }
}
