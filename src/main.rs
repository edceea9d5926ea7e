use crossterm::{cursor, event, execute, terminal};
use reversi_human::config::{PlayerConfig, ServerConfig};
use reversi_human::display::TerminalUi;
use reversi_human::game::GameProgress;
use reversi_human::logging;
use reversi_human::network::NetworkClient;
use reversi_human::player::HumanPlayer;
use reversi_human::ui::input::{spawn_event_reader, Flow};
use reversi_human::ui::InputRouter;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

const RECONNECT_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PlayerConfig::load_or_default();
    let log_path = logging::init(&config.log)?;
    info!(?config, "starting");

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    execute!(
        io::stdout(),
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture,
        cursor::Hide
    )?;

    let res = run(config).await;

    // ターミナル復帰
    execute!(
        io::stdout(),
        cursor::Show,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()?;

    if let Err(e) = &res {
        error!("{:#}", e);
        eprintln!("log written to {}", log_path.display());
    }
    res
}

async fn run(config: PlayerConfig) -> anyhow::Result<()> {
    let ui = Arc::new(TerminalUi::new(config.timing.toast()));
    let progress = Arc::new(GameProgress::new());
    let player = Arc::new(HumanPlayer::new(
        Arc::clone(&ui),
        config.timing,
        Arc::clone(&progress),
    ));
    let router = InputRouter::new(Arc::clone(&player), Arc::clone(&ui));
    let mut events = spawn_event_reader();

    let session = play(Arc::clone(&player), Arc::clone(&ui), config.server);
    tokio::pin!(session);

    loop {
        tokio::select! {
            res = &mut session => return res,
            Some(event) = events.recv() => {
                if router.handle(event) == Flow::Quit {
                    info!("quit requested");
                    return Ok(());
                }
            }
        }
    }
}

/// Connects and plays one game. A dropped connection reconnects until the
/// player has made a move; after that it is reported instead.
async fn play(
    player: Arc<HumanPlayer<TerminalUi>>,
    ui: Arc<TerminalUi>,
    server: ServerConfig,
) -> anyhow::Result<()> {
    loop {
        ui.set_status(format!("Connecting to {}...", server.addr));

        let res = match NetworkClient::connect(&server.addr).await {
            Ok(mut client) => {
                ui.set_status(format!("Playing as {} (black)", server.name));
                client.run(player.as_ref(), &server.name).await
            }
            Err(e) => Err(e),
        };

        match res {
            Ok(()) => return Ok(()),
            Err(e) if ui.restart_allowed() => {
                warn!("session ended before the first move, retrying: {:#}", e);
                ui.set_status(format!("Connection failed: {} (retrying)", e));
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    }
}
