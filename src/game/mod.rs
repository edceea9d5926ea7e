use std::sync::atomic::{AtomicBool, Ordering};

pub const EXIT_CONFIRMATION: &str = "Are you sure you want to exit? Your game will be lost.";

/// 対局中フラグ
///
/// Set on the first accepted move, cleared as soon as game over is notified.
/// Shared between the player and whatever decides whether quitting is safe.
#[derive(Debug, Default)]
pub struct GameProgress {
    in_progress: AtomicBool,
}

impl GameProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    pub fn start(&self) {
        self.in_progress.store(true, Ordering::SeqCst);
    }

    pub fn finish(&self) {
        self.in_progress.store(false, Ordering::SeqCst);
    }

    /// Message to confirm before leaving, or None when leaving loses nothing.
    pub fn exit_confirmation(&self) -> Option<&'static str> {
        self.is_in_progress().then_some(EXIT_CONFIRMATION)
    }
}
