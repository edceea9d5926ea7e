use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// Single-slot gate that keeps board redraws from overlapping.
///
/// The slot holds the instant at which the most recent redraw has been on
/// screen for its minimum duration. Callers queue on the mutex in FIFO order.
pub struct AnimationSequencer {
    min_duration: Duration,
    settles_at: Mutex<Option<Instant>>,
}

impl AnimationSequencer {
    pub fn new(min_duration: Duration) -> Self {
        Self {
            min_duration,
            settles_at: Mutex::new(None),
        }
    }

    /// Wait for the previous animation, then claim the slot for a new one.
    /// Returns the instant the new animation may be drawn.
    pub async fn begin(&self) -> Instant {
        let mut settles_at = self.settles_at.lock().await;
        if let Some(deadline) = *settles_at {
            sleep_until(deadline).await;
        }
        let now = Instant::now();
        *settles_at = Some(now + self.min_duration);
        now
    }

    /// Wait until the most recent animation has settled.
    pub async fn settled(&self) {
        let settles_at = self.settles_at.lock().await;
        if let Some(deadline) = *settles_at {
            sleep_until(deadline).await;
        }
    }
}
