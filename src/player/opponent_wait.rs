use crate::ui::Ui;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

pub const WAITING_FOR_OPPONENT: &str = "Waiting for opponent...";

/// Observable phase of the waiting indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPhase {
    Idle,
    /// Grace timer pending, nothing on screen.
    Armed,
    /// Completed before the grace period ran out.
    Cancelled,
    /// Indicator on screen, dwell gate open.
    Visible,
    Dismissed,
}

enum WaitState {
    Idle,
    Armed {
        epoch: u64,
        timer: JoinHandle<()>,
    },
    Cancelled,
    Visible {
        epoch: u64,
        /// None once the completion half of the gate is satisfied.
        done: Option<oneshot::Sender<()>>,
    },
    Dismissed,
}

struct Inner {
    epoch: u64,
    state: WaitState,
}

impl Inner {
    /// Completes whatever is outstanding. No-op when nothing is.
    fn complete(&mut self) {
        self.state = match std::mem::replace(&mut self.state, WaitState::Idle) {
            WaitState::Armed { epoch, timer } => {
                timer.abort();
                debug!(epoch, "opponent wait cancelled before indicator");
                WaitState::Cancelled
            }
            WaitState::Visible { epoch, done } => {
                if let Some(done) = done {
                    let _ = done.send(());
                    debug!(epoch, "opponent turn complete, waiting for dwell");
                }
                WaitState::Visible { epoch, done: None }
            }
            other => other,
        };
    }
}

/// Deferred "Waiting for opponent..." toast.
///
/// `idle -> armed -> {cancelled | visible -> dismissed}`. Each `arm` gets a new
/// epoch so a timer that lost the race against `complete` never surfaces.
pub struct OpponentWaitNotifier<U: Ui> {
    ui: Arc<U>,
    grace: Duration,
    dwell: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl<U: Ui> OpponentWaitNotifier<U> {
    pub fn new(ui: Arc<U>, grace: Duration, dwell: Duration) -> Self {
        Self {
            ui,
            grace,
            dwell,
            inner: Arc::new(Mutex::new(Inner {
                epoch: 0,
                state: WaitState::Idle,
            })),
        }
    }

    pub fn phase(&self) -> WaitPhase {
        match lock(&self.inner).state {
            WaitState::Idle => WaitPhase::Idle,
            WaitState::Armed { .. } => WaitPhase::Armed,
            WaitState::Cancelled => WaitPhase::Cancelled,
            WaitState::Visible { .. } => WaitPhase::Visible,
            WaitState::Dismissed => WaitPhase::Dismissed,
        }
    }

    /// Start the grace timer. A previous waiter is completed first.
    pub fn arm(&self) {
        let mut inner = lock(&self.inner);
        inner.complete();
        inner.epoch += 1;
        let epoch = inner.epoch;

        let timer = tokio::spawn(surface(
            Arc::clone(&self.inner),
            Arc::clone(&self.ui),
            epoch,
            self.grace,
            self.dwell,
        ));
        inner.state = WaitState::Armed { epoch, timer };
        debug!(epoch, "opponent wait armed");
    }

    /// Signal that the awaited opponent turn is over.
    pub fn complete(&self) {
        lock(&self.inner).complete();
    }
}

impl<U: Ui> Drop for OpponentWaitNotifier<U> {
    fn drop(&mut self) {
        lock(&self.inner).complete();
    }
}

async fn surface<U: Ui>(
    inner: Arc<Mutex<Inner>>,
    ui: Arc<U>,
    epoch: u64,
    grace: Duration,
    dwell: Duration,
) {
    sleep(grace).await;

    let (done_tx, done_rx) = oneshot::channel();
    {
        let mut guard = lock(&inner);
        match guard.state {
            WaitState::Armed { epoch: current, .. } if current == epoch => {}
            _ => return,
        }
        guard.state = WaitState::Visible {
            epoch,
            done: Some(done_tx),
        };
    }
    debug!(epoch, "showing opponent wait indicator");

    let gate = Arc::clone(&inner);
    let dismiss = async move {
        // a dropped sender also counts as completion
        let _ = tokio::join!(done_rx, sleep(dwell));
        let mut guard = lock(&gate);
        if matches!(guard.state, WaitState::Visible { epoch: current, .. } if current == epoch) {
            guard.state = WaitState::Dismissed;
            debug!(epoch, "opponent wait indicator dismissed");
        }
    };
    ui.show_toast(WAITING_FOR_OPPONENT, Some(Box::pin(dismiss)));
}

// A poisoned lock only means a panic elsewhere; the state itself stays valid.
fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::RecordingUi;
    use tokio::time::Instant;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn notifier(ui: &Arc<RecordingUi>) -> OpponentWaitNotifier<RecordingUi> {
        OpponentWaitNotifier::new(Arc::clone(ui), ms(1_000), ms(500))
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_opponent_never_shows_indicator() {
        let ui = RecordingUi::new();
        let waiter = notifier(&ui);

        waiter.arm();
        assert_eq!(waiter.phase(), WaitPhase::Armed);
        sleep(ms(999)).await;
        waiter.complete();
        assert_eq!(waiter.phase(), WaitPhase::Cancelled);

        sleep(ms(5_000)).await;
        assert!(ui.toast_messages().is_empty());
        assert_eq!(waiter.phase(), WaitPhase::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_opponent_shows_indicator_until_complete() {
        let ui = RecordingUi::new();
        let waiter = notifier(&ui);
        let start = Instant::now();

        waiter.arm();
        sleep(ms(3_000)).await;
        assert_eq!(waiter.phase(), WaitPhase::Visible);
        assert_eq!(ui.toast_messages(), vec![WAITING_FOR_OPPONENT.to_string()]);

        let toast = ui.toasts.lock().unwrap()[0].clone();
        assert!(toast.shown_at - start >= ms(1_000));
        assert!(toast.auto_dismissed);
        assert_eq!(toast.dismissed_at(), None);

        let completed_at = Instant::now();
        waiter.complete();
        sleep(ms(10)).await;

        assert_eq!(waiter.phase(), WaitPhase::Dismissed);
        let dismissed_at = toast.dismissed_at().unwrap();
        assert!(dismissed_at >= completed_at);
        assert!(dismissed_at - toast.shown_at >= ms(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_indicator_respects_minimum_dwell() {
        let ui = RecordingUi::new();
        let waiter = notifier(&ui);

        waiter.arm();
        sleep(ms(1_100)).await;
        assert_eq!(waiter.phase(), WaitPhase::Visible);
        waiter.complete();

        sleep(ms(200)).await;
        assert_eq!(waiter.phase(), WaitPhase::Visible);

        sleep(ms(1_000)).await;
        assert_eq!(waiter.phase(), WaitPhase::Dismissed);
        let toast = ui.toasts.lock().unwrap()[0].clone();
        assert!(toast.dismissed_at().unwrap() - toast.shown_at >= ms(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_complete_is_idempotent() {
        let ui = RecordingUi::new();
        let waiter = notifier(&ui);

        waiter.complete();
        assert_eq!(waiter.phase(), WaitPhase::Idle);

        waiter.arm();
        waiter.complete();
        waiter.complete();
        assert_eq!(waiter.phase(), WaitPhase::Cancelled);

        sleep(ms(2_000)).await;
        assert!(ui.toast_messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_drops_previous_timer() {
        let ui = RecordingUi::new();
        let waiter = notifier(&ui);
        let start = Instant::now();

        waiter.arm();
        sleep(ms(600)).await;
        waiter.arm();
        sleep(ms(3_000)).await;

        let toasts = ui.toasts.lock().unwrap().clone();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].shown_at - start >= ms(1_600));
    }
}
