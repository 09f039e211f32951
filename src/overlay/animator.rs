use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Duration, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use super::scan_line::ScanLineAnimation;

/// Drives the scan-line offset on its own task. Purely visual: it shares
/// nothing with the detection path and simply repeats until stopped.
pub struct OverlayAnimator {
    animation: ScanLineAnimation,
    fps: u32,
    offset_tx: watch::Sender<f32>,
    task: Option<(CancellationToken, JoinHandle<()>)>,
}

impl OverlayAnimator {
    pub fn new(animation: ScanLineAnimation, fps: u32) -> Self {
        let (offset_tx, _rx) = watch::channel(0.0);
        Self {
            animation,
            fps: fps.max(1),
            offset_tx,
            task: None,
        }
    }

    /// Receiver the renderer reads the current offset from.
    pub fn subscribe(&self) -> watch::Receiver<f32> {
        self.offset_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    pub fn start(&mut self) {
        self.stop();

        let cancel_token = CancellationToken::new();
        let token = cancel_token.clone();
        let animation = self.animation;
        let offset_tx = self.offset_tx.clone();
        let tick = Duration::from_secs_f64(1.0 / f64::from(self.fps));

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let started = Instant::now();
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        offset_tx.send_replace(animation.offset_at(started.elapsed()));
                    }
                    _ = token.cancelled() => break,
                }
            }
        });

        self.task = Some((cancel_token, handle));
    }

    pub fn stop(&mut self) {
        if let Some((token, handle)) = self.task.take() {
            token.cancel();
            handle.abort();
        }
    }
}

impl Drop for OverlayAnimator {
    fn drop(&mut self) {
        self.stop();
    }
}
