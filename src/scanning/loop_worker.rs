use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::{
    camera::{Detector, FrameSource},
    metrics::ScanMetrics,
    models::{DetectionBatch, DetectorOptions},
};

use super::mailbox::{BatchInbox, BatchPoster};
use super::reducer::{reduce_batch, ScanVerdict};
use super::sink::{AcceptedScan, ResultSink};
use super::window::ScanWindowHandle;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info};

const FRAME_STATS_EVERY: u64 = 50;

pub fn frame_interval(frame_rate_cap: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(frame_rate_cap.max(1)))
}

/// Producer side: capture and detect at most `frame_rate_cap` times a second
/// and post each batch without waiting for the reducer. Batches are numbered
/// here, from 1, in capture order; the source's own counter is not trusted.
pub async fn frame_loop(
    source: Arc<dyn FrameSource>,
    detector: Arc<dyn Detector>,
    options: DetectorOptions,
    frame_rate_cap: u32,
    poster: BatchPoster,
    metrics: ScanMetrics,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(frame_interval(frame_rate_cap));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut frames: u64 = 0;
    let mut next_seq: u64 = 1;
    let mut window_start = Instant::now();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match process_frame(&source, &detector, &options, next_seq).await {
                    Ok(Some(batch)) => {
                        next_seq += 1;
                        metrics.record_frame(batch.detections.len()).await;
                        log_debug!("frame {} -> {} detections", batch.frame_seq, batch.detections.len());
                        if !poster.post(batch) {
                            log_info!("reducer gone, frame loop shutting down");
                            break;
                        }

                        frames += 1;
                        if frames % FRAME_STATS_EVERY == 0 {
                            let elapsed = window_start.elapsed().as_secs_f64();
                            log_info!("{} frames in {:.1}s ({:.1} fps)", FRAME_STATS_EVERY, elapsed, FRAME_STATS_EVERY as f64 / elapsed);
                            window_start = Instant::now();
                        }
                    }
                    Ok(None) => {}
                    Err(err) => {
                        metrics.record_capture_failure().await;
                        log_error!("frame processing failed: {err:?}");
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("frame loop shutting down");
                break;
            }
        }
    }
}

async fn process_frame(
    source: &Arc<dyn FrameSource>,
    detector: &Arc<dyn Detector>,
    options: &DetectorOptions,
    frame_seq: u64,
) -> Result<Option<DetectionBatch>> {
    let source = Arc::clone(source);
    let detector = Arc::clone(detector);
    let options = options.clone();

    tokio::task::spawn_blocking(move || -> Result<Option<DetectionBatch>> {
        let Some(frame) = source.capture().context("frame capture failed")? else {
            return Ok(None);
        };
        let detections = detector.detect(&frame, &options);
        Ok(Some(DetectionBatch::new(
            frame_seq,
            frame.captured_at,
            detections,
        )))
    })
    .await
    .context("frame worker join failed")?
}

/// Consumer side: one verdict per delivered batch, against the scan window as
/// it stands at that moment.
pub async fn reducer_loop(
    session_id: String,
    mut inbox: BatchInbox,
    window: ScanWindowHandle,
    sink: Arc<dyn ResultSink>,
    metrics: ScanMetrics,
    cancel_token: CancellationToken,
) {
    loop {
        tokio::select! {
            delivery = inbox.next() => {
                let Some(delivery) = delivery else {
                    log_info!("frame loop gone, reducer loop shutting down");
                    break;
                };

                if delivery.superseded > 0 {
                    metrics.record_superseded(delivery.superseded).await;
                    log_debug!("{} batches superseded before frame {}", delivery.superseded, delivery.batch.frame_seq);
                }

                let scan_window = window.snapshot();
                let verdict = reduce_batch(&delivery.batch, &scan_window);
                metrics.record_verdict(&verdict).await;

                match verdict {
                    ScanVerdict::Accepted { detection } => {
                        let scan = AcceptedScan {
                            session_id: session_id.clone(),
                            frame_seq: delivery.batch.frame_seq,
                            captured_at: delivery.batch.captured_at,
                            accepted_at: Utc::now(),
                            scan_window,
                            detection,
                        };
                        sink.on_accepted(&scan);
                        metrics.record_accepted(scan).await;
                    }
                    rejected => {
                        log_debug!("frame {}: {}", delivery.batch.frame_seq, rejected.label());
                    }
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("reducer loop shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_follows_the_cap() {
        assert_eq!(frame_interval(5).as_millis(), 200);
        assert_eq!(frame_interval(0), Duration::from_secs(1));
    }
}
