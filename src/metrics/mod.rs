mod types;

pub use types::{MetricsSnapshot, VerdictCounts};

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::scanning::{AcceptedScan, ScanVerdict};

const MAX_RECENT_ACCEPTED: usize = 20;

/// Counters shared by the frame loop, the reducer loop and whoever asks for a snapshot.
#[derive(Clone, Default)]
pub struct ScanMetrics {
    inner: Arc<Mutex<MetricsState>>,
}

#[derive(Default)]
struct MetricsState {
    frame_count: u64,
    detection_count: u64,
    capture_failures: u64,
    superseded_count: u64,
    verdicts: VerdictCounts,
    recent_accepted: VecDeque<AcceptedScan>,
}

impl ScanMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_frame(&self, detections: usize) {
        let mut state = self.inner.lock().await;
        state.frame_count += 1;
        state.detection_count += detections as u64;
    }

    pub async fn record_capture_failure(&self) {
        self.inner.lock().await.capture_failures += 1;
    }

    pub async fn record_superseded(&self, count: u64) {
        self.inner.lock().await.superseded_count += count;
    }

    pub async fn record_verdict(&self, verdict: &ScanVerdict) {
        let mut state = self.inner.lock().await;
        let counts = &mut state.verdicts;
        match verdict {
            ScanVerdict::Accepted { .. } => counts.accepted += 1,
            ScanVerdict::EmptyBatch => counts.empty_batch += 1,
            ScanVerdict::MissingBoundingBox => counts.missing_bounding_box += 1,
            ScanVerdict::NoScanWindow => counts.no_scan_window += 1,
            ScanVerdict::OutsideWindow => counts.outside_window += 1,
        }
    }

    pub async fn record_accepted(&self, scan: AcceptedScan) {
        let mut state = self.inner.lock().await;
        state.recent_accepted.push_back(scan);
        if state.recent_accepted.len() > MAX_RECENT_ACCEPTED {
            state.recent_accepted.pop_front();
        }
    }

    pub async fn get_snapshot(&self) -> MetricsSnapshot {
        let state = self.inner.lock().await;
        MetricsSnapshot {
            frame_count: state.frame_count,
            detection_count: state.detection_count,
            capture_failures: state.capture_failures,
            superseded_count: state.superseded_count,
            verdicts: state.verdicts.clone(),
            recent_accepted: state.recent_accepted.iter().cloned().collect(),
        }
    }

    pub async fn reset(&self) {
        *self.inner.lock().await = MetricsState::default();
    }
}
