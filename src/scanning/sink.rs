use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::mpsc;

use crate::models::{Detection, Rect};

const ENABLE_LOGS: bool = true;

use crate::log_warn;

/// A detection that passed the scan-window test on some frame.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedScan {
    pub session_id: String,
    pub frame_seq: u64,
    pub captured_at: DateTime<Utc>,
    pub accepted_at: DateTime<Utc>,
    pub scan_window: Rect,
    pub detection: Detection,
}

/// Business action for an accepted scan (navigation, lookup, ...).
/// Called on the reducer task once per qualifying frame; keep it quick.
pub trait ResultSink: Send + Sync + 'static {
    fn on_accepted(&self, scan: &AcceptedScan);
}

pub struct LoggingSink;

impl ResultSink for LoggingSink {
    fn on_accepted(&self, scan: &AcceptedScan) {
        log::info!(
            "scanned {:?} ({:?}) on frame {} in session {}",
            scan.detection.payload,
            scan.detection.format,
            scan.frame_seq,
            scan.session_id
        );
    }
}

/// Forwards accepted scans to an async consumer. Full or closed channels drop the scan.
pub struct ChannelSink {
    tx: mpsc::Sender<AcceptedScan>,
}

impl ChannelSink {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<AcceptedScan>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl ResultSink for ChannelSink {
    fn on_accepted(&self, scan: &AcceptedScan) {
        if let Err(err) = self.tx.try_send(scan.clone()) {
            log_warn!("accepted scan for frame {} not delivered: {err}", scan.frame_seq);
        }
    }
}
