use serde::{Deserialize, Serialize};

use crate::scanning::AcceptedScan;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictCounts {
    pub accepted: u64,
    pub empty_batch: u64,
    pub missing_bounding_box: u64,
    pub no_scan_window: u64,
    pub outside_window: u64,
}

impl VerdictCounts {
    pub fn total(&self) -> u64 {
        self.accepted
            + self.empty_batch
            + self.missing_bounding_box
            + self.no_scan_window
            + self.outside_window
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    /// Frames that made it through the detector.
    pub frame_count: u64,
    pub detection_count: u64,
    pub capture_failures: u64,
    /// Batches overwritten in the mailbox before the reducer read them.
    pub superseded_count: u64,
    pub verdicts: VerdictCounts,
    pub recent_accepted: Vec<AcceptedScan>,
}
