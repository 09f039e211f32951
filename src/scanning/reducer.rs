use std::collections::HashSet;

use serde::Serialize;

use crate::models::{Detection, DetectionBatch, Rect};

/// Outcome of reducing one frame's detections against the scan window.
/// Everything except `Accepted` is a silent no-op for the frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ScanVerdict {
    Accepted { detection: Detection },
    EmptyBatch,
    MissingBoundingBox,
    /// No layout pass has established a window yet.
    NoScanWindow,
    OutsideWindow,
}

impl ScanVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ScanVerdict::Accepted { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScanVerdict::Accepted { .. } => "accepted",
            ScanVerdict::EmptyBatch => "empty",
            ScanVerdict::MissingBoundingBox => "no-bounding-box",
            ScanVerdict::NoScanWindow => "no-scan-window",
            ScanVerdict::OutsideWindow => "outside-window",
        }
    }
}

/// Keeps the first detection for each payload, preserving batch order.
pub fn dedup_by_payload(detections: &[Detection]) -> Vec<&Detection> {
    let mut seen = HashSet::with_capacity(detections.len());
    detections
        .iter()
        .filter(|detection| seen.insert(detection.payload.as_str()))
        .collect()
}

/// Candidate for this frame: the head of the deduplicated batch.
pub fn select_candidate(detections: &[Detection]) -> Option<&Detection> {
    dedup_by_payload(detections).into_iter().next()
}

/// Dedup, pick the first candidate and test it against `window`.
/// Pure: the same batch and window always give the same verdict.
pub fn reduce_batch(batch: &DetectionBatch, window: &Rect) -> ScanVerdict {
    let Some(candidate) = select_candidate(&batch.detections) else {
        return ScanVerdict::EmptyBatch;
    };

    let Some(bounding_box) = candidate.bounding_box else {
        return ScanVerdict::MissingBoundingBox;
    };

    if window.is_unset() {
        return ScanVerdict::NoScanWindow;
    }

    if window.contains(&bounding_box) {
        ScanVerdict::Accepted {
            detection: candidate.clone(),
        }
    } else {
        ScanVerdict::OutsideWindow
    }
}
