use crate::models::{Detection, DetectorOptions};

use super::{Detector, Frame};

/// Detector that replays prepared batches keyed by frame sequence number.
/// Frame `n` receives `script[n - 1]`; past the end it sees nothing, or wraps
/// around when built with `cycling`.
pub struct ScriptedDetector {
    script: Vec<Vec<Detection>>,
    cycle: bool,
}

impl ScriptedDetector {
    pub fn new(script: Vec<Vec<Detection>>) -> Self {
        Self {
            script,
            cycle: false,
        }
    }

    pub fn cycling(script: Vec<Vec<Detection>>) -> Self {
        Self {
            script,
            cycle: true,
        }
    }

    fn batch_for(&self, seq: u64) -> Option<&Vec<Detection>> {
        if self.script.is_empty() || seq == 0 {
            return None;
        }
        let index = (seq - 1) as usize;
        if self.cycle {
            self.script.get(index % self.script.len())
        } else {
            self.script.get(index)
        }
    }
}

impl Detector for ScriptedDetector {
    fn detect(&self, frame: &Frame, options: &DetectorOptions) -> Vec<Detection> {
        self.batch_for(frame.seq)
            .map(|batch| {
                batch
                    .iter()
                    .filter(|detection| options.accepts(detection.format))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}
