use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use image::{GrayImage, Luma};
use rand::Rng;

use super::{Frame, FrameSource};

const NOISE_AMPLITUDE: i16 = 12;
const BASE_LUMA: i16 = 128;

/// Stand-in camera producing mid-grey frames with sensor-like noise.
/// Used by the headless demo and the tests in place of real hardware.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    next_seq: AtomicU64,
    /// Stop producing after this many frames; `None` runs forever.
    limit: Option<u64>,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            next_seq: AtomicU64::new(1),
            limit: None,
        }
    }

    pub fn with_limit(mut self, frames: u64) -> Self {
        self.limit = Some(frames);
        self
    }

    pub fn frames_captured(&self) -> u64 {
        self.next_seq.load(Ordering::SeqCst) - 1
    }
}

impl FrameSource for SyntheticCamera {
    fn capture(&self) -> Result<Option<Frame>> {
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.limit {
            if seq > limit {
                self.next_seq.fetch_sub(1, Ordering::SeqCst);
                return Ok(None);
            }
        }

        let mut rng = rand::thread_rng();
        let image = GrayImage::from_fn(self.width, self.height, |_, _| {
            let noise = rng.gen_range(-NOISE_AMPLITUDE..=NOISE_AMPLITUDE);
            Luma([(BASE_LUMA + noise).clamp(0, 255) as u8])
        });

        Ok(Some(Frame::new(seq, image)))
    }
}
