use chrono::{DateTime, Utc};
use image::{DynamicImage, GrayImage};

/// One camera sample handed to the detector.
#[derive(Debug, Clone)]
pub struct Frame {
    pub seq: u64,
    pub captured_at: DateTime<Utc>,
    pub image: GrayImage,
}

impl Frame {
    pub fn new(seq: u64, image: GrayImage) -> Self {
        Self {
            seq,
            captured_at: Utc::now(),
            image,
        }
    }

    /// Wraps a colour capture; detectors only need luma.
    pub fn from_dynamic(seq: u64, image: DynamicImage) -> Self {
        Self::new(seq, image.to_luma8())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
