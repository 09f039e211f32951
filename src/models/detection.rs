use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Rect;

/// Symbologies a detector can report, with the decoder's bit values.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum BarcodeFormat {
    #[default]
    Unknown,
    Code128,
    Code39,
    Code93,
    Codabar,
    DataMatrix,
    Ean13,
    Ean8,
    Itf,
    QrCode,
    UpcA,
    UpcE,
    Pdf417,
    Aztec,
}

impl BarcodeFormat {
    pub const ALL: [BarcodeFormat; 13] = [
        BarcodeFormat::Code128,
        BarcodeFormat::Code39,
        BarcodeFormat::Code93,
        BarcodeFormat::Codabar,
        BarcodeFormat::DataMatrix,
        BarcodeFormat::Ean13,
        BarcodeFormat::Ean8,
        BarcodeFormat::Itf,
        BarcodeFormat::QrCode,
        BarcodeFormat::UpcA,
        BarcodeFormat::UpcE,
        BarcodeFormat::Pdf417,
        BarcodeFormat::Aztec,
    ];

    pub fn bits(self) -> i32 {
        match self {
            BarcodeFormat::Unknown => -1,
            BarcodeFormat::Code128 => 1,
            BarcodeFormat::Code39 => 2,
            BarcodeFormat::Code93 => 4,
            BarcodeFormat::Codabar => 8,
            BarcodeFormat::DataMatrix => 16,
            BarcodeFormat::Ean13 => 32,
            BarcodeFormat::Ean8 => 64,
            BarcodeFormat::Itf => 128,
            BarcodeFormat::QrCode => 256,
            BarcodeFormat::UpcA => 512,
            BarcodeFormat::UpcE => 1024,
            BarcodeFormat::Pdf417 => 2048,
            BarcodeFormat::Aztec => 4096,
        }
    }

    pub fn from_bits(bits: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|format| format.bits() == bits)
            .unwrap_or(BarcodeFormat::Unknown)
    }
}

/// What the detector is asked to look for on each frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorOptions {
    /// Empty means every supported format.
    pub formats: Vec<BarcodeFormat>,
    /// Also try the colour-inverted image (light codes on dark backgrounds).
    pub check_inverted: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            formats: Vec::new(),
            check_inverted: true,
        }
    }
}

impl DetectorOptions {
    pub fn accepts(&self, format: BarcodeFormat) -> bool {
        self.formats.is_empty() || self.formats.contains(&format)
    }

    /// Bitmask form understood by native decoders; `0` requests all formats.
    pub fn format_mask(&self) -> i32 {
        self.formats
            .iter()
            .filter(|format| **format != BarcodeFormat::Unknown)
            .fold(0, |mask, format| mask | format.bits())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// One decoded barcode candidate from a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Decoded display text; also the dedup key within a batch.
    pub payload: String,
    pub bounding_box: Option<Rect>,
    pub format: BarcodeFormat,
    pub raw_value: Option<String>,
    pub corner_points: Option<Vec<Point>>,
}

impl Detection {
    pub fn new(payload: impl Into<String>, bounding_box: Option<Rect>) -> Self {
        Self {
            payload: payload.into(),
            bounding_box,
            format: BarcodeFormat::Unknown,
            raw_value: None,
            corner_points: None,
        }
    }

    pub fn with_format(mut self, format: BarcodeFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_raw_value(mut self, raw_value: impl Into<String>) -> Self {
        self.raw_value = Some(raw_value.into());
        self
    }
}

/// Detections reported for one processed frame, in detector order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionBatch {
    pub frame_seq: u64,
    pub captured_at: DateTime<Utc>,
    pub detections: Vec<Detection>,
}

impl DetectionBatch {
    pub fn new(frame_seq: u64, captured_at: DateTime<Utc>, detections: Vec<Detection>) -> Self {
        Self {
            frame_seq,
            captured_at,
            detections,
        }
    }
}
