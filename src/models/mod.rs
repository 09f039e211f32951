pub mod detection;
pub mod rect;

pub use detection::{BarcodeFormat, Detection, DetectionBatch, DetectorOptions, Point};
pub use rect::Rect;
