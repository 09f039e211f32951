mod frame;
mod scripted;
mod synthetic;

pub use frame::Frame;
pub use scripted::ScriptedDetector;
pub use synthetic::SyntheticCamera;

use anyhow::Result;

use crate::models::{Detection, DetectorOptions};

/// Camera frame supplier. `capture` may block until the next frame is ready;
/// `Ok(None)` means no frame this time round. `Frame::seq` is passed to the
/// detector as-is and may repeat or restart; batch ordering does not use it.
pub trait FrameSource: Send + Sync + 'static {
    fn capture(&self) -> Result<Option<Frame>>;
}

/// Barcode decoder. Must be side-effect free; it runs on the blocking pool.
pub trait Detector: Send + Sync + 'static {
    fn detect(&self, frame: &Frame, options: &DetectorOptions) -> Vec<Detection>;
}
