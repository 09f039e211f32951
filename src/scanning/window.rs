use tokio::sync::watch;

use crate::models::Rect;

// Set to true to log every layout pass
const ENABLE_LOGS: bool = true;

use crate::log_debug;

/// Single writer for the scan window. Owned by whatever receives layout events
/// for the scan-area element; readers get a [`ScanWindowHandle`].
pub struct ScanWindowTracker {
    tx: watch::Sender<Rect>,
}

impl ScanWindowTracker {
    /// Starts out at [`Rect::ZERO`], which admits nothing.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Rect::ZERO);
        Self { tx }
    }

    /// Replaces the whole window from a layout pass. No validation: a negative
    /// size produces a window that rejects every detection.
    pub fn on_layout(&self, x: f32, y: f32, width: f32, height: f32) -> Rect {
        let rect = Rect::from_layout(x, y, width, height);
        let previous = self.tx.send_replace(rect);
        if previous != rect {
            log_debug!("scan window {:?} -> {:?}", previous, rect);
        }
        rect
    }

    pub fn current(&self) -> Rect {
        *self.tx.borrow()
    }

    pub fn handle(&self) -> ScanWindowHandle {
        ScanWindowHandle {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ScanWindowTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of the scan window. Cheap to clone; every read is a whole-rect copy.
#[derive(Clone)]
pub struct ScanWindowHandle {
    rx: watch::Receiver<Rect>,
}

impl ScanWindowHandle {
    pub fn snapshot(&self) -> Rect {
        *self.rx.borrow()
    }

    /// Waits for the next layout pass. `None` once the tracker is gone.
    pub async fn changed(&mut self) -> Option<Rect> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}
