pub mod animator;
pub mod layout;
pub mod scan_line;

pub use animator::OverlayAnimator;
pub use layout::{centered_scan_area, corner_markers, Corner, CornerMarker, LayoutRect};
pub use scan_line::ScanLineAnimation;
