use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen layout coordinates (origin top-left, y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rect {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    /// Sentinel for "no scan window established yet".
    pub const ZERO: Rect = Rect {
        top: 0.0,
        left: 0.0,
        right: 0.0,
        bottom: 0.0,
    };

    pub fn new(top: f32, left: f32, right: f32, bottom: f32) -> Self {
        Self {
            top,
            left,
            right,
            bottom,
        }
    }

    /// Rectangle reported by a layout pass: origin plus size. Negative sizes are kept as-is.
    pub fn from_layout(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            top: y,
            left: x,
            right: x + width,
            bottom: y + height,
        }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::ZERO
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Inclusive four-edge containment: `inner` must lie fully inside `self`.
    /// Touching an edge counts as inside; any partial overlap does not.
    pub fn contains(&self, inner: &Rect) -> bool {
        inner.top >= self.top
            && inner.bottom <= self.bottom
            && inner.left >= self.left
            && inner.right <= self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Rect = Rect {
        top: 0.0,
        left: 0.0,
        right: 280.0,
        bottom: 280.0,
    };

    #[test]
    fn from_layout_maps_origin_and_size() {
        let rect = Rect::from_layout(46.0, 260.0, 280.0, 280.0);
        assert_eq!(rect, Rect::new(260.0, 46.0, 326.0, 540.0));
        assert_eq!(rect.width(), 280.0);
        assert_eq!(rect.height(), 280.0);
    }

    #[test]
    fn equal_rect_is_contained() {
        assert!(WINDOW.contains(&WINDOW));
    }

    #[test]
    fn exceeding_any_single_edge_is_rejected() {
        let inside = Rect::new(10.0, 10.0, 270.0, 270.0);
        assert!(WINDOW.contains(&inside));

        assert!(!WINDOW.contains(&Rect { top: -1.0, ..inside }));
        assert!(!WINDOW.contains(&Rect { left: -0.5, ..inside }));
        assert!(!WINDOW.contains(&Rect { right: 300.0, ..inside }));
        assert!(!WINDOW.contains(&Rect { bottom: 281.0, ..inside }));
    }

    #[test]
    fn partial_overlap_and_disjoint_boxes_are_rejected() {
        assert!(!WINDOW.contains(&Rect::new(10.0, 10.0, 300.0, 100.0)));
        assert!(!WINDOW.contains(&Rect::new(300.0, 300.0, 400.0, 400.0)));
    }

    #[test]
    fn negative_layout_fails_closed() {
        let malformed = Rect::from_layout(100.0, 100.0, -50.0, -50.0);
        assert!(!malformed.contains(&Rect::new(60.0, 60.0, 70.0, 70.0)));
        assert!(!malformed.contains(&Rect::new(100.0, 100.0, 100.0, 100.0)));
    }

    #[test]
    fn zero_rect_is_unset() {
        assert!(Rect::default().is_unset());
        assert!(!WINDOW.is_unset());
    }
}
