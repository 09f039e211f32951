use serde::{Deserialize, Serialize};

use crate::models::Rect;

const CORNER_SIZE: f32 = 25.0;
const CORNER_INSET: f32 = -3.0;

/// Origin and size as a layout pass reports them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    pub fn to_rect(self) -> Rect {
        Rect::from_layout(self.x, self.y, self.width, self.height)
    }
}

/// Square scan area of side `size`, centred on a `screen_width` x `screen_height` screen.
pub fn centered_scan_area(screen_width: f32, screen_height: f32, size: f32) -> LayoutRect {
    LayoutRect {
        x: (screen_width - size) / 2.0,
        y: (screen_height - size) / 2.0,
        width: size,
        height: size,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Decorative bracket drawn at one corner of the scan area, relative to its origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerMarker {
    pub corner: Corner,
    pub frame: LayoutRect,
    /// Bottom markers reuse the top artwork flipped vertically.
    pub flipped: bool,
    /// Right markers use the mirrored artwork.
    pub mirrored: bool,
}

pub fn corner_markers(area: &LayoutRect) -> [CornerMarker; 4] {
    let near = CORNER_INSET;
    let far_x = area.width - CORNER_SIZE - CORNER_INSET;
    let far_y = area.height - CORNER_SIZE - CORNER_INSET;

    let marker = |corner: Corner, x: f32, y: f32| CornerMarker {
        corner,
        frame: LayoutRect {
            x,
            y,
            width: CORNER_SIZE,
            height: CORNER_SIZE,
        },
        flipped: matches!(corner, Corner::BottomLeft | Corner::BottomRight),
        mirrored: matches!(corner, Corner::TopRight | Corner::BottomRight),
    };

    [
        marker(Corner::TopLeft, near, near),
        marker(Corner::TopRight, far_x, near),
        marker(Corner::BottomLeft, near, far_y),
        marker(Corner::BottomRight, far_x, far_y),
    ]
}
