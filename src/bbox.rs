//! Bounding box type and IoU computation.

/// An axis-aligned bounding box in center-size encoding.
///
/// Holds the box center and its full width/height. No invariant is enforced
/// on the sign of the size fields: malformed boxes pass through unchanged,
/// and IoU against them degrades to 0.0 rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub center_x: f64,
    pub center_y: f64,
    pub size_x: f64,
    pub size_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from center coordinates and full sizes.
    pub fn new(center_x: f64, center_y: f64, size_x: f64, size_y: f64) -> Self {
        Self {
            center_x,
            center_y,
            size_x,
            size_y,
        }
    }

    /// Convert to corner form `[x1, y1, x2, y2]`.
    ///
    /// A negative size yields inverted corners (x2 < x1); callers relying on
    /// corner ordering must handle that themselves.
    pub fn corners(&self) -> [f64; 4] {
        [
            self.center_x - self.size_x / 2.0,
            self.center_y - self.size_y / 2.0,
            self.center_x + self.size_x / 2.0,
            self.center_y + self.size_y / 2.0,
        ]
    }

    /// Signed area, computed from the corner form.
    pub fn area(&self) -> f64 {
        let [x1, y1, x2, y2] = self.corners();
        (x2 - x1) * (y2 - y1)
    }
}

/// Compute IoU (Intersection over Union) between two boxes.
///
/// Intersection width and height are clamped to be non-negative before
/// multiplying, so disjoint boxes produce an intersection area of 0. The
/// union can be zero or negative when size fields are negative; IoU is
/// defined as 0.0 in that case.
///
/// # Returns
/// IoU in [0, 1] for well-formed boxes; 0.0 whenever the union is not
/// strictly positive.
pub fn iou(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let [a_x1, a_y1, a_x2, a_y2] = a.corners();
    let [b_x1, b_y1, b_x2, b_y2] = b.corners();

    // Intersection
    let inter_x1 = a_x1.max(b_x1);
    let inter_y1 = a_y1.max(b_y1);
    let inter_x2 = a_x2.min(b_x2);
    let inter_y2 = a_y2.min(b_y2);

    let inter_w = (inter_x2 - inter_x1).max(0.0);
    let inter_h = (inter_y2 - inter_y1).max(0.0);
    let inter_area = inter_w * inter_h;

    // Union
    let union_area = a.area() + b.area() - inter_area;

    if union_area > 0.0 {
        inter_area / union_area
    } else {
        0.0
    }
}
