use serde::{Deserialize, Serialize};

/// Pixel dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One sample of a result series in domain coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Inclusive bounds of a point cloud, widened so that no axis is degenerate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl DataBounds {
    /// Returns `None` when `points` holds no finite sample.
    #[must_use]
    pub fn from_points(points: &[DataPoint]) -> Option<Self> {
        let mut finite = points.iter().copied().filter(|point| point.is_finite());
        let first = finite.next()?;
        let mut bounds = Self {
            x_min: first.x,
            x_max: first.x,
            y_min: first.y,
            y_max: first.y,
        };
        for point in finite {
            bounds.x_min = bounds.x_min.min(point.x);
            bounds.x_max = bounds.x_max.max(point.x);
            bounds.y_min = bounds.y_min.min(point.y);
            bounds.y_max = bounds.y_max.max(point.y);
        }

        if bounds.x_min == bounds.x_max {
            (bounds.x_min, bounds.x_max) = widen_degenerate(bounds.x_min);
        }
        if bounds.y_min == bounds.y_max {
            (bounds.y_min, bounds.y_max) = widen_degenerate(bounds.y_min);
        }
        Some(bounds)
    }
}

/// Opens a zero-width axis around `value` by half its magnitude (at least
/// 0.5), clamped to the finite range.
fn widen_degenerate(value: f64) -> (f64, f64) {
    let pad = (value.abs() * 0.5).max(0.5);
    let low = (value - pad).max(f64::MIN);
    let high = (value + pad).min(f64::MAX);
    (low, high)
}
