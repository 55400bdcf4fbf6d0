use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
///
/// Used both for placed image bounds and for free-space bookkeeping inside the
/// placement engine; the latter is why the fields are signed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge coordinate (`x + w`).
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge coordinate (`y + h`).
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Returns true if `r` lies fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }

    /// Separating-axis overlap test: no overlap iff one rectangle is entirely
    /// left/right/above/below the other. Touching edges do not count.
    pub fn intersects(&self, r: &Rect) -> bool {
        !(self.x >= r.right() || r.x >= self.right() || self.y >= r.bottom() || r.y >= self.bottom())
    }
}

/// 2D integer size. Always positive once used as an atlas candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }
}

/// Where one input image landed in the atlas. Width/height repeat the source
/// image dimensions so the sidecar entry is self-contained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Placement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Statistics about a finished pack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    /// Sum of all input image areas (px²).
    pub total_image_area: i64,
    /// Atlas width * height (px²).
    pub atlas_area: i64,
    /// `atlas_area - total_image_area`.
    pub unused_area: i64,
    /// `100 * total_image_area / atlas_area`. Higher is better.
    pub packing_efficiency: f64,
    /// Wall-clock time from search start to final assembly.
    pub elapsed: Duration,
}

impl PackStats {
    pub fn new(total_image_area: i64, atlas_size: Size, elapsed: Duration) -> Self {
        let atlas_area = atlas_size.area();
        let packing_efficiency = if atlas_area > 0 {
            100.0 * total_image_area as f64 / atlas_area as f64
        } else {
            0.0
        };
        Self {
            total_image_area,
            atlas_area,
            unused_area: atlas_area - total_image_area,
            packing_efficiency,
            elapsed,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Atlas area: {} px², Used: {} px², Unused: {} px², Efficiency: {:.2}%, Time: {:.2?}",
            self.atlas_area,
            self.total_image_area,
            self.unused_area,
            self.packing_efficiency,
            self.elapsed,
        )
    }
}
