//! Axis-aligned rectangles on the ground plane.

use glam::DVec2;

/// Rectangle with its minimum corner at `(x, z)`. Edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub z: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, z: f64, w: f64, h: f64) -> Self {
        Self { x, z, w, h }
    }

    /// Square of edge `size` centered on the origin.
    pub fn centered(size: f64) -> Self {
        let half = size / 2.0;
        Self::new(-half, -half, size, size)
    }

    /// Bounding square of a circle.
    pub fn around(center: DVec2, radius: f64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            radius * 2.0,
            radius * 2.0,
        )
    }

    pub fn max_x(&self) -> f64 {
        self.x + self.w
    }

    pub fn max_z(&self) -> f64 {
        self.z + self.h
    }

    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x && p.x <= self.max_x() && p.y >= self.z && p.y <= self.max_z()
    }

    /// Touching edges count as intersecting.
    pub fn intersects(&self, other: &Rect) -> bool {
        !(other.x > self.max_x()
            || other.max_x() < self.x
            || other.z > self.max_z()
            || other.max_z() < self.z)
    }

    /// The four equal quadrants, in NW, NE, SW, SE order (min z first).
    pub fn quadrants(&self) -> [Rect; 4] {
        let hw = self.w / 2.0;
        let hh = self.h / 2.0;
        [
            Rect::new(self.x, self.z, hw, hh),
            Rect::new(self.x + hw, self.z, hw, hh),
            Rect::new(self.x, self.z + hh, hw, hh),
            Rect::new(self.x + hw, self.z + hh, hw, hh),
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite() && self.w.is_finite() && self.h.is_finite()
    }
}
