//! Point quadtree over the XZ ground plane.
//!
//! Leaves split into four equal quadrants once they hold more than
//! `capacity` points, until `max_depth` is reached. Removal never merges
//! children back. The tree is meant to be rebuilt wholesale whenever the
//! indexed set changes.

use glam::DVec2;
use thiserror::Error;
use tycoon_core::types::Position;

use crate::rect::Rect;

/// Why a spatial query could not be answered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpatialError {
    #[error("query coordinates must be finite")]
    NonFinite,

    #[error("query radius must be non-negative, got {0}")]
    NegativeRadius(f64),

    #[error("query rectangle has negative extent ({w} x {h})")]
    NegativeExtent { w: f64, h: f64 },
}

/// An indexed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QPoint<T> {
    pub id: T,
    pub pos: DVec2,
}

impl<T> QPoint<T> {
    pub fn new(id: T, x: f64, z: f64) -> Self {
        Self {
            id,
            pos: DVec2::new(x, z),
        }
    }

    /// Index a world position by its ground-plane projection.
    pub fn at(id: T, position: &Position) -> Self {
        Self {
            id,
            pos: position.xz(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Quadtree<T> {
    bounds: Rect,
    depth: u32,
    capacity: usize,
    max_depth: u32,
    points: Vec<QPoint<T>>,
    children: Option<Box<[Quadtree<T>; 4]>>,
}

impl<T: Copy + PartialEq> Quadtree<T> {
    pub fn new(bounds: Rect, capacity: usize, max_depth: u32) -> Self {
        Self::node(bounds, 0, capacity.max(1), max_depth)
    }

    fn node(bounds: Rect, depth: u32, capacity: usize, max_depth: u32) -> Self {
        Self {
            bounds,
            depth,
            capacity,
            max_depth,
            points: Vec::new(),
            children: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Drop every point and collapse to a single leaf.
    pub fn clear(&mut self) {
        self.points.clear();
        self.children = None;
    }

    pub fn len(&self) -> usize {
        self.points.len()
            + self
                .children
                .as_ref()
                .map_or(0, |c| c.iter().map(Quadtree::len).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deepest level that currently exists below this node.
    pub fn height(&self) -> u32 {
        match &self.children {
            Some(children) => 1 + children.iter().map(Quadtree::height).max().unwrap_or(0),
            None => 0,
        }
    }

    /// Insert a point. Returns false if it lies outside the bounds or is not finite.
    pub fn insert(&mut self, point: QPoint<T>) -> bool {
        if !point.pos.is_finite() || !self.bounds.contains(point.pos) {
            return false;
        }

        if let Some(children) = self.children.as_mut() {
            if !children.iter_mut().any(|child| child.insert(point)) {
                // Rounding left a gap between quadrants; keep it here.
                self.points.push(point);
            }
            return true;
        }

        self.points.push(point);
        if self.points.len() > self.capacity && self.depth < self.max_depth {
            self.subdivide();
        }
        true
    }

    fn subdivide(&mut self) {
        let quads = self.bounds.quadrants();
        let depth = self.depth + 1;
        let mut children = Box::new(
            quads.map(|q| Quadtree::node(q, depth, self.capacity, self.max_depth)),
        );

        let points = std::mem::take(&mut self.points);
        self.points = points
            .into_iter()
            .filter(|&point| !children.iter_mut().any(|child| child.insert(point)))
            .collect();
        self.children = Some(children);
    }

    /// All points inside `range` (edges inclusive).
    pub fn query_rect(&self, range: &Rect) -> Result<Vec<QPoint<T>>, SpatialError> {
        if !range.is_finite() {
            return Err(SpatialError::NonFinite);
        }
        if range.w < 0.0 || range.h < 0.0 {
            return Err(SpatialError::NegativeExtent {
                w: range.w,
                h: range.h,
            });
        }
        let mut found = Vec::new();
        self.collect_rect(range, &mut found);
        Ok(found)
    }

    fn collect_rect(&self, range: &Rect, found: &mut Vec<QPoint<T>>) {
        if !self.bounds.intersects(range) {
            return;
        }
        found.extend(self.points.iter().filter(|p| range.contains(p.pos)));
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.collect_rect(range, found);
            }
        }
    }

    /// All points within `radius` of `center` (boundary inclusive).
    pub fn query_radius(&self, center: DVec2, radius: f64) -> Result<Vec<QPoint<T>>, SpatialError> {
        if !center.is_finite() || !radius.is_finite() {
            return Err(SpatialError::NonFinite);
        }
        if radius < 0.0 {
            return Err(SpatialError::NegativeRadius(radius));
        }
        let r_sq = radius * radius;
        let mut candidates = self.query_rect(&Rect::around(center, radius))?;
        candidates.retain(|p| p.pos.distance_squared(center) <= r_sq);
        Ok(candidates)
    }

    /// Remove the first point with `id`. Returns whether one was found.
    pub fn remove(&mut self, id: T) -> bool {
        if let Some(idx) = self.points.iter().position(|p| p.id == id) {
            self.points.remove(idx);
            return true;
        }
        match self.children.as_mut() {
            Some(children) => children.iter_mut().any(|child| child.remove(id)),
            None => false,
        }
    }
}
