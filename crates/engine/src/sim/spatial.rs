use serde::Deserialize;

use crate::content::{Elevation, HeightMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn distance_to(self, other: Vec2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Axis-aligned box. `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn at(origin: Vec2, width: f32, height: f32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn origin(&self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            x: self.x + delta.x,
            y: self.y + delta.y,
            ..*self
        }
    }
}

pub fn collides(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// Distance test between reference points. Callers pass top-left corners.
pub fn is_near(a: Vec2, b: Vec2, max_distance: f32) -> bool {
    a.distance_to(b) < max_distance
}

/// Walks `variations` in declared order; the last rectangle containing the
/// point decides the elevation.
pub fn height_at(point: Vec2, height_map: &HeightMap) -> Elevation {
    let mut elevation = Elevation::Level(height_map.base);
    for variation in &height_map.variations {
        if variation.area.contains_point(point) {
            elevation = variation.elevation;
        }
    }
    elevation
}

pub fn sample_points(candidate: &Rect, inset: f32) -> [Vec2; 4] {
    let inset_x = inset.max(0.0).min(candidate.width / 2.0);
    let inset_y = inset.max(0.0).min(candidate.height / 2.0);
    let left = candidate.x + inset_x;
    let right = candidate.x + candidate.width - inset_x;
    let top = candidate.y + inset_y;
    let bottom = candidate.y + candidate.height - inset_y;
    [
        Vec2 { x: left, y: top },
        Vec2 { x: right, y: top },
        Vec2 { x: left, y: bottom },
        Vec2 { x: right, y: bottom },
    ]
}

/// Ground under a box: unwalkable if any corner is, otherwise the highest
/// corner level.
pub fn ground_under(candidate: &Rect, height_map: &HeightMap, inset: f32) -> Elevation {
    let mut highest: Option<f32> = None;
    for point in sample_points(candidate, inset) {
        match height_at(point, height_map) {
            Elevation::Unwalkable => return Elevation::Unwalkable,
            Elevation::Level(level) => {
                highest = Some(highest.map_or(level, |current| current.max(level)));
            }
        }
    }
    Elevation::Level(highest.unwrap_or(height_map.base))
}

pub fn is_walkable(
    candidate: &Rect,
    height_map: Option<&HeightMap>,
    current_elevation: f32,
    max_step_height: f32,
    inset: f32,
) -> bool {
    let Some(height_map) = height_map else {
        return true;
    };

    sample_points(candidate, inset)
        .into_iter()
        .all(|point| match height_at(point, height_map) {
            Elevation::Unwalkable => false,
            Elevation::Level(level) => (level - current_elevation).abs() <= max_step_height,
        })
}
