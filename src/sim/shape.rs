//! Axis-aligned rectangles and circles
//!
//! Walls, ground tiles and score triggers are rectangles; the bird and items
//! are circles. Only the overlap tests the game needs are implemented.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored as centre + half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half * 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }
}

/// A circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Overlap between two shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Penetration {
    /// Direction to move the first shape to separate it (unit length)
    pub normal: Vec2,
    /// Overlap depth along `normal`
    pub depth: f32,
}

/// Circle vs rectangle overlap. The normal points from the rectangle toward
/// the circle. Touching edges (depth 0) do not count.
pub fn circle_rect(circle: &Circle, rect: &Rect) -> Option<Penetration> {
    let local = circle.center - rect.center;
    let clamped = local.clamp(-rect.half, rect.half);

    if clamped != local {
        // Centre outside the rectangle: closest point is on the boundary
        let delta = local - clamped;
        let dist_sq = delta.length_squared();
        if dist_sq >= circle.radius * circle.radius {
            return None;
        }
        let dist = dist_sq.sqrt();
        let normal = if dist > f32::EPSILON {
            delta / dist
        } else {
            Vec2::Y
        };
        return Some(Penetration {
            normal,
            depth: circle.radius - dist,
        });
    }

    // Centre inside the rectangle: push out through the nearest face
    let to_face = rect.half - local.abs();
    if to_face.x < to_face.y {
        let sign = if local.x < 0.0 { -1.0 } else { 1.0 };
        Some(Penetration {
            normal: Vec2::new(sign, 0.0),
            depth: to_face.x + circle.radius,
        })
    } else {
        let sign = if local.y < 0.0 { -1.0 } else { 1.0 };
        Some(Penetration {
            normal: Vec2::new(0.0, sign),
            depth: to_face.y + circle.radius,
        })
    }
}

/// Circle vs circle overlap. The normal points from `b` toward `a`.
pub fn circle_circle(a: &Circle, b: &Circle) -> Option<Penetration> {
    let delta = a.center - b.center;
    let reach = a.radius + b.radius;
    let dist_sq = delta.length_squared();
    if dist_sq >= reach * reach {
        return None;
    }
    let dist = dist_sq.sqrt();
    let normal = if dist > f32::EPSILON {
        delta / dist
    } else {
        Vec2::Y
    };
    Some(Penetration {
        normal,
        depth: reach - dist,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_bounds() {
        let r = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(4.0, 6.0));
        assert_eq!(r.min(), Vec2::new(8.0, 17.0));
        assert_eq!(r.max(), Vec2::new(12.0, 23.0));
        assert_eq!(r.size(), Vec2::new(4.0, 6.0));
    }

    #[test]
    fn test_circle_resting_on_top_of_rect() {
        let ground = Rect::new(Vec2::new(0.0, 50.0), Vec2::new(200.0, 100.0));
        // Circle centre 8 above the top edge with radius 10: 2 deep
        let circle = Circle::new(Vec2::new(0.0, 108.0), 10.0);
        let hit = circle_rect(&circle, &ground).unwrap();
        assert!(hit.normal.abs_diff_eq(Vec2::Y, 1e-5));
        assert!((hit.depth - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_circle_clear_of_rect() {
        let wall = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        assert!(circle_rect(&Circle::new(Vec2::new(20.0, 0.0), 5.0), &wall).is_none());
        // Exactly touching is not an overlap
        assert!(circle_rect(&Circle::new(Vec2::new(10.0, 0.0), 5.0), &wall).is_none());
        // Near a corner but outside the radius
        assert!(circle_rect(&Circle::new(Vec2::new(9.0, 9.0), 5.0), &wall).is_none());
    }

    #[test]
    fn test_circle_centre_inside_rect_uses_nearest_face() {
        let wall = Rect::new(Vec2::ZERO, Vec2::new(20.0, 100.0));
        let hit = circle_rect(&Circle::new(Vec2::new(-8.0, 0.0), 3.0), &wall).unwrap();
        assert_eq!(hit.normal, Vec2::new(-1.0, 0.0));
        assert!((hit.depth - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_circle() {
        let a = Circle::new(Vec2::new(3.0, 0.0), 2.0);
        let b = Circle::new(Vec2::ZERO, 2.0);
        let hit = circle_circle(&a, &b).unwrap();
        assert_eq!(hit.normal, Vec2::X);
        assert!((hit.depth - 1.0).abs() < 1e-5);

        let far = Circle::new(Vec2::new(5.0, 0.0), 2.0);
        assert!(circle_circle(&far, &b).is_none());
    }
}
