//! Collision detection for the rectangular arena
//!
//! The ball is a circle, paddles are axis-aligned boxes and the arena is a
//! box with open left/right ends (the goals).

use glam::Vec2;

use super::state::Side;

/// Axis-aligned box given by center and half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    /// Closest point on (or in) the box to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    pub fn contains(&self, p: Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the box surface
    pub point: Vec2,
    /// Surface normal at contact (pointing toward the ball center)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check a circle against a box
pub fn circle_aabb(center: Vec2, radius: f32, aabb: &Aabb) -> CollisionResult {
    let closest = aabb.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq > radius * radius {
        return CollisionResult::miss();
    }

    if dist_sq > 1e-8 {
        let dist = dist_sq.sqrt();
        return CollisionResult {
            hit: true,
            point: closest,
            normal: delta / dist,
            penetration: radius - dist,
        };
    }

    // Center is inside the box: push out along the axis of least overlap
    let local = center - aabb.center;
    let overlap = aabb.half - local.abs();
    let normal = if overlap.x < overlap.y {
        Vec2::new(local.x.signum(), 0.0)
    } else {
        Vec2::new(0.0, local.y.signum())
    };
    CollisionResult {
        hit: true,
        point: center,
        normal,
        penetration: radius + overlap.x.min(overlap.y),
    }
}

/// Detect a ball crossing a paddle face between two positions.
///
/// `face_x` is the x of the paddle face the ball must not pass and `dir` is
/// the direction the face points (+1 for the left paddle, -1 for the right).
/// Returns the y where the ball center crossed the plane when that y lies
/// within the paddle span (expanded by the ball radius).
pub fn swept_paddle_hit(prev: Vec2, next: Vec2, radius: f32, aabb: &Aabb, dir: f32) -> Option<f32> {
    let face_x = aabb.center.x + aabb.half.x * dir;
    // Signed distance of the ball's leading edge in front of the face
    let before = (prev.x - face_x) * dir - radius;
    let after = (next.x - face_x) * dir - radius;
    if before < 0.0 || after >= 0.0 {
        return None;
    }

    let t = before / (before - after);
    let y = prev.y + (next.y - prev.y) * t;
    let (min, max) = (aabb.min(), aabb.max());
    (y >= min.y - radius && y <= max.y + radius).then_some(y)
}

/// Horizontal walls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// Which wall (if any) the ball is touching or past
pub fn wall_contact(pos: Vec2, radius: f32, half_height: f32) -> Option<Wall> {
    if pos.y + radius >= half_height {
        Some(Wall::Top)
    } else if pos.y - radius <= -half_height {
        Some(Wall::Bottom)
    } else {
        None
    }
}

/// Side that scores once the ball has fully left the arena horizontally
pub fn goal_side(pos: Vec2, radius: f32, half_width: f32) -> Option<Side> {
    if pos.x - radius > half_width {
        // Past the right goal line: left player scores
        Some(Side::Left)
    } else if pos.x + radius < -half_width {
        Some(Side::Right)
    } else {
        None
    }
}

#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) <= (ra + rb) * (ra + rb)
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}
