//! World <-> screen mapping
//!
//! The world is centered on the origin with +y up. It is scaled uniformly to
//! fit the canvas and letterboxed on the long axis.

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Border around the arena kept visible (world units)
pub const VIEW_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas size in pixels
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1) as f32,
            height: height.max(1) as f32,
        }
    }

    /// World area that must stay visible
    pub fn world_size() -> Vec2 {
        Vec2::new(ARENA_WIDTH + 2.0 * VIEW_MARGIN, ARENA_HEIGHT + 2.0 * VIEW_MARGIN)
    }

    /// Pixels per world unit
    pub fn scale(&self) -> f32 {
        let world = Self::world_size();
        (self.width / world.x).min(self.height / world.y)
    }

    /// World position to normalized device coordinates
    pub fn world_to_ndc(&self, p: Vec2) -> Vec2 {
        let s = self.scale();
        Vec2::new(p.x * s * 2.0 / self.width, p.y * s * 2.0 / self.height)
    }

    /// Canvas pixel position (origin top-left, +y down) to world
    pub fn screen_to_world(&self, px: f32, py: f32) -> Vec2 {
        let s = self.scale();
        Vec2::new((px - self.width / 2.0) / s, (self.height / 2.0 - py) / s)
    }
}
