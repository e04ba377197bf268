//! Drifting network nodes

use glam::Vec2;
use rand::Rng;

use crate::Viewport;
use crate::consts::NODE_RADIUS;

/// A point of the background network
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Node {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: NODE_RADIUS,
        }
    }

    /// Random position inside the viewport, velocity uniform in [-max_speed, max_speed) per axis
    pub fn random(viewport: Viewport, max_speed: f32, radius: f32, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * viewport.width,
            rng.random::<f32>() * viewport.height,
        );
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * max_speed,
            (rng.random::<f32>() - 0.5) * 2.0 * max_speed,
        );
        Self { pos, vel, radius }
    }

    /// Advance one frame, bouncing off the viewport edges
    pub fn update(&mut self, viewport: Viewport) {
        self.pos += self.vel;

        // Clamp to the crossed edge and point the velocity back inside so a
        // node left outside by a shrink cannot oscillate on the boundary.
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > viewport.width {
            self.pos.x = viewport.width;
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > viewport.height {
            self.pos.y = viewport.height;
            self.vel.y = -self.vel.y.abs();
        }
    }
}
