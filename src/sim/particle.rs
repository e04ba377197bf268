//! Falling data-flow particles

use glam::Vec2;
use rand::Rng;

use crate::Viewport;
use crate::consts::*;

/// A fading dot that falls from the top of the viewport
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per frame, fixed at creation
    pub speed: f32,
    pub size: f32,
    pub opacity: f32,
    /// Opacity lost per frame
    pub decay: f32,
}

impl Particle {
    /// New particle at a random column just above the viewport
    pub fn random(viewport: Viewport, spawn_y: f32, decay: f32, rng: &mut impl Rng) -> Self {
        Self {
            pos: Vec2::new(rng.random::<f32>() * viewport.width, spawn_y),
            speed: rng.random_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED),
            size: rng.random_range(PARTICLE_MIN_SIZE..PARTICLE_MAX_SIZE),
            opacity: rng.random::<f32>(),
            decay,
        }
    }

    pub fn update(&mut self) {
        self.pos.y += self.speed;
        self.opacity -= self.decay;
    }

    /// Below the viewport or fully faded; the only removal condition
    pub fn is_off_screen(&self, viewport: Viewport) -> bool {
        self.pos.y > viewport.height || self.opacity <= 0.0
    }
}
