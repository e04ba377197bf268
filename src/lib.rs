//! Network Canvas - animated node network background
//!
//! Core modules:
//! - `sim`: Node and particle motion, population sizing, proximity links
//! - `renderer`: Drawing surface abstraction and per-frame scene drawing
//! - `animation`: The single frame loop and its visibility/resize gate
//! - `platform`: Host scheduling (requestAnimationFrame/timers) and browser bindings
//! - `effects`: Scroll parallax, hero orbit, card reveals and stat counters
//! - `settings`: Tunables with LocalStorage overrides

pub mod animation;
pub mod effects;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use animation::{AnimationSystem, LoopState};
pub use error::{Error, Result};
pub use settings::Settings;

use glam::Vec2;

/// Animation configuration constants
pub mod consts {
    /// Accent colour (#00ffcc) used for nodes, links and particles
    pub const ACCENT_RGB: (u8, u8, u8) = (0, 255, 204);

    /// Node disc radius in CSS pixels
    pub const NODE_RADIUS: f32 = 2.0;
    /// Max absolute node velocity per axis (pixels per frame)
    pub const NODE_MAX_SPEED: f32 = 0.25;
    /// Node cap on desktop-sized viewports
    pub const MAX_NODES: usize = 50;
    /// Viewports narrower than this get half the node cap
    pub const MOBILE_BREAKPOINT: f32 = 768.0;
    /// One node per this many square pixels
    pub const DENSITY_DIVISOR: f32 = 15000.0;

    /// Nodes closer than this are linked
    pub const LINK_DISTANCE: f32 = 150.0;
    pub const LINK_WIDTH: f32 = 0.5;

    /// Data-flow particle cap
    pub const MAX_PARTICLES: usize = 20;
    /// Spawn attempt period
    pub const SPAWN_INTERVAL_MS: u32 = 100;
    /// Opacity lost per frame
    pub const PARTICLE_DECAY: f32 = 0.005;
    /// Particles enter just above the top edge
    pub const PARTICLE_SPAWN_Y: f32 = -10.0;
    pub const PARTICLE_MIN_SPEED: f32 = 1.0;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    pub const PARTICLE_MIN_SIZE: f32 = 1.0;
    pub const PARTICLE_MAX_SIZE: f32 = 4.0;

    /// Quiet period before a resize is applied
    pub const RESIZE_DEBOUNCE_MS: u32 = 150;
}

/// Drawable area in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether `p` lies inside the closed rectangle [0, width] x [0, height]
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// RGBA colour with 8-bit channels and float alpha, as canvas style strings expect
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn accent() -> Self {
        let (r, g, b) = consts::ACCENT_RGB;
        Self::rgb(r, g, b)
    }

    /// Same colour with a different alpha (clamped to [0, 1])
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Parse `#rrggbb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::accent()
    }
}
