//! Animation settings
//!
//! Defaults reproduce `crate::consts`. Overrides are persisted as JSON in
//! LocalStorage; missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Error, Result};
use crate::{Rgba, Viewport};

/// Tunables for the network animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Nodes ===
    /// Colour for nodes, links and particles (alpha is overridden per shape),
    /// stored as `#rrggbb`
    #[serde(with = "hex_color")]
    pub accent: Rgba,
    pub node_radius: f32,
    /// Max absolute velocity per axis at creation
    pub node_max_speed: f32,
    /// Node cap on wide viewports (halved below `mobile_breakpoint`)
    pub max_nodes: usize,
    pub mobile_breakpoint: f32,
    /// Square pixels per node
    pub density_divisor: f32,

    // === Links ===
    pub link_distance: f32,
    pub link_width: f32,

    // === Data-flow particles ===
    pub max_particles: usize,
    pub spawn_interval_ms: u32,
    pub particle_decay: f32,
    pub particle_spawn_y: f32,

    // === Lifecycle ===
    pub resize_debounce_ms: u32,

    // === Accessibility ===
    /// Force the static single-frame mode regardless of the OS preference
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accent: Rgba::accent(),
            node_radius: NODE_RADIUS,
            node_max_speed: NODE_MAX_SPEED,
            max_nodes: MAX_NODES,
            mobile_breakpoint: MOBILE_BREAKPOINT,
            density_divisor: DENSITY_DIVISOR,

            link_distance: LINK_DISTANCE,
            link_width: LINK_WIDTH,

            max_particles: MAX_PARTICLES,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            particle_decay: PARTICLE_DECAY,
            particle_spawn_y: PARTICLE_SPAWN_Y,

            resize_debounce_ms: RESIZE_DEBOUNCE_MS,

            reduced_motion: false,
        }
    }
}

/// Upper bound on `max_nodes`; links are quadratic in the node count
pub const NODE_LIMIT: usize = 500;
/// Upper bound on `max_particles`; the particle list is preallocated to this cap
pub const PARTICLE_LIMIT: usize = 1000;

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "network_canvas_settings";

    /// Parse and validate a JSON settings object
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values that would divide by zero, stall the animation or
    /// blow up allocations
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("density_divisor", self.density_divisor as f64),
            ("link_distance", self.link_distance as f64),
            ("link_width", self.link_width as f64),
            ("particle_decay", self.particle_decay as f64),
            ("spawn_interval_ms", self.spawn_interval_ms as f64),
            ("node_radius", self.node_radius as f64),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::InvalidSetting { field, value });
            }
        }

        let finite = [
            ("density_divisor", self.density_divisor as f64),
            ("link_distance", self.link_distance as f64),
            ("link_width", self.link_width as f64),
            ("node_radius", self.node_radius as f64),
            ("node_max_speed", self.node_max_speed as f64),
            ("mobile_breakpoint", self.mobile_breakpoint as f64),
            ("particle_spawn_y", self.particle_spawn_y as f64),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(Error::NonFiniteSetting { field, value });
            }
        }

        // Zero speed is allowed (frozen network); negative is not
        if self.node_max_speed < 0.0 {
            return Err(Error::InvalidSetting {
                field: "node_max_speed",
                value: self.node_max_speed as f64,
            });
        }

        let bounded = [
            ("max_nodes", self.max_nodes, NODE_LIMIT),
            ("max_particles", self.max_particles, PARTICLE_LIMIT),
        ];
        for (field, value, max) in bounded {
            if value > max {
                return Err(Error::SettingTooLarge { field, max, value });
            }
        }
        Ok(())
    }

    /// Node cap for a viewport: half the cap below the mobile breakpoint
    pub fn node_cap(&self, viewport: Viewport) -> usize {
        if viewport.width < self.mobile_breakpoint {
            self.max_nodes / 2
        } else {
            self.max_nodes
        }
    }

    /// Reduced motion if forced here or requested by the user agent
    pub fn effective_reduced_motion(&self, prefers_reduced_motion: bool) -> bool {
        self.reduced_motion || prefers_reduced_motion
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

/// Serde adapter storing a colour as `#rrggbb`
mod hex_color {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::Rgba;

    pub fn serialize<S: Serializer>(color: &Rgba, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgba, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Rgba::from_hex(&hex)
            .ok_or_else(|| D::Error::custom(format!("expected #rrggbb colour, got {hex:?}")))
    }
}
