//! Population sizing and spawning

use rand::Rng;

use super::node::Node;
use super::particle::Particle;
use crate::Viewport;
use crate::settings::Settings;

/// Node count for a viewport: one per `density_divisor` square pixels, capped by device class
pub fn node_count(viewport: Viewport, settings: &Settings) -> usize {
    let by_area = (viewport.area() / settings.density_divisor).floor().max(0.0) as usize;
    by_area.min(settings.node_cap(viewport))
}

/// Build a fresh node set for the viewport (no carry-over between rebuilds)
pub fn create_nodes(viewport: Viewport, settings: &Settings, rng: &mut impl Rng) -> Vec<Node> {
    (0..node_count(viewport, settings))
        .map(|_| Node::random(viewport, settings.node_max_speed, settings.node_radius, rng))
        .collect()
}

/// Append one particle if below the cap. Returns true if one was spawned.
pub fn spawn_particle(
    particles: &mut Vec<Particle>,
    viewport: Viewport,
    settings: &Settings,
    rng: &mut impl Rng,
) -> bool {
    if particles.len() >= settings.max_particles {
        return false;
    }
    particles.push(Particle::random(
        viewport,
        settings.particle_spawn_y,
        settings.particle_decay,
        rng,
    ));
    true
}
