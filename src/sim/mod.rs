//! Motion simulation module
//!
//! Pure state updates for the animated background:
//! - No rendering or platform dependencies
//! - Randomness only through a caller-supplied RNG
//! - Stable iteration order (insertion order)

pub mod links;
pub mod node;
pub mod particle;
pub mod population;

pub use links::{Link, proximity_links};
pub use node::Node;
pub use particle::Particle;
pub use population::{create_nodes, node_count, spawn_particle};
