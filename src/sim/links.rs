//! Proximity links between nearby nodes
//!
//! Brute-force O(n²) over all unordered pairs. Node counts are capped at a
//! few dozen, so no spatial index is used.

use glam::Vec2;

use super::node::Node;

/// A faded edge between two nodes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub from: Vec2,
    pub to: Vec2,
    /// 1 at zero distance, falling linearly to 0 at the threshold
    pub alpha: f32,
}

/// Link alpha for two points, or None if they are not strictly closer than `threshold`
#[inline]
pub fn link_alpha(a: Vec2, b: Vec2, threshold: f32) -> Option<f32> {
    let dist_sq = a.distance_squared(b);
    if dist_sq < threshold * threshold {
        // Root only for pairs that pass
        Some(1.0 - dist_sq.sqrt() / threshold)
    } else {
        None
    }
}

/// All links for pairs (i, j) with i < j, in pair order
pub fn proximity_links(nodes: &[Node], threshold: f32) -> impl Iterator<Item = Link> + '_ {
    nodes.iter().enumerate().flat_map(move |(i, a)| {
        nodes[i + 1..].iter().filter_map(move |b| {
            link_alpha(a.pos, b.pos, threshold).map(|alpha| Link {
                from: a.pos,
                to: b.pos,
                alpha,
            })
        })
    })
}
