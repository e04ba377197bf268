//! Drawing for nodes, links and particles
//!
//! Layering is fixed: clear, nodes, links, particles.

use super::Surface;
use crate::Viewport;
use crate::settings::Settings;
use crate::sim::{Node, Particle, proximity_links};

/// Opaque accent disc at the node position
pub fn draw_node(surface: &mut impl Surface, node: &Node, settings: &Settings) {
    surface.set_fill(settings.accent);
    surface.fill_disc(node.pos, node.radius);
}

/// Accent disc faded by the particle's remaining opacity
pub fn draw_particle(surface: &mut impl Surface, particle: &Particle, settings: &Settings) {
    surface.set_fill(settings.accent.with_alpha(particle.opacity));
    surface.fill_disc(particle.pos, particle.size);
}

/// Stroke every proximity link. Returns the number of lines drawn.
pub fn draw_links(surface: &mut impl Surface, nodes: &[Node], settings: &Settings) -> usize {
    let mut drawn = 0;
    for link in proximity_links(nodes, settings.link_distance) {
        surface.set_stroke(settings.accent.with_alpha(link.alpha), settings.link_width);
        surface.stroke_line(link.from, link.to);
        drawn += 1;
    }
    drawn
}

/// Paint a complete frame without advancing any motion
pub fn draw_frame(
    surface: &mut impl Surface,
    viewport: Viewport,
    nodes: &[Node],
    particles: &[Particle],
    settings: &Settings,
) {
    surface.clear(viewport);
    for node in nodes {
        draw_node(surface, node, settings);
    }
    draw_links(surface, nodes, settings);
    for particle in particles {
        draw_particle(surface, particle, settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rgba;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use glam::Vec2;

    #[test]
    fn test_frame_layering() {
        let settings = Settings::default();
        let vp = Viewport::new(400.0, 300.0);
        let nodes = vec![
            Node::new(Vec2::new(10.0, 10.0), Vec2::ZERO),
            Node::new(Vec2::new(85.0, 10.0), Vec2::ZERO),
        ];
        let particles = vec![Particle {
            pos: Vec2::new(50.0, 20.0),
            speed: 1.0,
            size: 3.0,
            opacity: 0.4,
            decay: settings.particle_decay,
        }];

        let mut surface = RecordingSurface::new();
        draw_frame(&mut surface, vp, &nodes, &particles, &settings);

        let cmds = &surface.commands;
        assert_eq!(cmds.len(), 5);
        assert_eq!(cmds[0], DrawCommand::Clear(vp));
        assert!(matches!(cmds[1], DrawCommand::Disc { radius: 2.0, .. }));
        assert!(matches!(cmds[2], DrawCommand::Disc { radius: 2.0, .. }));
        assert_eq!(
            cmds[3],
            DrawCommand::Line {
                from: nodes[0].pos,
                to: nodes[1].pos,
                color: Rgba::accent().with_alpha(0.5),
                width: 0.5,
            }
        );
        assert_eq!(
            cmds[4],
            DrawCommand::Disc {
                center: Vec2::new(50.0, 20.0),
                radius: 3.0,
                color: Rgba::accent().with_alpha(0.4),
            }
        );
    }

    #[test]
    fn test_links_counted() {
        let settings = Settings::default();
        let nodes = vec![
            Node::new(Vec2::new(0.0, 0.0), Vec2::ZERO),
            Node::new(Vec2::new(100.0, 0.0), Vec2::ZERO),
            Node::new(Vec2::new(400.0, 0.0), Vec2::ZERO),
        ];
        let mut surface = RecordingSurface::new();
        assert_eq!(draw_links(&mut surface, &nodes, &settings), 1);
        assert_eq!(surface.line_count(), 1);
    }
}
