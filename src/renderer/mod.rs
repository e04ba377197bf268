//! Rendering module
//!
//! Scene drawing is written against the `Surface` trait so the same frame
//! code paints a browser canvas or records commands for tests.

pub mod recording;
pub mod scene;

pub use recording::{DrawCommand, RecordingSurface};
pub use scene::{draw_frame, draw_links, draw_node, draw_particle};

use glam::Vec2;

use crate::{Rgba, Viewport};

/// A 2D raster target with canvas-like path primitives
pub trait Surface {
    /// Match the backing store to a new viewport
    fn resize(&mut self, viewport: Viewport);

    /// Clear the whole viewport to transparent
    fn clear(&mut self, viewport: Viewport);

    fn set_fill(&mut self, color: Rgba);

    fn set_stroke(&mut self, color: Rgba, width: f32);

    /// Filled circle using the current fill colour
    fn fill_disc(&mut self, center: Vec2, radius: f32);

    /// Line segment using the current stroke colour and width
    fn stroke_line(&mut self, from: Vec2, to: Vec2);
}
