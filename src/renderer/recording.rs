//! In-memory surface that records draw calls

use glam::Vec2;

use super::Surface;
use crate::{Rgba, Viewport};

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize(Viewport),
    Clear(Viewport),
    Disc { center: Vec2, radius: f32, color: Rgba },
    Line { from: Vec2, to: Vec2, color: Rgba, width: f32 },
}

/// Surface that keeps a log of resolved draw commands instead of painting
#[derive(Debug)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    fill: Rgba,
    stroke: Rgba,
    line_width: f32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            fill: Rgba::accent(),
            stroke: Rgba::accent(),
            line_width: 1.0,
        }
    }

    /// Drop recorded commands, keeping the current styles
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear(_)))
            .count()
    }

    pub fn disc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.commands.push(DrawCommand::Resize(viewport));
    }

    fn clear(&mut self, viewport: Viewport) {
        self.commands.push(DrawCommand::Clear(viewport));
    }

    fn set_fill(&mut self, color: Rgba) {
        self.fill = color;
    }

    fn set_stroke(&mut self, color: Rgba, width: f32) {
        self.stroke = color;
        self.line_width = width;
    }

    fn fill_disc(&mut self, center: Vec2, radius: f32) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color: self.fill,
        });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: self.stroke,
            width: self.line_width,
        });
    }
}
