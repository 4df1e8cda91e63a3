//! Drawing contract between the simulation and whatever paints it.
//!
//! The core never talks to a window. A tick produces a [`Frame`], a plain
//! draw list, and a [`Surface`] implementation turns it into pixels.

use crate::types::{BranchId, Color};
use glam::Vec2;

/// A fill-based drawing target.
///
/// Calls arrive as `clear`, then any number of
/// `begin_fill` / `draw_*` / `end_fill` groups.
pub trait Surface {
    fn clear(&mut self);
    fn begin_fill(&mut self, color: Color, opacity: f32);
    /// Fills a closed polygon. The last point connects back to the first.
    fn draw_polygon(&mut self, points: &[Vec2]);
    fn draw_circle(&mut self, center: Vec2, radius: f32);
    fn end_fill(&mut self);
}

/// Anything that advances by one tick and draws the result.
pub trait Animation {
    fn tick(&mut self, surface: &mut dyn Surface);
}

/// One filled outline in a [`Frame`].
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub branch: BranchId,
    pub color: Color,
    pub opacity: f32,
    pub polygon: Vec<Vec2>,
}

/// Everything to draw for one tick, in painting order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub shapes: Vec<Shape>,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn contains(&self, branch: BranchId) -> bool {
        self.shapes.iter().any(|s| s.branch == branch)
    }

    /// Clears `surface` and fills every shape in order.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.clear();
        for shape in &self.shapes {
            surface.begin_fill(shape.color, shape.opacity);
            surface.draw_polygon(&shape.polygon);
            surface.end_fill();
        }
    }
}
