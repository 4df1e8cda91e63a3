//! [`Surface`] backed by an egui painter.

use glam::Vec2;
use tree_core::{render::Surface, ribbon::ribbon_triangles, types::Color};

/// Maps world positions onto the canvas.
///
/// World space already uses screen orientation (y down), so the mapping is
/// a scale by `zoom` plus an offset to the canvas center and the pan.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub rect: egui::Rect,
    pub zoom: f32,
    pub pan: egui::Vec2,
}

impl Camera {
    pub fn world_to_screen(&self, p: Vec2) -> egui::Pos2 {
        let center = self.rect.center();
        egui::pos2(
            center.x + p.x * self.zoom + self.pan.x,
            center.y + p.y * self.zoom + self.pan.y,
        )
    }

    pub fn screen_to_world(&self, p: egui::Pos2) -> Vec2 {
        let center = self.rect.center();
        Vec2::new(
            (p.x - center.x - self.pan.x) / self.zoom,
            (p.y - center.y - self.pan.y) / self.zoom,
        )
    }
}

pub fn to_color32(color: Color, opacity: f32) -> egui::Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha)
}

/// Fills shapes into an egui [`egui::Painter`].
///
/// Ribbons are concave once a branch bends, so polygons are split into a
/// triangle mesh instead of using egui's convex polygon shape.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    camera: Camera,
    fill: Option<egui::Color32>,
}

impl<'a> PainterSurface<'a> {
    pub fn new(painter: &'a egui::Painter, camera: Camera) -> Self {
        Self {
            painter,
            camera,
            fill: None,
        }
    }
}

impl Surface for PainterSurface<'_> {
    // egui repaints every frame from scratch.
    fn clear(&mut self) {}

    fn begin_fill(&mut self, color: Color, opacity: f32) {
        self.fill = Some(to_color32(color, opacity));
    }

    fn draw_polygon(&mut self, points: &[Vec2]) {
        let Some(fill) = self.fill else {
            return;
        };

        let mut mesh = egui::Mesh::default();
        for &p in points {
            mesh.colored_vertex(self.camera.world_to_screen(p), fill);
        }
        for [a, b, c] in ribbon_triangles(points) {
            mesh.add_triangle(a, b, c);
        }
        self.painter.add(egui::Shape::mesh(mesh));
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32) {
        let Some(fill) = self.fill else {
            return;
        };
        let p = self.camera.world_to_screen(center);
        self.painter
            .circle_filled(p, (radius * self.camera.zoom).max(1.0), fill);
    }

    fn end_fill(&mut self) {
        self.fill = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            rect: egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0)),
            zoom: 2.0,
            pan: egui::vec2(15.0, -7.0),
        }
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let cam = camera();
        let eps = 1e-4;

        for p in [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, -5.0),
            Vec2::new(-3.5, 300.0),
        ] {
            let back = cam.screen_to_world(cam.world_to_screen(p));
            assert!(
                (back - p).abs().max_element() < eps,
                "roundtrip mismatch: p={p:?}, back={back:?}"
            );
        }
    }

    #[test]
    fn world_y_grows_down_the_screen() {
        let cam = camera();
        let above = cam.world_to_screen(Vec2::new(0.0, -10.0));
        let below = cam.world_to_screen(Vec2::new(0.0, 10.0));
        assert!(above.y < below.y);
    }

    #[test]
    fn opacity_maps_to_alpha() {
        let c = to_color32(Color::rgb(10, 20, 30), 1.0);
        assert_eq!(c, egui::Color32::from_rgb(10, 20, 30));
        assert_eq!(to_color32(Color::rgb(0, 0, 0), 0.0).a(), 0);
    }
}
