//! Window-less run: a plain loop in place of the repaint scheduler.

use anyhow::Context;
use glam::Vec2;
use tracing::info;
use tree_core::{
    Config, Tree,
    render::{Animation, Surface},
    types::Color,
};

const LOG_EVERY: u64 = 50;

/// Surface that only measures what would have been drawn.
#[derive(Debug, Default)]
pub struct StatsSurface {
    pub fills: usize,
    pub polygons: usize,
    pub points: usize,
    /// Axis-aligned bounds of everything drawn since the last clear.
    pub bounds: Option<(Vec2, Vec2)>,
}

impl StatsSurface {
    fn include(&mut self, p: Vec2) {
        self.bounds = Some(match self.bounds {
            Some((lo, hi)) => (lo.min(p), hi.max(p)),
            None => (p, p),
        });
    }
}

impl Surface for StatsSurface {
    fn clear(&mut self) {
        *self = Self::default();
    }

    fn begin_fill(&mut self, _color: Color, _opacity: f32) {
        self.fills += 1;
    }

    fn draw_polygon(&mut self, points: &[Vec2]) {
        self.polygons += 1;
        self.points += points.len();
        for &p in points {
            self.include(p);
        }
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32) {
        self.include(center - Vec2::splat(radius));
        self.include(center + Vec2::splat(radius));
    }

    fn end_fill(&mut self) {}
}

/// Grows a tree for `ticks` ticks and logs progress.
pub fn run(cfg: Config, ticks: u64) -> anyhow::Result<()> {
    let mut tree = Tree::from_config(cfg).context("failed to plant tree")?;
    let mut surface = StatsSurface::default();

    for _ in 0..ticks {
        Animation::tick(&mut tree, &mut surface);

        if tree.tick_count() % LOG_EVERY == 0 {
            info!(
                tick = tree.tick_count(),
                branches = tree.len(),
                growing = tree.growing_count(),
                drawn = surface.polygons,
                "progress"
            );
        }
    }

    let extent = surface.bounds.map(|(lo, hi)| hi - lo).unwrap_or(Vec2::ZERO);
    info!(
        ticks = tree.tick_count(),
        branches = tree.len(),
        growing = tree.growing_count(),
        points = surface.points,
        width = extent.x,
        height = extent.y,
        palette = tree.palette().name(),
        "headless run finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_surface_tracks_bounds_and_resets_on_clear() {
        let mut s = StatsSurface::default();
        s.begin_fill(Color::rgb(0, 0, 0), 1.0);
        s.draw_polygon(&[Vec2::new(-1.0, 2.0), Vec2::new(3.0, -4.0)]);
        s.end_fill();

        assert_eq!(s.fills, 1);
        assert_eq!(s.polygons, 1);
        assert_eq!(s.points, 2);
        assert_eq!(s.bounds, Some((Vec2::new(-1.0, -4.0), Vec2::new(3.0, 2.0))));

        s.clear();
        assert_eq!(s.polygons, 0);
        assert!(s.bounds.is_none());
    }

    #[test]
    fn run_completes_with_seeded_config() {
        let cfg = Config {
            seed: Some(21),
            palette: Some("moss".into()),
            ..Config::default()
        };
        assert!(run(cfg, 120).is_ok());
    }

    #[test]
    fn run_reports_invalid_config() {
        let cfg = Config {
            grow_speed: 0.0,
            ..Config::default()
        };
        let err = run(cfg, 1).unwrap_err();
        assert!(format!("{err:#}").contains("grow_speed"));
    }
}
