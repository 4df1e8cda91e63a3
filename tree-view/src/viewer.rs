//! Interactive DNA tree viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`Tree`] plus the camera and
//! timing state, and implements [`eframe::App`] to drive and paint it. The
//! egui repaint loop stands in for the frame scheduler: while running, one
//! tick is taken whenever `step_interval` seconds have passed.

use crate::painter::{Camera, PainterSurface};
use eframe::App;
use tracing::{info, warn};
use tree_core::{
    Config, Palette, Tree,
    render::Surface,
    types::{BranchId, Color},
};

const SPROUT_MARKER: Color = Color::rgb(0xff, 0x40, 0x40);

/// Main application state for the interactive viewer.
///
/// ### Fields
/// - `tree` - The tree being grown.
/// - `cfg` - Editable configuration; applied to a fresh tree on reset.
/// - `running` - Whether the simulation is currently auto-advancing.
/// - `zoom`, `pan` - World-to-screen mapping.
/// - `last_sprouted` - Branches created by the last tick (for highlighting).
/// - `step_interval` - Target time between automatic ticks (seconds).
/// - `last_step_time`, `last_step_dt` - Timing of the last tick (egui time).
/// - `error` - Last reset failure, shown in the config panel.
pub struct Viewer {
    tree: Tree,
    cfg: Config,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,
    show_sprouts: bool,

    last_sprouted: Vec<BranchId>,

    step_interval: f64,
    last_step_time: f64,
    last_step_dt: f64,

    error: Option<String>,
}

impl Viewer {
    /// Plants a tree from `cfg` and starts paused.
    pub fn new(cfg: Config) -> tree_core::Result<Self> {
        let tree = Tree::from_config(cfg.clone())?;
        info!(palette = tree.palette().name(), "viewer ready");

        Ok(Self {
            tree,
            cfg,
            running: false,
            zoom: 1.0,
            pan: egui::vec2(0.0, 0.0),
            show_sprouts: false,
            last_sprouted: Vec::new(),
            step_interval: 1.0 / 60.0,
            last_step_time: 0.0,
            last_step_dt: 0.0,
            error: None,
        })
    }

    /// Replaces the tree with a fresh one built from the edited config.
    ///
    /// On an invalid config the current tree is kept and the error is shown.
    fn reset(&mut self) {
        match Tree::from_config(self.cfg.clone()) {
            Ok(tree) => {
                self.tree = tree;
                self.last_sprouted.clear();
                self.running = false;
                self.error = None;
            }
            Err(e) => {
                warn!(error = %e, "reset rejected");
                self.error = Some(e.to_string());
            }
        }
    }

    /// Advances the tree by a single tick.
    fn step_once(&mut self) {
        let report = self.tree.tick();
        self.last_sprouted = report.sprouted;
    }

    fn camera(&self, rect: egui::Rect) -> Camera {
        Camera {
            rect,
            zoom: self.zoom,
            pan: self.pan,
        }
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                ui.add(
                    egui::DragValue::new(&mut self.step_interval)
                        .prefix("dt target = ")
                        .range(0.001..=1.0)
                        .speed(0.005),
                );

                if ui.button("Step").clicked() {
                    let now = ctx.input(|i| i.time);
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = now - self.last_step_time;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.1..=10.0).text("Zoom"));
                ui.checkbox(&mut self.show_sprouts, "Mark sprouts");
            });
        });
    }

    /// Builds the bottom status bar.
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt target = {:.3} s", self.step_interval));
                ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                ui.separator();
                ui.label(format!("tick = {}", self.tree.tick_count()));
                ui.label(format!("branches = {}", self.tree.len()));
                ui.label(format!("growing = {}", self.tree.growing_count()));
                ui.label(format!("palette = {}", self.tree.palette().name()));
            });
        });
    }

    fn labeled_drag_u32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u32,
        range: std::ops::RangeInclusive<u32>,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(1.0));
        });
    }

    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the right-hand configuration panel. Edits apply on reset.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                ui.small("Changes apply on reset.");

                ui.separator();
                ui.label("Lifecycle");
                Self::labeled_drag_u32(
                    ui,
                    "max_recursion_depth:",
                    &mut self.cfg.max_recursion_depth,
                    1..=12,
                );
                Self::labeled_drag_u32(ui, "max_age:", &mut self.cfg.max_age, 0..=1000);
                Self::labeled_drag_f32(
                    ui,
                    "sprout_probability:",
                    &mut self.cfg.sprout_probability,
                    0.0..=1.0,
                    0.005,
                );

                ui.separator();
                ui.label("Growth");
                Self::labeled_drag_f32(ui, "grow_speed:", &mut self.cfg.grow_speed, 0.1..=50.0, 0.1);
                Self::labeled_drag_f32(ui, "dt:", &mut self.cfg.dt, 0.0..=2.0, 0.01);
                Self::labeled_drag_f32(ui, "origin.x:", &mut self.cfg.origin.x, -2000.0..=2000.0, 1.0);
                Self::labeled_drag_f32(ui, "origin.y:", &mut self.cfg.origin.y, -2000.0..=2000.0, 1.0);

                ui.separator();
                ui.label("Look");
                Self::labeled_drag_f32(
                    ui,
                    "fill_opacity:",
                    &mut self.cfg.fill_opacity,
                    0.0..=1.0,
                    0.01,
                );
                let selected = self.cfg.palette.clone().unwrap_or_else(|| "random".into());
                egui::ComboBox::from_label("palette")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.cfg.palette, None, "random");
                        for name in Palette::preset_names() {
                            ui.selectable_value(&mut self.cfg.palette, Some(name.to_owned()), name);
                        }
                    });

                ui.separator();
                ui.label("Randomness");
                let mut fixed = self.cfg.seed.is_some();
                if ui.checkbox(&mut fixed, "fixed seed").changed() {
                    self.cfg.seed = fixed.then_some(0);
                }
                if let Some(seed) = self.cfg.seed.as_mut() {
                    ui.add(egui::DragValue::new(seed).prefix("seed = "));
                }

                ui.separator();
                ui.label("Retention");
                let mut prune = self.cfg.prune_dormant_after.is_some();
                if ui.checkbox(&mut prune, "prune dormant branches").changed() {
                    self.cfg.prune_dormant_after = prune.then_some(200);
                }
                if let Some(limit) = self.cfg.prune_dormant_after.as_mut() {
                    Self::labeled_drag_u32(ui, "after ticks:", limit, 0..=10_000);
                }

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }

                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err.as_str());
                }
            });
    }

    /// Builds the central panel where the tree is drawn and navigated.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let world_before = self.camera(rect).screen_to_world(pointer_screen);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(0.1, 10.0);

                let screen_after = self.camera(rect).world_to_screen(world_before);
                self.pan += pointer_screen - screen_after;
            }

            let mut surface = PainterSurface::new(&painter, self.camera(rect));
            self.tree.frame().draw(&mut surface);

            if self.show_sprouts {
                surface.begin_fill(SPROUT_MARKER, 1.0);
                for branch in self
                    .last_sprouted
                    .iter()
                    .filter_map(|&id| self.tree.branch(id))
                {
                    surface.draw_circle(branch.path()[0], 3.0);
                }
                surface.end_fill();
            }

            // Auto-run simulation if requested.
            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= self.step_interval {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
