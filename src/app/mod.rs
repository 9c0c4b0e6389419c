//! Native preview of the particle field
//!
//! Drives the same [`FieldLoop`] as the page, projecting on the CPU and
//! painting the points with egui. The pointer offset is measured from the
//! centre of the field panel, standing in for the browser window.

mod header;
mod host;

use eframe::egui;
use tracing::info;

use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::{CpuSurface, FieldLoop, Viewport};
use crate::theme::{colors, landing_visuals, point_color};
use crate::time::now_millis;

pub use header::FpsCounter;
pub use host::{PreviewHost, RepaintScheduler};

pub struct PreviewApp {
    pub(crate) field_loop: FieldLoop<RepaintScheduler, CpuSurface>,
    pub(crate) fps_counter: FpsCounter,
    point_color: egui::Color32,
}

impl PreviewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &FieldConfig) -> Result<Self, FieldError> {
        cc.egui_ctx.set_visuals(landing_visuals());

        let host = PreviewHost::new(cc.egui_ctx.clone(), config.point_size);
        let mut field_loop = FieldLoop::mount(host, config, &mut rand::thread_rng())?;
        field_loop.start(now_millis());
        info!(points = config.point_count, "Preview started");

        Ok(Self {
            field_loop,
            fps_counter: FpsCounter::new(),
            point_color: point_color(config.rgba()),
        })
    }

    fn render_field(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::hover());
        let rect = response.rect;

        let width = rect.width().max(0.0) as u32;
        let height = rect.height().max(0.0) as u32;
        self.field_loop.resize(
            width,
            height,
            Viewport::new(rect.width() as f64, rect.height() as f64),
        );

        if let Some(pos) = response.hover_pos() {
            let local = pos - rect.min;
            self.field_loop.record_pointer(local.x as f64, local.y as f64);
        }

        if self.field_loop.pending_frame().is_some() {
            self.field_loop.on_frame(now_millis());
        }

        for dot in self.field_loop.surface().dots() {
            let center = rect.min + egui::vec2(dot.x, dot.y);
            painter.rect_filled(
                egui::Rect::from_center_size(center, egui::vec2(dot.size, dot.size)),
                0.0,
                self.point_color,
            );
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::BG_ELEVATED).inner_margin(6.0))
            .show(ctx, |ui| self.render_header(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PAGE))
            .show(ctx, |ui| self.render_field(ui));
    }
}
