//! Header bar with controls and status

use eframe::egui;

use super::PreviewApp;
use crate::theme::colors;
use crate::time::now_millis;

impl PreviewApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        self.fps_counter.tick();

        let running = self.field_loop.is_running();
        let field = self.field_loop.field();
        let orientation = field.motion().orientation();
        let pointer = field.motion().pointer();
        let visible = self.field_loop.surface().dots().len();
        let total = field.cloud().len();

        ui.horizontal(|ui| {
            let label = if running { "Pause" } else { "Resume" };
            if ui.button(label).clicked() {
                if running {
                    self.field_loop.cancel();
                } else {
                    self.field_loop.start(now_millis());
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{}/{} points", visible, total))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!(
                        "rot {:+.3} {:+.3}",
                        orientation.rotation_x, orientation.rotation_y
                    ))
                    .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("pointer {:+.0} {:+.0}", pointer.x, pointer.y))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));
                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.fps()))
                        .color(colors::TEXT_SECONDARY),
                );
            });
        });
    }
}

/// Frame rate over the last 60 frames
pub struct FpsCounter {
    frames: Vec<f64>,
}

impl FpsCounter {
    const WINDOW: usize = 60;

    pub fn new() -> Self {
        Self {
            frames: Vec::with_capacity(Self::WINDOW),
        }
    }

    pub fn tick(&mut self) {
        self.record(now_millis());
    }

    fn record(&mut self, now_ms: f64) {
        self.frames.push(now_ms);
        if self.frames.len() > Self::WINDOW {
            self.frames.remove(0);
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / (elapsed / 1000.0)
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_needs_two_frames() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.fps(), 0.0);
        fps.record(0.0);
        assert_eq!(fps.fps(), 0.0);
    }

    #[test]
    fn test_fps_over_window() {
        let mut fps = FpsCounter::new();
        for i in 0..200 {
            fps.record(i as f64 * 20.0);
        }
        assert_eq!(fps.frames.len(), 60);
        assert!((fps.fps() - 50.0).abs() < 1e-9);
    }
}
