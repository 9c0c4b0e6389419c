//! The preview window as a particle field host

use tracing::trace;

use crate::error::FieldError;
use crate::field::{
    CpuSurface, FieldHost, FrameId, FrameScheduler, HostSupport, PointCloud, SurfaceSize, Viewport,
};

/// Frames are egui repaints. A repaint request cannot be withdrawn, so a
/// cancelled frame still repaints once and the loop ignores it.
pub struct RepaintScheduler {
    ctx: egui::Context,
    next_id: FrameId,
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> Option<FrameId> {
        self.ctx.request_repaint();
        self.next_id = self.next_id.wrapping_add(1);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, id: FrameId) {
        trace!(id, "Repaint already requested, dropping frame");
    }
}

pub struct PreviewHost {
    ctx: egui::Context,
    width: u32,
    height: u32,
    point_size: f32,
}

impl PreviewHost {
    pub fn new(ctx: egui::Context, point_size: f32) -> Self {
        let rect = ctx.screen_rect();
        Self {
            ctx,
            width: rect.width().max(0.0) as u32,
            height: rect.height().max(0.0) as u32,
            point_size,
        }
    }
}

impl FieldHost for PreviewHost {
    type Scheduler = RepaintScheduler;
    type Surface = CpuSurface;

    fn support(&self) -> HostSupport {
        HostSupport::Ready
    }

    fn surface_size(&self, max_pixel_ratio: f64) -> SurfaceSize {
        SurfaceSize::new(
            self.width,
            self.height,
            self.ctx.pixels_per_point() as f64,
            max_pixel_ratio,
        )
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f64, self.height as f64)
    }

    fn open_surface(
        &mut self,
        _size: &SurfaceSize,
        cloud: &PointCloud,
    ) -> Result<CpuSurface, FieldError> {
        Ok(CpuSurface::new(self.point_size, cloud.len()))
    }

    fn into_scheduler(self) -> RepaintScheduler {
        RepaintScheduler {
            ctx: self.ctx,
            next_id: 0,
        }
    }
}
