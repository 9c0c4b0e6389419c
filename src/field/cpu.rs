//! CPU projection surface
//!
//! Projects every cloud point on the CPU each frame and keeps the resulting
//! screen-space squares for a painter to draw. Used by the native preview,
//! where the window toolkit owns the GPU.

use glam::Vec3;

use super::cloud::PointCloud;
use super::lifecycle::FieldSurface;
use super::projection::{point_pixel_size, project_point, SurfaceSize};
use super::scene::Scene;

/// One point ready to paint, in CSS pixels from the surface's top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenDot {
    pub x: f32,
    pub y: f32,
    /// Edge length of the square
    pub size: f32,
}

pub struct CpuSurface {
    size: SurfaceSize,
    point_size: f32,
    dots: Vec<ScreenDot>,
}

impl CpuSurface {
    pub fn new(point_size: f32, capacity: usize) -> Self {
        Self {
            size: SurfaceSize::new(1, 1, 1.0, 1.0),
            point_size,
            dots: Vec::with_capacity(capacity),
        }
    }

    /// Dots from the most recent frame
    pub fn dots(&self) -> &[ScreenDot] {
        &self.dots
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }
}

impl FieldSurface for CpuSurface {
    fn configure(&mut self, size: &SurfaceSize) {
        self.size = *size;
    }

    fn draw(&mut self, cloud: &PointCloud, scene: &Scene) {
        let width = self.size.width as f32;
        let height = self.size.height as f32;
        let mvp = scene.model_view_projection;

        self.dots.clear();
        self.dots.extend(cloud.points().iter().filter_map(|p| {
            let projected = project_point(&mvp, Vec3::from_array(p.position), width, height)?;
            if projected.x < 0.0 || projected.x > width || projected.y < 0.0 || projected.y > height {
                return None;
            }
            Some(ScreenDot {
                x: projected.x,
                y: projected.y,
                size: point_pixel_size(self.point_size, projected.depth, height),
            })
        }));
    }
}
