//! Particle field state owned by whoever drives the frame loop
//!
//! All mutable state lives here: the cloud, the orientation, the pointer
//! target and the projection. Pointer listeners reach it only through
//! [`ParticleField::record_pointer`].

use glam::Mat4;
use rand::Rng;
use tracing::{debug, trace};

use super::cloud::PointCloud;
use super::motion::{FieldMotion, Pose};
use super::projection::{Projection, SurfaceSize, Viewport};
use crate::config::FieldConfig;

/// Output of one frame update, ready to be drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scene {
    pub pose: Pose,
    pub model_view_projection: Mat4,
    pub surface: SurfaceSize,
}

/// Rotating, bobbing point cloud steered by the pointer
pub struct ParticleField {
    cloud: PointCloud,
    motion: FieldMotion,
    projection: Projection,
    surface: SurfaceSize,
    viewport: Viewport,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(
        config: &FieldConfig,
        surface: SurfaceSize,
        viewport: Viewport,
        rng: &mut R,
    ) -> Self {
        let cloud = PointCloud::generate(config.point_count, config.cube_side, rng);
        debug!(
            width = surface.width,
            height = surface.height,
            pixel_ratio = surface.pixel_ratio,
            points = cloud.len(),
            "Particle field created"
        );
        Self {
            cloud,
            motion: FieldMotion::new(config.motion),
            projection: Projection::new(config.camera, &surface),
            surface,
            viewport,
        }
    }

    /// Record a raw pointer position in viewport coordinates.
    pub fn record_pointer(&mut self, client_x: f64, client_y: f64) {
        let (x, y) = self.viewport.pointer_offset(client_x, client_y);
        self.motion.set_pointer(x, y);
    }

    /// Advance orientation and bobbing for wall-clock time `now_ms`.
    pub fn advance(&mut self, now_ms: f64) -> Scene {
        let pose = self.motion.step(now_ms);
        trace!(
            rotation_x = pose.orientation.rotation_x,
            rotation_y = pose.orientation.rotation_y,
            position_y = pose.position_y,
            "Frame advanced"
        );
        Scene {
            pose,
            model_view_projection: self.projection.model_view_projection(&pose),
            surface: self.surface,
        }
    }

    /// Recompute surface size and projection for new container dimensions.
    ///
    /// Returns `true` when the size actually changed. Calling it again with the
    /// same dimensions leaves everything as it was.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let surface = self.surface.resized(width, height);
        if surface == self.surface {
            return false;
        }
        self.surface = surface;
        self.projection = Projection::new(*self.projection.camera(), &surface);
        debug!(width, height, aspect = self.projection.aspect(), "Particle field resized");
        true
    }

    /// Replace the window size used for pointer offsets.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn motion(&self) -> &FieldMotion {
        &self.motion
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}
