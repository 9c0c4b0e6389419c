//! Surface sizing, camera projection and CPU-side point projection
//!
//! Matrices are column-major `glam::Mat4` with a 0..1 depth range, which is
//! what wgpu expects. The camera sits on the +z axis looking at the origin.

use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use super::motion::Pose;

/// Upper bound for the device pixel ratio used to size the drawing buffer
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// Rendering surface size: CSS pixels plus the drawing-buffer scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl SurfaceSize {
    /// Build a size from host measurements, capping the pixel ratio at `max_ratio`.
    pub fn new(width: u32, height: u32, device_pixel_ratio: f64, max_ratio: f64) -> Self {
        let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(max_ratio)
        } else {
            1.0
        };
        Self {
            width,
            height,
            pixel_ratio: ratio,
        }
    }

    /// Same pixel ratio, new CSS dimensions
    pub fn resized(&self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: self.pixel_ratio,
        }
    }

    /// Drawing-buffer width in device pixels (never zero)
    pub fn physical_width(&self) -> u32 {
        ((self.width as f64 * self.pixel_ratio).round() as u32).max(1)
    }

    /// Drawing-buffer height in device pixels (never zero)
    pub fn physical_height(&self) -> u32 {
        ((self.height as f64 * self.pixel_ratio).round() as u32).max(1)
    }

    /// Width over height, treating a collapsed container as one pixel.
    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Window size used to turn pointer coordinates into centre offsets
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Offset of a `clientX`/`clientY` pair from the viewport centre
    pub fn pointer_offset(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        (client_x - self.width / 2.0, client_y - self.height / 2.0)
    }
}

/// Perspective camera parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance from the origin along +z
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 2.2,
        }
    }
}

/// Projection state derived from the camera and the current surface size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    camera: Camera,
    aspect: f32,
    view_projection: Mat4,
}

impl Projection {
    pub fn new(camera: Camera, size: &SurfaceSize) -> Self {
        let aspect = size.aspect();
        let projection = Mat4::perspective_rh(
            camera.fov_degrees.to_radians(),
            aspect,
            camera.near,
            camera.far,
        );
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -camera.distance));
        Self {
            camera,
            aspect,
            view_projection: projection * view,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    /// Full transform for a frame: translate after rotating X then Y.
    pub fn model_view_projection(&self, pose: &Pose) -> Mat4 {
        let o = pose.orientation;
        let model = Mat4::from_translation(Vec3::new(0.0, pose.position_y as f32, 0.0))
            * Mat4::from_rotation_x(o.rotation_x as f32)
            * Mat4::from_rotation_y(o.rotation_y as f32);
        self.view_projection * model
    }
}

/// A cloud point after projection, in CSS pixels from the surface's top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f32,
    pub y: f32,
    /// Distance along the view axis (clip-space w)
    pub depth: f32,
}

/// Project a model-space point onto a `width` x `height` surface.
///
/// Returns `None` for points behind the camera or outside the depth range.
pub fn project_point(mvp: &Mat4, point: Vec3, width: f32, height: f32) -> Option<ProjectedPoint> {
    let clip: Vec4 = *mvp * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }
    Some(ProjectedPoint {
        x: (ndc.x + 1.0) * 0.5 * width,
        y: (1.0 - ndc.y) * 0.5 * height,
        depth: clip.w,
    })
}

/// On-screen edge length of a point of `world_size`, matching perspective size
/// attenuation: half the surface height per unit at distance one.
pub fn point_pixel_size(world_size: f32, depth: f32, surface_height: f32) -> f32 {
    world_size * (surface_height * 0.5) / depth.max(f32::EPSILON)
}
