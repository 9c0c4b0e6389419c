//! Continuous particle field - a rotating point cloud steered by the pointer
//!
//! Platform-agnostic state and frame loop, shared between the browser build
//! and the native preview. The wgpu renderer is browser-only.

pub mod cloud;
pub mod cpu;
pub mod lifecycle;
pub mod motion;
pub mod projection;
pub mod scene;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub mod renderer;

pub use cloud::{CloudPoint, PointCloud};
pub use cpu::{CpuSurface, ScreenDot};
pub use lifecycle::{FieldHost, FieldLoop, FieldSurface, FrameId, FrameScheduler, HostSupport};
pub use motion::{bob_offset, FieldMotion, MotionParams, Orientation, PointerTarget, Pose};
pub use projection::{
    point_pixel_size, project_point, Camera, ProjectedPoint, Projection, SurfaceSize, Viewport,
    MAX_PIXEL_RATIO,
};
pub use scene::{ParticleField, Scene};
