//! Point cloud generation
//!
//! The cloud is drawn once from a uniform distribution over a cube centred at
//! the origin and never mutated afterwards. Rotation and bobbing move the whole
//! cloud as a rigid body through the model matrix.

use bytemuck::{Pod, Zeroable};
use rand::Rng;
use tracing::debug;

/// GPU-compatible cloud point (12 bytes)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CloudPoint {
    pub position: [f32; 3],
}

/// Fixed-size set of points rendered as dots
#[derive(Debug, Clone)]
pub struct PointCloud {
    points: Vec<CloudPoint>,
    side: f32,
}

impl PointCloud {
    /// Draw `count` points uniformly from a cube with edge length `side`.
    ///
    /// Each coordinate is `(u - 0.5) * side` with `u` in `[0, 1)`.
    pub fn generate<R: Rng + ?Sized>(count: usize, side: f32, rng: &mut R) -> Self {
        let mut coord = || (rng.gen::<f32>() - 0.5) * side;
        let points: Vec<CloudPoint> = (0..count)
            .map(|_| CloudPoint {
                position: [coord(), coord(), coord()],
            })
            .collect();

        debug!(count, side, "Point cloud generated");
        Self { points, side }
    }

    pub fn points(&self) -> &[CloudPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest absolute coordinate any point can have
    pub fn half_extent(&self) -> f32 {
        self.side * 0.5
    }
}
