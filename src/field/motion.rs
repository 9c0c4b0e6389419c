//! Per-frame motion: ambient drift, pointer steering and vertical bobbing
//!
//! Smoothing is a first-order low-pass filter applied once per frame with a
//! fixed factor. It is not scaled by the time between frames, so the cloud
//! settles faster on high refresh-rate displays. Pages that already ship this
//! animation depend on that feel, so it is kept.

use serde::{Deserialize, Serialize};

/// Motion constants, tunable through the site config
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Radians of target rotation per pixel of pointer offset
    pub sensitivity: f64,
    /// Constant drift added to `rotation_y` every frame
    pub drift_y: f64,
    /// Constant drift added to `rotation_x` every frame
    pub drift_x: f64,
    /// Fraction of the remaining distance to the target covered per frame
    pub smoothing: f64,
    /// Peak vertical offset of the bobbing motion
    pub bob_amplitude: f64,
    /// Angular frequency of the bobbing motion, radians per millisecond
    pub bob_frequency: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            sensitivity: 0.001,
            drift_y: 0.002,
            drift_x: 0.001,
            smoothing: 0.05,
            bob_amplitude: 0.05,
            bob_frequency: 0.0005,
        }
    }
}

/// Rotation of the cloud around its horizontal (x) and vertical (y) axes
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orientation {
    pub rotation_x: f64,
    pub rotation_y: f64,
}

/// Latest pointer offset from the viewport centre, in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTarget {
    pub x: f64,
    pub y: f64,
}

/// Everything one frame contributes to the model transform
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose {
    pub orientation: Orientation,
    pub position_y: f64,
}

/// Vertical bobbing offset at wall-clock time `now_ms`
pub fn bob_offset(now_ms: f64, amplitude: f64, frequency: f64) -> f64 {
    (now_ms * frequency).sin() * amplitude
}

/// Orientation state plus the pointer target steering it
#[derive(Debug, Clone)]
pub struct FieldMotion {
    params: MotionParams,
    orientation: Orientation,
    pointer: PointerTarget,
}

impl FieldMotion {
    pub fn new(params: MotionParams) -> Self {
        Self {
            params,
            orientation: Orientation::default(),
            pointer: PointerTarget::default(),
        }
    }

    /// Overwrite the pointer target. No smoothing happens here.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.pointer = PointerTarget { x, y };
    }

    pub fn pointer(&self) -> PointerTarget {
        self.pointer
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Rotation the smoothing pulls toward, as `(rotation_y, rotation_x)`.
    ///
    /// Horizontal pointer offset steers rotation around the vertical axis.
    pub fn target(&self) -> (f64, f64) {
        (
            self.pointer.x * self.params.sensitivity,
            self.pointer.y * self.params.sensitivity,
        )
    }

    /// Advance one frame and return the resulting pose.
    pub fn step(&mut self, now_ms: f64) -> Pose {
        let (target_y, target_x) = self.target();
        let p = &self.params;
        let o = &mut self.orientation;

        o.rotation_y += p.drift_y;
        o.rotation_x += p.drift_x;

        o.rotation_y += p.smoothing * (target_y - o.rotation_y);
        o.rotation_x += p.smoothing * (target_x - o.rotation_x);

        Pose {
            orientation: *o,
            position_y: bob_offset(now_ms, p.bob_amplitude, p.bob_frequency),
        }
    }

    /// Angle the smoothing settles at for a fixed target, given constant drift.
    ///
    /// Solves `a = (a + d) + k * (t - (a + d))` for `a`.
    pub fn equilibrium(target: f64, drift: f64, smoothing: f64) -> f64 {
        target + drift * (1.0 - smoothing) / smoothing
    }
}

impl Default for FieldMotion {
    fn default() -> Self {
        Self::new(MotionParams::default())
    }
}
