//! Frame loop lifecycle: mounting on a host, per-frame driving, cancellation
//!
//! The host (browser page, preview window, test double) supplies three things:
//! a support probe, a drawing surface and a frame scheduler. [`FieldLoop`]
//! owns the field state plus both host pieces, re-requests a frame after each
//! one it renders, and keeps the pending request so it can be cancelled.

use rand::Rng;
use tracing::{debug, info};

use super::cloud::PointCloud;
use super::projection::{SurfaceSize, Viewport};
use super::scene::{ParticleField, Scene};
use crate::config::FieldConfig;
use crate::error::FieldError;

/// Handle of a pending frame request (what `requestAnimationFrame` returns)
pub type FrameId = i32;

/// What the host can offer the particle field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSupport {
    Ready,
    MissingTarget,
    NoGraphics,
}

/// Requests a callback before the next repaint
pub trait FrameScheduler {
    /// Returns `None` when the host could not take the request.
    fn request_frame(&mut self) -> Option<FrameId>;
    fn cancel_frame(&mut self, id: FrameId);
}

/// Somewhere the cloud can be drawn
pub trait FieldSurface {
    /// Size the drawing buffer and projection-dependent state.
    fn configure(&mut self, size: &SurfaceSize);
    fn draw(&mut self, cloud: &PointCloud, scene: &Scene);
}

/// Environment a particle field is mounted into
pub trait FieldHost {
    type Scheduler: FrameScheduler;
    type Surface: FieldSurface;

    fn support(&self) -> HostSupport;
    /// Container size in CSS pixels with the pixel ratio capped at `max_pixel_ratio`.
    fn surface_size(&self, max_pixel_ratio: f64) -> SurfaceSize;
    fn viewport(&self) -> Viewport;
    fn open_surface(
        &mut self,
        size: &SurfaceSize,
        cloud: &PointCloud,
    ) -> Result<Self::Surface, FieldError>;
    fn into_scheduler(self) -> Self::Scheduler;
}

/// A mounted particle field and the host pieces driving it
pub struct FieldLoop<S: FrameScheduler, R: FieldSurface> {
    field: ParticleField,
    scheduler: S,
    surface: R,
    pending: Option<FrameId>,
    running: bool,
    frames: u64,
}

impl<S: FrameScheduler, R: FieldSurface> FieldLoop<S, R> {
    /// Mount on `host`, or report why the field stays off.
    ///
    /// Unsupported hosts are turned away before the cloud is generated or a
    /// surface is opened. Nothing is scheduled until [`FieldLoop::start`].
    pub fn mount<H, G>(mut host: H, config: &FieldConfig, rng: &mut G) -> Result<Self, FieldError>
    where
        H: FieldHost<Scheduler = S, Surface = R>,
        G: Rng + ?Sized,
    {
        match host.support() {
            HostSupport::Ready => {}
            HostSupport::MissingTarget => return Err(FieldError::MissingTarget),
            HostSupport::NoGraphics => return Err(FieldError::NoGraphics),
        }

        let size = host.surface_size(config.max_pixel_ratio);
        let field = ParticleField::new(config, size, host.viewport(), rng);
        let mut surface = host.open_surface(&size, field.cloud())?;
        surface.configure(&size);

        info!(
            points = field.cloud().len(),
            width = size.width,
            height = size.height,
            pixel_ratio = size.pixel_ratio,
            "Particle field mounted"
        );

        Ok(Self {
            field,
            scheduler: host.into_scheduler(),
            surface,
            pending: None,
            running: false,
            frames: 0,
        })
    }

    /// Render the first frame now and schedule the next one.
    pub fn start(&mut self, now_ms: f64) {
        if self.running {
            return;
        }
        self.running = true;
        self.on_frame(now_ms);
    }

    /// Frame callback: advance, draw, reschedule. A no-op once cancelled.
    pub fn on_frame(&mut self, now_ms: f64) {
        self.pending = None;
        if !self.running {
            return;
        }
        let scene = self.field.advance(now_ms);
        self.surface.draw(self.field.cloud(), &scene);
        self.frames += 1;
        self.pending = self.scheduler.request_frame();
    }

    /// Pointer listener entry point
    pub fn record_pointer(&mut self, client_x: f64, client_y: f64) {
        self.field.record_pointer(client_x, client_y);
    }

    /// Resize listener entry point. Reconfigures the surface only on change.
    pub fn resize(&mut self, width: u32, height: u32, viewport: Viewport) {
        self.field.set_viewport(viewport);
        if self.field.resize(width, height) {
            self.surface.configure(&self.field.surface());
        }
    }

    /// Stop the loop: cancel the pending frame and ignore later callbacks.
    pub fn cancel(&mut self) {
        self.running = false;
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        debug!(frames = self.frames, "Particle field loop cancelled");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Call counters shared between a test host and the assertions
    #[derive(Default)]
    struct Calls {
        surfaces_opened: usize,
        configures: Vec<SurfaceSize>,
        draws: usize,
        requested: Vec<FrameId>,
        cancelled: Vec<FrameId>,
    }

    struct TestHost {
        support: HostSupport,
        calls: Rc<RefCell<Calls>>,
    }

    struct TestScheduler {
        next_id: FrameId,
        calls: Rc<RefCell<Calls>>,
    }

    struct TestSurface {
        calls: Rc<RefCell<Calls>>,
    }

    impl FrameScheduler for TestScheduler {
        fn request_frame(&mut self) -> Option<FrameId> {
            self.next_id += 1;
            self.calls.borrow_mut().requested.push(self.next_id);
            Some(self.next_id)
        }

        fn cancel_frame(&mut self, id: FrameId) {
            self.calls.borrow_mut().cancelled.push(id);
        }
    }

    impl FieldSurface for TestSurface {
        fn configure(&mut self, size: &SurfaceSize) {
            self.calls.borrow_mut().configures.push(*size);
        }

        fn draw(&mut self, cloud: &PointCloud, _scene: &Scene) {
            assert_eq!(cloud.len(), 700);
            self.calls.borrow_mut().draws += 1;
        }
    }

    impl FieldHost for TestHost {
        type Scheduler = TestScheduler;
        type Surface = TestSurface;

        fn support(&self) -> HostSupport {
            self.support
        }

        fn surface_size(&self, max_pixel_ratio: f64) -> SurfaceSize {
            SurfaceSize::new(1000, 800, 3.0, max_pixel_ratio)
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(1000.0, 800.0)
        }

        fn open_surface(
            &mut self,
            _size: &SurfaceSize,
            _cloud: &PointCloud,
        ) -> Result<TestSurface, FieldError> {
            self.calls.borrow_mut().surfaces_opened += 1;
            Ok(TestSurface {
                calls: self.calls.clone(),
            })
        }

        fn into_scheduler(self) -> TestScheduler {
            TestScheduler {
                next_id: 0,
                calls: self.calls,
            }
        }
    }

    fn host(support: HostSupport) -> (TestHost, Rc<RefCell<Calls>>) {
        let calls = Rc::new(RefCell::new(Calls::default()));
        (
            TestHost {
                support,
                calls: calls.clone(),
            },
            calls,
        )
    }

    fn mount(
        support: HostSupport,
    ) -> (
        Result<FieldLoop<TestScheduler, TestSurface>, FieldError>,
        Rc<RefCell<Calls>>,
    ) {
        let (host, calls) = host(support);
        let result = FieldLoop::mount(host, &FieldConfig::default(), &mut SmallRng::seed_from_u64(5));
        (result, calls)
    }

    #[test]
    fn test_no_graphics_degrades_silently() {
        let (result, calls) = mount(HostSupport::NoGraphics);
        assert!(matches!(result, Err(FieldError::NoGraphics)));
        let calls = calls.borrow();
        assert_eq!(calls.surfaces_opened, 0);
        assert!(calls.configures.is_empty());
        assert!(calls.requested.is_empty());
        assert_eq!(calls.draws, 0);
    }

    #[test]
    fn test_missing_target_degrades_silently() {
        let (result, calls) = mount(HostSupport::MissingTarget);
        assert!(matches!(result, Err(FieldError::MissingTarget)));
        assert_eq!(calls.borrow().surfaces_opened, 0);
        assert!(calls.borrow().requested.is_empty());
    }

    #[test]
    fn test_mount_configures_capped_surface() {
        let (result, calls) = mount(HostSupport::Ready);
        let field_loop = result.unwrap();
        assert!(!field_loop.is_running());
        let calls = calls.borrow();
        assert_eq!(calls.surfaces_opened, 1);
        assert_eq!(calls.configures.len(), 1);
        assert_eq!(calls.configures[0].pixel_ratio, 2.0);
        assert_eq!(calls.configures[0].physical_width(), 2000);
        // Nothing scheduled before start
        assert!(calls.requested.is_empty());
    }

    #[test]
    fn test_start_draws_and_reschedules() {
        let (result, calls) = mount(HostSupport::Ready);
        let mut field_loop = result.unwrap();

        field_loop.start(0.0);
        assert_eq!(field_loop.frames_rendered(), 1);
        assert_eq!(field_loop.pending_frame(), Some(1));

        // Starting twice does not render an extra frame
        field_loop.start(0.0);
        assert_eq!(field_loop.frames_rendered(), 1);

        for i in 0..10 {
            field_loop.on_frame(16.0 * i as f64);
        }
        assert_eq!(field_loop.frames_rendered(), 11);
        assert_eq!(calls.borrow().draws, 11);
        assert_eq!(calls.borrow().requested.len(), 11);
    }

    #[test]
    fn test_cancel_stops_loop() {
        let (result, calls) = mount(HostSupport::Ready);
        let mut field_loop = result.unwrap();
        field_loop.start(0.0);
        field_loop.on_frame(16.0);

        field_loop.cancel();
        assert!(!field_loop.is_running());
        assert_eq!(field_loop.pending_frame(), None);
        assert_eq!(calls.borrow().cancelled, vec![2]);

        // A callback already in flight does nothing
        field_loop.on_frame(32.0);
        assert_eq!(field_loop.frames_rendered(), 2);
        assert_eq!(calls.borrow().requested.len(), 2);
    }

    #[test]
    fn test_resize_reconfigures_only_on_change() {
        let (result, calls) = mount(HostSupport::Ready);
        let mut field_loop = result.unwrap();
        let viewport = Viewport::new(640.0, 480.0);

        field_loop.resize(640, 480, viewport);
        field_loop.resize(640, 480, viewport);
        let configures = calls.borrow().configures.clone();
        assert_eq!(configures.len(), 2);
        assert_eq!(configures[1].width, 640);
        assert_eq!(configures[1].pixel_ratio, 2.0);
        assert_eq!(field_loop.field().viewport(), viewport);
    }

    #[test]
    fn test_pointer_reaches_field() {
        let (result, _calls) = mount(HostSupport::Ready);
        let mut field_loop = result.unwrap();
        field_loop.record_pointer(600.0, 300.0);
        let pointer = field_loop.field().motion().pointer();
        assert_eq!((pointer.x, pointer.y), (100.0, -100.0));
    }
}
