//! Browser host for the particle field: canvas, WebGL2 device, animation frames

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::dom::{self, EventListener};
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::field::renderer::{FieldRenderer, GpuContext, PointStyle};
use crate::field::{
    FieldHost, FieldLoop, FieldSurface, FrameId, FrameScheduler, HostSupport, PointCloud, Scene,
    SurfaceSize, Viewport,
};
use crate::time;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

type WebFieldLoop = FieldLoop<RafScheduler, GpuSurface>;

/// `requestAnimationFrame` driver. The callback is installed after mounting,
/// once the loop it drives exists.
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Option<FrameId> {
        let callback = self.callback.borrow();
        let callback = callback.as_ref()?;
        match self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(?e, "requestAnimationFrame failed");
                None
            }
        }
    }

    fn cancel_frame(&mut self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id) {
            warn!(?e, "cancelAnimationFrame failed");
        }
    }
}

/// Canvas with its wgpu device and the field pipeline
pub struct GpuSurface {
    canvas: HtmlCanvasElement,
    gpu: GpuContext,
    renderer: FieldRenderer,
}

impl FieldSurface for GpuSurface {
    fn configure(&mut self, size: &SurfaceSize) {
        self.canvas.set_width(size.physical_width());
        self.canvas.set_height(size.physical_height());
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", size.width));
        let _ = style.set_property("height", &format!("{}px", size.height));
        self.gpu.resize(size);
    }

    fn draw(&mut self, _cloud: &PointCloud, scene: &Scene) {
        let frame = match self.gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!("Surface lost, reconfiguring");
                self.gpu
                    .surface
                    .configure(&self.gpu.device, &self.gpu.surface_config);
                return;
            }
            Err(e) => {
                warn!(error = %e, "Skipping frame");
                return;
            }
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("field_encoder"),
            });
        self.renderer
            .render(&self.gpu.queue, &mut encoder, &view, scene);
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }
}

/// The page as a [`FieldHost`]. Probing happens before mounting, because
/// acquiring a device is asynchronous.
pub struct WebHost {
    window: Window,
    container: Option<HtmlElement>,
    canvas: Option<HtmlCanvasElement>,
    gpu: Option<GpuContext>,
    style: PointStyle,
}

impl WebHost {
    /// Find the container and try to bring up a WebGL2 device on a fresh,
    /// still detached canvas.
    pub async fn probe(window: Window, config: &FieldConfig) -> Self {
        let mut host = Self {
            window,
            container: None,
            canvas: None,
            gpu: None,
            style: PointStyle::from(config),
        };

        let Some(document) = host.window.document() else {
            return host;
        };
        host.container = document
            .get_element_by_id(&config.container_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if host.container.is_none() {
            return host;
        }

        let canvas = match document
            .create_element("canvas")
            .map(|el| el.dyn_into::<HtmlCanvasElement>())
        {
            Ok(Ok(canvas)) => canvas,
            _ => return host,
        };

        let size = host.surface_size(config.max_pixel_ratio);
        match GpuContext::acquire(canvas.clone(), &size).await {
            Ok(gpu) => {
                host.gpu = Some(gpu);
                host.canvas = Some(canvas);
            }
            Err(e) => info!(error = %e, "WebGL2 unavailable"),
        }
        host
    }

    fn container_size(&self) -> (u32, u32) {
        self.container
            .as_ref()
            .map(|c| (c.client_width().max(0) as u32, c.client_height().max(0) as u32))
            .unwrap_or((0, 0))
    }
}

impl FieldHost for WebHost {
    type Scheduler = RafScheduler;
    type Surface = GpuSurface;

    fn support(&self) -> HostSupport {
        if self.container.is_none() {
            HostSupport::MissingTarget
        } else if self.gpu.is_none() {
            HostSupport::NoGraphics
        } else {
            HostSupport::Ready
        }
    }

    fn surface_size(&self, max_pixel_ratio: f64) -> SurfaceSize {
        let (width, height) = self.container_size();
        SurfaceSize::new(
            width,
            height,
            self.window.device_pixel_ratio(),
            max_pixel_ratio,
        )
    }

    fn viewport(&self) -> Viewport {
        window_viewport(&self.window)
    }

    fn open_surface(
        &mut self,
        _size: &SurfaceSize,
        cloud: &PointCloud,
    ) -> Result<GpuSurface, FieldError> {
        let (Some(container), Some(canvas), Some(gpu)) =
            (self.container.as_ref(), self.canvas.take(), self.gpu.take())
        else {
            return Err(FieldError::NoGraphics);
        };

        let renderer = FieldRenderer::new(&gpu.device, gpu.format(), cloud, self.style);
        container
            .append_child(&canvas)
            .map_err(|e| FieldError::Surface(format!("{e:?}")))?;

        Ok(GpuSurface {
            canvas,
            gpu,
            renderer,
        })
    }

    fn into_scheduler(self) -> RafScheduler {
        RafScheduler {
            window: self.window,
            callback: Rc::new(RefCell::new(None)),
        }
    }
}

fn window_viewport(window: &Window) -> Viewport {
    let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

/// A running particle field and the listeners feeding it
pub struct FieldHandle {
    field_loop: Rc<RefCell<WebFieldLoop>>,
    callback: FrameCallback,
    _listeners: Vec<EventListener>,
}

impl FieldHandle {
    /// Stop rendering, detach every listener and remove the canvas.
    pub fn teardown(self) {
        self.field_loop.borrow_mut().cancel();
        self.callback.borrow_mut().take();
        self.field_loop.borrow().surface().canvas.remove();
        info!(
            frames = self.field_loop.borrow().frames_rendered(),
            "Particle field torn down"
        );
    }
}

/// Bring the field up in the configured container and start animating.
///
/// `Err` with [`FieldError::is_unsupported`] means the page has no container
/// or no WebGL2; the rest of the page is unaffected.
pub async fn mount(config: &FieldConfig) -> Result<FieldHandle, FieldError> {
    let window = dom::window().map_err(|_| FieldError::MissingTarget)?;
    let host = WebHost::probe(window.clone(), config).await;
    let container = host.container.clone().ok_or(FieldError::MissingTarget)?;

    let field_loop = FieldLoop::mount(host, config, &mut rand::thread_rng())?;
    let callback = field_loop.scheduler().callback.clone();
    let field_loop = Rc::new(RefCell::new(field_loop));

    install_frame_callback(&field_loop, &callback);

    let document = window.document().ok_or(FieldError::MissingTarget)?;
    let mut listeners = Vec::with_capacity(2);

    let weak = Rc::downgrade(&field_loop);
    match EventListener::new(&document, "mousemove", move |event: MouseEvent| {
        if let Some(field_loop) = weak.upgrade() {
            field_loop
                .borrow_mut()
                .record_pointer(event.client_x() as f64, event.client_y() as f64);
        }
    }) {
        Ok(listener) => listeners.push(listener),
        Err(e) => warn!(?e, "Pointer tracking unavailable"),
    }

    let weak = Rc::downgrade(&field_loop);
    let resize_window = window.clone();
    match EventListener::new(&window, "resize", move |_: web_sys::Event| {
        if let Some(field_loop) = weak.upgrade() {
            let width = container.client_width().max(0) as u32;
            let height = container.client_height().max(0) as u32;
            field_loop
                .borrow_mut()
                .resize(width, height, window_viewport(&resize_window));
        }
    }) {
        Ok(listener) => listeners.push(listener),
        Err(e) => warn!(?e, "Resize tracking unavailable"),
    }

    field_loop.borrow_mut().start(time::now_millis());

    Ok(FieldHandle {
        field_loop,
        callback,
        _listeners: listeners,
    })
}

fn install_frame_callback(field_loop: &Rc<RefCell<WebFieldLoop>>, callback: &FrameCallback) {
    let weak: Weak<RefCell<WebFieldLoop>> = Rc::downgrade(field_loop);
    let closure = Closure::wrap(Box::new(move |_timestamp: f64| {
        if let Some(field_loop) = weak.upgrade() {
            field_loop.borrow_mut().on_frame(time::now_millis());
        }
    }) as Box<dyn FnMut(f64)>);
    *callback.borrow_mut() = Some(closure);
}
