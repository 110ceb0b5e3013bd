use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use winit::dpi::{LogicalSize, PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowBuilder};

use tracing::{debug, error, info, warn};

use artworks::{Canvas, CanvasError, Point, SketchRoutine};
use gallery::{MenuController, Registry, SelectOutcome, Slideshow};

use crate::backend::WindowBackend;
use crate::compose::{compose, FrameView};
use crate::gpu::GpuState;
use crate::layout::{Layout, Rect};
use crate::runtime::{FramePacer, SystemTimeSource, TimeSource};
use crate::GalleryOptions;

const WINDOW_TITLE: &str = "Sketchbook";
const TITLE_REFRESH: Duration = Duration::from_millis(250);
const MIN_CONTENT_WIDTH: u32 = 160;
const MIN_WINDOW_HEIGHT: u32 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    Continue,
    Exit,
}

/// Everything owned by the open gallery window.
///
/// `gpu` is declared first so the surface is dropped before the window it
/// was created from.
struct GalleryWindow {
    gpu: GpuState,
    window: Arc<Window>,
    controller: MenuController<WindowBackend>,
    layout: Layout,
    frame: Canvas,
    sidebar_width: u32,
    row_height: u32,
    cursor: Option<PhysicalPosition<f64>>,
    pointer: Point,
    clock: SystemTimeSource,
    pacer: FramePacer,
    slideshow: Option<Slideshow>,
    title: String,
    title_refreshed: Option<Instant>,
}

impl GalleryWindow {
    fn new(
        window: Arc<Window>,
        registry: Registry<SketchRoutine>,
        options: &GalleryOptions,
    ) -> Result<Self> {
        let gpu = GpuState::new(window.as_ref(), window.inner_size())?;
        let size = gpu.size();
        let scale = window.scale_factor();
        let layout = Layout::new(
            size.width,
            size.height,
            scaled(options.sidebar_width, scale),
            scaled(options.row_height, scale),
        );

        let backend = WindowBackend::new(layout.container_width())
            .context("failed to allocate the sketch canvas")?;
        let now = Instant::now();
        let slideshow = options
            .slideshow
            .as_ref()
            .map(|config| Slideshow::for_registry(&registry, config, now, options.seed));
        if let Some(slideshow) = &slideshow {
            info!(
                interval = ?slideshow.interval(),
                artworks = slideshow.len(),
                "slideshow enabled"
            );
        }

        let mut controller = MenuController::new(registry, backend, options.debounce);
        controller.scroller_mut().set_visible(layout.visible_rows());
        let frame = Canvas::new(size.width, size.height)
            .context("failed to allocate the window frame")?;

        Ok(Self {
            gpu,
            window,
            controller,
            layout,
            frame,
            sidebar_width: options.sidebar_width,
            row_height: options.row_height,
            cursor: None,
            pointer: Point::default(),
            clock: SystemTimeSource::new(now),
            pacer: FramePacer::new(options.target_fps),
            slideshow,
            title: WINDOW_TITLE.to_string(),
            title_refreshed: None,
        })
    }

    fn start(&mut self, initial: Option<&str>, now: Instant) -> Result<()> {
        for (position, entry) in self.controller.menu().iter().enumerate() {
            let key = if position < 9 {
                format!("[{}]", position + 1)
            } else {
                "   ".to_string()
            };
            let marker = if entry.placeholder { " (coming soon)" } else { "" };
            info!("{key} {}{marker}", entry.title);
        }

        let first = self
            .controller
            .registry()
            .get(0)
            .map(|descriptor| descriptor.id().to_string())
            .context("the gallery has no artworks")?;
        let id = match initial {
            Some(id) if self.controller.registry().position(id).is_some() => id.to_string(),
            Some(id) => {
                warn!(artwork = id, fallback = %first, "unknown initial artwork");
                first
            }
            None => first,
        };

        let outcome = self
            .controller
            .select(&id, now)
            .with_context(|| format!("failed to start artwork '{id}'"))?;
        self.after_select(outcome, now, false);
        Ok(())
    }

    fn canvas_rect(&self) -> Rect {
        self.layout
            .canvas_rect(self.controller.instances().backend().stage().size())
    }

    fn hovered(&self) -> Option<usize> {
        let cursor = self.cursor?;
        self.layout.row_at(
            cursor.x,
            cursor.y,
            self.controller.scroller().offset(),
            self.controller.menu().len(),
        )
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.gpu.resize(size);
        self.apply_layout();
    }

    fn apply_layout(&mut self) {
        let size = self.gpu.size();
        let scale = self.window.scale_factor();
        self.layout = Layout::new(
            size.width,
            size.height,
            scaled(self.sidebar_width, scale),
            scaled(self.row_height, scale),
        );

        let scroller = self.controller.scroller_mut();
        scroller.set_visible(self.layout.visible_rows());
        if let Some(active) = self.controller.active_index() {
            self.controller.scroller_mut().reveal(active);
        }

        if let Err(err) = self.frame.resize(size.width, size.height) {
            warn!(error = %err, "failed to resize window frame");
        }

        let container = self.layout.container_width();
        let (backend, live) = self.controller.instances_mut().parts_mut();
        match backend.set_container_width(container, live) {
            Ok(true) => debug!(container, "sketch canvas follows new container width"),
            Ok(false) => {}
            Err(err) => warn!(error = %err, "failed to resize sketch canvas"),
        }
        self.window.request_redraw();
    }

    fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(position);
        self.pointer = self
            .layout
            .to_canvas(self.canvas_rect(), position.x, position.y);
    }

    fn cursor_left(&mut self) {
        self.cursor = None;
    }

    fn click(&mut self, now: Instant) {
        if let Some(index) = self.hovered() {
            self.select_with(now, |controller, now| controller.select_index(index, now));
        }
    }

    fn wheel(&mut self, delta: MouseScrollDelta) {
        let rows = match delta {
            MouseScrollDelta::LineDelta(_, y) => -(y.round() as isize),
            MouseScrollDelta::PixelDelta(position) => {
                -((position.y / f64::from(self.layout.row_height())).round() as isize)
            }
        };
        if rows != 0 && self.controller.scroller_mut().scroll_by(rows) {
            self.window.request_redraw();
        }
    }

    fn key(&mut self, event: &KeyEvent, now: Instant) -> KeyAction {
        if event.state != ElementState::Pressed || event.repeat {
            return KeyAction::Continue;
        }
        match &event.logical_key {
            Key::Named(NamedKey::Escape) => return KeyAction::Exit,
            Key::Named(NamedKey::ArrowDown | NamedKey::ArrowRight) => {
                self.select_with(now, |controller, now| controller.select_next(now));
            }
            Key::Named(NamedKey::ArrowUp | NamedKey::ArrowLeft) => {
                self.select_with(now, |controller, now| controller.select_previous(now));
            }
            Key::Named(NamedKey::PageDown) => {
                let rows = self.layout.visible_rows() as isize;
                self.controller.scroller_mut().scroll_by(rows);
            }
            Key::Named(NamedKey::PageUp) => {
                let rows = self.layout.visible_rows() as isize;
                self.controller.scroller_mut().scroll_by(-rows);
            }
            Key::Character(text) => {
                if let Some(index) = digit_index(text) {
                    self.select_with(now, |controller, now| controller.select_index(index, now));
                }
            }
            _ => {}
        }
        KeyAction::Continue
    }

    fn select_with<F>(&mut self, now: Instant, select: F)
    where
        F: FnOnce(
            &mut MenuController<WindowBackend>,
            Instant,
        ) -> Result<SelectOutcome, CanvasError>,
    {
        match select(&mut self.controller, now) {
            Ok(outcome) => self.after_select(outcome, now, false),
            Err(err) => error!(error = %err, "failed to create artwork"),
        }
    }

    fn after_select(&mut self, outcome: SelectOutcome, now: Instant, automatic: bool) {
        if !automatic && outcome != SelectOutcome::Unknown {
            if let Some(slideshow) = self.slideshow.as_mut() {
                slideshow.restart(now);
            }
        }

        if let SelectOutcome::Switched { .. } = outcome {
            self.clock.reset(now);
            self.pacer.reset();
            self.title_refreshed = None;
            let info = self.controller.info();
            info!(title = %info.title, automatic, "{}", info.description);
            self.window.request_redraw();
        }
    }

    /// Applies deferred selections and slideshow advances that are due.
    fn tick(&mut self, now: Instant) -> Result<(), CanvasError> {
        if let Some(outcome) = self.controller.tick(now)? {
            self.after_select(outcome, now, false);
        }

        let due = match self.slideshow.as_mut() {
            Some(slideshow) => slideshow.next_due(now, self.controller.active_index()),
            None => None,
        };
        if let Some(index) = due {
            debug!(index, "slideshow advancing");
            let outcome = self.controller.select_index(index, now)?;
            self.after_select(outcome, now, true);
        }

        self.refresh_title(now);
        Ok(())
    }

    fn refresh_title(&mut self, now: Instant) {
        if let Some(last) = self.title_refreshed {
            if now.saturating_duration_since(last) < TITLE_REFRESH {
                return;
            }
        }
        self.title_refreshed = Some(now);

        let caption = self
            .controller
            .instances()
            .live()
            .and_then(|instance| instance.caption());
        let title = match self.controller.active_index() {
            Some(_) => window_title(&self.controller.info().title, caption.as_deref()),
            None => WINDOW_TITLE.to_string(),
        };
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
    }

    /// Earliest instant something needs the loop awake again.
    fn next_deadline(&self) -> Option<Instant> {
        [
            self.pacer.next_deadline(),
            self.controller.pending_deadline(),
            self.slideshow.as_ref().and_then(Slideshow::next_deadline),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    fn render_frame(&mut self, now: Instant) -> Result<(), wgpu::SurfaceError> {
        let sample = self.clock.sample(now);
        let pointer = self.pointer;
        let (backend, live) = self.controller.instances_mut().parts_mut();
        if let Some(instance) = live {
            backend.draw(instance, sample.seconds, pointer);
        }

        let hovered = self.hovered();
        let canvas_rect = self.canvas_rect();
        compose(
            &mut self.frame,
            &FrameView {
                layout: &self.layout,
                menu: self.controller.menu(),
                scroller: self.controller.scroller(),
                hovered,
                canvas: self.controller.instances().backend().stage().canvas(),
                canvas_rect,
            },
        );
        self.gpu.render(&self.frame)
    }

    fn shutdown(&mut self) {
        self.controller.instances_mut().shutdown();
    }
}

fn scaled(value: u32, scale: f64) -> u32 {
    ((f64::from(value) * scale).round() as u32).max(1)
}

/// Menu index for the digit keys `1` to `9`.
fn digit_index(text: &str) -> Option<usize> {
    let mut chars = text.chars();
    let digit = chars.next()?.to_digit(10)?;
    if chars.next().is_some() || digit == 0 {
        return None;
    }
    Some(digit as usize - 1)
}

fn window_title(title: &str, caption: Option<&str>) -> String {
    match caption {
        Some(caption) if !caption.is_empty() => format!("{WINDOW_TITLE} · {title} · {caption}"),
        _ => format!("{WINDOW_TITLE} · {title}"),
    }
}

/// Opens the gallery window and runs it until the user closes it.
pub(crate) fn run(registry: Registry<SketchRoutine>, options: GalleryOptions) -> Result<()> {
    let event_loop =
        EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let (width, height) = options.window_size;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(width, height))
        .with_min_inner_size(LogicalSize::new(
            options.sidebar_width + MIN_CONTENT_WIDTH,
            MIN_WINDOW_HEIGHT,
        ))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let mut state = GalleryWindow::new(window, registry, &options)?;
    state.start(options.initial.as_deref(), Instant::now())?;

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == state.window.id() => {
                match event {
                    WindowEvent::CloseRequested | WindowEvent::Destroyed => elwt.exit(),
                    WindowEvent::Resized(size) => state.resize(size),
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = state.window.inner_size();
                        state.resize(size);
                    }
                    WindowEvent::CursorMoved { position, .. } => state.cursor_moved(position),
                    WindowEvent::CursorLeft { .. } => state.cursor_left(),
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => state.click(Instant::now()),
                    WindowEvent::MouseWheel { delta, .. } => state.wheel(delta),
                    WindowEvent::KeyboardInput { event, .. } => {
                        if state.key(&event, Instant::now()) == KeyAction::Exit {
                            elwt.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        match state.render_frame(now) {
                            Ok(()) => state.pacer.mark_rendered(now),
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                state.gpu.reconfigure();
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                error!("surface out of memory; closing the gallery");
                                elwt.exit();
                            }
                            Err(wgpu::SurfaceError::Timeout) => {
                                warn!("surface timeout; retrying next frame");
                            }
                            Err(wgpu::SurfaceError::Other) => {
                                warn!("surface reported an unknown error; retrying next frame");
                            }
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                if let Err(err) = state.tick(now) {
                    error!(error = %err, "failed to create artwork");
                }
                if state.pacer.ready_for_frame(now) {
                    state.window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if let Some(deadline) = state.next_deadline() {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }
            }
            Event::LoopExiting => state.shutdown(),
            _ => {}
        })
        .map_err(|err| anyhow!("event loop error: {err}"))
}
