//! Interactive window for the sketch gallery.
//!
//! The crate glues the gallery controller, the sketch stage and a `wgpu`
//! surface together. The overall flow is:
//!
//! ```text
//!   sketchbook CLI
//!          │ Registry + GalleryOptions
//!          ▼
//!   run_gallery ──▶ GalleryWindow ──▶ winit event loop ──▶ render_frame()
//!          ▲                                  │
//!          │ click / keys / slideshow         ├─▶ Stage::advance (live sketch)
//!          └──────── MenuController           └─▶ compose() ─▶ write_texture ─▶ present
//! ```
//!
//! `GalleryWindow` owns the GPU state and the controller, whose
//! [`WindowBackend`] draws the live sketch into an off-screen canvas. Each
//! frame the menu sidebar and that canvas are composed on the CPU into one
//! RGBA image that the GPU simply stretches over the window.

mod backend;
mod compose;
mod gpu;
mod layout;
mod runtime;
mod window;

use std::time::Duration;

use anyhow::Result;

use artworks::SketchRoutine;
use gallery::{Registry, SlideshowConfig, DEFAULT_DEBOUNCE};

pub use backend::WindowBackend;
pub use layout::{Layout, Rect, CANVAS_PADDING};
pub use runtime::{FramePacer, SystemTimeSource, TimeSample, TimeSource};

/// How the gallery window is laid out and paced.
#[derive(Debug, Clone)]
pub struct GalleryOptions {
    /// Initial inner size in logical pixels, scaled like the sidebar.
    pub window_size: (u32, u32),
    /// Sidebar width in logical pixels.
    pub sidebar_width: u32,
    /// Height of one menu row in logical pixels.
    pub row_height: u32,
    /// Artwork shown first; the first registry entry when unset or unknown.
    pub initial: Option<String>,
    /// Minimum spacing between two instance swaps.
    pub debounce: Duration,
    /// Optional frame rate cap. Uncapped windows follow vsync.
    pub target_fps: Option<f32>,
    /// Timed auto-advance, disabled when `None`.
    pub slideshow: Option<SlideshowConfig>,
    /// Seed for the shuffled slideshow order.
    pub seed: u64,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            window_size: (1280, 800),
            sidebar_width: 240,
            row_height: 36,
            initial: None,
            debounce: DEFAULT_DEBOUNCE,
            target_fps: None,
            slideshow: None,
            seed: 0,
        }
    }
}

/// Opens the gallery window and blocks until it is closed.
pub fn run_gallery(registry: Registry<SketchRoutine>, options: GalleryOptions) -> Result<()> {
    window::run(registry, options)
}
