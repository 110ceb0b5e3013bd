//! Generative sketches and the CPU canvas they draw on.
//!
//! Every sketch implements [`Sketch`] and is registered in [`catalog`] behind a
//! [`SketchRoutine`]. A [`Stage`] owns the canvas a host presents and turns a
//! routine into a live [`SketchInstance`]; [`HeadlessBackend`] plugs a stage
//! into [`gallery::InstanceManager`] without a window.

pub mod canvas;
mod catalog;
pub mod color;
mod headless;
pub mod math;
mod sketch;
pub mod sketches;
mod stage;

pub use canvas::{Canvas, CanvasError};
pub use catalog::catalog;
pub use color::Color;
pub use headless::{HeadlessBackend, HEADLESS_FPS};
pub use math::{constrain, map_range, Point};
pub use sketch::{CanvasSize, CanvasSizing, FrameInput, Sketch, SketchRoutine};
pub use stage::{SketchInstance, Stage, DEFAULT_CONTAINER_WIDTH};
