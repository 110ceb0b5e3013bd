//! Selection and lifecycle core of the sketch gallery.
//!
//! The crate is toolkit-agnostic: it knows nothing about canvases or windows.
//! A host supplies an [`InstanceBackend`] that can build, dispose and clear,
//! and the gallery guarantees the ordering around those calls:
//!
//! ```text
//!   click / key / slideshow
//!          │ id
//!          ▼
//!   MenuController::select ──▶ menu highlight + InfoPanel + MenuScroller
//!          │
//!          └─▶ InstanceManager::recreate ──▶ dispose(old) ─▶ clear_surface() ─▶ create(new)
//! ```
//!
//! - `registry` holds the immutable, ordered artwork descriptors.
//! - `controller` owns the selection state and the debounce window.
//! - `instance` owns the single live rendering instance.
//! - `scroll` keeps the active menu row visible on short viewports.
//! - `slideshow` produces timed auto-advance requests.

mod controller;
mod instance;
mod registry;
mod scroll;
mod slideshow;

pub use controller::{InfoPanel, MenuController, MenuEntry, SelectOutcome, DEFAULT_DEBOUNCE};
pub use instance::{InstanceBackend, InstanceManager};
pub use registry::{ArtworkDescriptor, Registry, RegistryError};
pub use scroll::MenuScroller;
pub use slideshow::{Slideshow, SlideshowConfig, SlideshowMode};
