use gallery::InstanceBackend;
use tracing::debug;

use crate::canvas::CanvasError;
use crate::math::Point;
use crate::sketch::SketchRoutine;
use crate::stage::{SketchInstance, Stage};

/// Frame rate assumed when rendering without a window.
pub const HEADLESS_FPS: f32 = 60.0;

/// Instance backend that draws into an off-screen stage.
pub struct HeadlessBackend {
    stage: Stage,
}

impl HeadlessBackend {
    pub fn new(container_width: u32) -> Result<Self, CanvasError> {
        Ok(Self {
            stage: Stage::new(container_width)?,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Draws `frames` frames with a fixed pointer at a nominal 60 fps clock.
    pub fn render(&mut self, instance: &mut SketchInstance, frames: u32, pointer: Point) {
        for _ in 0..frames {
            let seconds = instance.frame() as f32 / HEADLESS_FPS;
            self.stage.advance(instance, seconds, pointer);
        }
    }
}

impl InstanceBackend for HeadlessBackend {
    type Routine = SketchRoutine;
    type Instance = SketchInstance;
    type Error = CanvasError;

    fn create(&mut self, id: &str, routine: &SketchRoutine) -> Result<SketchInstance, CanvasError> {
        let instance = self.stage.instantiate(routine)?;
        let size = self.stage.size();
        debug!(artwork = id, width = size.width, height = size.height, "prepared off-screen canvas");
        Ok(instance)
    }

    fn dispose(&mut self, instance: SketchInstance) {
        debug!(frames = instance.frame(), "released off-screen sketch");
    }

    fn clear_surface(&mut self) {
        self.stage.clear();
    }
}
