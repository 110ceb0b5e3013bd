use artworks::{CanvasError, Point, SketchInstance, SketchRoutine, Stage};
use gallery::InstanceBackend;
use tracing::{debug, info};

/// Instance backend for the interactive window. Sketches draw into the stage
/// canvas, which the compositor copies into each presented frame.
pub struct WindowBackend {
    stage: Stage,
}

impl WindowBackend {
    pub fn new(container_width: u32) -> Result<Self, CanvasError> {
        Ok(Self {
            stage: Stage::new(container_width)?,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Follows a change of the content area width. Returns true when the live
    /// canvas was resized.
    pub fn set_container_width(
        &mut self,
        width: u32,
        live: Option<&mut SketchInstance>,
    ) -> Result<bool, CanvasError> {
        if width == self.stage.container_width() {
            return Ok(false);
        }
        self.stage.set_container_width(width, live)
    }

    pub fn draw(&mut self, instance: &mut SketchInstance, seconds: f32, pointer: Point) {
        self.stage.advance(instance, seconds, pointer);
    }
}

impl InstanceBackend for WindowBackend {
    type Routine = SketchRoutine;
    type Instance = SketchInstance;
    type Error = CanvasError;

    fn create(&mut self, id: &str, routine: &SketchRoutine) -> Result<SketchInstance, CanvasError> {
        let instance = self.stage.instantiate(routine)?;
        let size = self.stage.size();
        info!(
            artwork = id,
            width = size.width,
            height = size.height,
            fixed = routine.sizing.is_fixed(),
            "created sketch canvas"
        );
        Ok(instance)
    }

    fn dispose(&mut self, instance: SketchInstance) {
        debug!(frames = instance.frame(), "disposed sketch");
    }

    fn clear_surface(&mut self) {
        self.stage.clear();
    }
}
