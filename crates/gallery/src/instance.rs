use tracing::debug;

use crate::registry::ArtworkDescriptor;

/// Host-side hooks used by [`InstanceManager`].
///
/// `create` builds a live instance bound to a routine, `dispose` releases one,
/// and `clear_surface` wipes whatever the previous instance left on screen.
pub trait InstanceBackend {
    type Routine;
    type Instance;
    type Error;

    fn create(&mut self, id: &str, routine: &Self::Routine) -> Result<Self::Instance, Self::Error>;

    fn dispose(&mut self, instance: Self::Instance);

    fn clear_surface(&mut self);
}

struct LiveInstance<I> {
    id: String,
    instance: I,
}

/// Owns at most one live instance at a time.
pub struct InstanceManager<B: InstanceBackend> {
    backend: B,
    live: Option<LiveInstance<B::Instance>>,
}

impl<B: InstanceBackend> InstanceManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: None,
        }
    }

    /// Disposes the current instance, clears the surface, then builds a new
    /// instance for `descriptor`. On error nothing is left live.
    pub fn recreate(&mut self, descriptor: &ArtworkDescriptor<B::Routine>) -> Result<(), B::Error> {
        if let Some(previous) = self.live.take() {
            debug!(artwork = %previous.id, "disposing rendering instance");
            self.backend.dispose(previous.instance);
        }
        self.backend.clear_surface();

        let instance = self.backend.create(descriptor.id(), descriptor.routine())?;
        debug!(artwork = descriptor.id(), "created rendering instance");
        self.live = Some(LiveInstance {
            id: descriptor.id().to_string(),
            instance,
        });
        Ok(())
    }

    pub fn live_id(&self) -> Option<&str> {
        self.live.as_ref().map(|live| live.id.as_str())
    }

    pub fn live(&self) -> Option<&B::Instance> {
        self.live.as_ref().map(|live| &live.instance)
    }

    pub fn live_mut(&mut self) -> Option<&mut B::Instance> {
        self.live.as_mut().map(|live| &mut live.instance)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Splits the borrow so a host can draw the live instance into a surface
    /// owned by the backend.
    pub fn parts_mut(&mut self) -> (&mut B, Option<&mut B::Instance>) {
        (
            &mut self.backend,
            self.live.as_mut().map(|live| &mut live.instance),
        )
    }

    pub fn shutdown(&mut self) {
        if let Some(previous) = self.live.take() {
            debug!(artwork = %previous.id, "disposing rendering instance on shutdown");
            self.backend.dispose(previous.instance);
        }
    }
}

impl<B: InstanceBackend> Drop for InstanceManager<B> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default)]
    struct Journal {
        events: Vec<String>,
        live: usize,
    }

    struct RecordingBackend {
        journal: Rc<RefCell<Journal>>,
        fail_on: Option<&'static str>,
    }

    impl InstanceBackend for RecordingBackend {
        type Routine = &'static str;
        type Instance = String;
        type Error = String;

        fn create(&mut self, id: &str, routine: &&'static str) -> Result<String, String> {
            if self.fail_on == Some(id) {
                return Err(format!("cannot build {id}"));
            }
            let mut journal = self.journal.borrow_mut();
            journal.live += 1;
            assert!(journal.live <= 1, "two live instances");
            journal.events.push(format!("create {routine}"));
            Ok(routine.to_string())
        }

        fn dispose(&mut self, instance: String) {
            let mut journal = self.journal.borrow_mut();
            journal.live -= 1;
            journal.events.push(format!("dispose {instance}"));
        }

        fn clear_surface(&mut self) {
            self.journal.borrow_mut().events.push("clear".into());
        }
    }

    fn manager(fail_on: Option<&'static str>) -> (InstanceManager<RecordingBackend>, Rc<RefCell<Journal>>) {
        let journal = Rc::new(RefCell::new(Journal::default()));
        let backend = RecordingBackend {
            journal: journal.clone(),
            fail_on,
        };
        (InstanceManager::new(backend), journal)
    }

    #[test]
    fn disposes_before_creating_the_next_instance() {
        let (mut manager, journal) = manager(None);
        manager
            .recreate(&ArtworkDescriptor::new("a", "A", "", "draw-a"))
            .unwrap();
        manager
            .recreate(&ArtworkDescriptor::new("b", "B", "", "draw-b"))
            .unwrap();

        assert_eq!(
            journal.borrow().events,
            vec!["clear", "create draw-a", "dispose draw-a", "clear", "create draw-b"]
        );
        assert_eq!(manager.live_id(), Some("b"));
        assert_eq!(manager.live().map(String::as_str), Some("draw-b"));
    }

    #[test]
    fn failed_creation_leaves_nothing_live() {
        let (mut manager, journal) = manager(Some("b"));
        manager
            .recreate(&ArtworkDescriptor::new("a", "A", "", "draw-a"))
            .unwrap();
        let err = manager
            .recreate(&ArtworkDescriptor::new("b", "B", "", "draw-b"))
            .unwrap_err();

        assert_eq!(err, "cannot build b");
        assert!(manager.live().is_none());
        assert_eq!(journal.borrow().live, 0);
    }

    #[test]
    fn drop_disposes_live_instance() {
        let (mut manager, journal) = manager(None);
        manager
            .recreate(&ArtworkDescriptor::new("a", "A", "", "draw-a"))
            .unwrap();
        drop(manager);
        assert_eq!(journal.borrow().live, 0);
        assert_eq!(journal.borrow().events.last().map(String::as_str), Some("dispose draw-a"));
    }
}
