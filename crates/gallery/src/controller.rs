use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::instance::{InstanceBackend, InstanceManager};
use crate::registry::{ArtworkDescriptor, Registry};
use crate::scroll::MenuScroller;

/// Window during which a second swap is deferred instead of applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A new instance was created for the entry at `index`.
    Switched { index: usize },
    /// The entry was already active; only the menu scroll was refreshed.
    AlreadyActive { index: usize },
    /// Held back by the debounce window; applied by a later `tick`.
    Deferred,
    /// No artwork with that id.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    pub placeholder: bool,
    pub highlighted: bool,
}

/// Title and description of the active artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoPanel {
    pub title: String,
    pub description: String,
}

pub struct MenuController<B: InstanceBackend> {
    registry: Registry<B::Routine>,
    instances: InstanceManager<B>,
    menu: Vec<MenuEntry>,
    info: InfoPanel,
    scroller: MenuScroller,
    active: Option<usize>,
    debounce: Duration,
    last_swap: Option<Instant>,
    pending: Option<String>,
}

impl<B: InstanceBackend> MenuController<B> {
    pub fn new(registry: Registry<B::Routine>, backend: B, debounce: Duration) -> Self {
        let menu = registry
            .iter()
            .map(|descriptor| MenuEntry {
                id: descriptor.id().to_string(),
                title: descriptor.title().to_string(),
                placeholder: descriptor.is_placeholder(),
                highlighted: false,
            })
            .collect();
        let scroller = MenuScroller::new(registry.len());
        Self {
            registry,
            instances: InstanceManager::new(backend),
            menu,
            info: InfoPanel::default(),
            scroller,
            active: None,
            debounce,
            last_swap: None,
            pending: None,
        }
    }

    pub fn registry(&self) -> &Registry<B::Routine> {
        &self.registry
    }

    pub fn menu(&self) -> &[MenuEntry] {
        &self.menu
    }

    pub fn info(&self) -> &InfoPanel {
        &self.info
    }

    pub fn scroller(&self) -> &MenuScroller {
        &self.scroller
    }

    pub fn scroller_mut(&mut self) -> &mut MenuScroller {
        &mut self.scroller
    }

    pub fn instances(&self) -> &InstanceManager<B> {
        &self.instances
    }

    pub fn instances_mut(&mut self) -> &mut InstanceManager<B> {
        &mut self.instances
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active
            .and_then(|index| self.registry.get(index))
            .map(|descriptor| descriptor.id())
    }

    pub fn active_descriptor(&self) -> Option<&ArtworkDescriptor<B::Routine>> {
        self.active.and_then(|index| self.registry.get(index))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When a deferred selection becomes due, if one is waiting. `None` also
    /// covers a debounce too long to be represented as an `Instant`.
    pub fn pending_deadline(&self) -> Option<Instant> {
        self.pending.as_ref()?;
        match self.last_swap {
            Some(last) => last.checked_add(self.debounce),
            None => Some(Instant::now()),
        }
    }

    pub fn select(&mut self, id: &str, now: Instant) -> Result<SelectOutcome, B::Error> {
        let Some(index) = self.registry.position(id) else {
            debug!(artwork = id, "ignoring selection of unknown artwork");
            return Ok(SelectOutcome::Unknown);
        };

        if self.active == Some(index) {
            // The latest request wins, and it asks for what is already showing.
            self.pending = None;
            self.scroller.reveal(index);
            return Ok(SelectOutcome::AlreadyActive { index });
        }

        if let Some(last) = self.last_swap {
            if now.saturating_duration_since(last) < self.debounce {
                debug!(artwork = id, "selection deferred by debounce window");
                self.pending = Some(id.to_string());
                return Ok(SelectOutcome::Deferred);
            }
        }

        self.switch_to(index, now)
    }

    pub fn select_index(&mut self, index: usize, now: Instant) -> Result<SelectOutcome, B::Error> {
        let Some(id) = self.registry.get(index).map(|d| d.id().to_string()) else {
            return Ok(SelectOutcome::Unknown);
        };
        self.select(&id, now)
    }

    pub fn select_next(&mut self, now: Instant) -> Result<SelectOutcome, B::Error> {
        let len = self.registry.len();
        if len == 0 {
            return Ok(SelectOutcome::Unknown);
        }
        let index = self.active.map_or(0, |current| (current + 1) % len);
        self.select_index(index, now)
    }

    pub fn select_previous(&mut self, now: Instant) -> Result<SelectOutcome, B::Error> {
        let len = self.registry.len();
        if len == 0 {
            return Ok(SelectOutcome::Unknown);
        }
        let index = self
            .active
            .map_or(len - 1, |current| (current + len - 1) % len);
        self.select_index(index, now)
    }

    /// Applies a deferred selection once the debounce window has passed.
    pub fn tick(&mut self, now: Instant) -> Result<Option<SelectOutcome>, B::Error> {
        if self.pending.is_none() {
            return Ok(None);
        }
        if let Some(last) = self.last_swap {
            if now.saturating_duration_since(last) < self.debounce {
                return Ok(None);
            }
        }
        match self.pending.take() {
            Some(id) => self.select(&id, now).map(Some),
            None => Ok(None),
        }
    }

    fn switch_to(&mut self, index: usize, now: Instant) -> Result<SelectOutcome, B::Error> {
        let Some(descriptor) = self.registry.get(index) else {
            return Ok(SelectOutcome::Unknown);
        };

        self.pending = None;
        self.active = Some(index);
        for (position, entry) in self.menu.iter_mut().enumerate() {
            entry.highlighted = position == index;
        }
        self.info = InfoPanel {
            title: descriptor.title().to_string(),
            description: descriptor.description().to_string(),
        };
        self.scroller.reveal(index);

        if let Err(err) = self.instances.recreate(descriptor) {
            self.active = None;
            for entry in &mut self.menu {
                entry.highlighted = false;
            }
            self.info = InfoPanel::default();
            return Err(err);
        }
        // Only a swap that produced a live instance opens the debounce window.
        self.last_swap = Some(now);

        info!(
            artwork = descriptor.id(),
            title = descriptor.title(),
            "switched artwork"
        );
        Ok(SelectOutcome::Switched { index })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::registry::ArtworkDescriptor;

    type Log = Rc<RefCell<Vec<String>>>;

    struct FakeBackend {
        log: Log,
        live: usize,
        created: usize,
        broken: Option<&'static str>,
    }

    struct FakeInstance {
        routine: &'static str,
    }

    impl InstanceBackend for FakeBackend {
        type Routine = &'static str;
        type Instance = FakeInstance;
        type Error = String;

        fn create(&mut self, _id: &str, routine: &&'static str) -> Result<FakeInstance, Self::Error> {
            if self.broken == Some(*routine) {
                self.log.borrow_mut().push(format!("fail {routine}"));
                return Err(format!("cannot build {routine}"));
            }
            self.live += 1;
            self.created += 1;
            assert_eq!(self.live, 1, "more than one live instance");
            self.log.borrow_mut().push(format!("create {routine}"));
            Ok(FakeInstance { routine: *routine })
        }

        fn dispose(&mut self, instance: FakeInstance) {
            self.live -= 1;
            self.log.borrow_mut().push(format!("dispose {}", instance.routine));
        }

        fn clear_surface(&mut self) {
            self.log.borrow_mut().push("clear".into());
        }
    }

    fn controller() -> (MenuController<FakeBackend>, Log) {
        controller_with(None, DEFAULT_DEBOUNCE)
    }

    fn controller_with(
        broken: Option<&'static str>,
        debounce: Duration,
    ) -> (MenuController<FakeBackend>, Log) {
        let registry = Registry::new(vec![
            ArtworkDescriptor::new("circle", "Circles", "rings", "draw_circle"),
            ArtworkDescriptor::new("spiral", "Spiral", "golden", "draw_spiral"),
            ArtworkDescriptor::new("wave", "Waves", "sines", "draw_wave"),
            ArtworkDescriptor::placeholder("rose", "Rose", "soon", "draw_soon"),
        ])
        .unwrap();
        let log: Log = Rc::default();
        let backend = FakeBackend {
            log: log.clone(),
            live: 0,
            created: 0,
            broken,
        };
        (MenuController::new(registry, backend, debounce), log)
    }

    fn highlighted(controller: &MenuController<FakeBackend>) -> Vec<&str> {
        controller
            .menu()
            .iter()
            .filter(|entry| entry.highlighted)
            .map(|entry| entry.id.as_str())
            .collect()
    }

    fn live_routine(controller: &MenuController<FakeBackend>) -> Option<&'static str> {
        controller.instances().live().map(|instance| instance.routine)
    }

    #[test]
    fn unknown_id_changes_nothing() {
        let (mut controller, log) = controller();
        let now = Instant::now();
        controller.select("circle", now).unwrap();
        let events_before = log.borrow().len();

        let outcome = controller
            .select("nope", now + Duration::from_secs(1))
            .unwrap();

        assert_eq!(outcome, SelectOutcome::Unknown);
        assert_eq!(controller.active_id(), Some("circle"));
        assert_eq!(live_routine(&controller), Some("draw_circle"));
        assert_eq!(highlighted(&controller), vec!["circle"]);
        assert_eq!(controller.info().title, "Circles");
        assert_eq!(log.borrow().len(), events_before);
    }

    #[test]
    fn reselecting_active_id_keeps_instance() {
        let (mut controller, _log) = controller();
        let now = Instant::now();
        controller.select("spiral", now).unwrap();

        let outcome = controller
            .select("spiral", now + Duration::from_secs(1))
            .unwrap();

        assert_eq!(outcome, SelectOutcome::AlreadyActive { index: 1 });
        assert_eq!(controller.instances().backend().created, 1);
    }

    #[test]
    fn successful_selection_binds_one_instance() {
        let (mut controller, _log) = controller();
        let mut now = Instant::now();
        for id in ["circle", "wave", "rose", "spiral"] {
            let outcome = controller.select(id, now).unwrap();
            assert!(matches!(outcome, SelectOutcome::Switched { .. }));
            assert_eq!(controller.instances().backend().live, 1);
            assert_eq!(controller.instances().live_id(), Some(id));
            assert_eq!(highlighted(&controller), vec![id]);
            now += Duration::from_secs(1);
        }
        assert_eq!(live_routine(&controller), Some("draw_spiral"));
        assert_eq!(controller.info().description, "golden");
    }

    #[test]
    fn switching_disposes_before_creating() {
        let (mut controller, log) = controller();
        let now = Instant::now();
        controller.select("circle", now).unwrap();
        controller
            .select("wave", now + Duration::from_secs(1))
            .unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "clear",
                "create draw_circle",
                "dispose draw_circle",
                "clear",
                "create draw_wave"
            ]
        );
    }

    #[test]
    fn rapid_selections_are_deferred_and_latest_wins() {
        let (mut controller, _log) = controller();
        let start = Instant::now();
        controller.select("circle", start).unwrap();

        let quick = start + Duration::from_millis(20);
        assert_eq!(
            controller.select("spiral", quick).unwrap(),
            SelectOutcome::Deferred
        );
        assert_eq!(
            controller.select("wave", quick).unwrap(),
            SelectOutcome::Deferred
        );
        assert_eq!(controller.active_id(), Some("circle"));
        assert_eq!(controller.pending_deadline(), Some(start + DEFAULT_DEBOUNCE));

        // Still inside the window.
        assert_eq!(controller.tick(start + Duration::from_millis(100)).unwrap(), None);

        let applied = controller
            .tick(start + DEFAULT_DEBOUNCE)
            .unwrap();
        assert_eq!(applied, Some(SelectOutcome::Switched { index: 2 }));
        assert_eq!(controller.active_id(), Some("wave"));
        assert_eq!(
            controller.active_descriptor().map(|d| d.id()),
            Some("wave")
        );
        assert_eq!(controller.instances().backend().created, 2);
        assert!(!controller.has_pending());
        assert_eq!(controller.pending_deadline(), None);
    }

    #[test]
    fn reselecting_active_cancels_pending_swap() {
        let (mut controller, _log) = controller();
        let start = Instant::now();
        controller.select("circle", start).unwrap();
        controller
            .select("wave", start + Duration::from_millis(10))
            .unwrap();
        controller
            .select("circle", start + Duration::from_millis(20))
            .unwrap();

        assert!(!controller.has_pending());
        assert_eq!(controller.tick(start + Duration::from_secs(1)).unwrap(), None);
        assert_eq!(controller.active_id(), Some("circle"));
    }

    #[test]
    fn failed_creation_clears_selection() {
        let (mut controller, log) = controller_with(Some("draw_wave"), DEFAULT_DEBOUNCE);
        let start = Instant::now();
        controller.select("circle", start).unwrap();

        let err = controller
            .select("wave", start + Duration::from_secs(1))
            .unwrap_err();

        assert_eq!(err, "cannot build draw_wave");
        assert_eq!(controller.active_id(), None);
        assert_eq!(controller.active_index(), None);
        assert!(highlighted(&controller).is_empty());
        assert_eq!(*controller.info(), InfoPanel::default());
        assert_eq!(controller.instances().live_id(), None);
        assert_eq!(controller.instances().backend().live, 0);
        assert_eq!(
            log.borrow().last().map(String::as_str),
            Some("fail draw_wave")
        );
    }

    #[test]
    fn retry_after_failed_creation_is_not_debounced() {
        let (mut controller, _log) = controller_with(Some("draw_wave"), DEFAULT_DEBOUNCE);
        let start = Instant::now();
        controller.select("circle", start).unwrap();
        let failed_at = start + Duration::from_secs(1);
        assert!(controller.select("wave", failed_at).is_err());

        let outcome = controller
            .select("circle", failed_at + Duration::from_millis(10))
            .unwrap();

        assert_eq!(outcome, SelectOutcome::Switched { index: 0 });
        assert_eq!(live_routine(&controller), Some("draw_circle"));
        assert_eq!(highlighted(&controller), vec!["circle"]);
        assert_eq!(controller.info().title, "Circles");
    }

    #[test]
    fn oversized_debounce_never_overflows() {
        let (mut controller, _log) = controller_with(None, Duration::MAX);
        let start = Instant::now();
        controller.select("circle", start).unwrap();
        assert_eq!(
            controller.select("wave", start + Duration::from_secs(1)).unwrap(),
            SelectOutcome::Deferred
        );

        assert!(controller.has_pending());
        assert_eq!(controller.pending_deadline(), None);
        let later = start + Duration::from_secs(365 * 24 * 60 * 60);
        assert_eq!(controller.tick(later).unwrap(), None);
        assert_eq!(controller.active_id(), Some("circle"));
    }

    #[test]
    fn next_and_previous_wrap_around() {
        let (mut controller, _log) = controller();
        let mut now = Instant::now();
        assert_eq!(
            controller.select_previous(now).unwrap(),
            SelectOutcome::Switched { index: 3 }
        );
        now += Duration::from_secs(1);
        assert_eq!(
            controller.select_next(now).unwrap(),
            SelectOutcome::Switched { index: 0 }
        );
        now += Duration::from_secs(1);
        assert_eq!(
            controller.select_previous(now).unwrap(),
            SelectOutcome::Switched { index: 3 }
        );
    }

    #[test]
    fn selection_reveals_entry_on_short_menus() {
        let (mut controller, _log) = controller();
        controller.scroller_mut().set_visible(2);
        controller.select("rose", Instant::now()).unwrap();
        assert_eq!(controller.scroller().visible_range(), 2..4);

        controller.scroller_mut().scroll_by(-10);
        assert_eq!(controller.scroller().offset(), 0);
        controller
            .select("rose", Instant::now() + Duration::from_secs(1))
            .unwrap();
        assert_eq!(controller.scroller().visible_range(), 2..4);
    }
}
