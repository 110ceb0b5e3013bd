use std::time::{Duration, Instant};

use rand::prelude::*;

use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowMode {
    Continuous,
    Shuffle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideshowConfig {
    pub interval: Duration,
    pub mode: SlideshowMode,
    pub include_placeholders: bool,
}

/// Timed auto-advance over registry indices.
///
/// The slideshow only proposes the next index; the caller routes it through
/// `MenuController::select_index` so debounce and lifecycle rules still apply.
pub struct Slideshow {
    interval: Duration,
    mode: SlideshowMode,
    eligible: Vec<usize>,
    order: Vec<usize>,
    cursor: usize,
    last_advance: Instant,
    rng: StdRng,
}

impl Slideshow {
    pub fn new(eligible: Vec<usize>, config: &SlideshowConfig, now: Instant, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let order = build_order(eligible.len(), config.mode, &mut rng);
        Self {
            interval: config.interval,
            mode: config.mode,
            eligible,
            order,
            cursor: 0,
            last_advance: now,
            rng,
        }
    }

    pub fn for_registry<R>(
        registry: &Registry<R>,
        config: &SlideshowConfig,
        now: Instant,
        seed: u64,
    ) -> Self {
        let eligible = registry
            .iter()
            .enumerate()
            .filter(|(_, descriptor)| config.include_placeholders || !descriptor.is_placeholder())
            .map(|(index, _)| index)
            .collect();
        Self::new(eligible, config, now, seed)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.eligible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eligible.is_empty()
    }

    /// Index the current slide should be (before any advance).
    pub fn current(&self) -> Option<usize> {
        self.order
            .get(self.cursor)
            .and_then(|&slot| self.eligible.get(slot))
            .copied()
    }

    /// Restarts the interval, typically after a manual selection.
    pub fn restart(&mut self, now: Instant) {
        self.last_advance = now;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        if self.eligible.len() <= 1 {
            return None;
        }
        self.last_advance.checked_add(self.interval)
    }

    /// Returns the registry index to show next once the interval has elapsed.
    /// `active` is skipped so an advance never re-selects what is showing.
    pub fn next_due(&mut self, now: Instant, active: Option<usize>) -> Option<usize> {
        if self.eligible.len() <= 1 {
            return None;
        }
        if now.saturating_duration_since(self.last_advance) < self.interval {
            return None;
        }
        self.last_advance = now;

        // A reshuffle can put the active entry straight after itself. With at
        // least two eligible entries a different one turns up within `len` steps.
        let mut candidate = self.advance();
        for _ in 0..self.eligible.len() {
            if candidate != active {
                break;
            }
            candidate = self.advance();
        }
        candidate
    }

    fn advance(&mut self) -> Option<usize> {
        self.cursor += 1;
        if self.cursor >= self.order.len() {
            self.order = build_order(self.eligible.len(), self.mode, &mut self.rng);
            self.cursor = 0;
        }
        self.current()
    }
}

fn build_order(len: usize, mode: SlideshowMode, rng: &mut StdRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    match mode {
        SlideshowMode::Continuous => {}
        SlideshowMode::Shuffle => {
            order.shuffle(rng);
        }
    }
    order
}
