//! Home-page stats counters: one-shot count-up animation triggered the first
//! time the stats section scrolls into view.

use crate::select::Totals;

/// Frames an animation is spread over
pub const ANIMATION_STEPS: u64 = 80;

/// Fraction of the stats section that must be visible to start counting
pub const VISIBILITY_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    Idle,
    Animating { current: u64 },
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    target: u64,
    step: u64,
    state: CounterState,
}

impl Counter {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            step: target.div_ceil(ANIMATION_STEPS),
            state: CounterState::Idle,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    /// Start counting from zero and apply the first frame. Ignored unless idle.
    pub fn start(&mut self) {
        if self.state == CounterState::Idle {
            self.state = CounterState::Animating { current: 0 };
            self.tick();
        }
    }

    /// Advance one animation frame. Returns whether more frames are needed.
    pub fn tick(&mut self) -> bool {
        if let CounterState::Animating { current } = self.state {
            let next = current + self.step;
            self.state = if next >= self.target {
                CounterState::Done
            } else {
                CounterState::Animating { current: next }
            };
        }
        matches!(self.state, CounterState::Animating { .. })
    }

    /// Text currently shown for this counter
    pub fn display(&self) -> String {
        match self.state {
            CounterState::Idle => "0".to_string(),
            CounterState::Animating { current } => current.to_string(),
            CounterState::Done => format!("{}+", self.target),
        }
    }
}

/// The stats section and its counters, observed until first shown
#[derive(Debug, Clone)]
pub struct StatsPanel {
    counters: Vec<Counter>,
    observing: bool,
}

impl StatsPanel {
    /// Assign clan and praise totals to the first `slots` counters
    pub fn new(totals: Totals, slots: usize) -> Self {
        let counters = [totals.clans, totals.praises]
            .into_iter()
            .take(slots)
            .map(Counter::new)
            .collect();
        Self {
            counters,
            observing: true,
        }
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn is_observing(&self) -> bool {
        self.observing
    }

    /// Feed a visibility change. The first one reaching the threshold starts
    /// every counter and stops observation; returns whether that happened.
    pub fn on_visibility(&mut self, intersection_ratio: f64) -> bool {
        if !self.observing || intersection_ratio < VISIBILITY_THRESHOLD {
            return false;
        }
        self.observing = false;
        for counter in &mut self.counters {
            counter.start();
        }
        true
    }

    /// Advance all counters one frame. Returns whether any still animate.
    pub fn frame(&mut self) -> bool {
        let mut pending = false;
        for counter in &mut self.counters {
            pending |= counter.tick();
        }
        pending
    }

    /// Run frames until every counter settles, returning how many ran
    pub fn finish(&mut self) -> usize {
        let mut frames = 0;
        while self.counters.iter().any(|c| matches!(c.state(), CounterState::Animating { .. })) {
            self.frame();
            frames += 1;
        }
        frames
    }

    pub fn displays(&self) -> Vec<String> {
        self.counters.iter().map(Counter::display).collect()
    }
}
