//! Frame-budgeted work queue
//!
//! Items are processed in order until the frame's time budget runs out; the
//! cursor is kept so the next frame resumes where this one stopped.

/// Millisecond clock supplied by the host (performance.now(), Instant, ...)
pub trait FrameClock {
    fn now_ms(&self) -> f64;
}

/// Pending work plus a resume cursor
#[derive(Debug, Clone)]
pub struct FrameWorkQueue<T> {
    items: Vec<T>,
    cursor: usize,
    budget_ms: f64,
}

impl<T> FrameWorkQueue<T> {
    pub fn new(budget_ms: f64) -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            budget_ms,
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
        self.items.extend(items);
    }

    /// Items not yet processed
    pub fn pending(&self) -> usize {
        self.items.len() - self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.pending() == 0
    }

    /// Drop all work, processed or not
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = 0;
    }

    /// Process items until the budget is spent; returns how many ran
    ///
    /// At least one item runs per call so a tiny budget still makes progress.
    pub fn run_frame(&mut self, clock: &impl FrameClock, mut work: impl FnMut(&T)) -> usize {
        let start = clock.now_ms();
        let mut processed = 0;

        while self.cursor < self.items.len() {
            if processed > 0 && clock.now_ms() - start >= self.budget_ms {
                break;
            }
            work(&self.items[self.cursor]);
            self.cursor += 1;
            processed += 1;
        }

        if self.is_done() {
            self.clear();
        }
        processed
    }
}
