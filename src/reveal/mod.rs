//! Typewriter reveal: discloses chunks one at a time.
//!
//! [`Reveal`] is the plain counter; [`TypewriterScheduler`] drives it on a
//! timer. Neither looks at chunk contents, only at how many chunks there are.

mod scheduler;
pub use scheduler::{TypewriterScheduler, MIN_PERIOD};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealClass {
    Shown,
    Typing,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// The chunk at this index is now being typed.
    Advanced(usize),
    /// Every chunk has been revealed; the timer should stop.
    Exhausted,
}

/// Reveal progress. Starts with nothing revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reveal {
    revealed: Option<usize>,
    finished: bool,
}

impl Reveal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, count: usize) -> Tick {
        if self.finished {
            return Tick::Exhausted;
        }
        let next = self.revealed.map_or(0, |index| index + 1);
        if next < count {
            self.revealed = Some(next);
            Tick::Advanced(next)
        } else {
            self.finished = true;
            Tick::Exhausted
        }
    }

    /// Chunks before the revealed index are shown, the revealed one is being
    /// typed and the rest are hidden. Once finished, everything is shown.
    pub fn classify(&self, index: usize) -> RevealClass {
        if self.finished {
            return RevealClass::Shown;
        }
        match self.revealed {
            Some(revealed) if index < revealed => RevealClass::Shown,
            Some(revealed) if index == revealed => RevealClass::Typing,
            _ => RevealClass::Hidden,
        }
    }

    pub fn restart(&mut self) {
        *self = Reveal::default();
    }

    pub fn revealed_index(&self) -> Option<usize> {
        self.revealed
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Chunk count shared between the host, which sets it after every build or
/// update, and a running scheduler, which reads it on every tick.
#[derive(Debug, Clone, Default)]
pub struct ChunkCount(Arc<AtomicUsize>);

impl ChunkCount {
    pub fn new(count: usize) -> Self {
        ChunkCount(Arc::new(AtomicUsize::new(count)))
    }

    pub fn set(&self, count: usize) {
        self.0.store(count, Ordering::Relaxed);
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::Relaxed)
    }
}
