use super::{ChunkCount, Reveal, RevealClass, Tick};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, trace};

/// Shortest period the timer runs at.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Advances a [`Reveal`] once per `period` on the tokio runtime until every
/// chunk is revealed.
///
/// The timer stops by itself when the reveal is exhausted, on [`cancel`],
/// and when the scheduler is dropped. Rebuilding or updating chunks never
/// resets progress; only [`restart`] does.
///
/// [`cancel`]: TypewriterScheduler::cancel
/// [`restart`]: TypewriterScheduler::restart
pub struct TypewriterScheduler {
    period: Duration,
    count: ChunkCount,
    state: Arc<watch::Sender<Reveal>>,
    task: Option<JoinHandle<()>>,
}

impl TypewriterScheduler {
    /// Starts revealing. Must be called from within a tokio runtime.
    ///
    /// A `period` shorter than [`MIN_PERIOD`] is raised to it.
    pub fn start(count: ChunkCount, period: Duration) -> Self {
        let (state, _) = watch::channel(Reveal::new());
        let mut scheduler = TypewriterScheduler {
            period: period.max(MIN_PERIOD),
            count,
            state: Arc::new(state),
            task: None,
        };
        scheduler.spawn();
        scheduler
    }

    fn spawn(&mut self) {
        let state = Arc::clone(&self.state);
        let count = self.count.clone();
        let period = self.period;
        debug!(?period, count = count.get(), "typewriter reveal started");
        let mut ticker = time::interval_at(Instant::now() + period, period);
        self.task = Some(tokio::spawn(async move {
            loop {
                ticker.tick().await;
                let mut tick = Tick::Exhausted;
                state.send_modify(|reveal| tick = reveal.tick(count.get()));
                match tick {
                    Tick::Advanced(index) => trace!(index, "revealing chunk"),
                    Tick::Exhausted => {
                        debug!("typewriter reveal finished");
                        break;
                    }
                }
            }
        }));
    }

    /// A receiver notified on every step.
    pub fn subscribe(&self) -> watch::Receiver<Reveal> {
        self.state.subscribe()
    }

    pub fn current(&self) -> Reveal {
        *self.state.borrow()
    }

    pub fn classify(&self, index: usize) -> RevealClass {
        self.state.borrow().classify(index)
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the timer, keeping the progress made so far.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!("typewriter reveal cancelled");
            }
            task.abort();
        }
    }

    /// Resets the reveal to nothing shown and starts a fresh timer.
    pub fn restart(&mut self) {
        self.cancel();
        self.state.send_replace(Reveal::new());
        debug!("typewriter reveal restarted");
        self.spawn();
    }
}

impl Drop for TypewriterScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
