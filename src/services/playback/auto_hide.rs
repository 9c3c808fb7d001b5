//! Cancellable auto-hide timer for the control overlay.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tokio::{runtime::Handle, task::JoinHandle};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct TimerSlot {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl TimerSlot {
    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Owns at most one pending hide task.
///
/// Arming and cancelling happen under one lock together with a generation
/// bump. A task that has already woken up re-checks its generation under
/// the same lock before firing, so a superseded task can never fire.
#[derive(Debug)]
pub(crate) struct HideTimer {
    delay: Duration,
    slot: Arc<Mutex<TimerSlot>>,
}

impl HideTimer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(TimerSlot::default())),
        }
    }

    fn lock(slot: &Mutex<TimerSlot>) -> MutexGuard<'_, TimerSlot> {
        slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cancels any pending task and schedules `on_fire` after the delay.
    ///
    /// Returns false if no tokio runtime is available to run the timer.
    pub(crate) fn arm<F>(&self, on_fire: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let mut slot = Self::lock(&self.slot);
        slot.cancel();

        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime available; controls will not auto-hide");
            return false;
        };

        let generation = slot.generation;
        let delay = self.delay;
        let shared_slot = Arc::clone(&self.slot);

        slot.task = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;

            let mut slot = Self::lock(&shared_slot);
            if slot.generation != generation {
                return;
            }
            slot.task = None;
            debug!(?delay, "Hide timer fired");
            on_fire();
        }));

        true
    }

    /// Cancels the pending task, if any.
    pub(crate) fn cancel(&self) {
        Self::lock(&self.slot).cancel();
    }

    /// Whether a hide task is currently scheduled.
    pub(crate) fn is_armed(&self) -> bool {
        Self::lock(&self.slot).task.is_some()
    }
}

impl Drop for HideTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
