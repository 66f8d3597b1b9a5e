use crate::domain::ports::PageController;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

type ReloadHook = Arc<dyn Fn() + Send + Sync>;

/// Page controller backed by tokio timers.
///
/// Reloads fire on the runtime after their delay and run the optional hook.
/// Navigation targets are recorded in order.
pub struct ScheduledReload {
    scheduled: AtomicUsize,
    reloads: Arc<AtomicUsize>,
    locations: Mutex<Vec<String>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
    on_reload: Option<ReloadHook>,
}

impl ScheduledReload {
    pub fn new() -> Self {
        Self {
            scheduled: AtomicUsize::new(0),
            reloads: Arc::new(AtomicUsize::new(0)),
            locations: Mutex::new(Vec::new()),
            pending: Mutex::new(Vec::new()),
            on_reload: None,
        }
    }

    pub fn with_hook(hook: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            on_reload: Some(Arc::new(hook)),
            ..Self::new()
        }
    }

    /// Reloads requested so far, fired or not.
    pub fn scheduled(&self) -> usize {
        self.scheduled.load(Ordering::SeqCst)
    }

    /// Reloads whose delay has elapsed.
    pub fn reloads(&self) -> usize {
        self.reloads.load(Ordering::SeqCst)
    }

    pub fn locations(&self) -> Vec<String> {
        self.locations
            .lock()
            .map(|l| l.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    /// Waits for every scheduled reload to fire.
    pub async fn wait(&self) {
        let handles: Vec<JoinHandle<()>> = match self.pending.lock() {
            Ok(mut pending) => pending.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        };
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!("reload task did not complete: {}", e);
            }
        }
    }
}

impl Default for ScheduledReload {
    fn default() -> Self {
        Self::new()
    }
}

fn fire(reloads: &AtomicUsize, hook: Option<&ReloadHook>) {
    reloads.fetch_add(1, Ordering::SeqCst);
    tracing::info!("reloading page");
    if let Some(hook) = hook {
        hook();
    }
}

impl PageController for ScheduledReload {
    fn schedule_reload(&self, delay: Duration) {
        self.scheduled.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("page reload scheduled in {:?}", delay);

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime, reloading immediately");
            fire(&self.reloads, self.on_reload.as_ref());
            return;
        };

        let reloads = Arc::clone(&self.reloads);
        let hook = self.on_reload.clone();
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            fire(&reloads, hook.as_ref());
        });

        let mut pending = self
            .pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        pending.retain(|handle| !handle.is_finished());
        pending.push(task);
    }

    fn navigate(&self, location: &str) {
        tracing::info!("navigating to {}", location);
        match self.locations.lock() {
            Ok(mut locations) => locations.push(location.to_string()),
            Err(poisoned) => poisoned.into_inner().push(location.to_string()),
        }
    }
}
