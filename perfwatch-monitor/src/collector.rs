//! Periodic collector: samples process memory and prunes stale history.
//!
//! Two states, idle and running. The collector starts running when built and
//! goes idle on [`PeriodicCollector::stop`]. Each tick body runs under the
//! state lock and re-checks the state first, so once `stop` returns no tick
//! can fire, even on a multi-threaded runtime.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use perfwatch_core::traits::IMemoryProbe;

/// Work performed on every tick.
pub trait CollectorTick: Send + Sync + 'static {
    fn tick(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    Idle,
    Running,
}

/// A cancellable fixed-interval background task.
pub struct PeriodicCollector {
    state: Arc<Mutex<CollectorState>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PeriodicCollector {
    /// Arm the timer. The first tick fires one `period` from now.
    pub fn start<T: CollectorTick>(runtime: &Handle, period: Duration, target: Arc<T>) -> Self {
        let state = Arc::new(Mutex::new(CollectorState::Running));
        let task_state = Arc::clone(&state);
        let first = Instant::now() + period;

        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !run_tick(&task_state, target.as_ref()) {
                    break;
                }
            }
        });

        Self {
            state,
            handle: Mutex::new(Some(handle)),
        }
    }

    pub fn state(&self) -> CollectorState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Go idle and cancel the timer. Safe to call repeatedly.
    ///
    /// Returns the task handle the first time, for callers that want to
    /// await its completion.
    pub fn stop(&self) -> Option<JoinHandle<()>> {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            *state = CollectorState::Idle;
        }
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;
        handle.abort();
        Some(handle)
    }
}

/// Run one tick under the state lock. Returns false once idle.
fn run_tick<T: CollectorTick>(state: &Mutex<CollectorState>, target: &T) -> bool {
    let guard = state.lock().unwrap_or_else(PoisonError::into_inner);
    if *guard != CollectorState::Running {
        return false;
    }
    let _span = crate::collect_span!().entered();
    target.tick();
    true
}

impl Drop for PeriodicCollector {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Reads the current process's resident memory through `sysinfo`.
pub struct ProcessMemoryProbe {
    system: Mutex<System>,
    pid: Option<Pid>,
}

impl ProcessMemoryProbe {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = %e, "process id unavailable; memory sampling disabled");
                None
            }
        };
        Self {
            system: Mutex::new(System::new()),
            pid,
        }
    }
}

impl Default for ProcessMemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl IMemoryProbe for ProcessMemoryProbe {
    fn resident_bytes(&self) -> Option<u64> {
        let pid = self.pid?;
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        system.process(pid).map(|p| p.memory())
    }
}
