//! Timer-driven breathing cycle
//!
//! One spawned task per cycle sleeps until the next phase boundary and then
//! advances the [`PhaseMachine`] by exactly that wait. Deadlines are
//! accumulated from the start instant, so the period stays exact no matter
//! how late a wakeup is.

use crate::scheduler::phase::{BreathPhase, PhaseDurations, PhaseMachine};
use crate::session::TimingsTriple;
use crate::Result;
use parking_lot::ReentrantMutex;
use std::cell::Cell;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Cancellation flag shared between a handle and its cycle task.
///
/// Callbacks run while the lock is held, so once `cancel` returns no callback
/// is in flight and none will start. The lock is reentrant so a callback may
/// cancel its own cycle.
struct CancelGate {
    cancelled: ReentrantMutex<Cell<bool>>,
}

impl CancelGate {
    fn new() -> Self {
        Self {
            cancelled: ReentrantMutex::new(Cell::new(false)),
        }
    }

    /// Run `notify` unless cancelled; returns whether it ran
    fn emit(&self, notify: impl FnOnce()) -> bool {
        let cancelled = self.cancelled.lock();
        if cancelled.get() {
            return false;
        }
        notify();
        true
    }

    /// Returns true only for the call that actually cancelled
    fn cancel(&self) -> bool {
        let cancelled = self.cancelled.lock();
        !cancelled.replace(true)
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.lock().get()
    }
}

/// Owned handle to a running breathing cycle.
///
/// Dropping the handle cancels the cycle.
#[must_use = "dropping the handle cancels the breathing cycle"]
pub struct CancelHandle {
    gate: Arc<CancelGate>,
    task: JoinHandle<()>,
}

impl CancelHandle {
    /// Stop the cycle. No phase callback fires after this returns.
    ///
    /// Calling it again is a no-op.
    pub fn cancel(&self) {
        if self.gate.cancel() {
            self.task.abort();
            debug!("Breathing cycle cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.gate.is_cancelled()
    }
}

impl Drop for CancelHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Start a repeating breathing cycle on `runtime`.
///
/// `on_phase_change` is called with `Inhale` before this returns, then at
/// every following phase boundary. Degenerate timings are rejected.
pub fn start<F>(runtime: &Handle, timings: TimingsTriple, mut on_phase_change: F) -> Result<CancelHandle>
where
    F: FnMut(BreathPhase, &str) + Send + 'static,
{
    let durations = PhaseDurations::from_timings(&timings)?;
    let gate = Arc::new(CancelGate::new());

    debug!(
        "Starting breathing cycle {} (period {}ms)",
        timings,
        durations.total_ms()
    );

    let origin = Instant::now();
    let machine = PhaseMachine::new(durations);
    on_phase_change(machine.phase(), machine.phase().instruction());

    let task = runtime.spawn(run_cycle(machine, origin, gate.clone(), on_phase_change));

    Ok(CancelHandle { gate, task })
}

async fn run_cycle<F>(mut machine: PhaseMachine, origin: Instant, gate: Arc<CancelGate>, mut on_phase_change: F)
where
    F: FnMut(BreathPhase, &str) + Send + 'static,
{
    let mut deadline = origin;
    loop {
        let wait_ms = machine.remaining_ms();
        deadline += Duration::from_millis(wait_ms);
        sleep_until(deadline).await;

        // Zero-length phases are entered and left at the same boundary
        for phase in machine.advance(wait_ms) {
            if !gate.emit(|| on_phase_change(phase, phase.instruction())) {
                return;
            }
            if phase == BreathPhase::Inhale {
                debug!("Breathing cycle {} begins", machine.cycle_index() + 1);
            }
        }
    }
}

/// Host for at most one breathing cycle at a time.
///
/// Starting a new cycle cancels the previous one first, and dropping the
/// scheduler cancels whatever is running.
pub struct BreathScheduler {
    runtime: Handle,
    active: Option<CancelHandle>,
}

impl BreathScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            active: None,
        }
    }

    /// Replace the running cycle with one for `timings`.
    ///
    /// The old cycle is stopped even if the new timings are rejected.
    pub fn start<F>(&mut self, timings: TimingsTriple, on_phase_change: F) -> Result<()>
    where
        F: FnMut(BreathPhase, &str) + Send + 'static,
    {
        self.stop();
        self.active = Some(start(&self.runtime, timings, on_phase_change)?);
        Ok(())
    }

    /// Cancel the running cycle, if any
    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_cancelled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_gate_cancel_is_idempotent() {
        let gate = CancelGate::new();
        assert!(gate.cancel());
        assert!(!gate.cancel());
        assert!(gate.is_cancelled());
        assert!(!gate.emit(|| panic!("must not run after cancel")));
    }

    #[test]
    fn test_gate_allows_reentrant_cancel() {
        let gate = Arc::new(CancelGate::new());
        let inner = gate.clone();
        assert!(gate.emit(|| {
            inner.cancel();
        }));
        assert!(gate.is_cancelled());
    }

    #[tokio::test]
    async fn test_start_emits_inhale_synchronously() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handle = start(&Handle::current(), TimingsTriple::new(4.0, 4.0, 4.0), move |phase, text| {
            sink.lock().push((phase, text.to_string()));
        })
        .unwrap();

        assert_eq!(
            seen.lock().as_slice(),
            &[(BreathPhase::Inhale, "Inhale (Close)...".to_string())]
        );
        handle.cancel();
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_start_rejects_zero_cycle() {
        let result = start(&Handle::current(), TimingsTriple::new(0.0, 0.0, 0.0), |_, _| {
            panic!("degenerate cycle must never emit");
        });
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_scheduler_stops_previous_on_invalid_restart() {
        let mut scheduler = BreathScheduler::new(Handle::current());
        scheduler
            .start(TimingsTriple::new(4.0, 0.0, 4.0), |_, _| {})
            .unwrap();
        assert!(scheduler.is_running());

        assert!(scheduler
            .start(TimingsTriple::new(0.0, 3.0, 0.0), |_, _| {})
            .is_err());
        assert!(!scheduler.is_running());
    }
}
