//! Orchestrator between the UI thread and the async backend
//!
//! The UI never blocks: recommendation fetches and breathing cycles run on
//! the orchestrator's tokio runtime and report back through an event
//! channel the UI drains once per frame.

use crate::integration::config::AppConfig;
use crate::provider::{RecommendationRequest, Recommender};
use crate::scheduler::{BreathPhase, BreathScheduler};
use crate::session::{fallback_sessions, SessionDescriptor, TimingsTriple};
use crate::{CalmcoreError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::{Builder, Handle, Runtime};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Events emitted by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum OrchestratorEvent {
    /// A fetch finished; `sessions` is never empty
    RecommendationsReady {
        request_id: Uuid,
        sessions: Vec<SessionDescriptor>,
    },

    /// A breathing cycle entered a new phase
    PhaseChanged {
        cycle_id: Uuid,
        phase: BreathPhase,
        instruction: String,
    },
}

/// Shared slot for the UI context to wake on new events
type RepaintSlot = Arc<Mutex<Option<egui::Context>>>;

fn request_repaint(slot: &RepaintSlot) {
    if let Some(ctx) = slot.lock().as_ref() {
        ctx.request_repaint();
    }
}

/// Main orchestrator that owns the backend runtime
pub struct Orchestrator {
    /// Owned runtime, taken on drop for a non-blocking shutdown
    runtime: Option<Runtime>,

    /// Handle used for spawning
    handle: Handle,

    recommender: Recommender,

    /// Host of the single active breathing cycle
    breathing: Mutex<BreathScheduler>,

    event_tx: Sender<OrchestratorEvent>,
    event_rx: Receiver<OrchestratorEvent>,

    repaint: RepaintSlot,
}

impl Orchestrator {
    /// Create an orchestrator for `config` on a fresh runtime
    pub fn new(config: AppConfig) -> Result<Self> {
        Self::with_recommender(Recommender::from_config(config.provider))
    }

    /// Create an orchestrator for `recommender` on a fresh runtime
    pub fn with_recommender(recommender: Recommender) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("calmcore-backend")
            .enable_all()
            .build()
            .map_err(|e| CalmcoreError::RuntimeError(format!("Failed to start runtime: {}", e)))?;
        let handle = runtime.handle().clone();

        info!("Orchestrator started");
        Ok(Self::assemble(Some(runtime), handle, recommender))
    }

    fn assemble(runtime: Option<Runtime>, handle: Handle, recommender: Recommender) -> Self {
        // Unbounded so a phase callback never blocks while holding the
        // scheduler's cancel gate
        let (event_tx, event_rx) = unbounded();

        Self {
            runtime,
            breathing: Mutex::new(BreathScheduler::new(handle.clone())),
            handle,
            recommender,
            event_tx,
            event_rx,
            repaint: Arc::new(Mutex::new(None)),
        }
    }

    /// Wake `ctx` whenever an event is sent
    pub fn set_repaint_context(&self, ctx: egui::Context) {
        *self.repaint.lock() = Some(ctx);
    }

    pub fn is_configured(&self) -> bool {
        self.recommender.is_configured()
    }

    /// Start fetching recommendations; the result arrives as
    /// [`OrchestratorEvent::RecommendationsReady`] tagged with the returned id
    pub fn fetch(&self, request: RecommendationRequest) -> Uuid {
        let request_id = Uuid::new_v4();
        let recommender = self.recommender.clone();
        let event_tx = self.event_tx.clone();
        let repaint = self.repaint.clone();

        debug!("Fetch {} started", request_id);

        let task = self
            .handle
            .spawn(async move { recommender.recommend(&request).await });

        self.handle.spawn(async move {
            let sessions = match task.await {
                Ok(sessions) => sessions,
                Err(e) => {
                    error!("Recommendation task failed: {}", e);
                    fallback_sessions()
                }
            };

            if event_tx
                .send(OrchestratorEvent::RecommendationsReady {
                    request_id,
                    sessions,
                })
                .is_err()
            {
                warn!("Fetch {} finished after the UI went away", request_id);
                return;
            }
            request_repaint(&repaint);
        });

        request_id
    }

    /// Callback that forwards phase changes of cycle `cycle_id` to the event channel
    pub fn phase_reporter(&self, cycle_id: Uuid) -> impl FnMut(BreathPhase, &str) + Send + 'static {
        let event_tx = self.event_tx.clone();
        let repaint = self.repaint.clone();

        move |phase: BreathPhase, instruction: &str| {
            let event = OrchestratorEvent::PhaseChanged {
                cycle_id,
                phase,
                instruction: instruction.to_string(),
            };
            if event_tx.send(event).is_ok() {
                request_repaint(&repaint);
            }
        }
    }

    /// Replace the running breathing cycle with one for `timings`.
    ///
    /// Phases arrive as [`OrchestratorEvent::PhaseChanged`] tagged with the
    /// returned cycle id. The previous cycle is stopped even when `timings`
    /// are rejected.
    pub fn start_breathing(&self, timings: TimingsTriple) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.breathing.lock().start(timings, self.phase_reporter(id))?;
        debug!("Breathing cycle {} started with {}", id, timings);
        Ok(id)
    }

    /// Stop the running breathing cycle, if any
    pub fn stop_breathing(&self) {
        self.breathing.lock().stop();
    }

    pub fn is_breathing(&self) -> bool {
        self.breathing.lock().is_running()
    }

    /// Try to receive an event
    pub fn try_recv_event(&self) -> Result<Option<OrchestratorEvent>> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(CalmcoreError::ChannelError(
                "event channel disconnected".to_string(),
            )),
        }
    }

    /// Drain all pending events
    pub fn poll_events(&self) -> Vec<OrchestratorEvent> {
        let mut events = Vec::new();
        loop {
            match self.try_recv_event() {
                Ok(Some(event)) => events.push(event),
                Ok(None) => break,
                Err(e) => {
                    error!("Stopped polling: {}", e);
                    break;
                }
            }
        }
        events
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.breathing.get_mut().stop();
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
            info!("Orchestrator stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use std::time::Duration;

    fn wait_for_event(orchestrator: &Orchestrator) -> OrchestratorEvent {
        for _ in 0..200 {
            if let Some(event) = orchestrator.try_recv_event().unwrap() {
                return event;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("no event received");
    }

    #[test]
    fn test_fetch_reports_tagged_result() {
        let orchestrator = Orchestrator::with_recommender(Recommender::new(Arc::new(
            MockProvider::with_sessions(fallback_sessions()),
        )))
        .unwrap();

        let id = orchestrator.fetch(RecommendationRequest::new(None, None, ""));
        match wait_for_event(&orchestrator) {
            OrchestratorEvent::RecommendationsReady {
                request_id,
                sessions,
            } => {
                assert_eq!(request_id, id);
                assert_eq!(sessions.len(), 3);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_start_breathing_reports_first_inhale() {
        let orchestrator = Orchestrator::with_recommender(Recommender::unconfigured()).unwrap();

        let cycle_id = orchestrator
            .start_breathing(TimingsTriple::new(4.0, 4.0, 4.0))
            .unwrap();
        assert!(orchestrator.is_breathing());

        let events = orchestrator.poll_events();
        assert_eq!(
            events,
            vec![OrchestratorEvent::PhaseChanged {
                cycle_id,
                phase: BreathPhase::Inhale,
                instruction: "Inhale (Close)...".to_string(),
            }]
        );

        orchestrator.stop_breathing();
        assert!(!orchestrator.is_breathing());
    }

    #[test]
    fn test_restart_replaces_running_cycle() {
        let orchestrator = Orchestrator::with_recommender(Recommender::unconfigured()).unwrap();

        let first = orchestrator
            .start_breathing(TimingsTriple::new(0.05, 0.0, 0.05))
            .unwrap();
        let second = orchestrator
            .start_breathing(TimingsTriple::new(4.0, 0.0, 4.0))
            .unwrap();
        assert_ne!(first, second);

        std::thread::sleep(Duration::from_millis(200));
        let late_from_first = orchestrator
            .poll_events()
            .into_iter()
            .skip_while(|e| !matches!(e, OrchestratorEvent::PhaseChanged { cycle_id, .. } if *cycle_id == second))
            .any(|e| matches!(e, OrchestratorEvent::PhaseChanged { cycle_id, .. } if cycle_id == first));
        assert!(!late_from_first);
        assert!(orchestrator.is_breathing());
    }

    #[test]
    fn test_start_breathing_rejects_degenerate_timings() {
        let orchestrator = Orchestrator::with_recommender(Recommender::unconfigured()).unwrap();
        orchestrator
            .start_breathing(TimingsTriple::new(4.0, 0.0, 4.0))
            .unwrap();
        orchestrator.poll_events();

        let result = orchestrator.start_breathing(TimingsTriple::new(0.0, 3.0, 0.0));
        assert!(matches!(result, Err(CalmcoreError::InvalidTimings(_))));
        assert!(!orchestrator.is_breathing());
        assert!(orchestrator.poll_events().is_empty());
    }
}
