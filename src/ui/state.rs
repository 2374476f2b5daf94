//! Application state management
//!
//! This module provides the central state for the Calmcore UI. The wizard
//! selection lives in [`SelectionFlow`]; everything about the
//! recommendation screen lives in [`RecommendationStage`].

use crate::catalog::MoodOption;
use crate::flow::{Screen, SelectionFlow};
use crate::integration::{Orchestrator, OrchestratorEvent};
use crate::provider::RecommendationRequest;
use crate::scheduler::{BreathPhase, PhaseDurations};
use crate::session::SessionDescriptor;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use uuid::Uuid;

/// What the recommendation screen is showing
#[derive(Debug, Clone, Default)]
pub enum RecommendationStage {
    /// The recommendation screen is not active
    #[default]
    Idle,
    /// Waiting for the fetch tagged `request_id`
    Loading {
        request_id: Uuid,
        request: RecommendationRequest,
    },
    /// Offering the session list
    Choosing { sessions: Vec<SessionDescriptor> },
    /// Running the breathing view for `sessions[selected]`
    Breathing {
        sessions: Vec<SessionDescriptor>,
        selected: usize,
        cycle_id: Uuid,
        phase: BreathPhase,
        instruction: String,
        phase_started: Instant,
    },
}

/// Main application state
pub struct AppState {
    /// Wizard screen and selections
    pub flow: SelectionFlow,
    /// Text in the context input; kept when going back
    pub context_draft: String,
    /// Recommendation screen sub-state
    pub stage: RecommendationStage,
    /// Last user-facing error
    pub last_error: Option<String>,

    orchestrator: Orchestrator,
    /// Last request and its results, reused for an identical request
    cache: Option<(RecommendationRequest, Vec<SessionDescriptor>)>,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            flow: SelectionFlow::new(),
            context_draft: String::new(),
            stage: RecommendationStage::Idle,
            last_error: None,
            orchestrator,
            cache: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.flow.screen()
    }

    pub fn select_mood(&mut self, mood: MoodOption) {
        if let Err(e) = self.flow.select_mood(mood) {
            warn!("Ignoring mood selection: {}", e);
        }
    }

    pub fn select_intensity(&mut self, intensity_id: u8) {
        if let Err(e) = self.flow.select_intensity(intensity_id) {
            warn!("Ignoring intensity selection: {}", e);
            self.last_error = Some(e.user_message());
        }
    }

    /// Replace the context text with a predefined tag
    pub fn pick_context_tag(&mut self, tag: &str) {
        self.context_draft = tag.to_string();
    }

    /// Submit the context and start loading recommendations
    pub fn submit_context(&mut self) {
        let request = match self.flow.submit_context(self.context_draft.clone()) {
            Ok(request) => request,
            Err(e) => {
                warn!("Ignoring context submission: {}", e);
                return;
            }
        };
        self.last_error = None;

        if let Some((cached, sessions)) = &self.cache {
            if *cached == request {
                debug!("Reusing {} cached sessions", sessions.len());
                self.stage = RecommendationStage::Choosing {
                    sessions: sessions.clone(),
                };
                return;
            }
        }

        let request_id = self.orchestrator.fetch(request.clone());
        self.stage = RecommendationStage::Loading {
            request_id,
            request,
        };
    }

    /// Return from the context screen to intensity
    pub fn back(&mut self) {
        if let Err(e) = self.flow.back() {
            warn!("Ignoring back: {}", e);
        }
    }

    /// Start over from the mood screen
    pub fn reset(&mut self) {
        self.stop_breathing();
        self.stage = RecommendationStage::Idle;
        self.context_draft.clear();
        self.last_error = None;
        self.flow.reset();
    }

    /// Open the breathing view for the session at `index`
    pub fn choose_session(&mut self, index: usize) {
        let RecommendationStage::Choosing { sessions } = &self.stage else {
            warn!("Ignoring session choice outside the session list");
            return;
        };
        let sessions = sessions.clone();
        let Some(session) = sessions.get(index) else {
            warn!("Ignoring choice of missing session {}", index);
            return;
        };

        // The orchestrator stops the previous cycle before the new one emits
        match self.orchestrator.start_breathing(session.timings) {
            Ok(cycle_id) => {
                self.last_error = None;
                self.stage = RecommendationStage::Breathing {
                    sessions,
                    selected: index,
                    cycle_id,
                    phase: BreathPhase::Inhale,
                    instruction: BreathPhase::Inhale.instruction().to_string(),
                    phase_started: Instant::now(),
                };
            }
            Err(e) => {
                warn!("Cannot start \"{}\": {}", session.title, e);
                self.last_error = Some(e.user_message());
            }
        }
    }

    /// Leave the breathing view and return to the session list
    pub fn back_to_list(&mut self) {
        self.stop_breathing();
        if let RecommendationStage::Breathing { sessions, .. } = &self.stage {
            self.stage = RecommendationStage::Choosing {
                sessions: sessions.clone(),
            };
        }
    }

    /// Cancel the running breathing cycle, if any
    pub fn stop_breathing(&mut self) {
        self.orchestrator.stop_breathing();
    }

    pub fn is_breathing(&self) -> bool {
        self.orchestrator.is_breathing()
    }

    /// Whether the current view animates and needs continuous repaints
    pub fn is_animating(&self) -> bool {
        matches!(
            self.stage,
            RecommendationStage::Loading { .. } | RecommendationStage::Breathing { .. }
        )
    }

    /// Session shown in the breathing view
    pub fn selected_session(&self) -> Option<&SessionDescriptor> {
        match &self.stage {
            RecommendationStage::Breathing {
                sessions, selected, ..
            } => sessions.get(*selected),
            _ => None,
        }
    }

    /// Fraction of the current phase already elapsed, in `0.0..=1.0`
    pub fn phase_progress(&self) -> f32 {
        let RecommendationStage::Breathing {
            phase,
            phase_started,
            ..
        } = &self.stage
        else {
            return 0.0;
        };
        let Some(durations) = self
            .selected_session()
            .and_then(|s| PhaseDurations::from_timings(&s.timings).ok())
        else {
            return 0.0;
        };

        let total = Duration::from_millis(durations.duration_of(*phase));
        if total.is_zero() {
            return 1.0;
        }
        (phase_started.elapsed().as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Poll backend events
    pub fn poll_events(&mut self) {
        for event in self.orchestrator.poll_events() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: OrchestratorEvent) {
        match event {
            OrchestratorEvent::RecommendationsReady {
                request_id,
                sessions,
            } => match std::mem::take(&mut self.stage) {
                RecommendationStage::Loading {
                    request_id: awaited,
                    request,
                } if awaited == request_id => {
                    debug!("Fetch {} delivered {} sessions", request_id, sessions.len());
                    self.cache = Some((request, sessions.clone()));
                    self.stage = RecommendationStage::Choosing { sessions };
                }
                stage => {
                    debug!("Discarding stale result of fetch {}", request_id);
                    self.stage = stage;
                }
            },
            OrchestratorEvent::PhaseChanged {
                cycle_id,
                phase: new_phase,
                instruction: new_instruction,
            } => match &mut self.stage {
                RecommendationStage::Breathing {
                    cycle_id: active,
                    phase,
                    instruction,
                    phase_started,
                    ..
                } if *active == cycle_id => {
                    *phase = new_phase;
                    *instruction = new_instruction;
                    *phase_started = Instant::now();
                }
                _ => debug!("Discarding {} of stale cycle {}", new_phase, cycle_id),
            },
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.stop_breathing();
    }
}
