//! Breathing phase state machine
//!
//! The machine knows nothing about clocks; callers feed it elapsed time and
//! it reports which phases were entered.

use crate::session::TimingsTriple;
use crate::{CalmcoreError, Result};
use std::fmt;
use std::time::Duration;

/// One part of a breathing cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreathPhase {
    /// Breathing in, the flower closes
    Inhale,
    /// Holding, the flower stays closed
    Hold,
    /// Breathing out, the flower blooms
    Exhale,
}

impl BreathPhase {
    /// Guidance text shown while the phase is active
    pub fn instruction(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inhale (Close)...",
            BreathPhase::Hold => "Hold...",
            BreathPhase::Exhale => "Exhale (Bloom)...",
        }
    }
}

impl fmt::Display for BreathPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreathPhase::Inhale => write!(f, "inhale"),
            BreathPhase::Hold => write!(f, "hold"),
            BreathPhase::Exhale => write!(f, "exhale"),
        }
    }
}

/// Phase lengths in whole milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDurations {
    pub inhale_ms: u64,
    pub hold_ms: u64,
    pub exhale_ms: u64,
}

impl PhaseDurations {
    /// Convert a validated triple, rounding each phase to the nearest millisecond
    pub fn from_timings(timings: &TimingsTriple) -> Result<Self> {
        timings.validate()?;

        let durations = Self {
            inhale_ms: secs_to_ms(timings.inhale),
            hold_ms: secs_to_ms(timings.hold),
            exhale_ms: secs_to_ms(timings.exhale),
        };

        if durations.inhale_ms + durations.exhale_ms == 0 {
            return Err(CalmcoreError::InvalidTimings(format!(
                "cycle {} is shorter than one millisecond",
                timings
            )));
        }

        Ok(durations)
    }

    pub fn total_ms(&self) -> u64 {
        self.inhale_ms + self.hold_ms + self.exhale_ms
    }

    /// Time from one inhale to the next
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.total_ms())
    }

    pub fn duration_of(&self, phase: BreathPhase) -> u64 {
        match phase {
            BreathPhase::Inhale => self.inhale_ms,
            BreathPhase::Hold => self.hold_ms,
            BreathPhase::Exhale => self.exhale_ms,
        }
    }
}

fn secs_to_ms(secs: f64) -> u64 {
    (secs * 1000.0).round() as u64
}

/// Repeating inhale → hold → exhale machine.
///
/// A new machine has already entered `Inhale`. The hold phase is skipped
/// entirely when its duration is zero.
#[derive(Debug, Clone)]
pub struct PhaseMachine {
    phase: BreathPhase,
    elapsed_ms: u64,
    durations: PhaseDurations,
    cycle_index: u64,
}

impl PhaseMachine {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            phase: BreathPhase::Inhale,
            elapsed_ms: 0,
            durations,
            cycle_index: 0,
        }
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    /// Number of completed cycles
    pub fn cycle_index(&self) -> u64 {
        self.cycle_index
    }

    /// Length of the current phase
    pub fn current_duration_ms(&self) -> u64 {
        self.durations.duration_of(self.phase)
    }

    /// Time left in the current phase
    pub fn remaining_ms(&self) -> u64 {
        self.current_duration_ms().saturating_sub(self.elapsed_ms)
    }

    fn next_phase(&self) -> BreathPhase {
        match self.phase {
            BreathPhase::Inhale if self.durations.hold_ms > 0 => BreathPhase::Hold,
            BreathPhase::Inhale => BreathPhase::Exhale,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    /// Move to the next phase regardless of elapsed time and return it
    pub fn step(&mut self) -> BreathPhase {
        let next = self.next_phase();
        if next == BreathPhase::Inhale {
            self.cycle_index += 1;
        }
        self.phase = next;
        self.elapsed_ms = 0;
        next
    }

    /// Advance by `dt_ms`, returning every phase entered on the way.
    ///
    /// Reaching a boundary exactly enters the next phase. Zero-length phases
    /// are entered and left within the same call.
    pub fn advance(&mut self, mut dt_ms: u64) -> Vec<BreathPhase> {
        let mut entered = Vec::new();
        loop {
            let left = self.remaining_ms();
            if dt_ms < left {
                self.elapsed_ms += dt_ms;
                break;
            }
            dt_ms -= left;
            entered.push(self.step());
        }
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(inhale: f64, hold: f64, exhale: f64) -> PhaseMachine {
        let durations =
            PhaseDurations::from_timings(&TimingsTriple::new(inhale, hold, exhale)).unwrap();
        PhaseMachine::new(durations)
    }

    #[test]
    fn test_box_breathing_cycle() {
        let mut pm = machine(4.0, 4.0, 4.0);
        assert_eq!(pm.phase(), BreathPhase::Inhale);

        assert!(pm.advance(3_999).is_empty());
        assert_eq!(pm.advance(1), vec![BreathPhase::Hold]);
        assert_eq!(pm.advance(4_000), vec![BreathPhase::Exhale]);
        assert_eq!(pm.advance(4_000), vec![BreathPhase::Inhale]);
        assert_eq!(pm.cycle_index(), 1);
    }

    #[test]
    fn test_zero_hold_is_skipped() {
        let mut pm = machine(2.0, 0.0, 6.0);
        let entered = pm.advance(16_000);
        assert_eq!(
            entered,
            vec![
                BreathPhase::Exhale,
                BreathPhase::Inhale,
                BreathPhase::Exhale,
                BreathPhase::Inhale,
            ]
        );
        assert!(!entered.contains(&BreathPhase::Hold));
    }

    #[test]
    fn test_zero_inhale_passes_through() {
        let mut pm = machine(0.0, 0.0, 5.0);
        // the zero-length inhale is left immediately
        assert_eq!(pm.advance(0), vec![BreathPhase::Exhale]);
        assert_eq!(
            pm.advance(5_000),
            vec![BreathPhase::Inhale, BreathPhase::Exhale]
        );
    }

    #[test]
    fn test_fractional_seconds_round_to_millis() {
        let durations =
            PhaseDurations::from_timings(&TimingsTriple::new(1.2346, 0.5, 2.0)).unwrap();
        assert_eq!(durations.inhale_ms, 1_235);
        assert_eq!(durations.hold_ms, 500);
        assert_eq!(durations.period(), Duration::from_millis(3_735));
    }

    #[test]
    fn test_sub_millisecond_cycle_rejected() {
        let result = PhaseDurations::from_timings(&TimingsTriple::new(0.0001, 0.0, 0.0002));
        assert!(matches!(result, Err(CalmcoreError::InvalidTimings(_))));
    }

    #[test]
    fn test_remaining_within_phase() {
        let mut pm = machine(4.0, 0.0, 4.0);
        pm.advance(1_000);
        assert_eq!(pm.phase(), BreathPhase::Inhale);
        assert_eq!(pm.remaining_ms(), 3_000);
    }

    #[test]
    fn test_huge_timings_rejected_without_overflow() {
        for timings in [
            TimingsTriple::new(1e17, 0.0, 1e17),
            TimingsTriple::new(4.0, 1e30, 4.0),
            TimingsTriple::new(f64::MAX, 0.0, 0.0),
        ] {
            let result = PhaseDurations::from_timings(&timings);
            assert!(matches!(result, Err(CalmcoreError::InvalidTimings(_))), "{}", timings);
        }

        let longest = PhaseDurations::from_timings(&TimingsTriple::new(3600.0, 3600.0, 3600.0)).unwrap();
        assert_eq!(longest.total_ms(), 10_800_000);
    }

    #[test]
    fn test_instructions() {
        assert_eq!(BreathPhase::Inhale.instruction(), "Inhale (Close)...");
        assert_eq!(BreathPhase::Hold.instruction(), "Hold...");
        assert_eq!(BreathPhase::Exhale.instruction(), "Exhale (Bloom)...");
    }
}
