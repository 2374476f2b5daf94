//! Breathing phase scheduling
//!
//! Turns a [`TimingsTriple`](crate::session::TimingsTriple) into a repeating
//! inhale → hold → exhale sequence.
//!
//! - **phase**: the pure state machine, advanced by explicit time deltas
//! - **runner**: drives the machine from a single tokio timer task and hands
//!   out [`CancelHandle`]s that stop it
//!
//! # Usage
//!
//! ```rust,ignore
//! use calmcore::scheduler::{self, BreathPhase};
//! use calmcore::session::TimingsTriple;
//!
//! let handle = scheduler::start(&runtime, TimingsTriple::new(4.0, 4.0, 4.0), |phase, text| {
//!     println!("{phase}: {text}");
//! })?;
//!
//! // ... later, or implicitly when `handle` is dropped
//! handle.cancel();
//! ```

pub mod phase;
pub mod runner;

pub use phase::{BreathPhase, PhaseDurations, PhaseMachine};
pub use runner::{start, BreathScheduler, CancelHandle};
