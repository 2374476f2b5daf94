//! Breathing scheduler timing tests
//!
//! All tests run on tokio's paused clock, so phase boundaries land on exact
//! virtual milliseconds.

use calmcore::scheduler::{self, BreathPhase, BreathScheduler};
use calmcore::session::{fallback_sessions, TimingsTriple};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{sleep, Instant};

type Timeline = Arc<Mutex<Vec<(BreathPhase, u64)>>>;

/// Callback that records each phase with its offset from `origin` in ms
fn recorder(origin: Instant) -> (Timeline, impl FnMut(BreathPhase, &str) + Send + 'static) {
    let timeline: Timeline = Arc::new(Mutex::new(Vec::new()));
    let sink = timeline.clone();
    let callback = move |phase: BreathPhase, _instruction: &str| {
        sink.lock()
            .push((phase, origin.elapsed().as_millis() as u64));
    };
    (timeline, callback)
}

use BreathPhase::{Exhale, Hold, Inhale};

#[tokio::test(start_paused = true)]
async fn test_box_breathing_timeline() {
    let (timeline, callback) = recorder(Instant::now());
    let _handle = scheduler::start(&Handle::current(), TimingsTriple::new(4.0, 4.0, 4.0), callback).unwrap();

    sleep(Duration::from_millis(12_500)).await;

    assert_eq!(
        timeline.lock().as_slice(),
        &[(Inhale, 0), (Hold, 4_000), (Exhale, 8_000), (Inhale, 12_000)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_zero_hold_is_skipped() {
    let (timeline, callback) = recorder(Instant::now());
    let _handle = scheduler::start(&Handle::current(), TimingsTriple::new(2.0, 0.0, 6.0), callback).unwrap();

    sleep(Duration::from_millis(10_500)).await;

    assert_eq!(
        timeline.lock().as_slice(),
        &[(Inhale, 0), (Exhale, 2_000), (Inhale, 8_000), (Exhale, 10_000)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_two_periods_follow_phase_order() {
    let (timeline, callback) = recorder(Instant::now());
    let _handle = scheduler::start(&Handle::current(), TimingsTriple::new(4.0, 7.0, 8.0), callback).unwrap();

    // Just short of the third inhale
    sleep(Duration::from_millis(37_999)).await;

    assert_eq!(
        timeline.lock().as_slice(),
        &[
            (Inhale, 0),
            (Hold, 4_000),
            (Exhale, 11_000),
            (Inhale, 19_000),
            (Hold, 23_000),
            (Exhale, 30_000),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_fractional_seconds() {
    let (timeline, callback) = recorder(Instant::now());
    let _handle = scheduler::start(&Handle::current(), TimingsTriple::new(1.5, 0.0, 2.5), callback).unwrap();

    sleep(Duration::from_millis(6_000)).await;

    assert_eq!(
        timeline.lock().as_slice(),
        &[(Inhale, 0), (Exhale, 1_500), (Inhale, 4_000), (Exhale, 5_500)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_no_callbacks_after_cancel() {
    let (timeline, callback) = recorder(Instant::now());
    let handle = scheduler::start(&Handle::current(), TimingsTriple::new(4.0, 4.0, 4.0), callback).unwrap();

    sleep(Duration::from_millis(5_000)).await;
    handle.cancel();
    let seen = timeline.lock().len();

    sleep(Duration::from_secs(60)).await;

    assert_eq!(seen, 2);
    assert_eq!(timeline.lock().len(), seen);

    // A second cancel is harmless
    handle.cancel();
    assert!(handle.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels() {
    let (timeline, callback) = recorder(Instant::now());
    let handle = scheduler::start(&Handle::current(), TimingsTriple::new(3.0, 0.0, 3.0), callback).unwrap();

    sleep(Duration::from_millis(1_000)).await;
    drop(handle);
    sleep(Duration::from_secs(30)).await;

    assert_eq!(timeline.lock().as_slice(), &[(Inhale, 0)]);
}

#[tokio::test(start_paused = true)]
async fn test_restart_does_not_interleave() {
    let events: Arc<Mutex<Vec<(&'static str, BreathPhase, u64)>>> = Arc::new(Mutex::new(Vec::new()));
    let origin = Instant::now();
    let mut scheduler = BreathScheduler::new(Handle::current());

    let sink = events.clone();
    scheduler
        .start(TimingsTriple::new(4.0, 4.0, 4.0), move |phase, _| {
            sink.lock().push(("first", phase, origin.elapsed().as_millis() as u64));
        })
        .unwrap();

    sleep(Duration::from_millis(5_000)).await;

    let sink = events.clone();
    scheduler
        .start(TimingsTriple::new(2.0, 0.0, 6.0), move |phase, _| {
            sink.lock().push(("second", phase, origin.elapsed().as_millis() as u64));
        })
        .unwrap();

    sleep(Duration::from_secs(20)).await;

    let events = events.lock();
    let switch = events
        .iter()
        .position(|(cycle, _, _)| *cycle == "second")
        .unwrap();

    assert!(events[..switch].iter().all(|(cycle, _, _)| *cycle == "first"));
    assert!(events[switch..].iter().all(|(cycle, _, _)| *cycle == "second"));

    // The new cycle starts with an inhale at the moment of the restart
    assert_eq!(events[switch], ("second", Inhale, 5_000));
    assert_eq!(events[switch + 1], ("second", Exhale, 7_000));
    assert_eq!(events[switch + 2], ("second", Inhale, 13_000));
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_stop() {
    let (timeline, callback) = recorder(Instant::now());
    let mut scheduler = BreathScheduler::new(Handle::current());
    scheduler.start(TimingsTriple::new(4.0, 4.0, 4.0), callback).unwrap();
    assert!(scheduler.is_running());

    scheduler.stop();
    assert!(!scheduler.is_running());

    sleep(Duration::from_secs(20)).await;
    assert_eq!(timeline.lock().as_slice(), &[(Inhale, 0)]);
}

#[tokio::test(start_paused = true)]
async fn test_degenerate_timings_rejected() {
    for timings in [
        TimingsTriple::new(0.0, 0.0, 0.0),
        TimingsTriple::new(0.0, 4.0, 0.0),
        TimingsTriple::new(-1.0, 2.0, 4.0),
        TimingsTriple::new(f64::INFINITY, 0.0, 4.0),
        TimingsTriple::new(1e17, 0.0, 1e17),
    ] {
        let result = scheduler::start(&Handle::current(), timings, |_, _| {
            panic!("rejected timings must never emit");
        });
        assert!(result.is_err(), "{} should be rejected", timings);
    }
}

#[tokio::test(start_paused = true)]
async fn test_fallback_sessions_all_start() {
    for session in fallback_sessions() {
        let (timeline, callback) = recorder(Instant::now());
        let handle = scheduler::start(&Handle::current(), session.timings, callback).unwrap();

        let period = session.timings.total_seconds();
        sleep(Duration::from_secs_f64(period) + Duration::from_millis(1)).await;
        handle.cancel();

        let timeline = timeline.lock();
        assert_eq!(timeline.first(), Some(&(Inhale, 0)));
        assert_eq!(
            timeline.last(),
            Some(&(Inhale, (period * 1000.0) as u64)),
            "{} should complete one period",
            session.title
        );
    }
}
