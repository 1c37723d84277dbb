//! Scheduler loop tests
//!
//! Drives the measurement loop with scripted sources and a collecting sink:
//! ordering, sequencing, per-cycle failure policy, source failure, and
//! cancellation at the cycle boundary.

use std::sync::{Arc, Mutex};

use focuswatch::config::FocusWatchConfig;
use focuswatch::errors::FocusError;
use focuswatch::scheduler::{
    FocusScheduler, FrameSource, SchedulerHandle, SchedulerState, StopReason,
};
use focuswatch::testing::{
    checkerboard_frame, shared_events, solid_frame, CollectingSink, LoopEvent, ScriptedSource,
};
use focuswatch::types::FrameBuffer;

const W: u32 = 64;
const H: u32 = 48;
const FPS: u32 = 15;
const THRESHOLD: i64 = 3;

fn sharp() -> FrameBuffer {
    checkerboard_frame(W, H, 4)
}

fn blurred() -> FrameBuffer {
    solid_frame(W, H, [128, 128, 128, 255])
}

#[tokio::test(start_paused = true)]
async fn test_verdicts_emitted_in_acquisition_order() {
    let source = ScriptedSource::new(vec![sharp(), blurred(), sharp(), blurred()]);
    let sink = CollectingSink::new();
    let mut scheduler = FocusScheduler::new(source, sink.clone(), W, H, FPS, THRESHOLD);

    let summary = scheduler.run().await.unwrap();

    assert_eq!(summary.cycles, 4);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.reason, StopReason::SourceUnavailable);

    let verdicts = sink.verdicts();
    assert_eq!(verdicts.len(), 4);
    assert!(!verdicts[0].is_blurred);
    assert!(verdicts[1].is_blurred);
    assert!(!verdicts[2].is_blurred);
    assert!(verdicts[3].is_blurred);
    assert_eq!(verdicts[1].score, 0);

    // The exhausted script surfaces as a reported source error.
    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], FocusError::SourceUnavailable(_)));
}

#[tokio::test(start_paused = true)]
async fn test_cycles_are_strictly_sequential() {
    let events = shared_events();
    let source =
        ScriptedSource::new((0..20).map(|_| sharp()).collect()).with_events(events.clone());
    let sink = CollectingSink::new().with_events(events.clone());
    let mut scheduler = FocusScheduler::new(source, sink, W, H, FPS, THRESHOLD);

    scheduler.run().await.unwrap();

    // Every acquisition must be fully processed (presented) before the next
    // acquisition begins: the log alternates Acquire(i), Present, Acquire(i+1)...
    let log = events.lock().unwrap().clone();
    let cycle_log = &log[..log.len() - 1]; // trailing entry is the end-of-script error
    assert_eq!(cycle_log.len(), 40);
    for (i, pair) in cycle_log.chunks_exact(2).enumerate() {
        assert_eq!(pair[0], LoopEvent::Acquire { index: i as u64 });
        assert!(
            matches!(pair[1], LoopEvent::Present { .. }),
            "acquisition {} was not followed by its own presentation: {:?}",
            i,
            pair[1]
        );
    }
    assert!(matches!(log.last(), Some(LoopEvent::Error { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_mismatched_frame_skips_cycle_and_loop_continues() {
    let wrong_size = solid_frame(W / 2, H / 2, [0, 0, 0, 255]);
    let source = ScriptedSource::new(vec![sharp(), wrong_size, sharp()]);
    let sink = CollectingSink::new();
    let mut scheduler = FocusScheduler::new(source, sink.clone(), W, H, FPS, THRESHOLD);

    let summary = scheduler.run().await.unwrap();

    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.reason, StopReason::SourceUnavailable);

    // The frame after the bad one still produced a verdict.
    assert_eq!(sink.verdicts().len(), 2);

    let errors = sink.errors();
    assert_eq!(errors.len(), 2); // the mismatch, then end-of-script
    assert!(matches!(errors[0], FocusError::DimensionMismatch { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_source_failure_stops_scheduler() {
    let source = ScriptedSource::new(vec![sharp(), sharp()]);
    let sink = CollectingSink::new();
    let mut scheduler = FocusScheduler::new(source, sink.clone(), W, H, FPS, THRESHOLD);

    let summary = scheduler.run().await.unwrap();
    assert_eq!(summary.reason, StopReason::SourceUnavailable);
    assert_eq!(scheduler.state(), SchedulerState::Stopped);

    // No retry: a second run is refused.
    let err = scheduler.run().await.unwrap_err();
    assert!(matches!(err, FocusError::InvalidState(_)));
}

#[tokio::test(start_paused = true)]
async fn test_source_never_ready_stops_without_cycles() {
    let source = ScriptedSource::new(vec![sharp()]).with_ready_error("permission denied");
    let sink = CollectingSink::new();
    let mut scheduler = FocusScheduler::new(source, sink.clone(), W, H, FPS, THRESHOLD);

    let summary = scheduler.run().await.unwrap();
    assert_eq!(summary.cycles, 0);
    assert_eq!(summary.reason, StopReason::SourceUnavailable);
    assert_eq!(scheduler.state(), SchedulerState::Stopped);

    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0],
        FocusError::SourceUnavailable("permission denied".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_stop_before_run_cancels_at_first_boundary() {
    let source = ScriptedSource::new(vec![sharp(), sharp()]);
    let sink = CollectingSink::new();
    let mut scheduler = FocusScheduler::new(source, sink.clone(), W, H, FPS, THRESHOLD);

    scheduler.handle().stop();
    let summary = scheduler.run().await.unwrap();

    assert_eq!(summary.cycles, 0);
    assert_eq!(summary.reason, StopReason::Cancelled);
    assert!(sink.verdicts().is_empty());
}

/// Source wrapper that requests cancellation mid-cycle, while handing out
/// a frame. The in-flight cycle must still complete before the scheduler
/// honors the stop at the next boundary.
struct StoppingSource {
    inner: ScriptedSource,
    served: u64,
    stop_on: u64,
    handle: Arc<Mutex<Option<SchedulerHandle>>>,
}

impl FrameSource for StoppingSource {
    async fn next_frame(&mut self, frame: &mut FrameBuffer) -> Result<(), FocusError> {
        let result = self.inner.next_frame(frame).await;
        if result.is_ok() {
            if self.served == self.stop_on {
                if let Some(handle) = self.handle.lock().unwrap().as_ref() {
                    handle.stop();
                }
            }
            self.served += 1;
        }
        result
    }
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_cycle_completes_before_cancellation() {
    let handle_slot = Arc::new(Mutex::new(None));
    let source = StoppingSource {
        inner: ScriptedSource::new((0..10).map(|_| sharp()).collect()),
        served: 0,
        stop_on: 2,
        handle: handle_slot.clone(),
    };
    let sink = CollectingSink::new();
    let mut scheduler = FocusScheduler::new(source, sink.clone(), W, H, FPS, THRESHOLD);
    *handle_slot.lock().unwrap() = Some(scheduler.handle());

    let summary = scheduler.run().await.unwrap();

    // Stop was requested during cycle 2's acquisition: that cycle still
    // produced its verdict, and no further cycle started.
    assert_eq!(summary.cycles, 3);
    assert_eq!(summary.reason, StopReason::Cancelled);
    assert_eq!(sink.verdicts().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_response_maps_keep_frame_dimensions() {
    let source = ScriptedSource::new(vec![sharp(), blurred()]);
    let sink = CollectingSink::new();
    let mut scheduler = FocusScheduler::new(source, sink.clone(), W, H, FPS, THRESHOLD);

    scheduler.run().await.unwrap();
    assert_eq!(sink.response_dims(), vec![(W, H), (W, H)]);
}

#[tokio::test(start_paused = true)]
async fn test_from_config_wires_threshold_and_dimensions() {
    let mut config = FocusWatchConfig::default();
    config.capture.resolution = [W, H];
    config.capture.fps = FPS;
    config.analysis.blur_threshold = 1_000_000; // everything is blurred

    let source = ScriptedSource::new(vec![sharp()]);
    let sink = CollectingSink::new();
    let mut scheduler = FocusScheduler::from_config(source, sink.clone(), &config).unwrap();

    scheduler.run().await.unwrap();
    let verdicts = sink.verdicts();
    assert_eq!(verdicts.len(), 1);
    assert!(verdicts[0].is_blurred);
}

#[test]
fn test_from_config_rejects_invalid_config() {
    let mut config = FocusWatchConfig::default();
    config.capture.fps = 0;

    let source = ScriptedSource::new(vec![]);
    let result = FocusScheduler::from_config(source, CollectingSink::new(), &config);
    assert!(matches!(result, Err(FocusError::InvalidConfig(_))));
}
