//! Real-time measurement loop.
//!
//! Drives capture -> measure -> classify -> present cycles at a target
//! rate, compensating for the time each cycle consumes. Cycles are strictly
//! sequential: the only suspension points are frame acquisition and the
//! trailing delay, and the next cycle is never armed before the current one
//! completes. A slow cycle shortens or eliminates its own trailing delay
//! rather than being preempted or queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::classify::classify_with_threshold;
use crate::config::FocusWatchConfig;
use crate::errors::FocusError;
use crate::sharpness::SharpnessEstimator;
use crate::types::{FrameBuffer, ResponseMap, Verdict};

/// Supplier of frames with fixed, pre-agreed dimensions.
///
/// `next_frame` overwrites the caller's buffer in place and may suspend
/// until a frame is available.
#[allow(async_fn_in_trait)]
pub trait FrameSource {
    /// Resolves once the source can produce frames.
    ///
    /// Models the external "source is ready" lifecycle signal; the default
    /// is an already-ready source.
    async fn wait_until_ready(&mut self) -> Result<(), FocusError> {
        Ok(())
    }

    /// Fill `frame` with the newest available frame
    async fn next_frame(&mut self, frame: &mut FrameBuffer) -> Result<(), FocusError>;
}

/// Receiver of per-cycle verdicts and the response map for display
#[allow(async_fn_in_trait)]
pub trait PresentationSink {
    /// Present one cycle's verdict and its response map
    async fn present(&mut self, verdict: &Verdict, response: &ResponseMap);

    /// Surface a per-cycle or terminal failure as a status change
    async fn report_error(&mut self, error: &FocusError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

/// Why the loop exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// External cancellation honored at a cycle boundary
    Cancelled,
    /// The frame source could not supply a frame
    SourceUnavailable,
}

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Cycles that produced a verdict
    pub cycles: u64,
    /// Cycles aborted by a per-frame error (mismatched or corrupt frame)
    pub skipped: u64,
    pub reason: StopReason,
}

/// Cloneable stop handle; honored at the next cycle boundary
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    stop: Arc<AtomicBool>,
}

impl SchedulerHandle {
    /// Request cancellation. A cycle already in progress runs to completion.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Delay before the next cycle: the target interval minus the time the
/// current cycle already consumed, clamped at zero.
pub fn cycle_delay(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}

/// Drives the measurement loop over an injected source and sink
pub struct FocusScheduler<S, P> {
    source: S,
    sink: P,
    estimator: SharpnessEstimator,
    frame: FrameBuffer,
    interval: Duration,
    threshold: i64,
    state: SchedulerState,
    stop: Arc<AtomicBool>,
}

impl<S: FrameSource, P: PresentationSink> FocusScheduler<S, P> {
    /// Create a scheduler for frames of the given dimensions.
    ///
    /// The frame buffer and estimator scratch are allocated here, once, and
    /// reused in place across all cycles.
    pub fn new(source: S, sink: P, width: u32, height: u32, fps: u32, threshold: i64) -> Self {
        debug_assert!(fps > 0, "target cycle rate must be non-zero");
        Self {
            source,
            sink,
            estimator: SharpnessEstimator::new(width, height),
            frame: FrameBuffer::new(width, height),
            interval: Duration::from_secs_f64(1.0 / fps as f64),
            threshold,
            state: SchedulerState::Idle,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create a scheduler from a validated configuration
    pub fn from_config(
        source: S,
        sink: P,
        config: &FocusWatchConfig,
    ) -> Result<Self, FocusError> {
        config.validate().map_err(FocusError::InvalidConfig)?;
        Ok(Self::new(
            source,
            sink,
            config.capture.resolution[0],
            config.capture.resolution[1],
            config.capture.fps,
            config.analysis.blur_threshold,
        ))
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Get a stop handle for external cancellation
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            stop: self.stop.clone(),
        }
    }

    /// Run the measurement loop until cancellation or source failure.
    ///
    /// Valid only from `Idle`; waits for the source's ready signal, then
    /// cycles until stopped. Per-frame errors skip the cycle and keep the
    /// loop alive; a source failure is reported to the sink and stops the
    /// loop. Verdicts reach the sink in strict acquisition order.
    pub async fn run(&mut self) -> Result<RunSummary, FocusError> {
        match self.state {
            SchedulerState::Idle => {}
            SchedulerState::Running => {
                return Err(FocusError::InvalidState("already running".to_string()))
            }
            SchedulerState::Stopped => {
                return Err(FocusError::InvalidState("already stopped".to_string()))
            }
        }

        if let Err(e) = self.source.wait_until_ready().await {
            log::error!("Frame source never became ready: {}", e);
            self.sink.report_error(&e).await;
            self.state = SchedulerState::Stopped;
            return Ok(RunSummary {
                cycles: 0,
                skipped: 0,
                reason: StopReason::SourceUnavailable,
            });
        }

        self.state = SchedulerState::Running;
        log::info!(
            "Scheduler running: {}x{} at {:?} per cycle, blur threshold {}",
            self.frame.width,
            self.frame.height,
            self.interval,
            self.threshold
        );

        let mut cycles: u64 = 0;
        let mut skipped: u64 = 0;

        let reason = loop {
            // Cancellation is only honored here, between cycles.
            if self.stop.load(Ordering::Relaxed) {
                log::info!("Scheduler cancelled after {} cycles", cycles);
                break StopReason::Cancelled;
            }

            let began = Instant::now();

            if let Err(e) = self.source.next_frame(&mut self.frame).await {
                log::error!("Frame acquisition failed: {}", e);
                self.sink.report_error(&e).await;
                break StopReason::SourceUnavailable;
            }

            match self.estimator.measure(&self.frame) {
                Ok(score) => {
                    let verdict = classify_with_threshold(score, self.threshold);
                    log::debug!("cycle {}: {}", cycles, verdict.status_line());
                    self.sink.present(&verdict, self.estimator.response()).await;
                    cycles += 1;
                }
                Err(e) => {
                    // Bad frame: skip this cycle, keep the loop alive.
                    log::warn!("Cycle skipped: {}", e);
                    self.sink.report_error(&e).await;
                    skipped += 1;
                }
            }

            let delay = cycle_delay(self.interval, began.elapsed());
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        };

        self.state = SchedulerState::Stopped;
        log::info!(
            "Scheduler stopped ({:?}): {} cycles, {} skipped",
            reason,
            cycles,
            skipped
        );

        Ok(RunSummary {
            cycles,
            skipped,
            reason,
        })
    }
}
