//! focuswatch: real-time focus scoring and blur detection for frame streams
//!
//! This crate measures image sharpness by converting frames to luminance,
//! applying a discrete Laplacian, and taking the variance of the response.
//! A scheduler drives the measurement at a target rate, compensating for
//! the time each cycle consumes, and classifies every frame as blurred or
//! not against a fixed threshold.
//!
//! # Usage
//! ```rust,no_run
//! use focuswatch::config::FocusWatchConfig;
//! use focuswatch::scheduler::FocusScheduler;
//! use focuswatch::testing::{solid_frame, CollectingSink, ScriptedSource};
//!
//! # async fn demo() -> Result<(), focuswatch::FocusError> {
//! let config = FocusWatchConfig::default();
//! let source = ScriptedSource::new(vec![solid_frame(640, 480, [128, 128, 128, 255])]);
//! let sink = CollectingSink::new();
//! let mut scheduler = FocusScheduler::from_config(source, sink, &config)?;
//! let _summary = scheduler.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Frame acquisition and display are injected through the [`scheduler::FrameSource`]
//! and [`scheduler::PresentationSink`] traits; this crate does not talk to
//! cameras or screens itself.

pub mod classify;
pub mod config;
pub mod errors;
pub mod scheduler;
pub mod sharpness;
pub mod stats;
pub mod types;

// Testing utilities - synthetic data and scripted collaborators
pub mod testing;

// Re-exports for convenience
pub use classify::{classify, classify_with_threshold, DEFAULT_BLUR_THRESHOLD};
pub use config::{FocusWatchConfig, DEFAULT_FPS};
pub use errors::FocusError;
pub use scheduler::{FocusScheduler, FrameSource, PresentationSink, RunSummary, SchedulerState};
pub use sharpness::SharpnessEstimator;
pub use types::{FrameBuffer, IntensityMap, ResponseMap, Verdict};

/// Initialize logging for the measurement loop
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "focuswatch=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
