//! Testing utilities for focuswatch
//!
//! Provides synthetic frame generators plus a scripted frame source and a
//! collecting sink for driving the scheduler without a real camera.

pub mod sources;
pub mod synthetic_data;

pub use sources::{shared_events, CollectingSink, LoopEvent, ScriptedSource, SharedEvents};
pub use synthetic_data::{checkerboard_frame, gradient_frame, solid_frame};
