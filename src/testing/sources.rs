//! Scripted frame source and collecting sink for scheduler tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::errors::FocusError;
use crate::scheduler::{FrameSource, PresentationSink};
use crate::types::{FrameBuffer, ResponseMap, Verdict};

/// One observable step of the measurement loop, in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    /// A frame was handed to the scheduler (0-based acquisition index)
    Acquire { index: u64 },
    /// A verdict reached the sink
    Present { score: i64 },
    /// An error was reported to the sink
    Error { message: String },
}

/// Event log shared between a scripted source and a collecting sink
pub type SharedEvents = Arc<Mutex<Vec<LoopEvent>>>;

/// Create an empty shared event log
pub fn shared_events() -> SharedEvents {
    Arc::new(Mutex::new(Vec::new()))
}

/// Frame source that serves a fixed sequence of frames, then reports
/// `SourceUnavailable`.
pub struct ScriptedSource {
    frames: VecDeque<FrameBuffer>,
    served: u64,
    ready_error: Option<String>,
    events: Option<SharedEvents>,
}

impl ScriptedSource {
    pub fn new(frames: Vec<FrameBuffer>) -> Self {
        Self {
            frames: frames.into(),
            served: 0,
            ready_error: None,
            events: None,
        }
    }

    /// Record each acquisition into a shared event log
    pub fn with_events(mut self, events: SharedEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// Make `wait_until_ready` fail, simulating a source that never opens
    pub fn with_ready_error(mut self, message: impl Into<String>) -> Self {
        self.ready_error = Some(message.into());
        self
    }
}

impl FrameSource for ScriptedSource {
    async fn wait_until_ready(&mut self) -> Result<(), FocusError> {
        match &self.ready_error {
            Some(msg) => Err(FocusError::SourceUnavailable(msg.clone())),
            None => Ok(()),
        }
    }

    async fn next_frame(&mut self, frame: &mut FrameBuffer) -> Result<(), FocusError> {
        let next = self
            .frames
            .pop_front()
            .ok_or_else(|| FocusError::SourceUnavailable("script exhausted".to_string()))?;

        if let Some(events) = &self.events {
            events
                .lock()
                .expect("lock poisoned")
                .push(LoopEvent::Acquire { index: self.served });
        }
        self.served += 1;

        *frame = next;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Collected {
    verdicts: Vec<Verdict>,
    errors: Vec<FocusError>,
    response_dims: Vec<(u32, u32)>,
}

/// Presentation sink that records everything it receives.
///
/// Cloneable: keep one clone in the test to inspect after the scheduler
/// consumes the other.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    inner: Arc<Mutex<Collected>>,
    events: Option<SharedEvents>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record each presentation and error into a shared event log
    pub fn with_events(mut self, events: SharedEvents) -> Self {
        self.events = Some(events);
        self
    }

    /// Verdicts received so far, in emission order
    pub fn verdicts(&self) -> Vec<Verdict> {
        self.inner.lock().expect("lock poisoned").verdicts.clone()
    }

    /// Errors reported so far, in emission order
    pub fn errors(&self) -> Vec<FocusError> {
        self.inner.lock().expect("lock poisoned").errors.clone()
    }

    /// Dimensions of each response map received
    pub fn response_dims(&self) -> Vec<(u32, u32)> {
        self.inner
            .lock()
            .expect("lock poisoned")
            .response_dims
            .clone()
    }
}

impl PresentationSink for CollectingSink {
    async fn present(&mut self, verdict: &Verdict, response: &ResponseMap) {
        let mut g = self.inner.lock().expect("lock poisoned");
        g.verdicts.push(*verdict);
        g.response_dims.push((response.width, response.height));
        drop(g);

        if let Some(events) = &self.events {
            events
                .lock()
                .expect("lock poisoned")
                .push(LoopEvent::Present {
                    score: verdict.score,
                });
        }
    }

    async fn report_error(&mut self, error: &FocusError) {
        self.inner
            .lock()
            .expect("lock poisoned")
            .errors
            .push(error.clone());

        if let Some(events) = &self.events {
            events.lock().expect("lock poisoned").push(LoopEvent::Error {
                message: error.to_string(),
            });
        }
    }
}
