use crate::errors::FocusError;
use serde::{Deserialize, Serialize};

/// Bytes per pixel for RGBA frame data
pub const RGBA_CHANNELS: usize = 4;

/// One sampled image buffer from the video source.
///
/// RGBA8 layout, fixed width and height. The buffer is allocated once and
/// overwritten in place by the frame source on every cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameBuffer {
    /// Create a zeroed frame buffer sized to the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * RGBA_CHANNELS],
        }
    }

    /// Wrap existing RGBA data in a frame buffer
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Expected byte length for the frame's own dimensions
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * RGBA_CHANNELS
    }

    /// Check the buffer against the frame's own dimensions
    pub fn validate(&self) -> Result<(), FocusError> {
        if self.data.len() != self.expected_len() {
            return Err(FocusError::DataCorruption {
                frame_size: self.data.len(),
                expected_size: self.expected_len(),
            });
        }
        Ok(())
    }
}

/// Single-channel luminance representation of a frame.
///
/// Same dimensions as the frame it was derived from; rewritten every cycle.
#[derive(Debug, Clone)]
pub struct IntensityMap {
    pub width: u32,
    pub height: u32,
    pub values: Vec<u8>,
}

impl IntensityMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0u8; width as usize * height as usize],
        }
    }
}

/// Per-pixel second-derivative (edge-strength) response of an intensity map.
///
/// Same dimensions as the source frame; rewritten every cycle and lent to
/// the presentation sink for display.
#[derive(Debug, Clone)]
pub struct ResponseMap {
    pub width: u32,
    pub height: u32,
    pub values: Vec<f64>,
}

impl ResponseMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; width as usize * height as usize],
        }
    }
}

/// The (score, is_blurred) pair produced once per cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Floor of the Laplacian-response variance; higher means sharper
    pub score: i64,
    /// True when the score is at or below the blur threshold
    pub is_blurred: bool,
}

impl Verdict {
    /// Human-readable status string for the presentation sink
    pub fn status_line(&self) -> String {
        if self.is_blurred {
            format!("Focus Score: {} - Image is blurred", self.score)
        } else {
            format!("Focus Score: {}", self.score)
        }
    }
}
