use std::fmt;

/// Error types for focus measurement and scheduling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusError {
    /// A supplied frame's dimensions disagree with the configured dimensions
    DimensionMismatch {
        expected: (u32, u32),
        got: (u32, u32),
    },

    /// Frame data length disagrees with the frame's own dimensions
    DataCorruption {
        frame_size: usize,
        expected_size: usize,
    },

    /// The frame source cannot supply a frame
    SourceUnavailable(String),

    /// Scheduler used outside its state machine (e.g. run() while running)
    InvalidState(String),

    /// Invalid configuration values
    InvalidConfig(String),
}

impl fmt::Display for FocusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusError::DimensionMismatch { expected, got } => {
                write!(
                    f,
                    "Frame dimension mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, got.0, got.1
                )
            }
            FocusError::DataCorruption {
                frame_size,
                expected_size,
            } => {
                write!(
                    f,
                    "Frame data corruption: got {} bytes, expected {}",
                    frame_size, expected_size
                )
            }
            FocusError::SourceUnavailable(msg) => write!(f, "Frame source unavailable: {}", msg),
            FocusError::InvalidState(msg) => write!(f, "Invalid scheduler state: {}", msg),
            FocusError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for FocusError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FocusError::DimensionMismatch {
            expected: (640, 480),
            got: (1280, 720),
        };
        assert!(err.to_string().contains("dimension mismatch"));
        assert!(err.to_string().contains("640x480"));

        let err = FocusError::DataCorruption {
            frame_size: 100,
            expected_size: 1_228_800,
        };
        assert!(err.to_string().contains("corruption"));

        let err = FocusError::SourceUnavailable("device disconnected".to_string());
        assert!(err.to_string().contains("device disconnected"));
    }
}
