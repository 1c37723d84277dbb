//! Blur classification from integer sharpness scores.

use crate::types::Verdict;

/// Scores at or below this are classified as blurred
pub const DEFAULT_BLUR_THRESHOLD: i64 = 3;

/// Classify a sharpness score against the default threshold
pub fn classify(score: i64) -> Verdict {
    classify_with_threshold(score, DEFAULT_BLUR_THRESHOLD)
}

/// Classify a sharpness score against an explicit threshold.
///
/// The threshold is inclusive on the blurred side: a score equal to the
/// threshold counts as blurred. Total over all integers.
pub fn classify_with_threshold(score: i64, threshold: i64) -> Verdict {
    Verdict {
        score,
        is_blurred: score <= threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert!(classify(3).is_blurred);
        assert!(!classify(4).is_blurred);
    }

    #[test]
    fn test_extremes() {
        assert!(classify(0).is_blurred);
        assert!(classify(i64::MIN).is_blurred);
        assert!(!classify(i64::MAX).is_blurred);
    }

    #[test]
    fn test_verdict_carries_score() {
        let verdict = classify(17);
        assert_eq!(verdict.score, 17);
        assert!(!verdict.is_blurred);
    }

    #[test]
    fn test_custom_threshold() {
        assert!(classify_with_threshold(10, 10).is_blurred);
        assert!(!classify_with_threshold(11, 10).is_blurred);
    }
}
