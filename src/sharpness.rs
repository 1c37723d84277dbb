//! Frame sharpness measurement.
//!
//! Pipeline: RGBA frame -> BT.601 luminance -> 3x3 discrete Laplacian ->
//! population variance -> floor to integer score. The Laplacian kernel is
//! the 4-connected stencil `[[0,1,0],[1,-4,1],[0,1,0]]` with replicate
//! border extension, so the response map keeps the frame's dimensions.
//! The absolute score (and the meaning of the blur threshold) depends on
//! this exact kernel and border policy; both are fixed.

use crate::errors::FocusError;
use crate::stats;
use crate::types::{FrameBuffer, IntensityMap, ResponseMap, RGBA_CHANNELS};

/// Computes a scalar sharpness score for frames of a fixed size.
///
/// Owns the intensity and response scratch buffers, allocated once and
/// rewritten on every call. Each call is independent: identical pixel data
/// always yields an identical score.
#[derive(Debug)]
pub struct SharpnessEstimator {
    width: u32,
    height: u32,
    intensity: IntensityMap,
    response: ResponseMap,
}

impl SharpnessEstimator {
    /// Create an estimator for frames of the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "frame dimensions must be non-zero");
        Self {
            width,
            height,
            intensity: IntensityMap::new(width, height),
            response: ResponseMap::new(width, height),
        }
    }

    /// Configured frame dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The response map produced by the most recent `measure` call
    pub fn response(&self) -> &ResponseMap {
        &self.response
    }

    /// Measure the sharpness of one frame.
    ///
    /// Returns the floor of the Laplacian-response variance. Fails with
    /// `DimensionMismatch` if the frame's size disagrees with the configured
    /// dimensions, or `DataCorruption` if its byte length is wrong; neither
    /// touches the scratch buffers.
    pub fn measure(&mut self, frame: &FrameBuffer) -> Result<i64, FocusError> {
        if frame.width != self.width || frame.height != self.height {
            return Err(FocusError::DimensionMismatch {
                expected: (self.width, self.height),
                got: (frame.width, frame.height),
            });
        }
        frame.validate()?;

        self.convert_to_intensity(frame);
        self.apply_laplacian();

        let score = stats::variance(&self.response.values).floor() as i64;
        log::debug!("measured sharpness score {}", score);
        Ok(score)
    }

    /// RGBA -> luminance, ITU-R BT.601 weights, alpha ignored.
    ///
    /// Rounded to u8 to match a conventional RGBA->GRAY conversion, keeping
    /// scores comparable across implementations.
    fn convert_to_intensity(&mut self, frame: &FrameBuffer) {
        for (pixel, luma) in frame
            .data
            .chunks_exact(RGBA_CHANNELS)
            .zip(self.intensity.values.iter_mut())
        {
            let value = 0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32;
            *luma = value.round() as u8;
        }
    }

    /// 4-connected Laplacian over the intensity map, replicate border
    fn apply_laplacian(&mut self) {
        let width = self.width as usize;
        let height = self.height as usize;
        let luma = &self.intensity.values;

        for y in 0..height {
            let up = y.saturating_sub(1);
            let down = (y + 1).min(height - 1);
            for x in 0..width {
                let left = x.saturating_sub(1);
                let right = (x + 1).min(width - 1);

                let center = luma[y * width + x] as f64;
                let neighbors = luma[up * width + x] as f64
                    + luma[down * width + x] as f64
                    + luma[y * width + left] as f64
                    + luma[y * width + right] as f64;

                self.response.values[y * width + x] = neighbors - 4.0 * center;
            }
        }
    }
}
