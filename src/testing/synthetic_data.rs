//! Synthetic RGBA test frames
//!
//! Deterministic patterns with known sharpness characteristics: solid
//! frames have zero Laplacian response everywhere, checkerboards have
//! strong edges, gradients sit in between.

use crate::types::{FrameBuffer, RGBA_CHANNELS};

/// Create a frame filled with a single RGBA color (no edges)
pub fn solid_frame(width: u32, height: u32, rgba: [u8; 4]) -> FrameBuffer {
    let mut data = vec![0u8; width as usize * height as usize * RGBA_CHANNELS];
    for pixel in data.chunks_exact_mut(RGBA_CHANNELS) {
        pixel.copy_from_slice(&rgba);
    }
    FrameBuffer::from_rgba(data, width, height)
}

/// Create a high-contrast black/white checkerboard frame
pub fn checkerboard_frame(width: u32, height: u32, check_size: u32) -> FrameBuffer {
    let check_size = check_size.max(1);
    let mut data = vec![0u8; width as usize * height as usize * RGBA_CHANNELS];

    for y in 0..height {
        for x in 0..width {
            let is_white = ((x / check_size) + (y / check_size)) % 2 == 0;
            let value = if is_white { 255 } else { 0 };
            let idx = ((y * width + x) as usize) * RGBA_CHANNELS;
            data[idx] = value;
            data[idx + 1] = value;
            data[idx + 2] = value;
            data[idx + 3] = 255;
        }
    }

    FrameBuffer::from_rgba(data, width, height)
}

/// Create a horizontal gray gradient frame
pub fn gradient_frame(width: u32, height: u32) -> FrameBuffer {
    let mut data = vec![0u8; width as usize * height as usize * RGBA_CHANNELS];

    for y in 0..height {
        for x in 0..width {
            let intensity = (x * 255 / width.max(1)) as u8;
            let idx = ((y * width + x) as usize) * RGBA_CHANNELS;
            data[idx] = intensity;
            data[idx + 1] = intensity;
            data[idx + 2] = intensity;
            data[idx + 3] = 255;
        }
    }

    FrameBuffer::from_rgba(data, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_frame_size_and_content() {
        let frame = solid_frame(320, 240, [10, 20, 30, 255]);
        assert_eq!(frame.width, 320);
        assert_eq!(frame.height, 240);
        assert!(frame.validate().is_ok());
        assert_eq!(&frame.data[0..4], &[10, 20, 30, 255]);
        assert_eq!(&frame.data[frame.data.len() - 4..], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let frame = checkerboard_frame(16, 16, 4);
        assert!(frame.validate().is_ok());
        // Top-left check is white, the one to its right is black
        assert_eq!(frame.data[0], 255);
        let idx = 4 * RGBA_CHANNELS;
        assert_eq!(frame.data[idx], 0);
    }

    #[test]
    fn test_gradient_increases() {
        let frame = gradient_frame(256, 2);
        assert!(frame.validate().is_ok());
        assert!(frame.data[0] < frame.data[255 * RGBA_CHANNELS]);
    }
}
