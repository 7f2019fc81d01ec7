//! In-memory pixel and mask buffers.
//!
//! [`PixelBuffer`] is the validated input to the engine: a `height x width x
//! channels` array of unsigned 8-bit samples in row-major order. The engine
//! never reads or writes image files; decoding happens outside and hands a
//! fully materialized buffer in.
//!
//! [`MaskBuffer`] is the binary output: one byte per pixel, either 0 or
//! [`MASK_FOREGROUND`].

use crate::error::{Result, SegmentError};

/// Byte value marking a foreground pixel in a [`MaskBuffer`].
pub const MASK_FOREGROUND: u8 = 255;

/// Validated in-memory image: `height x width x channels` bytes, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, validating dimensions and data length.
    ///
    /// Accepts 1 to 4 channels (grayscale through RGBA). The data length
    /// must be exactly `width * height * channels`.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SegmentError::InvalidInput(format!(
                "image dimensions must be non-zero, got {width}x{height}"
            )));
        }
        if !(1..=4).contains(&channels) {
            return Err(SegmentError::InvalidInput(format!(
                "channel count must be 1..=4, got {channels}"
            )));
        }
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(SegmentError::InvalidInput(format!(
                "buffer length {} does not match {width}x{height}x{channels} = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Samples per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Raw sample data, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The samples of one pixel.
    pub fn pixel(&self, row: usize, col: usize) -> &[u8] {
        let start = (row * self.width + col) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Mean channel intensity of one pixel, in `[0, 255]`.
    pub fn luma(&self, row: usize, col: usize) -> f64 {
        let p = self.pixel(row, col);
        p.iter().map(|&s| s as f64).sum::<f64>() / self.channels as f64
    }

    /// Nearest-neighbor resample to the given dimensions.
    pub fn resize_nearest(&self, new_width: usize, new_height: usize) -> PixelBuffer {
        let mut data = Vec::with_capacity(new_width * new_height * self.channels);
        for r in 0..new_height {
            let src_r = r * self.height / new_height;
            for c in 0..new_width {
                let src_c = c * self.width / new_width;
                data.extend_from_slice(self.pixel(src_r, src_c));
            }
        }
        PixelBuffer {
            width: new_width,
            height: new_height,
            channels: self.channels,
            data,
        }
    }
}

/// Binary foreground/background mask, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl MaskBuffer {
    /// Create an all-background mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    /// Mask width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw mask bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mark one pixel as foreground.
    pub fn set_foreground(&mut self, row: usize, col: usize) {
        self.data[row * self.width + col] = MASK_FOREGROUND;
    }

    /// Whether one pixel is labeled foreground.
    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        self.data[row * self.width + col] == MASK_FOREGROUND
    }

    /// Number of foreground pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&b| b == MASK_FOREGROUND).count()
    }

    /// Nearest-neighbor resample to the given dimensions.
    pub fn resize_nearest(&self, new_width: usize, new_height: usize) -> MaskBuffer {
        let mut data = Vec::with_capacity(new_width * new_height);
        for r in 0..new_height {
            let src_r = r * self.height / new_height;
            for c in 0..new_width {
                let src_c = c * self.width / new_width;
                data.push(self.data[src_r * self.width + src_c]);
            }
        }
        MaskBuffer {
            width: new_width,
            height: new_height,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_accessors() {
        let img = PixelBuffer::new(2, 2, 3, vec![0, 0, 0, 9, 9, 9, 1, 2, 3, 255, 255, 255]).unwrap();
        assert_eq!(img.pixel(0, 1), &[9, 9, 9]);
        assert_eq!(img.pixel(1, 0), &[1, 2, 3]);
        assert!((img.luma(1, 0) - 2.0).abs() < 1e-12);
        assert!((img.luma(1, 1) - 255.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = PixelBuffer::new(0, 4, 1, vec![]).unwrap_err();
        assert!(matches!(err, SegmentError::InvalidInput(_)));
        let err = PixelBuffer::new(4, 0, 1, vec![]).unwrap_err();
        assert!(matches!(err, SegmentError::InvalidInput(_)));
    }

    #[test]
    fn test_bad_channel_count_rejected() {
        assert!(PixelBuffer::new(2, 2, 0, vec![]).is_err());
        assert!(PixelBuffer::new(2, 2, 5, vec![0; 20]).is_err());
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let err = PixelBuffer::new(2, 2, 1, vec![0; 5]).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_resize_identity() {
        let img = PixelBuffer::new(3, 2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let same = img.resize_nearest(3, 2);
        assert_eq!(same, img);
    }

    #[test]
    fn test_resize_downscale_samples_nearest() {
        let img = PixelBuffer::new(4, 4, 1, (0..16).collect()).unwrap();
        let half = img.resize_nearest(2, 2);
        // Rows 0 and 2, columns 0 and 2 of the source
        assert_eq!(half.data(), &[0, 2, 8, 10]);
    }

    #[test]
    fn test_mask_roundtrip_through_upscale() {
        let mut mask = MaskBuffer::new(2, 2);
        mask.set_foreground(0, 0);
        mask.set_foreground(1, 1);
        let up = mask.resize_nearest(4, 4);
        assert_eq!(up.width(), 4);
        assert!(up.is_foreground(0, 0));
        assert!(up.is_foreground(1, 1));
        assert!(!up.is_foreground(0, 3));
        assert!(up.is_foreground(3, 3));
        assert_eq!(up.foreground_count(), 8);
    }
}
