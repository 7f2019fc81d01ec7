//! Seed-derived color statistics.
//!
//! Two summary statistics drive the data term: the mean color of the
//! foreground seeds and the mean color of the background seeds, plus one
//! shared variance scale taken over the whole image. Fitted once before
//! graph construction and read-only afterward.

use crate::image::PixelBuffer;
use crate::seeds::{SeedLabel, SeedMap};

/// Additive guard against zero-variance images.
const VARIANCE_EPSILON: f64 = 1e-6;

/// Mean foreground/background color and shared variance scale.
#[derive(Debug, Clone)]
pub struct ColorModel {
    /// Mean color of the foreground seed pixels, one entry per channel.
    pub mean_fg: Vec<f64>,
    /// Mean color of the background seed pixels, one entry per channel.
    pub mean_bg: Vec<f64>,
    /// Shared scale: `2 * var(image) + epsilon`, pooled over all samples.
    pub sigma_sq: f64,
}

impl ColorModel {
    /// Fit the model from seed pixels.
    ///
    /// An empty foreground seed set falls back to a pure white mean, an
    /// empty background seed set to pure black. Both are recoverable
    /// degradations of segmentation quality, not errors.
    pub fn fit(image: &PixelBuffer, seeds: &SeedMap) -> Self {
        let channels = image.channels();
        let mut sum_fg = vec![0.0; channels];
        let mut sum_bg = vec![0.0; channels];
        let mut n_fg = 0usize;
        let mut n_bg = 0usize;

        for r in 0..image.height() {
            for c in 0..image.width() {
                let acc = match seeds.label(r, c) {
                    SeedLabel::Foreground => {
                        n_fg += 1;
                        &mut sum_fg
                    }
                    SeedLabel::Background => {
                        n_bg += 1;
                        &mut sum_bg
                    }
                    SeedLabel::Unknown => continue,
                };
                for (a, &s) in acc.iter_mut().zip(image.pixel(r, c)) {
                    *a += s as f64;
                }
            }
        }

        let mean_fg = if n_fg == 0 {
            tracing::debug!("no foreground seeds, falling back to white mean");
            vec![255.0; channels]
        } else {
            sum_fg.iter().map(|s| s / n_fg as f64).collect()
        };
        let mean_bg = if n_bg == 0 {
            tracing::debug!("no background seeds, falling back to black mean");
            vec![0.0; channels]
        } else {
            sum_bg.iter().map(|s| s / n_bg as f64).collect()
        };

        Self {
            mean_fg,
            mean_bg,
            sigma_sq: 2.0 * pooled_variance(image) + VARIANCE_EPSILON,
        }
    }

    /// Squared distance from a pixel to the foreground mean, scaled by the
    /// shared variance.
    pub fn foreground_distance(&self, pixel: &[u8]) -> f64 {
        distance_sq(pixel, &self.mean_fg) / self.sigma_sq
    }

    /// Squared distance from a pixel to the background mean, scaled by the
    /// shared variance.
    pub fn background_distance(&self, pixel: &[u8]) -> f64 {
        distance_sq(pixel, &self.mean_bg) / self.sigma_sq
    }
}

fn distance_sq(pixel: &[u8], mean: &[f64]) -> f64 {
    pixel
        .iter()
        .zip(mean)
        .map(|(&s, &m)| {
            let d = s as f64 - m;
            d * d
        })
        .sum()
}

/// Variance over every sample of the image, all channels pooled.
fn pooled_variance(image: &PixelBuffer) -> f64 {
    let data = image.data();
    let n = data.len() as f64;
    let mean = data.iter().map(|&s| s as f64).sum::<f64>() / n;
    data.iter()
        .map(|&s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}
