//! Seed classification policies.
//!
//! A seed policy tags every pixel as a hard foreground seed, a hard
//! background seed, or unknown, before the graph is built. Seeds are
//! immutable for the duration of one solve: the builder turns them into
//! hard terminal links, and the color model is fitted from them.

use serde::{Deserialize, Serialize};

use crate::image::PixelBuffer;

/// Classification of one pixel prior to graph construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedLabel {
    /// Hard foreground constraint.
    Foreground,
    /// Hard background constraint.
    Background,
    /// Label decided by the min-cut.
    Unknown,
}

/// Deterministic rule producing a [`SeedLabel`] per pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SeedPolicy {
    /// Geometric rule: a border band is background, an open central box is
    /// foreground, everything else is unknown.
    BorderCenter {
        /// Border band thickness as a fraction of the shorter image side.
        /// The band is never thinner than 2 pixels.
        border_fraction: f64,
        /// Lower bound of the central box, as a fraction of each axis
        /// (exclusive).
        center_min: f64,
        /// Upper bound of the central box, as a fraction of each axis
        /// (exclusive).
        center_max: f64,
    },
    /// Statistical rule on mean channel intensity: bright pixels seed the
    /// foreground, dark pixels the background.
    LumaThreshold {
        /// Pixels with luma at or above this value are foreground seeds.
        foreground_min: f64,
        /// Pixels with luma at or below this value are background seeds.
        background_max: f64,
    },
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::BorderCenter {
            border_fraction: 0.02,
            center_min: 0.4,
            center_max: 0.6,
        }
    }
}

impl SeedPolicy {
    /// Classify every pixel of the image.
    pub fn classify(&self, image: &PixelBuffer) -> SeedMap {
        let (w, h) = (image.width(), image.height());
        let mut labels = Vec::with_capacity(w * h);
        for r in 0..h {
            for c in 0..w {
                labels.push(self.label_at(image, r, c));
            }
        }
        SeedMap {
            width: w,
            height: h,
            labels,
        }
    }

    fn label_at(&self, image: &PixelBuffer, row: usize, col: usize) -> SeedLabel {
        let (w, h) = (image.width(), image.height());
        match *self {
            SeedPolicy::BorderCenter {
                border_fraction,
                center_min,
                center_max,
            } => {
                let margin = ((h.min(w) as f64 * border_fraction) as usize).max(2);
                if row < margin || row >= h - margin.min(h) || col < margin || col >= w - margin.min(w)
                {
                    return SeedLabel::Background;
                }
                let (rf, cf) = (row as f64, col as f64);
                let hf = h as f64;
                let wf = w as f64;
                if rf > hf * center_min
                    && rf < hf * center_max
                    && cf > wf * center_min
                    && cf < wf * center_max
                {
                    return SeedLabel::Foreground;
                }
                SeedLabel::Unknown
            }
            SeedPolicy::LumaThreshold {
                foreground_min,
                background_max,
            } => {
                let luma = image.luma(row, col);
                if luma >= foreground_min {
                    SeedLabel::Foreground
                } else if luma <= background_max {
                    SeedLabel::Background
                } else {
                    SeedLabel::Unknown
                }
            }
        }
    }
}

/// Per-pixel seed labels for one solve.
#[derive(Debug, Clone)]
pub struct SeedMap {
    width: usize,
    height: usize,
    labels: Vec<SeedLabel>,
}

impl SeedMap {
    /// Label of one pixel.
    pub fn label(&self, row: usize, col: usize) -> SeedLabel {
        self.labels[row * self.width + col]
    }

    /// All labels in row-major pixel order.
    pub fn labels(&self) -> &[SeedLabel] {
        &self.labels
    }

    /// Map width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels carrying the given label.
    pub fn count(&self, label: SeedLabel) -> usize {
        self.labels.iter().filter(|&&l| l == label).count()
    }
}
