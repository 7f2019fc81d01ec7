//! Pixel-graph construction.
//!
//! Maps an image onto a flow network of `width * height + 2` nodes: one
//! per pixel plus the two terminals. N-links connect each pixel to its
//! right and down neighbors (added symmetrically in both directions) with
//! a contrast-sensitive weight; T-links connect every pixel to both
//! terminals, either as hard seed constraints or as a soft data term from
//! the color model.

use crate::config::SegmentConfig;
use crate::graph::{FlowNetwork, NodeId};
use crate::image::PixelBuffer;
use crate::model::ColorModel;
use crate::seeds::{SeedLabel, SeedMap};

/// Additive guard when deriving `beta` from the mean pairwise difference.
const BETA_EPSILON: f64 = 1e-6;

/// Additive guard in the data-term ratio denominator.
const RATIO_EPSILON: f64 = 1e-6;

/// A flow network wired for one image, with its terminal ids.
#[derive(Debug)]
pub struct PixelGraph {
    /// The wired network.
    pub network: FlowNetwork,
    /// Source terminal (foreground side).
    pub source: NodeId,
    /// Sink terminal (background side).
    pub sink: NodeId,
}

/// Builds a [`PixelGraph`] from an image, its seeds, and the color model.
#[derive(Debug)]
pub struct GraphBuilder<'a> {
    image: &'a PixelBuffer,
    seeds: &'a SeedMap,
    model: &'a ColorModel,
    config: &'a SegmentConfig,
}

impl<'a> GraphBuilder<'a> {
    /// Bundle the inputs of one construction.
    pub fn new(
        image: &'a PixelBuffer,
        seeds: &'a SeedMap,
        model: &'a ColorModel,
        config: &'a SegmentConfig,
    ) -> Self {
        Self {
            image,
            seeds,
            model,
            config,
        }
    }

    /// Wire the full network.
    pub fn build(&self) -> PixelGraph {
        let (w, h) = (self.image.width(), self.image.height());
        let pixel_count = w * h;
        let source = pixel_count;
        let sink = pixel_count + 1;
        let mut network = FlowNetwork::new(pixel_count + 2);

        let beta = self.beta();
        let k1 = self.config.smoothness_scale;

        for r in 0..h {
            for c in 0..w {
                let u = r * w + c;

                // N-links to the two canonical neighbors, both directions
                for (nr, nc) in [(r, c + 1), (r + 1, c)] {
                    if nr < h && nc < w {
                        let v = nr * w + nc;
                        let diff = pair_difference(self.image, (r, c), (nr, nc));
                        let weight = k1 * (-beta * diff).exp();
                        network.add_edge(u, v, weight);
                        network.add_edge(v, u, weight);
                    }
                }

                // T-links from the seed label or the data term
                match self.seeds.label(r, c) {
                    SeedLabel::Foreground => {
                        network.add_edge(source, u, self.config.hard_link_capacity);
                        network.add_edge(u, sink, 0.0);
                    }
                    SeedLabel::Background => {
                        network.add_edge(source, u, 0.0);
                        network.add_edge(u, sink, self.config.hard_link_capacity);
                    }
                    SeedLabel::Unknown => {
                        let (to_source, to_sink) = self.data_term(r, c);
                        network.add_edge(source, u, to_source);
                        network.add_edge(u, sink, to_sink);
                    }
                }
            }
        }

        tracing::debug!(
            nodes = network.node_count(),
            edge_pairs = network.edge_pair_count(),
            beta,
            "pixel graph built"
        );
        PixelGraph {
            network,
            source,
            sink,
        }
    }

    /// Contrast scale `beta = 1 / (2 * mean(|I(p)-I(q)|^2) + eps)` over all
    /// adjacent pairs, or 0 when the image has no contrast at all (the
    /// smoothness term then degenerates to a uniform `K1`).
    fn beta(&self) -> f64 {
        let (w, h) = (self.image.width(), self.image.height());
        let mut total = 0.0;
        let mut samples = 0usize;
        for r in 0..h {
            for c in 0..w {
                if c + 1 < w {
                    total += pair_difference(self.image, (r, c), (r, c + 1));
                    samples += 1;
                }
                if r + 1 < h {
                    total += pair_difference(self.image, (r, c), (r + 1, c));
                    samples += 1;
                }
            }
        }
        if samples == 0 || total == 0.0 {
            return 0.0;
        }
        1.0 / (2.0 * total / samples as f64 + BETA_EPSILON)
    }

    /// Soft terminal capacities for an unseeded pixel.
    ///
    /// Normalized ratio of the model distances, bounded by `lambda_data`:
    /// a pixel close to the foreground mean gets a large source-side
    /// capacity (expensive to assign to the background) and a small
    /// sink-side capacity, and vice versa.
    fn data_term(&self, row: usize, col: usize) -> (f64, f64) {
        let pixel = self.image.pixel(row, col);
        let d_fg = self.model.foreground_distance(pixel);
        let d_bg = self.model.background_distance(pixel);
        let denom = d_fg + d_bg + RATIO_EPSILON;
        let lambda = self.config.lambda_data;
        (lambda * d_bg / denom, lambda * d_fg / denom)
    }
}

/// Squared color difference between two pixels, summed over channels.
fn pair_difference(image: &PixelBuffer, a: (usize, usize), b: (usize, usize)) -> f64 {
    image
        .pixel(a.0, a.1)
        .iter()
        .zip(image.pixel(b.0, b.1))
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum()
}
