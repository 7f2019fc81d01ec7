//! End-to-end segmentation pipeline.
//!
//! One synchronous call per image: validate, downscale to the configured
//! cap, classify seeds, fit the color model, wire the pixel graph, run the
//! configured max-flow solver, extract the residual cut, and scale the
//! mask back to the input resolution. The whole flow network lives and
//! dies inside this call.

use crate::builder::GraphBuilder;
use crate::config::{SegmentConfig, SolverKind};
use crate::cut;
use crate::error::Result;
use crate::image::{MaskBuffer, PixelBuffer};
use crate::model::ColorModel;
use crate::solver::{BlockingFlow, MaxFlowSolve, ShortestAugmentingPath};
use crate::witness::{witness_line, SolveWitness};

/// Result of one segmentation solve.
#[derive(Debug, Clone)]
pub struct Segmentation {
    /// Binary mask at the input resolution: 0 or
    /// [`MASK_FOREGROUND`](crate::image::MASK_FOREGROUND) per pixel.
    pub mask: MaskBuffer,
    /// Total max-flow value, for diagnostics; equals the cut cost.
    pub max_flow: f64,
}

/// Segment one image into foreground and background.
pub fn segment(image: &PixelBuffer, config: &SegmentConfig) -> Result<Segmentation> {
    config.validate()?;
    let (in_w, in_h) = (image.width(), image.height());
    let _span = tracing::debug_span!("segment", width = in_w, height = in_h).entered();

    // Downscale before graph construction so the node count stays bounded
    let longest = in_w.max(in_h);
    let scaled;
    let proc = if longest > config.max_dimension {
        let scale = config.max_dimension as f64 / longest as f64;
        let new_w = ((in_w as f64 * scale).round() as usize).max(1);
        let new_h = ((in_h as f64 * scale).round() as usize).max(1);
        tracing::debug!(new_w, new_h, "downscaling before graph construction");
        scaled = image.resize_nearest(new_w, new_h);
        &scaled
    } else {
        image
    };

    let seeds = config.seed_policy.classify(proc);
    let model = ColorModel::fit(proc, &seeds);
    let graph = GraphBuilder::new(proc, &seeds, &model, config).build();
    let mut network = graph.network;

    let max_flow = match config.solver {
        SolverKind::BlockingFlow => {
            BlockingFlow::new().solve(&mut network, graph.source, graph.sink)?
        }
        SolverKind::ShortestAugmentingPath => {
            ShortestAugmentingPath::new().solve(&mut network, graph.source, graph.sink)?
        }
    };

    let reachable = cut::reachable_from_source(&network, graph.source);
    let mask_proc = cut::mask_from_reachable(&reachable, proc.width(), proc.height());
    let mask = if proc.width() == in_w && proc.height() == in_h {
        mask_proc
    } else {
        mask_proc.resize_nearest(in_w, in_h)
    };

    tracing::debug!(
        max_flow,
        foreground = mask.foreground_count(),
        "segmentation finished"
    );
    if config.witness_enabled {
        let entry = SolveWitness::record(image, &mask, max_flow, config);
        tracing::info!(target: "rucut::witness", line = %witness_line(&entry));
    }

    Ok(Segmentation { mask, max_flow })
}
