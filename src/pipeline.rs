//! The one analysis pipeline both entry points share:
//! sample frames → build tensor → predict → verdict.

use std::path::Path;

use crate::config::Config;
use crate::detector::Detector;
use crate::error::AnalysisError;
use crate::sampler::{self, Frame};
use crate::tensor;
use crate::verdict::Verdict;

/// Run the full pipeline against a video file on disk.
pub fn analyze(
    path: &Path,
    cfg: &Config,
    detector: &dyn Detector,
) -> Result<Verdict, AnalysisError> {
    let frames = sampler::sample_frames(path, cfg)?;
    classify_frames(&frames, cfg.num_frames, detector)
}

/// Tensor construction and inference over already-sampled frames.
pub fn classify_frames(
    frames: &[Frame],
    num_frames: usize,
    detector: &dyn Detector,
) -> Result<Verdict, AnalysisError> {
    let input = tensor::build_input(frames, num_frames)?;
    let probability = detector.predict(&input).map_err(AnalysisError::Inference)?;
    Ok(Verdict::from_probability(probability))
}
