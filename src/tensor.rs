//! Packing sampled frames into the model's input tensor: shape
//! `(1, num_frames, 112, 112, 3)`, f32, pixel values scaled to `[0, 1]`.

use ndarray::Array5;

use crate::config::FRAME_SIZE;
use crate::error::AnalysisError;
use crate::sampler::Frame;

/// Stack exactly `num_frames` frames into a batch-of-one input tensor.
/// Buffer-length mismatches are rejected here instead of surfacing as an
/// opaque inference failure later.
pub fn build_input(frames: &[Frame], num_frames: usize) -> Result<Array5<f32>, AnalysisError> {
    if frames.len() != num_frames {
        return Err(AnalysisError::ShapeMismatch(format!(
            "expected {} frames, got {}",
            num_frames,
            frames.len()
        )));
    }

    let mut input = Array5::<f32>::zeros((1, num_frames, FRAME_SIZE, FRAME_SIZE, 3));
    for (fi, frame) in frames.iter().enumerate() {
        if frame.rgb.len() != FRAME_SIZE * FRAME_SIZE * 3 {
            return Err(AnalysisError::ShapeMismatch(format!(
                "frame {} has {} bytes, expected {}",
                fi,
                frame.rgb.len(),
                FRAME_SIZE * FRAME_SIZE * 3
            )));
        }
        for y in 0..FRAME_SIZE {
            for x in 0..FRAME_SIZE {
                let offset = (y * FRAME_SIZE + x) * 3;
                for c in 0..3 {
                    input[[0, fi, y, x, c]] = frame.rgb[offset + c] as f32 / 255.0;
                }
            }
        }
    }
    Ok(input)
}
