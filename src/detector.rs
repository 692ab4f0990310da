//! Model backends behind a small trait so the pipeline takes the model as an
//! injected capability instead of process-global state.

use anyhow::{Result, anyhow};
use ndarray::Array5;
use ort::session::{Session, builder::GraphOptimizationLevel};
use ort::value::Tensor;
use std::path::Path;
use std::sync::Mutex;

/// One forward pass over a batch-of-one input, returning P(fake) read from
/// the first scalar of the first output row.
pub trait Detector: Send + Sync {
    fn predict(&self, input: &Array5<f32>) -> Result<f32>;
}

/// Pre-trained deepfake model loaded from an ONNX artifact. The session is
/// built once at startup; `run` needs exclusive access, hence the mutex.
pub struct OnnxDetector {
    session: Mutex<Session>,
}

impl OnnxDetector {
    pub fn load(model_path: &Path) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(1)?
            .commit_from_file(model_path)?;
        log::info!("[detector] loaded model from {:?}", model_path);
        Ok(Self {
            session: Mutex::new(session),
        })
    }
}

impl Detector for OnnxDetector {
    fn predict(&self, input: &Array5<f32>) -> Result<f32> {
        let tensor = Tensor::from_array(input.clone())?;
        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow!("session lock poisoned: {}", e))?;
        let outputs = session.run(ort::inputs![tensor])?;
        let (_name, value) = outputs
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("model produced no outputs"))?;
        let out = value.try_extract_array::<f32>()?;
        out.iter()
            .copied()
            .next()
            .ok_or_else(|| anyhow!("model output is empty"))
    }
}

/// Deterministic stand-in that always reports the same probability. Used in
/// tests and for running the front-end without a model artifact.
pub struct FixedDetector {
    probability: f32,
}

impl FixedDetector {
    pub fn new(probability: f32) -> Self {
        Self { probability }
    }
}

impl Detector for FixedDetector {
    fn predict(&self, _input: &Array5<f32>) -> Result<f32> {
        Ok(self.probability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_detector_ignores_input() {
        let detector = FixedDetector::new(0.42);
        let input = Array5::<f32>::zeros((1, 10, 112, 112, 3));
        assert_eq!(detector.predict(&input).unwrap(), 0.42);
    }
}
