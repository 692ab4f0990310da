use thiserror::Error;

/// Failures the analysis pipeline can surface to a caller. Each variant maps
/// to a distinct user-facing message; the web layer picks the status code.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no frames extracted from video")]
    NoFrames,
    #[error("video decode failed: {0}")]
    Decode(String),
    #[error("model input shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("inference failed: {0}")]
    Inference(anyhow::Error),
}
