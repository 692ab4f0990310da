//! Deepfake screening for uploaded videos: sample evenly spaced frames with
//! ffmpeg, pack them into a normalized input tensor, and run a pre-trained
//! ONNX classifier. The HTTP front-end and the `detect` CLI share the same
//! pipeline.

pub mod config;
pub mod detector;
pub mod error;
pub mod pipeline;
pub mod sampler;
pub mod server;
pub mod tensor;
pub mod upload;
pub mod verdict;
