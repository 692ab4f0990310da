//! Runtime configuration from environment variables with hard defaults.

use std::env;
use std::path::PathBuf;

/// Model input edge length in pixels. Fixed by the trained model.
pub const FRAME_SIZE: usize = 112;

const DEFAULT_MODEL_PATH: &str = "models/deepfake_lstm.onnx";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_NUM_FRAMES: usize = 10;
const DEFAULT_FFMPEG_THREADS: usize = 1;

/// Process-wide settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub upload_dir: PathBuf,
    pub port: u16,
    pub num_frames: usize,
    pub ffmpeg_threads: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_MODEL_PATH)),
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            port: env::var("PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            num_frames: env::var("NUM_FRAMES")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_NUM_FRAMES),
            ffmpeg_threads: env::var("FFMPEG_THREADS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_FFMPEG_THREADS),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            port: DEFAULT_PORT,
            num_frames: DEFAULT_NUM_FRAMES,
            ffmpeg_threads: DEFAULT_FFMPEG_THREADS,
        }
    }
}
