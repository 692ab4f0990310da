//! Single-shot CLI: classify one video file and print one line.

use anyhow::{Result, anyhow};
use std::path::Path;

use veriframe::config::Config;
use veriframe::detector::OnnxDetector;
use veriframe::error::AnalysisError;
use veriframe::pipeline;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let video_path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: detect <video-file>"))?;
    let path = Path::new(&video_path);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", video_path));
    }

    let config = Config::from_env();
    let detector = OnnxDetector::load(&config.model_path)?;

    match pipeline::analyze(path, &config, &detector) {
        Ok(verdict) => {
            println!("{}", verdict);
            Ok(())
        }
        Err(AnalysisError::NoFrames) => {
            println!("Error: No frames extracted. Please check the video file!");
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
