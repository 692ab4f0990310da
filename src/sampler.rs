//! Frame sampling: pick evenly spaced frame indices across a video, decode
//! them into fixed-size RGB buffers, and pad with blank frames when the video
//! is shorter than the requested count.
//!
//! Decoding goes through the ffmpeg/ffprobe CLI tools into a per-call temp
//! directory; extracted PNGs are loaded and scaled with the `image` crate.

use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::{Config, FRAME_SIZE};
use crate::error::AnalysisError;

/// One sampled frame: `FRAME_SIZE × FRAME_SIZE` RGB, row-major.
#[derive(Debug, Clone)]
pub struct Frame {
    pub rgb: Vec<u8>,
}

impl Frame {
    /// All-zero (black) substitute for a position that failed to decode.
    pub fn blank() -> Self {
        Frame {
            rgb: vec![0u8; FRAME_SIZE * FRAME_SIZE * 3],
        }
    }
}

/// Total frame count of the first video stream, via packet counting.
/// A file ffprobe cannot make sense of reports as zero frames rather than
/// an error; the caller turns that into [`AnalysisError::NoFrames`].
fn probe_frame_count(path: &Path) -> Result<u64, AnalysisError> {
    let output = Command::new("ffprobe")
        .args(["-v", "error"])
        .args(["-select_streams", "v:0"])
        .arg("-count_packets")
        .args(["-show_entries", "stream=nb_read_packets"])
        .args(["-of", "default=noprint_wrappers=1:nokey=1"])
        .arg(path)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| AnalysisError::Decode(format!("ffprobe not available: {}", e)))?;

    if !output.status.success() {
        log::warn!(
            "[sampler] ffprobe failed for {:?}: {}",
            path,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(0);
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse::<u64>()
        .unwrap_or(0))
}

/// Evenly spaced frame indices over `[0, total - 1]`, `n` positions.
/// Duplicate indices from rounding (short videos) are collapsed; the sampler
/// pads the difference with blank frames.
fn sample_indices(total: u64, n: usize) -> Vec<u64> {
    if total == 0 || n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0];
    }
    let mut indices: Vec<u64> = (0..n)
        .map(|k| (k as f64 * (total - 1) as f64 / (n - 1) as f64) as u64)
        .collect();
    indices.dedup();
    indices
}

/// ffmpeg `select` filter expression matching the given frame indices.
/// Single quotes keep the commas away from the filtergraph parser.
fn select_expr(indices: &[u64]) -> String {
    let terms: Vec<String> = indices.iter().map(|i| format!("eq(n,{})", i)).collect();
    format!("select='{}'", terms.join("+"))
}

/// Grow the frame list to exactly `n` entries with blank frames.
fn pad_to(frames: &mut Vec<Frame>, n: usize) {
    while frames.len() < n {
        frames.push(Frame::blank());
    }
    frames.truncate(n);
}

/// Sample `cfg.num_frames` frames from the video at `path`.
///
/// Returns exactly `num_frames` entries, blank-padded when fewer positions
/// decode, or [`AnalysisError::NoFrames`] when nothing decodes at all.
pub fn sample_frames(path: &Path, cfg: &Config) -> Result<Vec<Frame>, AnalysisError> {
    let total = probe_frame_count(path)?;
    let indices = sample_indices(total, cfg.num_frames);
    if indices.is_empty() {
        return Err(AnalysisError::NoFrames);
    }

    let temp_dir = env::temp_dir().join(format!("veriframe_{:016x}", rand::random::<u64>()));
    std::fs::create_dir_all(&temp_dir)
        .map_err(|e| AnalysisError::Decode(format!("failed to create temp dir: {}", e)))?;

    let result = extract_frames(path, &indices, &temp_dir, cfg);

    if let Err(e) = std::fs::remove_dir_all(&temp_dir) {
        log::warn!("[sampler] failed to clean up temp dir {:?}: {}", temp_dir, e);
    }

    let mut frames = result?;
    if frames.is_empty() {
        return Err(AnalysisError::NoFrames);
    }
    pad_to(&mut frames, cfg.num_frames);
    Ok(frames)
}

fn extract_frames(
    path: &Path,
    indices: &[u64],
    temp_dir: &Path,
    cfg: &Config,
) -> Result<Vec<Frame>, AnalysisError> {
    let vf = select_expr(indices);
    let output = Command::new("ffmpeg")
        .args(["-hide_banner", "-loglevel", "error", "-nostdin"])
        .args(["-threads", &cfg.ffmpeg_threads.to_string()])
        .arg("-i")
        .arg(path)
        .args(["-an", "-sn"])
        .args(["-vf", &vf])
        .args(["-vsync", "vfr"])
        .arg("-y")
        .arg(temp_dir.join("frame_%04d.png"))
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| AnalysisError::Decode(format!("ffmpeg not available: {}", e)))?;

    if !output.status.success() {
        // Corrupt input decodes to nothing rather than raising here.
        log::warn!(
            "[sampler] ffmpeg failed for {:?}: {}",
            path,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(Vec::new());
    }

    let mut frame_files: Vec<PathBuf> = std::fs::read_dir(temp_dir)
        .map_err(|e| AnalysisError::Decode(format!("failed to read temp dir: {}", e)))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension().is_some_and(|ext| ext == "png")
                && p.file_name()
                    .map(|n| n.to_string_lossy().starts_with("frame_"))
                    .unwrap_or(false)
        })
        .collect();
    frame_files.sort();

    let mut frames = Vec::with_capacity(indices.len());
    for frame_path in &frame_files {
        match image::open(frame_path) {
            Ok(img) => {
                let rgb = img
                    .resize_exact(
                        FRAME_SIZE as u32,
                        FRAME_SIZE as u32,
                        image::imageops::FilterType::Triangle,
                    )
                    .to_rgb8()
                    .into_raw();
                frames.push(Frame { rgb });
            }
            Err(e) => {
                log::warn!("[sampler] failed to decode frame {:?}: {}", frame_path, e);
            }
        }
    }

    log::info!(
        "[sampler] extracted {} of {} requested frames from {:?}",
        frames.len(),
        indices.len(),
        path
    );
    Ok(frames)
}
