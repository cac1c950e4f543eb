// Audio extraction for emotion prediction
//
// Strips the video track and writes 16-bit PCM WAV to a fixed path that
// is overwritten on every run. The interactive date flow never calls
// this; the predict endpoint is fed directly by callers.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::constants::{CONVERTED_AUDIO_FILENAME, WAV_CODEC};
use crate::error::{DayreelError, Result};
use crate::upload::{AnalysisClient, PredictOutcome};

/// Fixed output path for extracted audio, one per footage directory.
pub fn converted_audio_path(footage_dir: &Path) -> PathBuf {
    footage_dir.join(CONVERTED_AUDIO_FILENAME)
}

/// Extract the audio track of `source` into a WAV file at `output_path`.
///
/// Any previous file at that path is replaced. Internally writes to a
/// temp file first so a failed run never leaves a truncated WAV behind.
pub fn extract_wav(source: &Path, output_path: &Path) -> Result<()> {
    if !source.is_file() {
        return Err(DayreelError::FileNotFound(source.display().to_string()));
    }

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = output_path.with_extension("tmp.wav");

    let output = Command::new(crate::tools::ffmpeg_path())
        .args(["-y", "-i"])
        .arg(source)
        .args(["-vn", "-acodec", WAV_CODEC])
        .arg(&tmp_path)
        .output()?;

    if !output.status.success() {
        let _ = std::fs::remove_file(&tmp_path);
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DayreelError::FFmpeg(format!(
            "audio extraction failed: {}",
            stderr
        )));
    }

    // Atomic rename over any previous extraction
    std::fs::rename(&tmp_path, output_path)?;

    if !output_path.exists() || std::fs::metadata(output_path)?.len() == 0 {
        let _ = std::fs::remove_file(output_path);
        return Err(DayreelError::FFmpeg(
            "extracted WAV is empty or missing".to_string(),
        ));
    }

    log::debug!(
        "Extracted audio {} -> {}",
        source.display(),
        output_path.display()
    );
    Ok(())
}

/// Extract audio from `video` and submit it for emotion prediction.
///
/// The WAV lands at the fixed converted-audio path beside the footage
/// and is left in place afterwards.
pub fn run_emotion_pipeline(video: &Path, client: &AnalysisClient) -> Result<PredictOutcome> {
    let dir = video
        .parent()
        .ok_or_else(|| DayreelError::InvalidPath(video.display().to_string()))?;
    let wav = converted_audio_path(dir);

    extract_wav(video, &wav)?;
    client.predict(&wav)
}
