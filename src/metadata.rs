// FFprobe wrapper for clip details

use std::path::Path;
use std::process::Command;

use serde::Deserialize;

use crate::error::{DayreelError, Result};

/// Stream and container details for a clip.
#[derive(Debug, Clone, Default)]
pub struct MediaInfo {
    pub duration_ms: Option<i64>,
    pub width: Option<i32>,
    pub height: Option<i32>,
    pub fps: Option<f64>,
    pub codec: Option<String>,
    pub audio_codec: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FFprobeOutput {
    streams: Option<Vec<FFprobeStream>>,
    format: Option<FFprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FFprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<i32>,
    height: Option<i32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FFprobeFormat {
    duration: Option<String>,
}

/// Run ffprobe on a file and extract clip details
pub fn probe(path: &Path) -> Result<MediaInfo> {
    let output = Command::new(crate::tools::ffprobe_path())
        .args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .output()
        .map_err(|e| DayreelError::FFprobe(format!("Failed to run ffprobe: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DayreelError::FFprobe(format!("ffprobe failed: {}", stderr)));
    }

    parse_probe_output(&output.stdout)
}

/// Map raw ffprobe JSON onto MediaInfo
fn parse_probe_output(raw: &[u8]) -> Result<MediaInfo> {
    let probe_output: FFprobeOutput = serde_json::from_slice(raw)
        .map_err(|e| DayreelError::FFprobe(format!("Failed to parse ffprobe output: {}", e)))?;

    let mut info = MediaInfo::default();

    if let Some(ref streams) = probe_output.streams {
        for stream in streams {
            match stream.codec_type.as_deref() {
                Some("video") => {
                    info.codec = stream.codec_name.clone();
                    info.width = stream.width;
                    info.height = stream.height;
                    info.fps = parse_frame_rate(stream.r_frame_rate.as_deref());
                    if info.duration_ms.is_none() {
                        info.duration_ms = parse_duration_ms(stream.duration.as_deref());
                    }
                }
                Some("audio") => {
                    info.audio_codec = stream.codec_name.clone();
                }
                _ => {}
            }
        }
    }

    if let Some(ref format) = probe_output.format {
        if info.duration_ms.is_none() {
            info.duration_ms = parse_duration_ms(format.duration.as_deref());
        }
    }

    Ok(info)
}

/// Parse frame rate string like "30000/1001" to f64
fn parse_frame_rate(rate_str: Option<&str>) -> Option<f64> {
    let rate_str = rate_str?;
    if let Some((num, den)) = rate_str.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        if den > 0.0 {
            return Some(num / den);
        }
    }
    rate_str.parse().ok()
}

/// Parse duration string to milliseconds
fn parse_duration_ms(duration_str: Option<&str>) -> Option<i64> {
    let duration_str = duration_str?;
    let seconds: f64 = duration_str.parse().ok()?;
    Some((seconds * 1000.0) as i64)
}

/// Check if ffprobe is available
pub fn is_available() -> bool {
    crate::tools::is_tool_available("ffprobe")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frame_rate() {
        assert_eq!(parse_frame_rate(Some("30/1")), Some(30.0));
        let ntsc = parse_frame_rate(Some("30000/1001")).unwrap();
        assert!((ntsc - 29.97).abs() < 0.01);
        assert_eq!(parse_frame_rate(Some("0/0")), None);
        assert_eq!(parse_frame_rate(Some("garbage")), None);
        assert_eq!(parse_frame_rate(None), None);
    }

    #[test]
    fn test_parse_duration_ms() {
        assert_eq!(parse_duration_ms(Some("12.345")), Some(12345));
        assert_eq!(parse_duration_ms(Some("0.5")), Some(500));
        assert_eq!(parse_duration_ms(Some("not-a-number")), None);
        assert_eq!(parse_duration_ms(None), None);
    }

    #[test]
    fn test_parse_probe_output() {
        let raw = br#"{
            "streams": [
                {
                    "codec_type": "video",
                    "codec_name": "h264",
                    "width": 1920,
                    "height": 1080,
                    "r_frame_rate": "30000/1001",
                    "duration": "5.000000"
                },
                {
                    "codec_type": "audio",
                    "codec_name": "aac"
                }
            ],
            "format": {
                "duration": "5.500000"
            }
        }"#;

        let info = parse_probe_output(raw).unwrap();
        assert_eq!(info.codec.as_deref(), Some("h264"));
        assert_eq!(info.width, Some(1920));
        assert_eq!(info.height, Some(1080));
        // Stream duration wins over format duration
        assert_eq!(info.duration_ms, Some(5000));
        assert_eq!(info.audio_codec.as_deref(), Some("aac"));
    }

    #[test]
    fn test_parse_probe_output_format_duration_fallback() {
        let raw = br#"{
            "streams": [
                {"codec_type": "video", "codec_name": "h264"}
            ],
            "format": {"duration": "7.250000"}
        }"#;

        let info = parse_probe_output(raw).unwrap();
        assert_eq!(info.duration_ms, Some(7250));
    }

    #[test]
    fn test_parse_probe_output_rejects_garbage() {
        assert!(parse_probe_output(b"not json at all").is_err());
    }
}
