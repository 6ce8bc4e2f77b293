//! FFprobe metadata extraction.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// Metadata of a decodable video stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    /// Duration in seconds (0.0 when the container reports none)
    pub duration_seconds: f64,
    /// Native width in pixels
    pub width: u32,
    /// Native height in pixels
    pub height: u32,
}

/// FFprobe JSON output format.
#[derive(Debug, serde::Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, serde::Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct FfprobeStream {
    codec_type: String,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
}

/// Probe a video file for duration and native dimensions.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<VideoMetadata> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::corrupt_media(
            "FFprobe could not read the file",
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    parse_probe_output(&output.stdout)
}

/// Parse FFprobe JSON into video metadata.
fn parse_probe_output(stdout: &[u8]) -> MediaResult<VideoMetadata> {
    let probe: FfprobeOutput = serde_json::from_slice(stdout)?;

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::UnsupportedMedia("no video stream found".to_string()))?;

    let width = video_stream
        .width
        .ok_or_else(|| MediaError::UnsupportedMedia("video stream has no width".to_string()))?;
    let height = video_stream
        .height
        .ok_or_else(|| MediaError::UnsupportedMedia("video stream has no height".to_string()))?;

    // Container duration first, stream duration as fallback
    let duration_seconds = probe
        .format
        .duration
        .as_ref()
        .or(video_stream.duration.as_ref())
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0);

    Ok(VideoMetadata {
        duration_seconds,
        width,
        height,
    })
}
