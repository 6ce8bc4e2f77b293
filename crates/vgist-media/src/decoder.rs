//! Media decoder adapter over the FFmpeg CLI.
//!
//! A [`VideoHandle`] models one exclusive playback head: it binds a media
//! source, loads its metadata, and services one seek-and-capture at a time.
//! The underlying resource (a spilled temp file for byte sources) is released
//! on drop, so an abandoned analysis never leaks it.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::debug;

use crate::error::{MediaError, MediaResult};
use crate::probe::{probe_video, VideoMetadata};

/// A media source accepted by the decoder.
#[derive(Debug)]
pub enum MediaSource {
    /// Video file on disk
    Path(PathBuf),
    /// Raw video bytes (an upload); spilled to a temp file for decoding
    Bytes {
        data: Vec<u8>,
        /// File extension hint, e.g. "mp4"
        extension: String,
    },
}

impl MediaSource {
    /// Convenience constructor for a path source.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    /// Convenience constructor for a byte source.
    pub fn bytes(data: Vec<u8>, extension: impl Into<String>) -> Self {
        Self::Bytes {
            data,
            extension: extension.into(),
        }
    }
}

/// One raw captured picture, RGB24, sized to the video's native dimensions.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub width: u32,
    pub height: u32,
    /// Interleaved RGB bytes, `width * height * 3` long
    pub data: Vec<u8>,
}

/// An opened, decodable video bound for one sampling pass.
#[derive(Debug)]
pub struct VideoHandle {
    path: PathBuf,
    // Keeps a byte-source's backing file alive; deleted on drop
    _temp: Option<NamedTempFile>,
    metadata: Option<VideoMetadata>,
}

impl VideoHandle {
    /// Bind a media source.
    ///
    /// Fails with `FileNotFound` for a missing path and `InvalidInput` for an
    /// empty byte buffer. Decodability is not verified here; that happens in
    /// [`VideoHandle::await_metadata`].
    pub fn open(source: MediaSource) -> MediaResult<Self> {
        match source {
            MediaSource::Path(path) => {
                if !path.exists() {
                    return Err(MediaError::FileNotFound(path));
                }
                Ok(Self {
                    path,
                    _temp: None,
                    metadata: None,
                })
            }
            MediaSource::Bytes { data, extension } => {
                if data.is_empty() {
                    return Err(MediaError::invalid_input("empty video buffer"));
                }
                let temp = tempfile::Builder::new()
                    .prefix("vgist-")
                    .suffix(&format!(".{extension}"))
                    .tempfile()?;
                std::fs::write(temp.path(), &data)?;
                Ok(Self {
                    path: temp.path().to_path_buf(),
                    _temp: Some(temp),
                    metadata: None,
                })
            }
        }
    }

    /// Load duration and native dimensions, rejecting streams without a
    /// finite, seekable timeline.
    pub async fn await_metadata(&mut self) -> MediaResult<VideoMetadata> {
        let meta = probe_video(&self.path).await?;
        validate_timeline(meta.duration_seconds)?;

        debug!(
            duration = meta.duration_seconds,
            width = meta.width,
            height = meta.height,
            "video metadata loaded"
        );

        self.metadata = Some(meta);
        Ok(meta)
    }

    /// Metadata, if [`VideoHandle::await_metadata`] has completed.
    pub fn metadata(&self) -> Option<VideoMetadata> {
        self.metadata
    }

    /// Path of the bound media file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seek to a timestamp and capture the picture displayed there.
    ///
    /// Exactly one capture per call; callers drive captures sequentially
    /// because a single decoder owns one playback head.
    pub async fn seek_and_capture(&mut self, timestamp_seconds: f64) -> MediaResult<RawFrame> {
        let meta = self
            .metadata
            .ok_or_else(|| MediaError::invalid_input("metadata not loaded before capture"))?;

        which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)?;

        let output = Command::new("ffmpeg")
            .args(["-v", "error"])
            .args(["-ss", &format!("{timestamp_seconds:.3}")])
            .arg("-i")
            .arg(&self.path)
            .args(["-frames:v", "1"])
            .args(["-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            return Err(MediaError::capture_failed(
                timestamp_seconds,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let expected = meta.width as usize * meta.height as usize * 3;
        if output.stdout.len() != expected {
            return Err(MediaError::capture_failed(
                timestamp_seconds,
                format!(
                    "decoder produced {} bytes, expected {}",
                    output.stdout.len(),
                    expected
                ),
            ));
        }

        Ok(RawFrame {
            width: meta.width,
            height: meta.height,
            data: output.stdout,
        })
    }

    /// Release the decoder resource.
    ///
    /// Dropping the handle has the same effect; `close` exists for callers
    /// that want the release to be explicit in the control flow.
    pub fn close(self) {
        drop(self);
    }
}

/// Reject streams without a finite, seekable timeline.
fn validate_timeline(duration_seconds: f64) -> MediaResult<()> {
    if !duration_seconds.is_finite() || duration_seconds <= 0.0 {
        return Err(MediaError::InvalidDuration(format!(
            "duration {duration_seconds} is not a finite positive length"
        )));
    }
    Ok(())
}
