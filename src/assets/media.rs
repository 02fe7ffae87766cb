use std::path::{Path, PathBuf};

use crate::foundation::error::{SlidecastError, SlidecastResult};

/// What the engine needs to know about an audio track: where it lives and
/// how long it plays.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioSourceInfo {
    /// Path to the audio file, handed to the render driver unchanged.
    pub path: PathBuf,
    /// Track duration in seconds.
    pub duration_sec: f64,
}

/// Probe an audio file's duration with the system `ffprobe` binary.
pub fn probe_audio(source_path: &Path) -> SlidecastResult<AudioSourceInfo> {
    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| SlidecastError::media(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(SlidecastError::media(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    parse_audio_probe(&out.stdout, source_path)
}

pub(crate) fn parse_audio_probe(
    json: &[u8],
    source_path: &Path,
) -> SlidecastResult<AudioSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeFormat {
        duration: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
        format: Option<ProbeFormat>,
    }

    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| SlidecastError::media(format!("ffprobe json parse failed: {e}")))?;
    let audio_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .ok_or_else(|| {
            SlidecastError::media(format!(
                "no audio stream found in '{}'",
                source_path.display()
            ))
        })?;

    // Container duration is usually the more reliable figure; fall back to
    // the stream's own.
    let duration_sec = parsed
        .format
        .as_ref()
        .and_then(|f| f.duration.as_ref())
        .or(audio_stream.duration.as_ref())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d > 0.0)
        .ok_or_else(|| {
            SlidecastError::media(format!(
                "could not determine audio duration for '{}'",
                source_path.display()
            ))
        })?;

    Ok(AudioSourceInfo {
        path: source_path.to_path_buf(),
        duration_sec,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
