use std::{path::PathBuf, time::Duration};

use crate::{
    assets::decode::PreparedImage,
    assets::media::AudioSourceInfo,
    effects::transitions::{VisualTransform, transform_at},
    foundation::core::{Canvas, Fps, Rgb8},
    foundation::error::{SlidecastError, SlidecastResult},
    slide::model::TransitionSpec,
};

/// One clip as handed to a render driver: pixels plus placement plus the
/// per-instant transform sampled via [`RenderClip::transform_at`].
#[derive(Clone, Debug)]
pub struct RenderClip {
    /// Materialized pixel buffer (cards rasterized, overlays drawn).
    pub pixels: PreparedImage,
    /// Start time on the timeline in seconds.
    pub start_sec: f64,
    /// Span on the render canvas in seconds.
    pub duration_sec: f64,
    /// Transition-in specification; `None` for the first clip or a cut.
    pub transition: Option<TransitionSpec>,
}

impl RenderClip {
    /// End of this clip's span in seconds.
    pub fn end_sec(&self) -> f64 {
        self.start_sec + self.duration_sec
    }

    /// Whether the clip is on screen at timeline instant `t_sec`.
    pub fn is_active_at(&self, t_sec: f64) -> bool {
        self.start_sec <= t_sec && t_sec < self.end_sec()
    }

    /// Sample this clip's visual transform at timeline instant `t_sec`.
    /// Identity once the transition window has passed (or for a cut).
    pub fn transform_at(&self, t_sec: f64, canvas: Canvas) -> VisualTransform {
        match &self.transition {
            None => VisualTransform::IDENTITY,
            Some(tr) => transform_at(tr.kind, t_sec - self.start_sec, tr.duration_sec, canvas),
        }
    }
}

/// A complete render request handed to a [`RenderDriver`].
#[derive(Clone, Debug)]
pub struct RenderJob {
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Clips in playback order.
    pub clips: Vec<RenderClip>,
    /// Optional audio track; truncated to the video duration at encode time
    /// when longer.
    pub audio: Option<AudioSourceInfo>,
    /// Background color frames are flattened over.
    pub background: Rgb8,
    /// Output file path.
    pub out_path: PathBuf,
}

impl RenderJob {
    /// Total video duration: the latest clip end.
    pub fn duration_sec(&self) -> f64 {
        self.clips.iter().map(RenderClip::end_sec).fold(0.0, f64::max)
    }

    /// Check driver-independent job invariants.
    pub fn validate(&self) -> SlidecastResult<()> {
        if self.clips.is_empty() {
            return Err(SlidecastError::validation(
                "render job must contain at least one clip",
            ));
        }
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SlidecastError::validation(
                "render canvas width/height must be > 0",
            ));
        }
        for (i, clip) in self.clips.iter().enumerate() {
            if !clip.start_sec.is_finite() || clip.start_sec < 0.0 {
                return Err(SlidecastError::validation(format!(
                    "clip {i} start time must be finite and >= 0"
                )));
            }
            if !clip.duration_sec.is_finite() || clip.duration_sec <= 0.0 {
                return Err(SlidecastError::validation(format!(
                    "clip {i} duration must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Fractional render progress reported to the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Monotonically non-decreasing fraction in `[0, 1]`.
    pub fraction: f64,
    /// Estimated remaining time.
    pub eta: Duration,
}

/// External collaborator that turns a [`RenderJob`] into an encoded video
/// file.
///
/// Implementations must invoke `on_progress` with a monotonically
/// non-decreasing fraction and must release any resources they acquire on
/// every exit path, success or failure. The engine propagates driver
/// failures unchanged and never retries.
pub trait RenderDriver {
    /// Render the job, returning the output path on success.
    fn render(
        &mut self,
        job: &RenderJob,
        on_progress: &mut dyn FnMut(Progress),
    ) -> SlidecastResult<PathBuf>;
}

/// External collaborator that draws centered text onto a prepared buffer.
///
/// Text rasterization is delegated; the engine only carries the overlay
/// data and calls through this seam while materializing clips.
pub trait TextRasterizer {
    /// Draw `text` centered on a premultiplied RGBA8 buffer of the given
    /// dimensions.
    fn draw_centered_text(
        &self,
        width: u32,
        height: u32,
        rgba8_premul: &mut [u8],
        text: &str,
        color: Rgb8,
    ) -> SlidecastResult<()>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
