use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
    time::{Duration, Instant},
};

use crate::{
    foundation::error::{SlidecastError, SlidecastResult},
    render::composite::composite_frame,
    render::driver::{Progress, RenderDriver, RenderJob},
};

/// Behavior knobs for [`FfmpegDriver`].
#[derive(Clone, Debug)]
pub struct FfmpegConfig {
    /// Overwrite the output file if it already exists.
    pub overwrite: bool,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Whether the system `ffmpeg` binary is available.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> SlidecastResult<()> {
    if let Some(parent) = path.parent() {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Render driver that composites frames on the CPU and streams raw video to
/// the system `ffmpeg` binary for MP4 output.
///
/// We intentionally use the system binary rather than linking FFmpeg to
/// avoid native dev header/lib requirements. `ffmpeg` must be installed and
/// on `PATH`; [`FfmpegDriver::render`] checks up front.
#[derive(Clone, Debug, Default)]
pub struct FfmpegDriver {
    cfg: FfmpegConfig,
}

impl FfmpegDriver {
    /// Construct a driver with explicit configuration.
    pub fn new(cfg: FfmpegConfig) -> Self {
        Self { cfg }
    }

    fn validate_job(&self, job: &RenderJob) -> SlidecastResult<()> {
        job.validate()?;
        if !job.canvas.width.is_multiple_of(2) || !job.canvas.height.is_multiple_of(2) {
            // We target yuv420p output for maximum player compatibility.
            return Err(SlidecastError::validation(
                "canvas width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        if job.fps.den != 1 {
            return Err(SlidecastError::validation(
                "mp4 rendering currently requires integer fps (fps.den == 1)",
            ));
        }
        if !self.cfg.overwrite && job.out_path.exists() {
            return Err(SlidecastError::validation(format!(
                "output file '{}' already exists",
                job.out_path.display()
            )));
        }
        Ok(())
    }

    fn spawn_encoder(&self, job: &RenderJob, duration_sec: f64) -> SlidecastResult<Child> {
        let mut cmd = Command::new("ffmpeg");
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        cmd.arg(if self.cfg.overwrite { "-y" } else { "-n" });
        cmd.args([
            "-loglevel",
            "error",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgba",
            "-s",
            &format!("{}x{}", job.canvas.width, job.canvas.height),
            "-r",
            &job.fps.num.to_string(),
            "-i",
            "pipe:0",
        ]);

        if let Some(audio) = &job.audio {
            cmd.arg("-i").arg(&audio.path);
            cmd.args(["-map", "0:v:0", "-map", "1:a:0", "-c:a", "aac"]);
            // Cap the output at the video duration: a longer audio track is
            // truncated, a shorter one simply ends early.
            cmd.args(["-t", &format!("{duration_sec:.3}")]);
        } else {
            cmd.arg("-an");
        }

        cmd.args([
            "-c:v",
            "libx264",
            "-pix_fmt",
            "yuv420p",
            "-movflags",
            "+faststart",
        ])
        .arg(&job.out_path);

        cmd.spawn().map_err(|e| {
            SlidecastError::render(format!(
                "failed to spawn ffmpeg (is it installed and on PATH?): {e}"
            ))
        })
    }
}

impl RenderDriver for FfmpegDriver {
    #[tracing::instrument(skip(self, job, on_progress), fields(out = %job.out_path.display()))]
    fn render(
        &mut self,
        job: &RenderJob,
        on_progress: &mut dyn FnMut(Progress),
    ) -> SlidecastResult<PathBuf> {
        self.validate_job(job)?;
        ensure_parent_dir(&job.out_path)?;
        if !is_ffmpeg_on_path() {
            return Err(SlidecastError::render(
                "ffmpeg is required for MP4 rendering, but was not found on PATH",
            ));
        }

        let duration_sec = job.duration_sec();
        let total_frames = job.fps.secs_to_frames_ceil(duration_sec);
        let frame_step = job.fps.frame_duration_secs();

        let mut child = ChildGuard::new(self.spawn_encoder(job, duration_sec)?);
        let mut stdin = child.take_stdin()?;
        let mut estimator = ProgressEstimator::new(total_frames);
        let started = Instant::now();

        for frame_index in 0..total_frames {
            let t_sec = frame_index as f64 * frame_step;
            let frame = composite_frame(job.canvas, job.background, &job.clips, t_sec)?;
            stdin.write_all(&frame).map_err(|e| {
                SlidecastError::render(format!("failed to write frame to ffmpeg stdin: {e}"))
            })?;
            on_progress(estimator.estimate(frame_index + 1, started.elapsed()));
        }

        drop(stdin);
        let output = child.finish()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SlidecastError::render(format!(
                "ffmpeg exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(job.out_path.clone())
    }
}

/// Turns frame counts and wall time into monotonic progress fractions plus
/// an estimated remaining time.
pub(crate) struct ProgressEstimator {
    total_frames: u64,
    last_fraction: f64,
}

impl ProgressEstimator {
    pub(crate) fn new(total_frames: u64) -> Self {
        Self {
            total_frames: total_frames.max(1),
            last_fraction: 0.0,
        }
    }

    pub(crate) fn estimate(&mut self, frames_done: u64, elapsed: Duration) -> Progress {
        let raw = frames_done as f64 / self.total_frames as f64;
        let fraction = raw.clamp(0.0, 1.0).max(self.last_fraction);
        self.last_fraction = fraction;

        let eta = if fraction > 0.0 {
            let elapsed_sec = elapsed.as_secs_f64();
            let remaining = (elapsed_sec / fraction - elapsed_sec).max(0.0);
            Duration::from_secs_f64(remaining)
        } else {
            Duration::ZERO
        };

        Progress { fraction, eta }
    }
}

/// Kills the encoder child on drop so no orphan process survives an error
/// path; `finish` detaches for the normal wait.
struct ChildGuard(Option<Child>);

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self(Some(child))
    }

    fn take_stdin(&mut self) -> SlidecastResult<ChildStdin> {
        self.0
            .as_mut()
            .and_then(|c| c.stdin.take())
            .ok_or_else(|| SlidecastError::render("failed to open ffmpeg stdin (unexpected)"))
    }

    fn finish(mut self) -> SlidecastResult<std::process::Output> {
        let child = self
            .0
            .take()
            .ok_or_else(|| SlidecastError::render("ffmpeg encoder is already finalized"))?;
        child
            .wait_with_output()
            .map_err(|e| SlidecastError::render(format!("failed to wait for ffmpeg: {e}")))
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Some(mut child) = self.0.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ffmpeg.rs"]
mod tests;
