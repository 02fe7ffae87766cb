use std::{path::PathBuf, sync::Arc};

use crate::{
    assets::decode::{PreparedImage, solid_color_image},
    assets::media::AudioSourceInfo,
    foundation::core::{Canvas, DEFAULT_CANVAS, DEFAULT_FPS, Fps, Rgb8},
    foundation::error::SlidecastResult,
    render::driver::{Progress, RenderClip, RenderDriver, RenderJob, TextRasterizer},
    slide::model::{DEFAULT_TRANSITION_DURATION_SEC, Slide, SlideVisual},
    timeline::builder::{
        Timeline, build_explicit_timeline, build_preview_timeline, build_uniform_timeline,
    },
    timeline::random::RandomSource,
    timeline::reconcile::reconcile,
};

/// Output settings shared by the render entry points.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Output canvas dimensions.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Background color for letterboxing and alpha flattening.
    pub background: Rgb8,
    /// Output file path.
    pub out_path: PathBuf,
}

impl RenderSettings {
    /// Settings with project defaults (1920x1080 at 24 fps over black).
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            canvas: DEFAULT_CANVAS,
            fps: DEFAULT_FPS,
            background: Rgb8::BLACK,
            out_path: out_path.into(),
        }
    }
}

/// Materialize a timeline's clips for a render driver: solid-color cards
/// are rasterized, text overlays drawn through the optional rasterizer, and
/// the first clip's transition dropped (it has no predecessor to overlap).
pub fn prepare_clips(
    timeline: &Timeline,
    canvas: Canvas,
    text: Option<&dyn TextRasterizer>,
) -> SlidecastResult<Vec<RenderClip>> {
    let mut clips = Vec::with_capacity(timeline.len());
    for (i, positioned) in timeline.clips.iter().enumerate() {
        let slide = positioned.slide.as_ref();
        let mut pixels = match &slide.visual {
            SlideVisual::Image(image) => image.clone(),
            SlideVisual::SolidColor(color) => solid_color_image(canvas, *color),
        };

        if let (Some(overlay), Some(rasterizer)) = (&slide.text, text) {
            let mut buf = (*pixels.rgba8_premul).clone();
            rasterizer.draw_centered_text(
                pixels.width,
                pixels.height,
                &mut buf,
                &overlay.text,
                overlay.color,
            )?;
            pixels = PreparedImage {
                width: pixels.width,
                height: pixels.height,
                rgba8_premul: Arc::new(buf),
            };
        }

        clips.push(RenderClip {
            pixels,
            start_sec: positioned.start_sec,
            duration_sec: positioned.effective_duration_sec,
            transition: if i == 0 { None } else { slide.transition },
        });
    }
    Ok(clips)
}

/// Quick generation: spread the visuals uniformly across the audio track's
/// duration with randomly chosen transitions, then render with the audio
/// attached.
#[tracing::instrument(skip_all, fields(slides = visuals.len(), out = %settings.out_path.display()))]
pub fn render_quick(
    visuals: &[SlideVisual],
    audio: &AudioSourceInfo,
    settings: &RenderSettings,
    rng: &mut dyn RandomSource,
    driver: &mut dyn RenderDriver,
    text: Option<&dyn TextRasterizer>,
    on_progress: &mut dyn FnMut(Progress),
) -> SlidecastResult<PathBuf> {
    let timeline = build_uniform_timeline(
        visuals,
        audio.duration_sec,
        DEFAULT_TRANSITION_DURATION_SEC,
        rng,
    )?;
    // Uniform placement already matches the audio duration; reconciling
    // absorbs any float drift from the per-slide division.
    let timeline = reconcile(timeline, Some(audio.duration_sec))?;
    render_timeline(&timeline, Some(audio.clone()), settings, driver, text, on_progress)
}

/// Custom generation: place slides that carry their own durations and
/// transitions, reconcile against the optional audio track, and render.
#[tracing::instrument(skip_all, fields(slides = slides.len(), out = %settings.out_path.display()))]
pub fn render_custom(
    slides: &[Arc<Slide>],
    audio: Option<&AudioSourceInfo>,
    settings: &RenderSettings,
    driver: &mut dyn RenderDriver,
    text: Option<&dyn TextRasterizer>,
    on_progress: &mut dyn FnMut(Progress),
) -> SlidecastResult<PathBuf> {
    let timeline = build_explicit_timeline(slides)?;
    let timeline = reconcile(timeline, audio.map(|a| a.duration_sec))?;
    render_timeline(&timeline, audio.cloned(), settings, driver, text, on_progress)
}

/// Render a short audio-less preview of one transition between two slides.
#[tracing::instrument(skip_all, fields(out = %settings.out_path.display()))]
pub fn render_preview(
    prev: &Arc<Slide>,
    curr: &Arc<Slide>,
    settings: &RenderSettings,
    driver: &mut dyn RenderDriver,
    text: Option<&dyn TextRasterizer>,
    on_progress: &mut dyn FnMut(Progress),
) -> SlidecastResult<PathBuf> {
    let timeline = build_preview_timeline(prev, curr)?;
    render_timeline(&timeline, None, settings, driver, text, on_progress)
}

fn render_timeline(
    timeline: &Timeline,
    audio: Option<AudioSourceInfo>,
    settings: &RenderSettings,
    driver: &mut dyn RenderDriver,
    text: Option<&dyn TextRasterizer>,
    on_progress: &mut dyn FnMut(Progress),
) -> SlidecastResult<PathBuf> {
    let clips = prepare_clips(timeline, settings.canvas, text)?;
    let job = RenderJob {
        canvas: settings.canvas,
        fps: settings.fps,
        clips,
        audio,
        background: settings.background,
        out_path: settings.out_path.clone(),
    };
    driver.render(&job, on_progress)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
