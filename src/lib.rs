//! Slidecast is a slideshow-to-video composition engine.
//!
//! Slidecast turns an ordered list of still slides (decoded images or
//! solid-color cards, each with an optional text overlay) plus an optional
//! audio track into a single rendered video with timed transitions between
//! slides.
//!
//! # Pipeline overview
//!
//! 1. **Model**: [`Slide`] values describe one visual unit each (duration,
//!    transition, overlay). Construction validates the timing invariants.
//! 2. **Place**: [`build_uniform_timeline`] / [`build_explicit_timeline`]
//!    compute each slide's start time and the overlap with its predecessor,
//!    producing a [`Timeline`] of [`PositionedClip`]s.
//! 3. **Reconcile**: [`reconcile`] adjusts the timeline's total length
//!    against an independently measured audio duration by extending the
//!    final clip (audio shorter than video is truncated at encode time).
//! 4. **Render**: a [`RenderDriver`] consumes the prepared clips, sampling
//!    each clip's [`VisualTransform`] per frame instant. [`FfmpegDriver`]
//!    composites frames on the CPU and streams them to the system `ffmpeg`
//!    binary for MP4 output, reporting progress and an ETA.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: uniform-mode transition selection draws
//!   from an injectable [`RandomSource`], never from ambient randomness.
//! - **No hidden state**: each render request builds a fresh [`Timeline`]
//!   from an immutable slide snapshot; wizard-style UI state is the
//!   caller-owned [`WizardSession`] value object.
//! - **Premultiplied RGBA8** end-to-end in the CPU compositor.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod pipeline;
mod render;
mod slide;
mod timeline;

pub use assets::decode::{PreparedImage, decode_and_fit, solid_color_image};
pub use assets::media::{AudioSourceInfo, probe_audio};
pub use effects::transitions::{TransitionKind, VisualTransform, parse_transition, transform_at};
pub use foundation::core::{
    Affine, Canvas, DEFAULT_CANVAS, DEFAULT_FPS, Fps, Point, Rgb8, Vec2,
};
pub use foundation::error::{SlidecastError, SlidecastResult};
pub use pipeline::{
    RenderSettings, prepare_clips, render_custom, render_preview, render_quick,
};
pub use render::composite::{composite_frame, crossfade, over, over_in_place};
pub use render::driver::{Progress, RenderClip, RenderDriver, RenderJob, TextRasterizer};
pub use render::ffmpeg::{FfmpegConfig, FfmpegDriver, ensure_parent_dir, is_ffmpeg_on_path};
pub use slide::model::{
    DEFAULT_SLIDE_DURATION_SEC, DEFAULT_TRANSITION_DURATION_SEC, MAX_SLIDES,
    MAX_TRANSITION_DURATION_SEC, MIN_TRANSITION_DURATION_SEC, Slide, SlideVisual, TextOverlay,
    TransitionSpec,
};
pub use slide::session::{WizardSession, WizardStep};
pub use timeline::builder::{
    PositionedClip, Timeline, build_explicit_timeline, build_preview_timeline,
    build_uniform_timeline,
};
pub use timeline::random::{RandomSource, SplitMix64};
pub use timeline::reconcile::reconcile;
