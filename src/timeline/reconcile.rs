use std::sync::Arc;

use crate::{
    foundation::error::{SlidecastError, SlidecastResult},
    timeline::builder::Timeline,
};

/// Reconcile a built timeline against an independently measured audio
/// duration.
///
/// - No audio: the timeline stands.
/// - Audio no longer than the video: the timeline stands; the audio is
///   truncated to the video's length at encode time (video duration is
///   authoritative).
/// - Audio longer than the video: the last clip alone is extended so the
///   total duration becomes exactly the audio duration. Its start time and
///   transition-in toward the predecessor are untouched; only its trailing
///   screen time grows. This is a one-shot adjustment, never a reflow of
///   earlier clips.
#[tracing::instrument(skip(timeline), fields(clips = timeline.len()))]
pub fn reconcile(
    mut timeline: Timeline,
    audio_duration_sec: Option<f64>,
) -> SlidecastResult<Timeline> {
    if timeline.is_empty() {
        return Err(SlidecastError::validation(
            "cannot reconcile an empty timeline",
        ));
    }
    let Some(audio_sec) = audio_duration_sec else {
        return Ok(timeline);
    };
    if !audio_sec.is_finite() || audio_sec < 0.0 {
        return Err(SlidecastError::validation(format!(
            "audio duration must be finite and >= 0, got {audio_sec}"
        )));
    }
    if audio_sec <= timeline.duration_sec() {
        return Ok(timeline);
    }

    // Solve for the exact total rather than adding a computed diff, so the
    // new duration_sec() equals audio_sec without float drift.
    let last = timeline
        .clips
        .last_mut()
        .ok_or_else(|| SlidecastError::validation("cannot reconcile an empty timeline"))?;
    let extended_sec = audio_sec - last.start_sec;
    let mut slide = (*last.slide).clone();
    slide.duration_sec = extended_sec;
    slide.validate()?;
    last.slide = Arc::new(slide);
    last.effective_duration_sec = extended_sec;
    Ok(timeline)
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/reconcile.rs"]
mod tests;
