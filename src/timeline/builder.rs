use std::sync::Arc;

use crate::{
    foundation::error::{SlidecastError, SlidecastResult},
    slide::model::{MAX_SLIDES, Slide, SlideVisual, TransitionSpec, clamp_transition_duration},
    timeline::random::RandomSource,
};

/// A slide placed on the timeline.
#[derive(Clone, Debug)]
pub struct PositionedClip {
    /// The placed slide (shared, read-only).
    pub slide: Arc<Slide>,
    /// Start time in seconds; non-decreasing across the sequence.
    pub start_sec: f64,
    /// Span this clip occupies on the render canvas. Equals the slide's own
    /// duration after building; reconciliation may extend it for the last
    /// clip only.
    pub effective_duration_sec: f64,
}

impl PositionedClip {
    /// End of this clip's span in seconds.
    pub fn end_sec(&self) -> f64 {
        self.start_sec + self.effective_duration_sec
    }

    /// Length of the overlap with the predecessor clip: the incoming
    /// transition window, zero for a cut.
    pub fn overlap_sec(&self) -> f64 {
        self.slide.transition.map_or(0.0, |tr| tr.duration_sec)
    }
}

/// Ordered placement of slides with computed start times.
///
/// Built fresh for each render request from an immutable slide list; never
/// mutated in place except by [`crate::reconcile`], which replaces the last
/// clip.
#[derive(Clone, Debug)]
pub struct Timeline {
    /// Positioned clips in playback order.
    pub clips: Vec<PositionedClip>,
}

impl Timeline {
    /// Total video duration: end of the last clip's span.
    pub fn duration_sec(&self) -> f64 {
        self.clips.last().map_or(0.0, PositionedClip::end_sec)
    }

    /// Number of clips.
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the timeline holds no clips.
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Build a timeline for quick generation: `N` slides share a target total
/// duration (the audio duration) with a fixed transition window and a
/// randomly selected transition kind per non-first slide.
///
/// With one visual the single clip simply spans the whole duration. With
/// more, each slide gets `d = (D + t·(N-1)) / N` seconds and starts at
/// `i·(d - t)`. Fails with
/// [`SlidecastError::InsufficientAudioDuration`] when `d` does not exceed
/// the transition window (many slides, short audio).
#[tracing::instrument(skip(visuals, rng), fields(slides = visuals.len()))]
pub fn build_uniform_timeline(
    visuals: &[SlideVisual],
    total_duration_sec: f64,
    transition_duration_sec: f64,
    rng: &mut dyn RandomSource,
) -> SlidecastResult<Timeline> {
    check_slide_count(visuals.len())?;
    if !total_duration_sec.is_finite() || total_duration_sec <= 0.0 {
        return Err(SlidecastError::validation(format!(
            "total duration must be finite and > 0, got {total_duration_sec}"
        )));
    }
    if !transition_duration_sec.is_finite() {
        return Err(SlidecastError::validation(
            "transition duration must be finite",
        ));
    }

    let n = visuals.len();
    if n == 1 {
        let slide = Slide::new(visuals[0].clone(), total_duration_sec, None, None)?;
        return Ok(Timeline {
            clips: vec![PositionedClip {
                slide: Arc::new(slide),
                start_sec: 0.0,
                effective_duration_sec: total_duration_sec,
            }],
        });
    }

    // Clamp up front so placement math and slide construction agree.
    let t = clamp_transition_duration(transition_duration_sec);
    let d = (total_duration_sec + t * (n as f64 - 1.0)) / n as f64;
    if d <= t {
        return Err(SlidecastError::insufficient_audio(format!(
            "{n} slides with {t}s transitions need more than {:.3}s of audio \
             (per-slide duration came out to {d:.3}s)",
            t * n as f64,
        )));
    }

    let mut clips = Vec::with_capacity(n);
    for (i, visual) in visuals.iter().enumerate() {
        let transition = if i == 0 {
            None
        } else {
            Some(TransitionSpec {
                kind: rng.pick_transition(),
                duration_sec: t,
            })
        };
        let slide = Slide::new(visual.clone(), d, transition, None)?;
        clips.push(PositionedClip {
            slide: Arc::new(slide),
            start_sec: i as f64 * (d - t),
            effective_duration_sec: d,
        });
    }
    Ok(Timeline { clips })
}

/// Build a timeline from slides that each carry their own duration and
/// transition: sequential placement where the incoming slide's transition
/// window determines how far it overlaps its predecessor.
///
/// The first slide's transition, if any, is ignored (there is nothing to
/// overlap). An incoming transition longer than the predecessor's screen
/// time would pull the start time backwards and is rejected.
#[tracing::instrument(skip(slides), fields(slides = slides.len()))]
pub fn build_explicit_timeline(slides: &[Arc<Slide>]) -> SlidecastResult<Timeline> {
    check_slide_count(slides.len())?;
    for slide in slides {
        slide.validate()?;
    }

    let mut clips: Vec<PositionedClip> = Vec::with_capacity(slides.len());
    for (i, slide) in slides.iter().enumerate() {
        let start_sec = match clips.last() {
            None => 0.0,
            Some(prev) => {
                let overlap = slide.transition.map_or(0.0, |tr| tr.duration_sec);
                if overlap > prev.slide.duration_sec {
                    return Err(SlidecastError::validation(format!(
                        "slide {i} transition ({overlap}s) exceeds the previous slide's \
                         duration ({}s)",
                        prev.slide.duration_sec
                    )));
                }
                prev.end_sec() - overlap
            }
        };
        clips.push(PositionedClip {
            slide: Arc::clone(slide),
            start_sec,
            effective_duration_sec: slide.duration_sec,
        });
    }
    Ok(Timeline { clips })
}

/// Build a short two-clip timeline previewing the incoming slide's
/// transition against its predecessor.
///
/// Both clips run `1.5·t` seconds where `t` is the incoming transition
/// window; the incoming clip starts at `0.5·t`, so the preview lasts `2·t`.
pub fn build_preview_timeline(prev: &Arc<Slide>, curr: &Arc<Slide>) -> SlidecastResult<Timeline> {
    let transition = curr.transition.ok_or_else(|| {
        SlidecastError::validation("preview requires the incoming slide to carry a transition")
    })?;
    let t = transition.duration_sec;
    let offset = 0.5 * t;
    let clip_duration = offset + t;

    let lead = Slide::new((*prev).visual.clone(), clip_duration, None, prev.text.clone())?;
    let incoming = Slide::new(
        (*curr).visual.clone(),
        clip_duration,
        Some(transition),
        curr.text.clone(),
    )?;

    Ok(Timeline {
        clips: vec![
            PositionedClip {
                slide: Arc::new(lead),
                start_sec: 0.0,
                effective_duration_sec: clip_duration,
            },
            PositionedClip {
                slide: Arc::new(incoming),
                start_sec: offset,
                effective_duration_sec: clip_duration,
            },
        ],
    })
}

fn check_slide_count(n: usize) -> SlidecastResult<()> {
    if n == 0 {
        return Err(SlidecastError::validation(
            "timeline needs at least one slide",
        ));
    }
    if n > MAX_SLIDES {
        return Err(SlidecastError::validation(format!(
            "timeline holds at most {MAX_SLIDES} slides, got {n}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
