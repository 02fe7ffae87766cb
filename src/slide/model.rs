use crate::{
    assets::decode::PreparedImage,
    effects::transitions::TransitionKind,
    foundation::core::Rgb8,
    foundation::error::{SlidecastError, SlidecastResult},
};

/// Default screen time for a newly authored slide.
pub const DEFAULT_SLIDE_DURATION_SEC: f64 = 3.0;

/// Default transition window length, used by quick (uniform) generation.
pub const DEFAULT_TRANSITION_DURATION_SEC: f64 = 1.0;

/// Shortest allowed transition window.
pub const MIN_TRANSITION_DURATION_SEC: f64 = 0.5;

/// Longest allowed transition window.
pub const MAX_TRANSITION_DURATION_SEC: f64 = 2.0;

/// Upper bound on slides per timeline.
pub const MAX_SLIDES: usize = 100;

/// Visual content of one slide.
///
/// Pixel data is owned and decoded by [`crate::decode_and_fit`]; slides hold
/// a cheaply clonable read-only reference.
#[derive(Clone, Debug)]
pub enum SlideVisual {
    /// A decoded, canvas-fitted raster image.
    Image(PreparedImage),
    /// A solid-color card, rasterized lazily at render time.
    SolidColor(Rgb8),
}

/// Optional text drawn centered over a slide; purely a render attribute,
/// never involved in timing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextOverlay {
    /// UTF-8 text content.
    pub text: String,
    /// Text color.
    pub color: Rgb8,
}

/// Transition-in specification carried by a slide.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSpec {
    /// Effect kind.
    pub kind: TransitionKind,
    /// Window length in seconds, within
    /// `[MIN_TRANSITION_DURATION_SEC, MAX_TRANSITION_DURATION_SEC]`.
    pub duration_sec: f64,
}

impl TransitionSpec {
    /// Construct a spec, clamping the duration into the allowed range.
    pub fn new(kind: TransitionKind, duration_sec: f64) -> Self {
        Self {
            kind,
            duration_sec: clamp_transition_duration(duration_sec),
        }
    }
}

/// Clamp a requested transition duration into the allowed range.
pub(crate) fn clamp_transition_duration(duration_sec: f64) -> f64 {
    duration_sec.clamp(MIN_TRANSITION_DURATION_SEC, MAX_TRANSITION_DURATION_SEC)
}

/// One immutable visual unit of a slideshow.
///
/// Invariant: `duration_sec > 0`, and when a transition is present its
/// window is strictly shorter than the slide's own screen time. [`Slide::new`]
/// and the `with_*` builders enforce this; code that mutates the public
/// fields directly must call [`Slide::validate`] before handing the slide to
/// a timeline builder (the builders re-validate regardless).
#[derive(Clone, Debug)]
pub struct Slide {
    /// Visual content.
    pub visual: SlideVisual,
    /// Own screen time in seconds, before transition overlap is subtracted.
    pub duration_sec: f64,
    /// Optional transition-in; `None` means the slide cuts in. Ignored for
    /// the first slide of a timeline.
    pub transition: Option<TransitionSpec>,
    /// Optional centered text overlay.
    pub text: Option<TextOverlay>,
}

impl Slide {
    /// Construct and validate a slide.
    pub fn new(
        visual: SlideVisual,
        duration_sec: f64,
        transition: Option<TransitionSpec>,
        text: Option<TextOverlay>,
    ) -> SlidecastResult<Self> {
        let slide = Self {
            visual,
            duration_sec,
            transition,
            text,
        };
        slide.validate()?;
        Ok(slide)
    }

    /// Convenience constructor for an image slide with no transition.
    pub fn image(image: PreparedImage, duration_sec: f64) -> SlidecastResult<Self> {
        Self::new(SlideVisual::Image(image), duration_sec, None, None)
    }

    /// Convenience constructor for a solid-color card with no transition.
    pub fn color(color: Rgb8, duration_sec: f64) -> SlidecastResult<Self> {
        Self::new(SlideVisual::SolidColor(color), duration_sec, None, None)
    }

    /// Attach a transition (duration clamped to the allowed range), then
    /// re-validate against this slide's screen time.
    pub fn with_transition(
        mut self,
        kind: TransitionKind,
        duration_sec: f64,
    ) -> SlidecastResult<Self> {
        self.transition = Some(TransitionSpec::new(kind, duration_sec));
        self.validate()?;
        Ok(self)
    }

    /// Attach a centered text overlay.
    pub fn with_text(mut self, text: impl Into<String>, color: Rgb8) -> SlidecastResult<Self> {
        self.text = Some(TextOverlay {
            text: text.into(),
            color,
        });
        self.validate()?;
        Ok(self)
    }

    /// Check the slide timing invariants.
    pub fn validate(&self) -> SlidecastResult<()> {
        if !self.duration_sec.is_finite() || self.duration_sec <= 0.0 {
            return Err(SlidecastError::invalid_slide(format!(
                "slide duration must be finite and > 0, got {}",
                self.duration_sec
            )));
        }
        if let Some(tr) = &self.transition {
            if !tr.duration_sec.is_finite()
                || tr.duration_sec < MIN_TRANSITION_DURATION_SEC
                || tr.duration_sec > MAX_TRANSITION_DURATION_SEC
            {
                return Err(SlidecastError::invalid_slide(format!(
                    "transition duration must be within [{MIN_TRANSITION_DURATION_SEC}, \
                     {MAX_TRANSITION_DURATION_SEC}] seconds, got {}",
                    tr.duration_sec
                )));
            }
            if tr.duration_sec >= self.duration_sec {
                return Err(SlidecastError::invalid_slide(format!(
                    "transition duration {}s must be strictly shorter than slide duration {}s",
                    tr.duration_sec, self.duration_sec
                )));
            }
        }
        if let Some(overlay) = &self.text
            && overlay.text.trim().is_empty()
        {
            return Err(SlidecastError::invalid_slide(
                "text overlay must be non-empty when set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slide/model.rs"]
mod tests;
