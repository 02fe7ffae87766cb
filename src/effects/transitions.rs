use crate::{
    foundation::core::{Canvas, Vec2},
    foundation::error::{SlidecastError, SlidecastResult},
    foundation::math::lerp,
};

/// Transition effect applied while an incoming slide overlaps its
/// predecessor's tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Opacity ramps from 0 to 1.
    Crossfade,
    /// Slides in from the right edge, moving left.
    SlideLeft,
    /// Slides in from the left edge, moving right.
    SlideRight,
    /// Slides in from the bottom edge, moving up.
    SlideUp,
    /// Slides in from the top edge, moving down.
    SlideDown,
    /// Scales up from 10% to full size.
    ZoomIn,
    /// One full rotation combined with the zoom-in scale ramp.
    SpinIn,
}

impl TransitionKind {
    /// Every transition kind, in canonical order. Uniform-mode random
    /// selection draws from this set.
    pub const ALL: [TransitionKind; 7] = [
        TransitionKind::Crossfade,
        TransitionKind::SlideLeft,
        TransitionKind::SlideRight,
        TransitionKind::SlideUp,
        TransitionKind::SlideDown,
        TransitionKind::ZoomIn,
        TransitionKind::SpinIn,
    ];

    /// Canonical snake_case identifier for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionKind::Crossfade => "crossfade",
            TransitionKind::SlideLeft => "slide_left",
            TransitionKind::SlideRight => "slide_right",
            TransitionKind::SlideUp => "slide_up",
            TransitionKind::SlideDown => "slide_down",
            TransitionKind::ZoomIn => "zoom_in",
            TransitionKind::SpinIn => "spin_in",
        }
    }
}

/// Parse a transition kind identifier. `"none"` (or an empty string) maps to
/// `None`, meaning the slide cuts in with no effect.
pub fn parse_transition(kind: &str) -> SlidecastResult<Option<TransitionKind>> {
    let kind = kind.trim().to_ascii_lowercase();
    match kind.as_str() {
        "" | "none" => Ok(None),
        "crossfade" => Ok(Some(TransitionKind::Crossfade)),
        "slide_left" => Ok(Some(TransitionKind::SlideLeft)),
        "slide_right" => Ok(Some(TransitionKind::SlideRight)),
        "slide_up" => Ok(Some(TransitionKind::SlideUp)),
        "slide_down" => Ok(Some(TransitionKind::SlideDown)),
        "zoom_in" => Ok(Some(TransitionKind::ZoomIn)),
        "spin_in" => Ok(Some(TransitionKind::SpinIn)),
        _ => Err(SlidecastError::validation(format!(
            "unknown transition kind '{kind}'"
        ))),
    }
}

/// Per-instant visual state of a clip during (and after) its transition
/// window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualTransform {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Canvas-space offset from the clip's resting position, in pixels.
    pub offset: Vec2,
    /// Uniform scale factor about the clip center.
    pub scale: f64,
    /// Rotation about the clip center, in degrees.
    pub rotation_deg: f64,
}

impl VisualTransform {
    /// Steady state a clip settles into once its transition window ends:
    /// full opacity, no offset, unit scale, no rotation.
    pub const IDENTITY: Self = Self {
        opacity: 1.0,
        offset: Vec2::ZERO,
        scale: 1.0,
        rotation_deg: 0.0,
    };

    /// Whether this transform is exactly the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Sample the visual transform for `kind` at `elapsed_sec` into a transition
/// window of `transition_duration_sec`.
///
/// For `elapsed_sec >= transition_duration_sec` every kind returns
/// [`VisualTransform::IDENTITY`]; a zero-length window is an immediate
/// identity (no division occurs).
pub fn transform_at(
    kind: TransitionKind,
    elapsed_sec: f64,
    transition_duration_sec: f64,
    canvas: Canvas,
) -> VisualTransform {
    if !(transition_duration_sec > 0.0) || elapsed_sec >= transition_duration_sec {
        return VisualTransform::IDENTITY;
    }
    let progress = (elapsed_sec / transition_duration_sec).clamp(0.0, 1.0);
    let width = f64::from(canvas.width);
    let height = f64::from(canvas.height);

    match kind {
        TransitionKind::Crossfade => VisualTransform {
            opacity: progress,
            ..VisualTransform::IDENTITY
        },
        TransitionKind::SlideLeft => VisualTransform {
            offset: Vec2::new(lerp(width, 0.0, progress), 0.0),
            ..VisualTransform::IDENTITY
        },
        TransitionKind::SlideRight => VisualTransform {
            offset: Vec2::new(lerp(-width, 0.0, progress), 0.0),
            ..VisualTransform::IDENTITY
        },
        TransitionKind::SlideUp => VisualTransform {
            offset: Vec2::new(0.0, lerp(height, 0.0, progress)),
            ..VisualTransform::IDENTITY
        },
        TransitionKind::SlideDown => VisualTransform {
            offset: Vec2::new(0.0, lerp(-height, 0.0, progress)),
            ..VisualTransform::IDENTITY
        },
        TransitionKind::ZoomIn => VisualTransform {
            scale: zoom_scale(progress),
            ..VisualTransform::IDENTITY
        },
        TransitionKind::SpinIn => VisualTransform {
            scale: zoom_scale(progress),
            rotation_deg: 360.0 * progress,
            ..VisualTransform::IDENTITY
        },
    }
}

fn zoom_scale(progress: f64) -> f64 {
    (0.1 + 0.9 * progress).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
