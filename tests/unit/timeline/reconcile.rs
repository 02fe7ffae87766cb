use super::*;

use crate::{
    effects::transitions::TransitionKind,
    foundation::core::Rgb8,
    slide::model::Slide,
    timeline::builder::build_explicit_timeline,
};

fn two_slide_timeline() -> Timeline {
    // Starts 0 and 4, total 9.
    let a = Arc::new(Slide::color(Rgb8::BLACK, 5.0).unwrap());
    let b = Arc::new(
        Slide::color(Rgb8::WHITE, 5.0)
            .unwrap()
            .with_transition(TransitionKind::Crossfade, 1.0)
            .unwrap(),
    );
    build_explicit_timeline(&[a, b]).unwrap()
}

#[test]
fn longer_audio_extends_only_the_last_clip() {
    let timeline = reconcile(two_slide_timeline(), Some(12.0)).unwrap();

    assert_eq!(timeline.clips[0].start_sec, 0.0);
    assert_eq!(timeline.clips[0].effective_duration_sec, 5.0);
    assert_eq!(timeline.clips[1].start_sec, 4.0);
    assert_eq!(timeline.clips[1].effective_duration_sec, 8.0);
    assert_eq!(timeline.clips[1].slide.duration_sec, 8.0);
    assert_eq!(timeline.duration_sec(), 12.0);
}

#[test]
fn extension_leaves_the_transition_untouched() {
    let timeline = reconcile(two_slide_timeline(), Some(12.0)).unwrap();
    let tr = timeline.clips[1].slide.transition.unwrap();
    assert_eq!(tr.kind, TransitionKind::Crossfade);
    assert_eq!(tr.duration_sec, 1.0);
    assert!(timeline.clips[1].slide.validate().is_ok());
}

#[test]
fn shorter_audio_never_shrinks_the_video() {
    let timeline = reconcile(two_slide_timeline(), Some(6.0)).unwrap();
    assert_eq!(timeline.duration_sec(), 9.0);
    assert_eq!(timeline.clips[1].effective_duration_sec, 5.0);
}

#[test]
fn equal_durations_are_left_alone() {
    let timeline = reconcile(two_slide_timeline(), Some(9.0)).unwrap();
    assert_eq!(timeline.duration_sec(), 9.0);
}

#[test]
fn no_audio_is_a_passthrough() {
    let timeline = reconcile(two_slide_timeline(), None).unwrap();
    assert_eq!(timeline.duration_sec(), 9.0);
}

#[test]
fn single_clip_extension_needs_no_predecessor_work() {
    let only = Arc::new(Slide::color(Rgb8::BLACK, 3.0).unwrap());
    let timeline = build_explicit_timeline(&[only]).unwrap();
    let timeline = reconcile(timeline, Some(7.5)).unwrap();
    assert_eq!(timeline.clips[0].start_sec, 0.0);
    assert_eq!(timeline.clips[0].effective_duration_sec, 7.5);
    assert_eq!(timeline.duration_sec(), 7.5);
}

#[test]
fn reconciled_total_is_exact_not_approximate() {
    let visuals: Vec<_> = (0..7)
        .map(|_| crate::slide::model::SlideVisual::SolidColor(Rgb8::BLACK))
        .collect();
    let mut rng = crate::timeline::random::SplitMix64::new(5);
    let timeline =
        crate::timeline::builder::build_uniform_timeline(&visuals, 20.0, 1.0, &mut rng).unwrap();
    // Uniform placement accumulates float error; reconciling against a
    // longer audio figure lands exactly on it.
    let timeline = reconcile(timeline, Some(25.0)).unwrap();
    assert_eq!(timeline.duration_sec(), 25.0);
}

#[test]
fn empty_timeline_is_rejected() {
    let err = reconcile(Timeline { clips: vec![] }, Some(5.0)).unwrap_err();
    assert!(matches!(err, SlidecastError::Validation(_)));
}

#[test]
fn invalid_audio_duration_is_rejected() {
    assert!(reconcile(two_slide_timeline(), Some(f64::NAN)).is_err());
    assert!(reconcile(two_slide_timeline(), Some(-1.0)).is_err());
}
