use super::*;

fn red() -> Rgb8 {
    Rgb8::new(200, 30, 30)
}

#[test]
fn color_slide_constructs_with_positive_duration() {
    let slide = Slide::color(red(), DEFAULT_SLIDE_DURATION_SEC).unwrap();
    assert_eq!(slide.duration_sec, 3.0);
    assert!(slide.transition.is_none());
    assert!(slide.text.is_none());
}

#[test]
fn non_positive_or_non_finite_duration_is_invalid() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = Slide::color(red(), bad).unwrap_err();
        assert!(matches!(err, SlidecastError::InvalidSlide(_)));
    }
}

#[test]
fn transition_must_be_strictly_shorter_than_the_slide() {
    // A 2s slide cannot host a 2s transition, whatever the kind.
    for kind in TransitionKind::ALL {
        let err = Slide::color(red(), 2.0)
            .unwrap()
            .with_transition(kind, 2.0)
            .unwrap_err();
        assert!(matches!(err, SlidecastError::InvalidSlide(_)));
    }

    let ok = Slide::color(red(), 3.0)
        .unwrap()
        .with_transition(TransitionKind::Crossfade, 2.0)
        .unwrap();
    assert_eq!(ok.transition.unwrap().duration_sec, 2.0);
}

#[test]
fn with_transition_clamps_the_requested_window() {
    let slide = Slide::color(red(), 5.0)
        .unwrap()
        .with_transition(TransitionKind::ZoomIn, 0.1)
        .unwrap();
    assert_eq!(
        slide.transition.unwrap().duration_sec,
        MIN_TRANSITION_DURATION_SEC
    );

    let slide = Slide::color(red(), 5.0)
        .unwrap()
        .with_transition(TransitionKind::ZoomIn, 9.0)
        .unwrap();
    assert_eq!(
        slide.transition.unwrap().duration_sec,
        MAX_TRANSITION_DURATION_SEC
    );
}

#[test]
fn clamping_can_still_leave_an_invalid_pairing() {
    // 0.1 clamps up to 0.5, which does not fit a 0.4s slide.
    let err = Slide::color(red(), 0.4)
        .unwrap()
        .with_transition(TransitionKind::Crossfade, 0.1)
        .unwrap_err();
    assert!(matches!(err, SlidecastError::InvalidSlide(_)));
}

#[test]
fn direct_field_edits_are_caught_by_validate() {
    let mut slide = Slide::color(red(), 3.0)
        .unwrap()
        .with_transition(TransitionKind::Crossfade, 1.0)
        .unwrap();
    assert!(slide.validate().is_ok());

    slide.transition = Some(TransitionSpec {
        kind: TransitionKind::Crossfade,
        duration_sec: 3.0,
    });
    assert!(slide.validate().is_err());
}

#[test]
fn blank_text_overlay_is_rejected() {
    let err = Slide::color(red(), 3.0)
        .unwrap()
        .with_text("   ", Rgb8::WHITE)
        .unwrap_err();
    assert!(matches!(err, SlidecastError::InvalidSlide(_)));

    let ok = Slide::color(red(), 3.0)
        .unwrap()
        .with_text("Chapter One", Rgb8::WHITE)
        .unwrap();
    assert_eq!(ok.text.unwrap().text, "Chapter One");
}

#[test]
fn transition_spec_new_clamps() {
    let spec = TransitionSpec::new(TransitionKind::SpinIn, 10.0);
    assert_eq!(spec.duration_sec, MAX_TRANSITION_DURATION_SEC);
    let spec = TransitionSpec::new(TransitionKind::SpinIn, 0.0);
    assert_eq!(spec.duration_sec, MIN_TRANSITION_DURATION_SEC);
}
