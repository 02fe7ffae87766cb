use super::*;

use std::sync::Arc;

use crate::effects::transitions::TransitionKind;

fn solid(w: u32, h: u32) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![255u8; (w * h * 4) as usize]),
    }
}

fn clip(start_sec: f64, duration_sec: f64, transition_sec: Option<f64>) -> RenderClip {
    RenderClip {
        pixels: solid(4, 2),
        start_sec,
        duration_sec,
        transition: transition_sec.map(|t| TransitionSpec {
            kind: TransitionKind::Crossfade,
            duration_sec: t,
        }),
    }
}

fn job(clips: Vec<RenderClip>) -> RenderJob {
    RenderJob {
        canvas: Canvas {
            width: 4,
            height: 2,
        },
        fps: Fps { num: 24, den: 1 },
        clips,
        audio: None,
        background: Rgb8::BLACK,
        out_path: PathBuf::from("out/test.mp4"),
    }
}

#[test]
fn clip_activity_window_is_half_open() {
    let c = clip(2.0, 3.0, None);
    assert!(!c.is_active_at(1.999));
    assert!(c.is_active_at(2.0));
    assert!(c.is_active_at(4.999));
    assert!(!c.is_active_at(5.0));
}

#[test]
fn transform_is_identity_without_a_transition() {
    let c = clip(0.0, 3.0, None);
    let canvas = Canvas {
        width: 100,
        height: 50,
    };
    assert!(c.transform_at(0.0, canvas).is_identity());
    assert!(c.transform_at(1.5, canvas).is_identity());
}

#[test]
fn transform_samples_relative_to_the_clip_start() {
    let c = clip(10.0, 5.0, Some(1.0));
    let canvas = Canvas {
        width: 100,
        height: 50,
    };

    // Half a second after the clip starts, the crossfade is at 50%.
    let tr = c.transform_at(10.5, canvas);
    assert_eq!(tr.opacity, 0.5);

    // Past the window the clip has settled.
    assert!(c.transform_at(11.0, canvas).is_identity());
    assert!(c.transform_at(14.0, canvas).is_identity());
}

#[test]
fn job_duration_is_the_latest_clip_end() {
    let j = job(vec![clip(0.0, 5.0, None), clip(4.0, 5.0, Some(1.0))]);
    assert_eq!(j.duration_sec(), 9.0);

    let empty = job(vec![]);
    assert_eq!(empty.duration_sec(), 0.0);
}

#[test]
fn job_validation_requires_clips_and_a_real_canvas() {
    assert!(job(vec![]).validate().is_err());

    let mut j = job(vec![clip(0.0, 1.0, None)]);
    assert!(j.validate().is_ok());

    j.canvas.width = 0;
    assert!(j.validate().is_err());
}

#[test]
fn job_validation_rejects_bad_clip_timing() {
    let j = job(vec![clip(-1.0, 1.0, None)]);
    assert!(j.validate().is_err());

    let j = job(vec![clip(0.0, 0.0, None)]);
    assert!(j.validate().is_err());

    let j = job(vec![clip(0.0, f64::NAN, None)]);
    assert!(j.validate().is_err());
}
