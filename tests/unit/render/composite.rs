use super::*;

use std::sync::Arc;

use crate::{
    effects::transitions::TransitionKind,
    foundation::core::Vec2,
    slide::model::TransitionSpec,
};

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas {
        width: w,
        height: h,
    }
}

fn solid(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(px.repeat((w * h) as usize)),
    }
}

fn clip_at(pixels: PreparedImage, start_sec: f64, duration_sec: f64) -> RenderClip {
    RenderClip {
        pixels,
        start_sec,
        duration_sec,
        transition: None,
    }
}

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = [10, 20, 30, 40];
    let src = [255, 255, 255, 0];
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_scaled_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_half_opacity_halves_an_opaque_source_onto_black() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    let out = over(dst, src, 0.5);
    assert!(out[0] >= 126 && out[0] <= 129, "r = {}", out[0]);
    assert_eq!(out[3], 255);
}

#[test]
fn crossfade_t_0_is_a_and_t_1_is_b() {
    let a = [10, 20, 30, 40];
    let b = [200, 210, 220, 230];
    assert_eq!(crossfade(a, b, 0.0), a);
    assert_eq!(crossfade(a, b, 1.0), b);
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(over_in_place(&mut dst, &[0u8; 8], 1.0).is_ok());
}

#[test]
fn frame_with_no_active_clip_is_the_background() {
    let cv = canvas(4, 2);
    let clips = [clip_at(solid(4, 2, [255, 255, 255, 255]), 5.0, 1.0)];
    let frame = composite_frame(cv, Rgb8::new(0, 0, 255), &clips, 0.0).unwrap();

    assert_eq!(frame.len(), 4 * 2 * 4);
    for px in frame.chunks_exact(4) {
        assert_eq!(px, &[0, 0, 255, 255]);
    }
}

#[test]
fn active_canvas_sized_clip_replaces_the_background() {
    let cv = canvas(4, 2);
    let clips = [clip_at(solid(4, 2, [255, 0, 0, 255]), 0.0, 1.0)];
    let frame = composite_frame(cv, Rgb8::BLACK, &clips, 0.5).unwrap();
    for px in frame.chunks_exact(4) {
        assert_eq!(px, &[255, 0, 0, 255]);
    }
}

#[test]
fn clip_end_is_exclusive() {
    let cv = canvas(2, 2);
    let clips = [clip_at(solid(2, 2, [255, 0, 0, 255]), 0.0, 1.0)];
    let frame = composite_frame(cv, Rgb8::BLACK, &clips, 1.0).unwrap();
    for px in frame.chunks_exact(4) {
        assert_eq!(px, &[0, 0, 0, 255]);
    }
}

#[test]
fn crossfading_clip_blends_with_what_is_underneath() {
    let cv = canvas(2, 2);
    let base = clip_at(solid(2, 2, [0, 0, 0, 255]), 0.0, 2.0);
    let incoming = RenderClip {
        pixels: solid(2, 2, [255, 0, 0, 255]),
        start_sec: 1.0,
        duration_sec: 2.0,
        transition: Some(TransitionSpec {
            kind: TransitionKind::Crossfade,
            duration_sec: 1.0,
        }),
    };

    // Halfway through the transition the red clip sits at 50% opacity.
    let frame = composite_frame(cv, Rgb8::BLACK, &[base, incoming], 1.5).unwrap();
    let px = &frame[0..4];
    assert!(px[0] >= 126 && px[0] <= 129, "r = {}", px[0]);
    assert_eq!(px[1], 0);
    assert_eq!(px[3], 255);
}

#[test]
fn offset_clip_leaves_the_vacated_area_to_the_background() {
    let cv = canvas(4, 2);
    let mut clip = clip_at(solid(4, 2, [255, 255, 255, 255]), 0.0, 1.0);
    clip.transition = Some(TransitionSpec {
        kind: TransitionKind::SlideLeft,
        duration_sec: 1.0,
    });

    // At t = 0 the clip is fully offscreen to the right.
    let frame = composite_frame(cv, Rgb8::BLACK, &[clip.clone()], 0.0).unwrap();
    for px in frame.chunks_exact(4) {
        assert_eq!(px, &[0, 0, 0, 255]);
    }

    // Halfway in, the left half of the canvas is still background.
    let frame = composite_frame(cv, Rgb8::BLACK, &[clip], 0.5).unwrap();
    assert_eq!(&frame[0..4], &[0, 0, 0, 255]);
    let right = (3 * 4) as usize;
    assert_eq!(&frame[right..right + 4], &[255, 255, 255, 255]);
}

#[test]
fn zoom_start_shrinks_the_clip_to_the_center() {
    let cv = canvas(4, 4);
    let mut zooming = clip_at(solid(4, 4, [255, 255, 255, 255]), 0.0, 1.0);
    zooming.transition = Some(TransitionSpec {
        kind: TransitionKind::ZoomIn,
        duration_sec: 1.0,
    });
    let frame = composite_frame(cv, Rgb8::BLACK, &[zooming], 0.0).unwrap();
    // At 10% scale only the very center can be white.
    assert_eq!(&frame[0..4], &[0, 0, 0, 255]);
}

#[test]
fn buffer_length_mismatch_is_reported() {
    let cv = canvas(2, 2);
    let broken = RenderClip {
        pixels: PreparedImage {
            width: 2,
            height: 2,
            rgba8_premul: Arc::new(vec![0u8; 7]),
        },
        start_sec: 0.0,
        duration_sec: 1.0,
        transition: None,
    };
    assert!(composite_frame(cv, Rgb8::BLACK, &[broken], 0.5).is_err());
}

#[test]
fn vec2_offset_math_matches_the_slide_travel() {
    // Slide-left travel: full canvas width at progress 0.
    let tr = crate::effects::transitions::transform_at(
        TransitionKind::SlideLeft,
        0.0,
        1.0,
        canvas(100, 50),
    );
    assert_eq!(tr.offset, Vec2::new(100.0, 0.0));
}
