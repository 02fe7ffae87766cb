use rayon::prelude::*;

use crate::{
    assets::decode::PreparedImage,
    effects::transitions::VisualTransform,
    foundation::core::{Affine, Canvas, Point, Rgb8},
    foundation::error::{SlidecastError, SlidecastResult},
    foundation::math::mul_div255_u8,
    render::driver::RenderClip,
};

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over composite of premultiplied pixels with an extra opacity
/// factor on the source.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Linear blend of two premultiplied pixels; `t = 0` yields `a`, `t = 1`
/// yields `b`.
pub fn crossfade(a: PremulRgba8, b: PremulRgba8, t: f32) -> PremulRgba8 {
    let t = t.clamp(0.0, 1.0);
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let av = mul_div255_u8(u16::from(a[i]), it);
        let bv = mul_div255_u8(u16::from(b[i]), tt);
        out[i] = av.saturating_add(bv);
    }
    out
}

/// Source-over composite of a whole buffer onto `dst` with a uniform
/// opacity. Both buffers must be equal-length RGBA8.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> SlidecastResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SlidecastError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite every clip active at timeline instant `t_sec` over an opaque
/// background, in playback order. Returns an opaque premultiplied RGBA8
/// frame of exactly `canvas` size.
pub fn composite_frame(
    canvas: Canvas,
    background: Rgb8,
    clips: &[RenderClip],
    t_sec: f64,
) -> SlidecastResult<Vec<u8>> {
    let px = background.to_opaque_rgba8();
    let len = canvas.width as usize * canvas.height as usize * 4;
    let mut frame = Vec::with_capacity(len);
    for _ in 0..len / 4 {
        frame.extend_from_slice(&px);
    }

    for clip in clips.iter().filter(|c| c.is_active_at(t_sec)) {
        let tr = clip.transform_at(t_sec, canvas);
        draw_clip(&mut frame, canvas, &clip.pixels, tr)?;
    }
    Ok(frame)
}

/// Draw a prepared buffer onto the frame under a visual transform.
///
/// The buffer rests centered on the canvas; offset, scale, and rotation are
/// applied about the buffer center. The identity transform on a
/// canvas-sized buffer takes a per-pixel fast path.
fn draw_clip(
    dst: &mut [u8],
    canvas: Canvas,
    img: &PreparedImage,
    tr: VisualTransform,
) -> SlidecastResult<()> {
    if tr.opacity <= 0.0 {
        return Ok(());
    }
    if img.rgba8_premul.len() != img.width as usize * img.height as usize * 4 {
        return Err(SlidecastError::render(
            "prepared image buffer length mismatch with width*height*4",
        ));
    }

    let geometry_is_identity =
        tr.offset.x == 0.0 && tr.offset.y == 0.0 && tr.scale == 1.0 && tr.rotation_deg == 0.0;
    if geometry_is_identity && img.covers(canvas) {
        return over_in_place(dst, &img.rgba8_premul, tr.opacity as f32);
    }

    // Degenerate scale collapses the clip to nothing; skip rather than
    // invert a singular matrix.
    if tr.scale.abs() < 1e-6 {
        return Ok(());
    }

    let canvas_center = canvas.center();
    let img_center = Point::new(f64::from(img.width) / 2.0, f64::from(img.height) / 2.0);
    let forward = Affine::translate(tr.offset)
        * Affine::translate(canvas_center.to_vec2())
        * Affine::rotate(tr.rotation_deg.to_radians())
        * Affine::scale(tr.scale)
        * Affine::translate(-img_center.to_vec2());
    let inverse = forward.inverse();

    let stride = canvas.width as usize * 4;
    let opacity = tr.opacity as f32;
    let src = img.rgba8_premul.as_slice();
    let (img_w, img_h) = (i64::from(img.width), i64::from(img.height));

    dst.par_chunks_exact_mut(stride)
        .enumerate()
        .for_each(|(y, row)| {
            for x in 0..canvas.width as usize {
                let p = inverse * Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let sx = p.x.floor() as i64;
                let sy = p.y.floor() as i64;
                if sx < 0 || sy < 0 || sx >= img_w || sy >= img_h {
                    continue;
                }
                let si = (sy as usize * img.width as usize + sx as usize) * 4;
                let di = x * 4;
                let out = over(
                    [row[di], row[di + 1], row[di + 2], row[di + 3]],
                    [src[si], src[si + 1], src[si + 2], src[si + 3]],
                    opacity,
                );
                row[di..di + 4].copy_from_slice(&out);
            }
        });

    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
