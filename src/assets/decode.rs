use std::sync::Arc;

use anyhow::Context;

use crate::{
    foundation::core::{Canvas, Rgb8},
    foundation::error::{SlidecastError, SlidecastResult},
};

/// A decoded, canvas-sized pixel buffer shared read-only by slides.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Buffer width in pixels.
    pub width: u32,
    /// Buffer height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Whether this buffer exactly covers `canvas`.
    pub fn covers(&self, canvas: Canvas) -> bool {
        self.width == canvas.width && self.height == canvas.height
    }
}

/// Decode encoded image bytes and fit them onto a canvas-sized background.
///
/// The image is resized (Lanczos) to the largest size that preserves its
/// aspect ratio within the canvas, then pasted centered over `background`.
/// The result is always exactly canvas-sized.
pub fn decode_and_fit(
    bytes: &[u8],
    canvas: Canvas,
    background: Rgb8,
) -> SlidecastResult<PreparedImage> {
    if canvas.width == 0 || canvas.height == 0 {
        return Err(SlidecastError::validation(
            "canvas width/height must be > 0",
        ));
    }

    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (src_w, src_h) = rgba.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(SlidecastError::media("decoded image has a zero dimension"));
    }

    let (fit_w, fit_h) = fit_dimensions(src_w, src_h, canvas);
    let resized = if (fit_w, fit_h) == (src_w, src_h) {
        rgba
    } else {
        image::imageops::resize(&rgba, fit_w, fit_h, image::imageops::FilterType::Lanczos3)
    };

    let mut out = image::RgbaImage::from_pixel(
        canvas.width,
        canvas.height,
        image::Rgba(background.to_opaque_rgba8()),
    );
    let paste_x = i64::from((canvas.width - fit_w) / 2);
    let paste_y = i64::from((canvas.height - fit_h) / 2);
    image::imageops::overlay(&mut out, &resized, paste_x, paste_y);

    let mut rgba8_premul = out.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width: canvas.width,
        height: canvas.height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Rasterize a solid-color card covering the whole canvas.
pub fn solid_color_image(canvas: Canvas, color: Rgb8) -> PreparedImage {
    let px = color.to_opaque_rgba8();
    let mut buf = Vec::with_capacity((canvas.width * canvas.height * 4) as usize);
    for _ in 0..(canvas.width as usize * canvas.height as usize) {
        buf.extend_from_slice(&px);
    }
    PreparedImage {
        width: canvas.width,
        height: canvas.height,
        rgba8_premul: Arc::new(buf),
    }
}

/// Largest size that preserves `src` aspect ratio within the canvas.
pub(crate) fn fit_dimensions(src_w: u32, src_h: u32, canvas: Canvas) -> (u32, u32) {
    // Compare src_w/src_h against canvas.width/canvas.height without
    // dividing: wider-than-target means width-limited.
    let wider = u64::from(src_w) * u64::from(canvas.height)
        > u64::from(src_h) * u64::from(canvas.width);
    if wider {
        let h = (u64::from(canvas.width) * u64::from(src_h) + u64::from(src_w) / 2)
            / u64::from(src_w);
        (canvas.width, (h as u32).max(1))
    } else {
        let w = (u64::from(canvas.height) * u64::from(src_w) + u64::from(src_h) / 2)
            / u64::from(src_h);
        ((w as u32).max(1), canvas.height)
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 255 {
            continue;
        }
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
