use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::foundation::error::{ThumbError, ThumbResult};
use crate::render::FrameRGBA;

/// MIME type of every export.
pub const EXPORT_MIME: &str = "image/png";

/// Losslessly encode a frame as PNG (straight alpha).
#[tracing::instrument(skip(frame), fields(width = frame.width, height = frame.height))]
pub fn export_png(frame: &FrameRGBA) -> ThumbResult<Vec<u8>> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.data.len() != expected {
        return Err(ThumbError::export(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut rgba = frame.data.clone();
    if frame.premultiplied {
        unpremultiply_rgba8_in_place(&mut rgba);
    }
    let img = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
        .ok_or_else(|| ThumbError::export("invalid frame dimensions"))?;

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| ThumbError::export(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

/// PNG export wrapped as a `data:` URL.
pub fn export_data_url(frame: &FrameRGBA) -> ThumbResult<String> {
    let png = export_png(frame)?;
    Ok(format!("data:{EXPORT_MIME};base64,{}", STANDARD.encode(png)))
}

fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
