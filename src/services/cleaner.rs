use crate::models::color::Rgb;
use crate::services::palette::ITEM_TEXT;
use image::RgbaImage;
use rayon::prelude::*;

/// Prepare a cropped stat region for OCR: affix text keeps its grayscale
/// average (antialiasing intact), everything else goes black.
///
/// The gray value is clamped into the text range's own gray band, so a
/// cleaned pixel still classifies as text and a second pass is a no-op.
pub fn clean_region(image: &mut RgbaImage) {
    let band = ITEM_TEXT.gray_band();

    let samples: &mut [u8] = image;
    samples.par_chunks_exact_mut(4).for_each(|px| {
        let color = Rgb::new(px[0], px[1], px[2]);
        if ITEM_TEXT.contains(color) {
            let avg = ((px[0] as u16 + px[1] as u16 + px[2] as u16) as f32 / 3.0).round() as u8;
            let gray = avg.clamp(band.min, band.max);
            px[0] = gray;
            px[1] = gray;
            px[2] = gray;
        } else {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
        }
    });
}
