use image::RgbaImage;

use crate::model::Size;
use crate::pipeline::InputImage;

/// Assembles the final atlas: a zero-initialized RGBA canvas with every input
/// image blitted at its assigned offset. `positions` is index-aligned with
/// `inputs`. The placement engine guarantees containment.
pub fn compose_atlas(inputs: &[InputImage], positions: &[(i32, i32)], atlas_size: Size) -> RgbaImage {
    debug_assert_eq!(inputs.len(), positions.len());
    let mut canvas = RgbaImage::new(atlas_size.w as u32, atlas_size.h as u32);
    for (input, &(x, y)) in inputs.iter().zip(positions) {
        blit_rgba(&input.image, &mut canvas, x as u32, y as u32);
    }
    canvas
}

/// Copies `src` into `canvas` with its top-left corner at `(dx, dy)`,
/// one row-stride `copy_from_slice` per source row.
pub fn blit_rgba(src: &RgbaImage, canvas: &mut RgbaImage, dx: u32, dy: u32) {
    let (src_w, src_h) = src.dimensions();
    let (dst_w, dst_h) = canvas.dimensions();
    debug_assert!(
        dx + src_w <= dst_w && dy + src_h <= dst_h,
        "placement {dx},{dy} + {src_w}x{src_h} escapes {dst_w}x{dst_h} canvas"
    );

    let src_pitch = src_w as usize * 4;
    let dst_pitch = dst_w as usize * 4;
    let src_buf: &[u8] = src.as_raw();
    let dst_buf: &mut [u8] = canvas;

    for row in 0..src_h as usize {
        let src_off = row * src_pitch;
        let dst_off = (dy as usize + row) * dst_pitch + dx as usize * 4;
        dst_buf[dst_off..dst_off + src_pitch]
            .copy_from_slice(&src_buf[src_off..src_off + src_pitch]);
    }
}
