use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{PathflowError, PathflowResult};
use crate::foundation::math::mul_div255_u8;

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over of one pixel.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Composite a premultiplied RGBA8 layer over `dst`.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> PathflowResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PathflowError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Fill every pixel of `dst` with `color`.
pub(crate) fn fill_in_place(dst: &mut [u8], color: PremulRgba8) {
    for d in dst.chunks_exact_mut(4) {
        d.copy_from_slice(&color);
    }
}

/// Write `src` composited over `background` into `dst`, with every pixel made opaque.
pub(crate) fn flatten_into(
    dst: &mut [u8],
    src: &[u8],
    background: Rgba8Premul,
) -> PathflowResult<()> {
    fill_in_place(dst, background.to_array());
    over_in_place(dst, src)?;
    for d in dst.chunks_exact_mut(4) {
        d[3] = 255;
    }
    Ok(())
}
