use crate::foundation::error::{CrtError, CrtResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel, with `src` scaled by `opacity`.
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

/// Additive ("lighter") blend: saturating per-channel sum of `dst` and scaled `src`.
pub fn add(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = dst[i].saturating_add(mul_div255_u8(u16::from(src[i]), op));
    }
    out
}

/// Source-over of a solid color through a per-pixel coverage mask (one byte per pixel).
pub fn fill_masked_in_place(
    dst: &mut [u8],
    mask: &[u8],
    color: PremulRgba8,
    opacity: f32,
) -> CrtResult<()> {
    if dst.len() != mask.len() * 4 {
        return Err(CrtError::render(
            "fill_masked_in_place expects one mask byte per rgba8 pixel",
        ));
    }
    for (d, &m) in dst.chunks_exact_mut(4).zip(mask) {
        if m == 0 {
            continue;
        }
        let out = over(
            [d[0], d[1], d[2], d[3]],
            color,
            opacity * f32::from(m) / 255.0,
        );
        d.copy_from_slice(&out);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
