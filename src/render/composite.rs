use crate::foundation::error::{SnapError, SnapResult};
use crate::foundation::math::{mul_div255_u8, premultiply_px, unpremultiply_px};

type PremulRgba8 = [u8; 4];

/// Source-over on premultiplied pixels.
fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for (o, (s, d)) in out.iter_mut().zip(src.into_iter().zip(dst)) {
        *o = s.saturating_add(mul_div255_u8(u16::from(d), inv));
    }
    out
}

/// Premultiplied `src` over straight-alpha `dst`, in place.
///
/// Pixels where `src` is fully transparent are left byte-for-byte untouched, so an empty
/// overlay layer never perturbs the base image.
pub fn over_straight_in_place(dst_straight: &mut [u8], src_premul: &[u8]) -> SnapResult<()> {
    if dst_straight.len() != src_premul.len() || !dst_straight.len().is_multiple_of(4) {
        return Err(SnapError::render(
            "over_straight_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst_straight
        .chunks_exact_mut(4)
        .zip(src_premul.chunks_exact(4))
    {
        if s[3] == 0 {
            continue;
        }
        let out = over(premultiply_px([d[0], d[1], d[2], d[3]]), [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&unpremultiply_px(out));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
