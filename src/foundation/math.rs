pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Source-over of one premultiplied RGBA8 pixel onto another.
pub(crate) fn premul_over(dst: &mut [u8], src: &[u8]) {
    let sa = u16::from(src[3]);
    if sa == 255 {
        dst[..4].copy_from_slice(&src[..4]);
        return;
    }
    if sa == 0 {
        return;
    }
    let inv = 255 - sa;
    for c in 0..4 {
        let v = u16::from(src[c]) + mul_div255_u16(u16::from(dst[c]), inv);
        dst[c] = v.min(255) as u8;
    }
}
