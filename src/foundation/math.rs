pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Map a unit opacity to the 0..=255 fixed-point scale used by the compositor.
pub(crate) fn unit_to_u8(v: f32) -> u8 {
    ((v.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u8
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
