use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn unit_to_u8_clamps_and_rounds() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(0.0), 0);
    assert_eq!(unit_to_u8(0.06), 15);
    assert_eq!(unit_to_u8(1.0), 255);
    assert_eq!(unit_to_u8(4.0), 255);
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
}
