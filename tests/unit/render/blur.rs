use super::*;

#[test]
fn zero_sigma_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6];
    assert_eq!(blur_mask(&src, 3, 2, 0.0).unwrap(), src);
}

#[test]
fn constant_mask_is_identity() {
    let src = vec![90u8; 7 * 5];
    assert_eq!(blur_mask(&src, 7, 5, 2.0).unwrap(), src);
}

#[test]
fn spreads_energy_from_single_texel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h) as usize];
    src[(4 * w + 4) as usize] = 255;

    let out = blur_mask(&src, w, h, 1.0).unwrap();

    assert!(out.iter().filter(|&&v| v != 0).count() > 1);
    let sum: u32 = out.iter().map(|&v| u32::from(v)).sum();
    assert!((sum as i32 - 255).abs() <= 8);
}

#[test]
fn rejects_mismatched_length() {
    assert!(blur_mask(&[0u8; 5], 2, 2, 1.0).is_err());
}

#[test]
fn shadow_blur_maps_to_half_sigma() {
    assert_eq!(sigma_for_shadow_blur(26.0), 13.0);
    assert_eq!(sigma_for_shadow_blur(-3.0), 0.0);
    assert_eq!(sigma_for_shadow_blur(f32::NAN), 0.0);
}
