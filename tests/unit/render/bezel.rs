use super::*;
use crate::theme::registry::resolve_theme;

fn small_cfg() -> RenderConfig {
    RenderConfig {
        canvas: Canvas::new(90, 48),
        ..RenderConfig::default()
    }
}

#[test]
fn coverage_is_full_inside_and_empty_outside() {
    let canvas = Canvas::new(40, 20);
    let rect = kurbo::Rect::new(10.0, 5.0, 30.0, 15.0);
    let mask = shape_coverage(canvas, &rect).unwrap();
    assert_eq!(mask.len(), 40 * 20);
    assert_eq!(mask[(10 * 40 + 20) as usize], 255);
    assert_eq!(mask[0], 0);
    assert_eq!(mask[(19 * 40 + 39) as usize], 0);
}

#[test]
fn bezel_fills_inset_with_theme_background_over_black() {
    let cfg = small_cfg();
    let theme = resolve_theme(Some("green"));
    let bezel = Bezel::build(&cfg, theme).unwrap();

    assert_eq!(bezel.base.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(bezel.base.pixel(45, 24), Some([10, 45, 10, 255]));
    assert_eq!(bezel.mask[(24 * 90 + 45) as usize], 255);
}

#[test]
fn rounded_corners_are_outside_the_clip() {
    let cfg = small_cfg();
    let bezel = Bezel::build(&cfg, resolve_theme(Some("blue"))).unwrap();
    // The corner of the inset rectangle lies outside the 14px corner arc.
    let corner = (8 * 90 + 8) as usize;
    assert_eq!(bezel.mask[corner], 0);
    assert_eq!(bezel.base.pixel(8, 8), Some([0, 0, 0, 255]));
}
