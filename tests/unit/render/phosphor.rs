use super::*;

fn solid(canvas: Canvas, px: [u8; 4]) -> PixelBuffer {
    PixelBuffer {
        width: canvas.width,
        height: canvas.height,
        data: px.repeat(canvas.pixel_count()),
    }
}

#[test]
fn empty_text_without_cursor_leaves_phosphor_dark() {
    let cfg = RenderConfig::default();
    let mut engine = GlyphEngine::new(&cfg);
    let mut raster = PhosphorRaster::new(cfg.phosphor_canvas()).unwrap();
    let out = raster
        .render(&mut engine, &cfg, "", false, Rgba8::opaque(0, 255, 102))
        .unwrap();
    assert_eq!(out.canvas(), Canvas::new(166, 66));
    assert!(out.data.iter().all(|&b| b == 0));
}

#[test]
fn lit_texels_are_fully_on_in_text_color() {
    let cfg = RenderConfig::default();
    let mut engine = GlyphEngine::new(&cfg);
    let mut raster = PhosphorRaster::new(cfg.phosphor_canvas()).unwrap();
    let color = Rgba8::opaque(0, 255, 102);
    let out = raster.render(&mut engine, &cfg, "HELLO", true, color).unwrap();
    for px in out.data.chunks_exact(4) {
        assert!(px == [0, 0, 0, 0] || px == [0, 255, 102, 255], "{px:?}");
    }
    let lit = out.data.chunks_exact(4).filter(|px| px[3] == 255).count();
    assert!(lit > 0, "no phosphor texels lit for HELLO");
}

#[test]
fn upscale_replicates_rows_and_columns_without_warp() {
    let src = PixelBuffer {
        width: 2,
        height: 2,
        data: vec![
            255, 0, 0, 255, 0, 255, 0, 255, //
            0, 0, 255, 255, 0, 0, 0, 0,
        ],
    };
    let canvas = Canvas::new(4, 4);
    let mut dst = solid(canvas, [0, 0, 0, 255]);
    let mask = vec![255u8; canvas.pixel_count()];
    upscale_warped(&mut dst, &src, &mask, 0.0).unwrap();

    assert_eq!(dst.pixel(0, 0), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(dst.pixel(3, 0), Some([0, 255, 0, 255]));
    assert_eq!(dst.pixel(0, 3), Some([0, 0, 255, 255]));
    // Transparent phosphor texels leave the destination untouched.
    assert_eq!(dst.pixel(3, 3), Some([0, 0, 0, 255]));
}

#[test]
fn upscale_is_confined_to_the_mask() {
    let src = solid(Canvas::new(1, 1), [255, 255, 255, 255]);
    let canvas = Canvas::new(3, 1);
    let mut dst = solid(canvas, [0, 0, 0, 255]);
    upscale_warped(&mut dst, &src, &[0, 255, 0], 0.0).unwrap();
    assert_eq!(dst.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(1, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(2, 0), Some([0, 0, 0, 255]));
}

#[test]
fn curvature_shifts_middle_rows_right() {
    // A single lit column at the left edge of the phosphor grid.
    let mut src = solid(Canvas::new(4, 4), [0, 0, 0, 0]);
    for y in 0..4 {
        let i = src.index(0, y);
        src.data[i..i + 4].copy_from_slice(&[255, 255, 255, 255]);
    }
    let canvas = Canvas::new(40, 40);
    let mut dst = solid(canvas, [0, 0, 0, 255]);
    let mask = vec![255u8; canvas.pixel_count()];
    upscale_warped(&mut dst, &src, &mask, 4.0).unwrap();

    // Row 0 has no offset: the lit column spans x in 0..10.
    assert_eq!(dst.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(10, 0), Some([0, 0, 0, 255]));
    // Row 20 sits at the peak of the sine: shifted right by 4 pixels.
    assert_eq!(dst.pixel(3, 20), Some([0, 0, 0, 255]));
    assert_eq!(dst.pixel(4, 20), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(13, 20), Some([255, 255, 255, 255]));
    assert_eq!(dst.pixel(14, 20), Some([0, 0, 0, 255]));
}

#[test]
fn rejects_mismatched_mask() {
    let src = solid(Canvas::new(1, 1), [255, 255, 255, 255]);
    let mut dst = solid(Canvas::new(2, 2), [0, 0, 0, 255]);
    assert!(upscale_warped(&mut dst, &src, &[255], 0.0).is_err());
}
