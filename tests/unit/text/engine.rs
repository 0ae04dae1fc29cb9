use super::*;

#[test]
fn empty_text_measures_zero() {
    let mut engine = GlyphEngine::new(&RenderConfig::default());
    assert_eq!(engine.measure(""), 0.0);
}

#[test]
fn measure_is_monotonic_in_appended_text() {
    let mut engine = GlyphEngine::new(&RenderConfig::default());
    let short = engine.measure("abc");
    let long = engine.measure("abc def");
    assert!(short > 0.0, "abc measured {short}");
    assert!(long >= short);
}

#[test]
fn missing_font_file_is_not_fatal() {
    let cfg = RenderConfig {
        font_path: Some(std::path::PathBuf::from("does/not/exist.ttf")),
        ..RenderConfig::default()
    };
    let mut engine = GlyphEngine::new(&cfg);
    assert!(engine.measure("x") >= 0.0);
    assert!(engine.family.contains("monospace"));
}
