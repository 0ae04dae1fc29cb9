use super::*;

#[test]
fn registry_ships_three_presets_in_key_order() {
    let keys: Vec<_> = themes().map(|t| t.key).collect();
    assert_eq!(keys, vec!["black", "blue", "green"]);
}

#[test]
fn lookup_is_case_and_whitespace_normalized() {
    assert_eq!(lookup_theme("  GREEN ").map(|t| t.key), Some("green"));
    assert_eq!(lookup_theme("Blue").map(|t| t.label), Some("Blue CRT"));
    assert!(lookup_theme("amber").is_none());
}

#[test]
fn unknown_and_absent_keys_resolve_to_default() {
    let default = default_theme();
    assert_eq!(default.key, DEFAULT_THEME_KEY);
    for key in [None, Some(""), Some("unknown-key"), Some("greenish")] {
        assert_eq!(resolve_theme(key), default);
    }
}

#[test]
fn green_preset_colors_match() {
    let t = resolve_theme(Some("green"));
    assert_eq!(t.background, Rgba8::opaque(10, 45, 10));
    assert_eq!(t.text, Rgba8::opaque(0, 255, 102));
    assert_eq!(t.glow, t.scan);
    assert_eq!(t.shadow_blur, 26.0);
}
