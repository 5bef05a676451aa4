//! Configuration unit tests.

use super::*;

#[test]
fn default_config_roundtrip() {
    let cfg = Config::default();
    let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
    let parsed = Config::parse(&toml_str).expect("deserialize");
    assert!((parsed.font.size - FONT_SIZE).abs() < f32::EPSILON);
    assert_eq!(parsed.font.range(), 32..=126);
    assert_eq!(parsed.atlas.max_row_width, 1024);
    assert_eq!(parsed.atlas.max_texture_size, 8192);
    assert_eq!(parsed.atlas.row_pitch, RowPitchMode::Uniform);
    assert_eq!(parsed.layout.tab_width, 4);
    assert_eq!(parsed.layout.placeholder, "?");
    assert_eq!(parsed.log.level, "info");
}

#[test]
fn partial_toml_uses_defaults() {
    let toml_str = r#"
[font]
size = 20.0
"#;
    let parsed = Config::parse(toml_str).expect("deserialize");
    assert!((parsed.font.size - 20.0).abs() < f32::EPSILON);
    // Other fields should be defaults
    assert_eq!(parsed.font.first_char, 32);
    assert_eq!(parsed.atlas.max_row_width, 1024);
    assert!(parsed.layout.wrap_width.is_none());
}

#[test]
fn empty_toml_gives_defaults() {
    let parsed = Config::parse("").expect("deserialize");
    assert!(parsed.font.path.is_none());
    assert!(parsed.atlas.dump_path.is_none());
    assert_eq!(parsed.layout.options(), LayoutOptions::default());
    assert_eq!(parsed.atlas.packer_config(), PackerConfig::default());
}

#[test]
fn row_pitch_from_toml() {
    let toml_str = r#"
[atlas]
row_pitch = "per_row"
max_row_width = 512
"#;
    let parsed = Config::parse(toml_str).expect("deserialize");
    let packer = parsed.atlas.packer_config();
    assert_eq!(packer.row_pitch, RowPitch::PerRow);
    assert_eq!(packer.max_row_width, 512);
    assert_eq!(packer.max_texture_size, 8192);
}

#[test]
fn unknown_row_pitch_is_an_error() {
    let toml_str = r#"
[atlas]
row_pitch = "diagonal"
"#;
    assert!(Config::parse(toml_str).is_err());
}

#[test]
fn font_size_is_clamped() {
    let mut font = FontConfig::default();
    font.size = 2.0;
    assert!((font.effective_size() - MIN_FONT_SIZE).abs() < f32::EPSILON);
    font.size = 500.0;
    assert!((font.effective_size() - MAX_FONT_SIZE).abs() < f32::EPSILON);
    font.size = 13.0;
    assert!((font.effective_size() - 13.0).abs() < f32::EPSILON);
}

#[test]
fn layout_section_maps_to_options() {
    let toml_str = r##"
[layout]
tab_width = 8
left_margin = 6.0
color = "#ff8000"
wrap_width = 640.0
placeholder = "#"
"##;
    let options = Config::parse(toml_str).expect("deserialize").layout.options();
    assert_eq!(options.tab_width, 8);
    assert!((options.left_margin - 6.0).abs() < f32::EPSILON);
    assert_eq!(options.wrap_width, Some(640.0));
    assert_eq!(options.placeholder, Some(b'#'));
    let [r, g, b, a] = options.color;
    assert!((r - 1.0).abs() < f32::EPSILON);
    assert!((g - 128.0 / 255.0).abs() < f32::EPSILON);
    assert!(b.abs() < f32::EPSILON);
    assert!((a - 1.0).abs() < f32::EPSILON);
}

#[test]
fn empty_placeholder_disables_substitution() {
    let layout = LayoutConfig {
        placeholder: String::new(),
        ..LayoutConfig::default()
    };
    assert_eq!(layout.options().placeholder, None);
}

#[test]
fn bad_color_falls_back_to_white() {
    let layout = LayoutConfig {
        color: "chartreuse".to_owned(),
        ..LayoutConfig::default()
    };
    assert_eq!(layout.options().color, [1.0, 1.0, 1.0, 1.0]);
}

#[test]
fn zero_wrap_width_disables_wrapping() {
    let layout = LayoutConfig {
        wrap_width: Some(0.0),
        ..LayoutConfig::default()
    };
    assert_eq!(layout.options().wrap_width, None);
}

#[test]
fn hex_colors() {
    assert_eq!(parse_hex_color("#000000"), Some([0.0, 0.0, 0.0, 1.0]));
    assert_eq!(parse_hex_color("#fff"), Some([1.0, 1.0, 1.0, 1.0]));
    assert_eq!(parse_hex_color("FFFFFF"), Some([1.0, 1.0, 1.0, 1.0]));
    assert_eq!(parse_hex_color("#12345"), None);
    assert_eq!(parse_hex_color("#gg0000"), None);
    assert_eq!(parse_hex_color("#é00"), None);
}

#[test]
fn log_level_parses_case_insensitively() {
    let mut cfg = LogConfig::default();
    assert_eq!(cfg.level_filter(), log::LevelFilter::Info);
    cfg.level = "DEBUG".to_owned();
    assert_eq!(cfg.level_filter(), log::LevelFilter::Debug);
    cfg.level = "loud".to_owned();
    assert_eq!(cfg.level_filter(), log::LevelFilter::Info);
}

#[test]
fn config_path_ends_in_tether_dir() {
    let path = config_path();
    assert!(path.ends_with(std::path::Path::new("tether").join("config.toml")));
}

#[test]
fn explicit_missing_file_is_an_error() {
    let err = Config::try_load_from(std::path::Path::new("/nonexistent/tether.toml"))
        .expect_err("missing file");
    assert!(err.contains("failed to read"));
}
