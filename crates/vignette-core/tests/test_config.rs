use std::path::{Path, PathBuf};

use vignette_core::config::{ImageConfig, SceneConfig};
use vignette_core::{ImageOptions, VignetteError};

const SCENE: &str = r#"
title = "Demo"
width = 1024
height = 768.0

[[images]]
source = "a.png"
x = 10
y = 20.5
scale = 2.0
angle = 90.0

[[images]]
source = "/abs/b.png"
delay_show = 1.5
delay_hide = 3.0
"#;

#[test]
fn test_parse_scene() {
    let config = SceneConfig::from_toml_str(SCENE).unwrap();

    assert_eq!(config.title, "Demo");
    assert_eq!(config.width, 1024.0);
    assert_eq!(config.height, 768.0);
    assert_eq!(config.images.len(), 2);

    let first = &config.images[0];
    assert_eq!(first.source, PathBuf::from("a.png"));
    assert_eq!(
        *first.options(),
        ImageOptions::default()
            .at(10.0, 20.5)
            .with_scale(2.0)
            .with_angle(90.0)
    );

    let second = &config.images[1];
    assert_eq!(second.options.x, 0.0);
    assert_eq!(second.options.scale, None);
    assert_eq!(second.options.delay_show, Some(1.5));
    assert_eq!(second.options.delay_hide, Some(3.0));
}

#[test]
fn test_defaults_for_empty_scene() {
    let config = SceneConfig::from_toml_str("").unwrap();

    assert_eq!(config, SceneConfig::default());
    assert!(config.images.is_empty());
}

#[test]
fn test_parse_error_is_config_error() {
    let err = SceneConfig::from_toml_str("[[images]]\nx = 1.0\n").unwrap_err();
    assert!(matches!(err, VignetteError::Config(_)), "got: {err:?}");
}

#[test]
fn test_load_resolves_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("scene.toml");
    std::fs::write(&scene_path, SCENE).unwrap();

    let config = SceneConfig::load(&scene_path).unwrap();

    assert_eq!(config.images[0].source, dir.path().join("a.png"));
    assert_eq!(config.images[1].source, Path::new("/abs/b.png"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = SceneConfig::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, VignetteError::ResourceNotFound { .. }));
}

#[test]
fn test_example_roundtrip() {
    let example = SceneConfig::example();
    let text = example.to_toml_string().unwrap();

    assert!(!text.contains("delay_show = 0"), "unset options are omitted");
    let parsed = SceneConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed, example);
}

#[test]
fn test_image_options_from_json() {
    let options: ImageOptions = serde_json::from_str(r#"{"x": 4.0, "delay_show": 0.5}"#).unwrap();

    assert_eq!(options.x, 4.0);
    assert_eq!(options.y, 0.0);
    assert_eq!(options.scale, None);
    assert_eq!(options.delay_show, Some(0.5));
}

#[test]
fn test_image_config_new_defaults() {
    let cfg = ImageConfig::new("x.png");
    assert_eq!(*cfg.options(), ImageOptions::default());
}

#[test]
fn test_image_options_written_inline() {
    let config = SceneConfig {
        images: vec![ImageConfig::with_options(
            "a.png",
            ImageOptions::default().at(3.0, 4.0).show_after(0.25),
        )],
        ..SceneConfig::default()
    };
    let text = config.to_toml_string().unwrap();

    assert!(text.contains("delay_show = 0.25"), "got:\n{text}");
    assert!(!text.contains("options"), "options table leaked:\n{text}");
    assert!(!text.contains("scale"), "unset scale written:\n{text}");

    let parsed = SceneConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed.images[0].options, config.images[0].options);
}
