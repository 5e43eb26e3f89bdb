mod common;

use std::time::{Duration, Instant};

use vignette_core::config::{ImageConfig, SceneConfig};
use vignette_core::{ImageOptions, NullNode, RecordingNode, Scene, VignetteError};

use common::write_test_png;

#[test]
fn test_from_config_loads_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_test_png(dir.path(), "a.png", 100, 50);
    let b = write_test_png(dir.path(), "b.png", 20, 20);
    let config = SceneConfig {
        images: vec![
            ImageConfig::with_options(
                &a,
                ImageOptions::default()
                    .at(10.0, 20.0)
                    .with_scale(2.0)
                    .with_angle(90.0),
            ),
            ImageConfig::with_options(&b, ImageOptions::default().show_after(30.0)),
        ],
        ..SceneConfig::default()
    };

    let scene = Scene::from_config(&config, |_| RecordingNode::new()).unwrap();

    assert_eq!(scene.len(), 2);
    let first = scene.get(0).unwrap();
    assert_eq!(first.view_width(), 200.0);
    assert_eq!(first.view_height(), 100.0);
    assert_eq!(first.angle(), 90.0);
    assert!(first.is_visible());

    let second = scene.get(1).unwrap();
    assert!(!second.is_visible());
    // Schedule has been handed to the timer.
    assert!(second.pending_schedule().is_none());
    assert!(!scene.is_settled());
}

#[test]
fn test_from_config_fails_on_missing_image() {
    let dir = tempfile::tempdir().unwrap();
    let config = SceneConfig {
        images: vec![ImageConfig::new(dir.path().join("gone.png"))],
        ..SceneConfig::default()
    };

    let err = Scene::from_config(&config, |_| NullNode).err().unwrap();
    assert!(matches!(err, VignetteError::ResourceNotFound { .. }));
}

#[test]
fn test_unknown_id() {
    let mut scene: Scene<NullNode> = Scene::new("empty", 10.0, 10.0).unwrap();

    assert!(scene.is_empty());
    assert!(matches!(scene.get(3), Err(VignetteError::UnknownImage(3))));
    assert!(matches!(
        scene.cancel_schedule(0),
        Err(VignetteError::UnknownImage(0))
    ));
}

#[test]
fn test_cancel_schedule_keeps_image_hidden() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_test_png(dir.path(), "a.png", 8, 8);
    let config = SceneConfig {
        images: vec![
            ImageConfig::new(&a),
            ImageConfig::with_options(&a, ImageOptions::default().show_after(0.05)),
        ],
        ..SceneConfig::default()
    };
    let mut scene = Scene::from_config(&config, |_| NullNode).unwrap();

    assert!(!scene.cancel_schedule(0).unwrap());
    assert!(scene.cancel_schedule(1).unwrap());
    assert!(scene.is_settled());

    let deadline = Instant::now() + Duration::from_millis(200);
    while Instant::now() < deadline {
        scene.wait_tick(Duration::from_millis(20));
    }
    assert!(!scene.get(1).unwrap().is_visible());
}
