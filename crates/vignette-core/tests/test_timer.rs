mod common;

use std::thread::sleep;
use std::time::{Duration, Instant};

use vignette_core::schedule::VisibilitySchedule;
use vignette_core::timer::TimerService;
use vignette_core::{DisplayedImage, ImageOptions, RecordingNode, Scene};

use common::write_test_png;

fn sleep_until(start: Instant, offset: Duration) {
    let target = start + offset;
    let now = Instant::now();
    if target > now {
        sleep(target - now);
    }
}

#[test]
fn test_changes_fire_in_order() {
    let mut timer = TimerService::spawn().unwrap();
    let schedule = VisibilitySchedule::from_delays(Some(0.02), Some(0.03)).unwrap();

    let start = Instant::now();
    let handle = timer.submit(7, &schedule);
    assert_eq!(handle.pending(), 2);

    let first = timer.recv_timeout(Duration::from_secs(5)).expect("show fired");
    let shown_at = Instant::now();
    let second = timer.recv_timeout(Duration::from_secs(5)).expect("hide fired");
    let hidden_at = Instant::now();

    assert_eq!(first.target, 7);
    assert!(first.change.visible);
    assert!(!second.change.visible);
    assert!(shown_at - start >= Duration::from_millis(20));
    assert!(hidden_at - start >= Duration::from_millis(50));

    // The pending count drops right after delivery.
    let deadline = Instant::now() + Duration::from_secs(1);
    while !handle.is_finished() && Instant::now() < deadline {
        sleep(Duration::from_millis(1));
    }
    assert!(handle.is_finished());
}

#[test]
fn test_interleaved_submissions() {
    let mut timer = TimerService::spawn().unwrap();
    let late = VisibilitySchedule::from_delays(Some(0.08), None).unwrap();
    let early = VisibilitySchedule::from_delays(Some(0.01), None).unwrap();

    timer.submit(1, &late);
    timer.submit(2, &early);

    let a = timer.recv_timeout(Duration::from_secs(5)).unwrap();
    let b = timer.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(a.target, 2);
    assert_eq!(b.target, 1);
}

#[test]
fn test_cancel_stops_pending_changes() {
    let mut timer = TimerService::spawn().unwrap();
    let schedule = VisibilitySchedule::from_delays(Some(0.05), Some(0.05)).unwrap();

    let handle = timer.submit(0, &schedule);
    handle.cancel();

    assert!(handle.is_cancelled());
    assert!(handle.is_finished());
    assert!(timer.recv_timeout(Duration::from_millis(200)).is_none());
}

#[test]
fn test_drain_is_non_blocking() {
    let mut timer = TimerService::spawn().unwrap();
    let schedule = VisibilitySchedule::from_delays(Some(10.0), None).unwrap();
    timer.submit(0, &schedule);

    assert!(timer.drain().is_empty());
}

#[test]
fn test_scene_visibility_timeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_test_png(dir.path(), "a.png", 16, 16);
    // show after 300ms, stay visible for 300ms
    let options = ImageOptions::default().show_after(0.3).hide_after(0.3);

    let mut scene = Scene::new("timeline", 100.0, 100.0).unwrap();
    let start = Instant::now();
    let id = scene.add(DisplayedImage::with_options(&path, &options, RecordingNode::new()).unwrap());

    assert!(!scene.get(id).unwrap().is_visible());

    sleep_until(start, Duration::from_millis(150));
    scene.tick();
    assert!(!scene.get(id).unwrap().is_visible());

    sleep_until(start, Duration::from_millis(450));
    scene.tick();
    assert!(scene.get(id).unwrap().is_visible());

    sleep_until(start, Duration::from_millis(1000));
    scene.tick();
    assert!(!scene.get(id).unwrap().is_visible());
    assert!(scene.is_settled());

    let node = scene.get(id).unwrap().node();
    assert_eq!(node.last_visible(), Some(false));
}

#[test]
fn test_manual_show_races_with_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_test_png(dir.path(), "a.png", 16, 16);
    let options = ImageOptions::default().show_after(0.05).hide_after(0.05);

    let mut scene = Scene::new("race", 100.0, 100.0).unwrap();
    let id = scene.add(DisplayedImage::with_options(&path, &options, RecordingNode::new()).unwrap());

    // Showing early does not stop the pending timeline.
    scene.get_mut(id).unwrap().show();
    assert!(scene.get(id).unwrap().is_visible());

    let deadline = Instant::now() + Duration::from_secs(5);
    while !scene.is_settled() && Instant::now() < deadline {
        scene.wait_tick(Duration::from_millis(50));
    }
    scene.tick();
    assert!(!scene.get(id).unwrap().is_visible());
}
