use carve_animation::{DriftSpec, Easing};
use carve_geometry::{Transform2D, Vec2};
use carve_scene::{MarkerSpec, MotionScene};
use carve_testing::TestRuntime;

#[test]
fn follower_steps_toward_the_pointer_each_frame() {
    let test = TestRuntime::new();
    let pointer = test.pointer();
    let scene = MotionScene::new(test.handle(), pointer.clone());
    let handle = scene.mount(MarkerSpec::at(Vec2::ZERO).following(0.25));

    pointer.record(100.0, 100.0);
    test.advance_frame();
    assert_eq!(
        scene.transform(handle.id()).unwrap().translation,
        Vec2::new(25.0, 25.0)
    );

    test.advance_frame();
    assert_eq!(
        scene.transform(handle.id()).unwrap().translation,
        Vec2::new(43.75, 43.75)
    );
}

#[test]
fn all_markers_observe_the_same_pointer_sample_per_frame() {
    let test = TestRuntime::new();
    let pointer = test.pointer();
    let scene = MotionScene::new(test.handle(), pointer.clone());
    let a = scene.mount(MarkerSpec::at(Vec2::ZERO).following(0.5));
    let b = scene.mount(MarkerSpec::at(Vec2::ZERO).following(0.5));

    pointer.record(80.0, 60.0);
    // An input event landing mid-drain (after the scene's tick) must not
    // split the two markers apart; they pick the new sample up together
    // on the next frame.
    let interloper = {
        let pointer = pointer.clone();
        test.frame_clock().with_frame_nanos(move |_| {
            pointer.record(-40.0, 20.0);
        })
    };

    test.advance_frame();
    let at = |id| scene.transform(id).unwrap().translation;
    assert_eq!(at(a.id()), Vec2::new(40.0, 30.0));
    assert_eq!(at(a.id()), at(b.id()));

    drop(interloper);
    test.advance_frame();
    assert_eq!(at(a.id()), Vec2::new(0.0, 25.0));
    assert_eq!(at(a.id()), at(b.id()));
}

#[test]
fn anchored_marker_ignores_a_distant_pointer() {
    let test = TestRuntime::new();
    let pointer = test.pointer();
    let scene = MotionScene::new(test.handle(), pointer.clone());
    let anchor = Vec2::new(300.0, 200.0);
    let handle = scene.mount(MarkerSpec::at(anchor));

    for i in 0..5 {
        pointer.record(i as f64 * 50.0, 999.0);
        test.advance_frame();
        assert_eq!(scene.transform(handle.id()).unwrap().translation, anchor);
    }
}

#[test]
fn repelled_marker_is_pushed_away_and_recovers() {
    let test = TestRuntime::new();
    let pointer = test.pointer();
    let scene = MotionScene::new(test.handle(), pointer.clone());
    let anchor = Vec2::new(200.0, 100.0);
    let handle = scene.mount(MarkerSpec::at(anchor).repelled(100.0, 10.0));

    pointer.record(150.0, 100.0);
    test.advance_frame();
    // 50 px inside a 100 px radius: half force, pushed right by 5 px.
    assert_eq!(
        scene.transform(handle.id()).unwrap().translation,
        Vec2::new(205.0, 100.0)
    );

    pointer.record(800.0, 100.0);
    test.advance_frame();
    assert_eq!(scene.transform(handle.id()).unwrap().translation, anchor);
}

#[test]
fn drift_loops_relative_to_the_anchor() {
    let test = TestRuntime::new();
    test.set_frame_interval_nanos(1_000_000_000);
    let scene = MotionScene::new(test.handle(), test.pointer());
    let drift = DriftSpec {
        y: vec![0.0, -20.0, 0.0],
        duration_millis: 4_000,
        easing: Easing::Linear,
        ..DriftSpec::default()
    };
    let handle = scene.mount(MarkerSpec::at(Vec2::new(50.0, 50.0)).drifting(drift));

    // First observed frame anchors the loop's phase.
    test.advance_frame();
    assert_eq!(
        scene.transform(handle.id()).unwrap().translation,
        Vec2::new(50.0, 50.0)
    );

    // One second in: halfway down the first segment.
    test.advance_frame();
    assert_eq!(
        scene.transform(handle.id()).unwrap().translation,
        Vec2::new(50.0, 40.0)
    );

    // Two seconds in: at the lowest keyframe.
    test.advance_frame();
    assert_eq!(
        scene.transform(handle.id()).unwrap().translation,
        Vec2::new(50.0, 30.0)
    );
}

#[test]
fn hover_and_press_ease_the_scale_track() {
    let test = TestRuntime::new();
    let scene = MotionScene::new(test.handle(), test.pointer());
    let spec = MarkerSpec::at(Vec2::ZERO)
        .with_hover_scale(1.5)
        .with_press_scale(0.9);
    let spec = MarkerSpec {
        scale_factor: 0.5,
        ..spec
    };
    let handle = scene.mount(spec);

    scene.set_hovered(handle.id(), true);
    test.advance_frame();
    assert_eq!(scene.transform(handle.id()).unwrap().scale, 1.25);
    test.advance_frame();
    assert_eq!(scene.transform(handle.id()).unwrap().scale, 1.375);

    // Press wins over hover and retargets the same track.
    scene.set_pressed(handle.id(), true);
    test.advance_frame();
    let pressed = scene.transform(handle.id()).unwrap().scale;
    assert!((pressed - 1.1375).abs() < 1e-12);

    scene.set_pressed(handle.id(), false);
    scene.set_hovered(handle.id(), false);
    for _ in 0..64 {
        test.advance_frame();
    }
    let settled = scene.transform(handle.id()).unwrap().scale;
    assert!((settled - 1.0).abs() < 1e-6);
}

#[test]
fn cancelling_twice_is_a_no_op_both_times() {
    let test = TestRuntime::new();
    let scene = MotionScene::new(test.handle(), test.pointer());
    let handle = scene.mount(MarkerSpec::at(Vec2::ZERO).following(0.5));
    test.advance_frame();

    handle.cancel();
    assert!(scene.is_empty());
    assert!(!scene.is_animating());

    handle.cancel();
    assert!(scene.is_empty());
    assert!(!test.needs_frame());
}

#[test]
fn frames_after_cancel_never_write_again() {
    let test = TestRuntime::new();
    let pointer = test.pointer();
    let scene = MotionScene::new(test.handle(), pointer.clone());
    let cancelled = scene.mount(MarkerSpec::at(Vec2::ZERO).following(0.5));
    let survivor = scene.mount(MarkerSpec::at(Vec2::ZERO).following(0.5));

    pointer.record(100.0, 0.0);
    test.advance_frame();
    cancelled.cancel();
    assert!(scene.transform(cancelled.id()).is_none());

    let before = scene.transform(survivor.id()).unwrap();
    test.advance_frames(3);
    assert!(scene.transform(cancelled.id()).is_none());
    assert_ne!(scene.transform(survivor.id()).unwrap(), before);
}

#[test]
fn cancelling_the_last_marker_stops_the_loop() {
    let test = TestRuntime::new();
    let scene = MotionScene::new(test.handle(), test.pointer());
    let handle = scene.mount(MarkerSpec::at(Vec2::ZERO).following(0.5));
    assert!(test.needs_frame());

    handle.cancel();
    assert!(!test.needs_frame());
    test.advance_frames(2);
    assert!(!test.needs_frame());
}

#[test]
fn dropping_the_handle_unmounts_the_marker() {
    let test = TestRuntime::new();
    let scene = MotionScene::new(test.handle(), test.pointer());
    let handle = scene.mount(MarkerSpec::at(Vec2::ZERO));
    assert_eq!(scene.len(), 1);

    drop(handle);
    assert!(scene.is_empty());
    assert!(!scene.is_animating());
}

#[test]
fn dropping_the_scene_mid_flight_is_silent() {
    let test = TestRuntime::new();
    let scene = MotionScene::new(test.handle(), test.pointer());
    let handle = scene.mount(MarkerSpec::at(Vec2::ZERO).following(0.5));
    assert!(test.needs_frame());

    drop(scene);
    assert!(!test.needs_frame());
    test.advance_frames(2);

    // The orphaned handle stays callable.
    handle.cancel();
    handle.cancel();
}

#[test]
fn remounting_restarts_the_loop() {
    let test = TestRuntime::new();
    let scene = MotionScene::new(test.handle(), test.pointer());
    let first = scene.mount(MarkerSpec::at(Vec2::ZERO));
    first.cancel();
    assert!(!scene.is_animating());

    let second = scene.mount(MarkerSpec::at(Vec2::new(10.0, 10.0)));
    assert_ne!(first.id(), second.id());
    assert!(scene.is_animating());
    test.advance_frame();
    assert_eq!(
        scene.transform(second.id()).unwrap().translation,
        Vec2::new(10.0, 10.0)
    );
}

#[test]
fn transforms_snapshot_preserves_mount_order() {
    let test = TestRuntime::new();
    let scene = MotionScene::new(test.handle(), test.pointer());
    let a = scene.mount(MarkerSpec::at(Vec2::new(1.0, 0.0)));
    let b = scene.mount(MarkerSpec::at(Vec2::new(2.0, 0.0)));
    let c = scene.mount(MarkerSpec::at(Vec2::new(3.0, 0.0)));
    test.advance_frame();

    let ids: Vec<_> = scene.transforms().iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![a.id(), b.id(), c.id()]);

    let before_first_frame = Transform2D::from_translation(Vec2::new(2.0, 0.0));
    assert_eq!(scene.transform(b.id()).unwrap(), before_first_frame);
}
