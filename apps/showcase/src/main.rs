//! Headless tour of the Carve engine.
//!
//! Builds the decorative layer of a skate-brand landing page from
//! `scene.toml`, then plays a scripted session: the pointer sweeps the
//! viewport, the page scrolls down past the hero and back up, a button
//! hover and press land mid-run, and one decal unmounts while the rest
//! keep animating. Marker transforms are printed once a second.

use std::error::Error;
use std::thread;
use std::time::Duration;

use carve_animation::Field;
use carve_geometry::Vec2;
use carve_runtime_std::StdRuntime;
use carve_scene::{
    AnimatorHandle, GlitchTicker, HeaderReveal, MotionScene, SceneManifest, ScrollMetrics,
    ScrollTracker,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
const CONTENT_HEIGHT: f64 = 3200.0;
const HEADER_THRESHOLD: f64 = 640.0;
const FRAMES: u64 = 600;
const MAX_SCROLL: f64 = CONTENT_HEIGHT - 720.0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let manifest = SceneManifest::from_toml_str(include_str!("../scene.toml"))?;
    let runtime = StdRuntime::new();
    let pointer = runtime.pointer();
    pointer.record(VIEWPORT.x / 2.0, VIEWPORT.y / 2.0);

    let scene = MotionScene::new(runtime.handle(), pointer.clone());
    let mut markers: Vec<(String, AnimatorHandle)> = manifest
        .markers
        .iter()
        .map(|(name, spec)| (name.clone(), scene.mount(spec.clone())))
        .collect();
    println!("mounted {} markers from scene.toml", markers.len());

    let mut rng = StdRng::from_entropy();
    let mut field = manifest.field.as_ref().map(|manifest| {
        let mut field = Field::new(manifest.spec, VIEWPORT);
        for _ in 0..manifest.count {
            field.push(Vec2::new(
                rng.gen_range(0.0..VIEWPORT.x),
                rng.gen_range(0.0..VIEWPORT.y),
            ));
        }
        field
    });

    let glitch = manifest.glitch.as_ref().map(|manifest| {
        GlitchTicker::start(
            runtime.handle(),
            manifest.text.clone(),
            manifest.spec.clone(),
            StdRng::seed_from_u64(rng.gen()),
        )
    });

    let scroll = ScrollTracker::new();
    let reveal = HeaderReveal::new(runtime.handle(), 96.0, 0.3);

    let cursor_id = markers
        .iter()
        .find(|(name, _)| name == "cursor")
        .map(|(_, handle)| handle.id());

    for frame in 0..FRAMES {
        let t = frame as f64 / 60.0;

        // Pointer sweeps the viewport on a lissajous path.
        let x = VIEWPORT.x * (0.5 + 0.4 * (t * 0.9).sin());
        let y = VIEWPORT.y * (0.5 + 0.4 * (t * 1.3).cos());
        pointer.record(x, y);
        if let Some(field) = field.as_mut() {
            field.nudge(Vec2::new(x, y));
        }

        // Scroll down past the hero for the first half, back up after.
        let offset = if frame < FRAMES / 2 {
            MAX_SCROLL * frame as f64 / (FRAMES / 2) as f64
        } else {
            MAX_SCROLL * (FRAMES - frame) as f64 / (FRAMES / 2) as f64
        };
        scroll.record(ScrollMetrics::new(offset, VIEWPORT.y, CONTENT_HEIGHT));
        reveal.sync(scroll.metrics(), HEADER_THRESHOLD);

        // A shop-button hover and click midway through the tour.
        if let Some(id) = cursor_id {
            scene.set_hovered(id, (180..300).contains(&frame));
            scene.set_pressed(id, (240..252).contains(&frame));
        }

        // One decal leaves the page while everything else keeps going.
        if frame == 450 {
            if let Some((name, handle)) = markers.pop() {
                handle.cancel();
                println!("[{frame:>3}] unmounted {name:?}");
            }
        }

        if runtime.take_frame_request() {
            runtime.advance();
        }
        if let Some(field) = field.as_mut() {
            field.step();
        }

        if frame % 60 == 0 {
            report(frame, &scene, &markers, field.as_ref(), glitch.as_ref());
            println!(
                "[{frame:>3}] scroll {:>4.0}px ({:.0}%), header offset {:+.1}px",
                offset,
                scroll.progress() * 100.0,
                reveal.offset()
            );
        }

        thread::sleep(Duration::from_millis(16));
    }

    if let Some(glitch) = &glitch {
        glitch.cancel();
    }
    for (name, handle) in &markers {
        handle.cancel();
        log::debug!("unmounted {name:?} on shutdown");
    }
    println!("done: scene empty = {}", scene.is_empty());
    Ok(())
}

fn report(
    frame: u64,
    scene: &MotionScene,
    markers: &[(String, AnimatorHandle)],
    field: Option<&Field>,
    glitch: Option<&GlitchTicker>,
) {
    for (name, handle) in markers {
        if let Some(transform) = scene.transform(handle.id()) {
            println!(
                "[{frame:>3}] {name:<12} at ({:>7.2}, {:>7.2}) scale {:.3} rot {:+7.2}",
                transform.translation.x,
                transform.translation.y,
                transform.scale,
                transform.rotation
            );
        }
    }
    if let Some(field) = field {
        let speed: f64 = field
            .particles()
            .iter()
            .map(|particle| particle.velocity.length())
            .sum();
        println!(
            "[{frame:>3}] field: {} particles, total speed {:.2}",
            field.particles().len(),
            speed
        );
    }
    if let Some(glitch) = glitch {
        println!("[{frame:>3}] headline: {}", glitch.text());
    }
}
