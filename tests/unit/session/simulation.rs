use std::path::Path;

use super::*;
use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
use crate::foundation::core::{FrameIndex, Point, Vec2};
use crate::foundation::error::RicochetError;
use crate::render::surface::{FrameRGBA, SoftwareSurface};
use crate::scene::load::{LabelSource, LoadOpts};
use crate::session::clock::ManualClock;
use crate::session::input::{FrameBudget, Key, ScriptedInput};
use crate::text::label::BlockLabelFactory;

fn scene(src: &str) -> Scene {
    let opts = LoadOpts {
        labels: LabelSource::Blocks(BlockLabelFactory {
            advance: 8,
            line_height: 16,
            color: Rgba8::new(255, 255, 255, 255),
        }),
        ..LoadOpts::default()
    };
    Scene::load_str(src, Path::new("."), &opts).unwrap()
}

fn sim(src: &str) -> Simulation<ManualClock> {
    let opts = SimulationOpts {
        pacing: false,
        ..SimulationOpts::default()
    };
    Simulation::new(scene(src), opts, ManualClock::new())
}

fn circle(sim: &Simulation<ManualClock>) -> &crate::scene::model::Circle {
    &sim.scene().store.circles().as_slice()[0]
}

fn rect(sim: &Simulation<ManualClock>) -> &crate::scene::model::Rectangle {
    &sim.scene().store.rectangles().as_slice()[0]
}

#[test]
fn zero_velocity_leaves_shapes_in_place() {
    let mut s = sim("Circle C 100 100 0 0 1 2 3 10\nRectangle R 300 300 0 0 1 2 3 40 20\n");
    let (c0, cl0) = (circle(&s).center(), circle(&s).label().rect());
    let (r0, rl0) = (rect(&s).origin(), rect(&s).label().rect());
    s.update();
    assert_eq!(circle(&s).center(), c0);
    assert_eq!(circle(&s).label().rect(), cl0);
    assert_eq!(rect(&s).origin(), r0);
    assert_eq!(rect(&s).label().rect(), rl0);
}

#[test]
fn shape_and_label_move_by_the_same_vector() {
    let mut s = sim("Circle C 200 200 1.5 -2 1 2 3 10\nRectangle R 500 300 -3 0.25 1 2 3 40 20\n");
    let (c0, cl0) = (circle(&s).center(), circle(&s).label().rect());
    let (r0, rl0) = (rect(&s).origin(), rect(&s).label().rect());
    s.update();

    let v = Vec2::new(1.5, -2.0);
    assert_eq!(circle(&s).center(), c0 + v);
    assert_eq!(circle(&s).label().rect(), cl0 + v);

    let v = Vec2::new(-3.0, 0.25);
    assert_eq!(rect(&s).origin(), r0 + v);
    assert_eq!(rect(&s).label().rect(), rl0 + v);
}

#[test]
fn rectangle_at_left_edge_reflects_after_one_step() {
    let mut s = sim("Rectangle R 0 100 -5 0 1 2 3 50 50\n");
    s.update();
    assert_eq!(rect(&s).origin(), Point::new(-5.0, 100.0));
    assert_eq!(rect(&s).velocity(), Vec2::new(5.0, 0.0));
}

#[test]
fn circle_reflects_once_its_edge_crosses_zero() {
    let mut s = sim("Circle C 40 300 -3 0 1 2 3 50\n");
    s.update();
    assert_eq!(circle(&s).velocity(), Vec2::new(3.0, 0.0));

    // 56 -> 53 -> 50 stay inside, 47 crosses.
    let mut s = sim("Circle C 56 300 -3 0 1 2 3 50\n");
    s.update();
    s.update();
    assert_eq!(circle(&s).velocity().x, -3.0);
    s.update();
    assert_eq!(circle(&s).center().x, 47.0);
    assert_eq!(circle(&s).velocity().x, 3.0);
}

#[test]
fn right_and_bottom_walls_use_the_window_size() {
    let mut s = sim("Window 200 100\nRectangle R 150 10 2 0 1 2 3 50 20\nCircle C 100 85 0 1 1 2 3 15\n");
    s.update();
    assert_eq!(rect(&s).velocity(), Vec2::new(-2.0, 0.0));
    assert_eq!(circle(&s).velocity(), Vec2::new(0.0, -1.0));
}

#[test]
fn corner_hit_only_corrects_horizontal_velocity() {
    let mut s = sim("Rectangle R 0 0 -1 -1 1 2 3 10 10\nCircle C 10 10 -1 -1 1 2 3 10\n");
    s.update();
    assert_eq!(rect(&s).velocity(), Vec2::new(1.0, -1.0));
    assert_eq!(circle(&s).velocity(), Vec2::new(1.0, -1.0));
    s.update();
    assert_eq!(rect(&s).velocity(), Vec2::new(1.0, 1.0));
    assert_eq!(circle(&s).velocity(), Vec2::new(1.0, 1.0));
}

#[test]
fn collision_helpers_work_on_a_bare_store() {
    let mut scene = scene("Rectangle R 5 5 -10 0 1 2 3 10 10\n");
    step_motion(&mut scene.store);
    resolve_collisions(&mut scene.store, scene.canvas);
    let r = &scene.store.rectangles().as_slice()[0];
    assert_eq!(r.origin().x, -5.0);
    assert_eq!(r.velocity().x, 10.0);
}

#[test]
fn pacing_sleeps_the_rest_of_the_period() {
    let period = Fps::default().frame_period();
    let mut s = Simulation::new(
        scene("Circle C 100 100 0 0 1 2 3 10\n"),
        SimulationOpts::default(),
        ManualClock::new(),
    );

    // Construction time counts as the previous frame start.
    s.update();
    assert_eq!(s.clock().sleeps(), &[period]);

    s.clock().advance(Duration::from_millis(5));
    s.update();
    assert_eq!(s.clock().sleeps()[1], period - Duration::from_millis(5));

    s.clock().advance(Duration::from_millis(20));
    s.update();
    assert_eq!(s.clock().sleeps().len(), 2);
    assert!(s.clock().sleeps().iter().all(|d| *d <= period));
    assert_eq!(s.stats().slept, period + period - Duration::from_millis(5));
}

#[test]
fn pacing_can_be_disabled() {
    let mut s = sim("Circle C 100 100 0 0 1 2 3 10\n");
    s.update();
    s.update();
    assert!(s.clock().sleeps().is_empty());
}

#[test]
fn exit_key_stops_after_the_current_frame() {
    let mut s = sim("Circle C 100 100 1 0 1 2 3 10\n");
    let mut input = ScriptedInput::new([
        vec![InputEvent::KeyDown(Key::Char('x'))],
        vec![InputEvent::KeyDown(Key::Char('q'))],
        vec![],
    ]);
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), InMemorySink::new())
        .unwrap();
    let stats = s.run(&mut input, &mut out).unwrap();

    assert_eq!(stats.frames, 2);
    assert!(s.is_quit());
    assert_eq!(input.remaining(), 1);
    assert_eq!(circle(&s).center().x, 102.0);
    assert_eq!(out.finish().unwrap().frames().len(), 2);
}

#[test]
fn run_after_quit_renders_nothing() {
    let mut s = sim("Circle C 100 100 1 0 1 2 3 10\n");
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), InMemorySink::new())
        .unwrap();
    s.run(&mut FrameBudget::frames(1), &mut out).unwrap();
    let stats = s.run(&mut FrameBudget::frames(5), &mut out).unwrap();
    assert_eq!(stats.frames, 1);
    assert_eq!(out.presented(), 1);
}

#[test]
fn frame_budget_sets_the_frame_count() {
    let mut s = sim("Circle C 100 100 1 0 1 2 3 10\n");
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), InMemorySink::new())
        .unwrap();
    let stats = s.run(&mut FrameBudget::frames(3), &mut out).unwrap();
    assert_eq!(stats.frames, 3);

    let sink = out.finish().unwrap();
    let idx: Vec<FrameIndex> = sink.frames().iter().map(|(i, _)| *i).collect();
    assert_eq!(idx, vec![FrameIndex(0), FrameIndex(1), FrameIndex(2)]);
}

#[test]
fn render_draws_shapes_then_labels_on_black() {
    let s = sim("Window 64 48\nCircle C 20 20 0 0 255 0 0 5\nRectangle R 40 10 0 0 0 255 0 10 10\n");
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), InMemorySink::new())
        .unwrap();
    s.render(&mut out).unwrap();

    let red = [255, 0, 0, 255];
    let green = [0, 255, 0, 255];
    let white = [255, 255, 255, 255];
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 255]));
    // Circle column left of its 8px-wide label.
    assert_eq!(out.pixel(15, 20), Some(red));
    assert_eq!(out.pixel(25, 20), Some(red));
    // Label drawn over the circle.
    assert_eq!(out.pixel(20, 20), Some(white));
    // Rectangle left column; its label starts at x = 41.
    assert_eq!(out.pixel(40, 15), Some(green));
    assert_eq!(out.pixel(49, 19), Some(green));
    assert_eq!(out.pixel(45, 15), Some(white));
    assert_eq!(out.pixel(50, 15), Some([0, 0, 0, 255]));
    assert_eq!(out.presented(), 1);
}

#[test]
fn render_truncates_fractional_circle_geometry() {
    let s = sim("Window 64 48\nCircle C 20.9 20.9 0 0 255 0 0 5.9\n");
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), InMemorySink::new())
        .unwrap();
    s.render(&mut out).unwrap();
    assert_eq!(out.pixel(15, 20), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(14, 20), Some([0, 0, 0, 255]));
    assert_eq!(out.pixel(26, 20), Some([0, 0, 0, 255]));
}

struct FailingSink;

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RicochetResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> RicochetResult<()> {
        Err(RicochetError::output("disk full"))
    }

    fn end(&mut self) -> RicochetResult<()> {
        Ok(())
    }
}

#[test]
fn present_failure_ends_the_run() {
    let mut s = sim("Circle C 100 100 1 0 1 2 3 10\n");
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), FailingSink).unwrap();
    let err = s.run(&mut FrameBudget::frames(10), &mut out).unwrap_err();
    assert!(matches!(err, RicochetError::Output(_)));
}

#[test]
fn large_circle_covers_the_window() {
    let s = sim("Window 320 240\nCircle C 160 120 0 0 255 0 0 20000\n");
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), InMemorySink::new())
        .unwrap();
    s.render(&mut out).unwrap();
    for (x, y) in [(0, 0), (319, 0), (0, 239), (319, 239)] {
        assert_eq!(out.pixel(x, y), Some([255, 0, 0, 255]), "({x},{y})");
    }
}

#[test]
fn circle_at_the_radius_limit_renders_its_visible_edge() {
    // Center 100px left of the window edge's 2^28 radius.
    let s = sim("Window 320 240\nCircle C -268435356 120 0 0 255 0 0 268435456\n");
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), InMemorySink::new())
        .unwrap();
    s.render(&mut out).unwrap();
    assert_eq!(out.pixel(90, 120), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(99, 0), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(110, 120), Some([0, 0, 0, 255]));
}

#[test]
fn runaway_shapes_render_without_panicking() {
    let mut s = sim("Window 64 48\nRectangle R 10 10 1e300 0 0 255 0 10 10\nCircle C 20 20 0 -1e300 255 0 0 5\n");
    let mut out = SoftwareSurface::new(s.scene().canvas, Fps::default(), InMemorySink::new())
        .unwrap();
    s.update();
    s.render(&mut out).unwrap();
    assert!(out.frame().data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    s.update();
    s.render(&mut out).unwrap();
    assert_eq!(out.presented(), 2);
}
