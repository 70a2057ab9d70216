//! The PollInput -> Update -> Render loop.

use std::time::Duration;

use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::RicochetResult;
use crate::render::raster::fill_circle;
use crate::render::target::Presenter;
use crate::scene::load::Scene;
use crate::scene::model::Body;
use crate::scene::store::SceneStore;
use crate::session::clock::{Clock, SystemClock};
use crate::session::input::{InputEvent, InputSource};

/// Loop timing options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimulationOpts {
    /// Target frame rate; its period bounds every pacing sleep.
    pub fps: Fps,
    /// Sleep to hold the target rate. Offline rendering turns this off.
    pub pacing: bool,
}

impl Default for SimulationOpts {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            pacing: true,
        }
    }
}

/// What a finished run did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunStats {
    /// Frames presented.
    pub frames: u64,
    /// Total time spent in pacing sleeps.
    pub slept: Duration,
}

/// Loop context: the scene plus the timing and quit state the phases share.
pub struct Simulation<C: Clock = SystemClock> {
    scene: Scene,
    clock: C,
    opts: SimulationOpts,
    quit: bool,
    last_frame_start: Duration,
    stats: RunStats,
    events: Vec<InputEvent>,
}

impl Simulation<SystemClock> {
    /// Simulation paced by the wall clock.
    pub fn with_system_clock(scene: Scene, opts: SimulationOpts) -> Self {
        Self::new(scene, opts, SystemClock::new())
    }
}

impl<C: Clock> Simulation<C> {
    /// The first frame is paced against the construction time.
    pub fn new(scene: Scene, opts: SimulationOpts, clock: C) -> Self {
        let last_frame_start = clock.now();
        Self {
            scene,
            clock,
            opts,
            quit: false,
            last_frame_start,
            stats: RunStats::default(),
            events: Vec::new(),
        }
    }

    /// The scene being animated.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The pacing clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Whether an exit event has been seen.
    pub fn is_quit(&self) -> bool {
        self.quit
    }

    /// Drain pending input. Any exit event latches the quit flag.
    pub fn poll_input(&mut self, input: &mut dyn InputSource) -> bool {
        self.events.clear();
        input.poll(&mut self.events);
        for ev in &self.events {
            if ev.is_exit() {
                tracing::debug!(event = ?ev, "quit requested");
                self.quit = true;
            }
        }
        self.quit
    }

    /// Pace, move every shape, then bounce off the world walls.
    pub fn update(&mut self) {
        self.pace();
        step_motion(&mut self.scene.store);
        resolve_collisions(&mut self.scene.store, self.scene.canvas);
    }

    fn pace(&mut self) {
        let period = self.opts.fps.frame_period();
        let now = self.clock.now();
        if self.opts.pacing
            && let Some(elapsed) = now.checked_sub(self.last_frame_start)
            && let Some(wait) = period.checked_sub(elapsed)
            && !wait.is_zero()
        {
            self.clock.sleep(wait);
            self.stats.slept += wait;
        }
        self.last_frame_start = self.clock.now();
    }

    /// Draw the current state and present it.
    pub fn render<P: Presenter + ?Sized>(&self, out: &mut P) -> RicochetResult<()> {
        render_scene(&self.scene.store, out)
    }

    /// Loop until an exit event is observed. The iteration that observes it still updates and
    /// renders.
    #[tracing::instrument(level = "debug", skip_all, fields(fps = self.opts.fps.as_f64()))]
    pub fn run<P: Presenter + ?Sized>(
        &mut self,
        input: &mut dyn InputSource,
        out: &mut P,
    ) -> RicochetResult<RunStats> {
        while !self.quit {
            self.poll_input(input);
            self.update();
            self.render(out)?;
            self.stats.frames += 1;
            tracing::trace!(frame = self.stats.frames, "frame presented");
        }
        tracing::info!(
            frames = self.stats.frames,
            slept_ms = self.stats.slept.as_millis() as u64,
            "simulation finished"
        );
        Ok(self.stats)
    }
}

/// Advance every shape (and its label) by its velocity.
pub fn step_motion(store: &mut SceneStore) {
    for c in store.circles_mut().iter_mut() {
        c.advance();
    }
    for r in store.rectangles_mut().iter_mut() {
        r.advance();
    }
}

/// Reflect shapes that crossed a wall of `canvas`.
///
/// A horizontal hit suppresses the vertical check for that shape in the same step, so a shape
/// past a corner only has its x velocity corrected this step.
pub fn resolve_collisions(store: &mut SceneStore, canvas: Canvas) {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    for r in store.rectangles_mut().iter_mut() {
        bounce(r, w, h);
    }
    for c in store.circles_mut().iter_mut() {
        bounce(c, w, h);
    }
}

fn bounce<B: Body>(body: &mut B, w: f64, h: f64) {
    let (x0, x1) = body.extent_x();
    let (y0, y1) = body.extent_y();
    if x0 < 0.0 || x1 > w {
        body.reflect_x();
    } else if y0 < 0.0 || y1 > h {
        body.reflect_y();
    }
}

fn render_scene<P: Presenter + ?Sized>(store: &SceneStore, out: &mut P) -> RicochetResult<()> {
    out.clear(Rgba8::BLACK);

    for c in store.circles() {
        let center = c.center();
        fill_circle(
            out,
            center.x as i32,
            center.y as i32,
            c.radius() as i32,
            c.color().opaque(),
        )?;
        out.draw_label(c.label());
    }

    for r in store.rectangles() {
        let color = r.color().opaque();
        out.fill_rect(r.rect(), color);
        out.outline_rect(r.rect(), color);
        out.draw_label(r.label());
    }

    out.present()
}

#[cfg(test)]
#[path = "../../tests/unit/session/simulation.rs"]
mod tests;
