//! Drives a [`ParticleField`] from host frame callbacks.
//!
//! The host owns the clock. Each callback runs at most one tick and one
//! render; nothing here sleeps, spawns, or reads wall-clock time.

use serde::Serialize;
use stardrift_config::Config;
use stardrift_field::{ParticleField, Viewport};
use stardrift_render::{Surface, render};
use tracing::{debug, info};

use crate::debounce::ResizeDebouncer;
use crate::error::AppError;
use crate::host::{FrameScheduler, ResizeEvent, ResizeSource};

/// Frames between FPS estimates.
pub const FPS_WINDOW_FRAMES: u64 = 60;

/// Counters updated every frame. Serializable for `--stats` output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrameStats {
    pub frames_rendered: u64,
    /// Field regenerations, including the initial layout at start.
    pub regenerations: u64,
    /// Resize events received from the host before debouncing.
    pub resize_events: u64,
    pub last_draw_calls: usize,
    /// Estimate over the most recent full window of frames.
    pub fps: Option<f64>,
    pub star_count: usize,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub last_timestamp_ms: f64,
}

/// What a single frame callback did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub timestamp_ms: f64,
    pub draw_calls: usize,
    /// A debounced resize was applied before this frame's tick.
    pub regenerated: bool,
}

/// Counts frames over fixed windows and turns them into a rate.
#[derive(Debug, Default)]
struct FpsProbe {
    window_start_ms: Option<f64>,
    frames: u64,
}

impl FpsProbe {
    /// Record a frame; returns a fresh estimate each time the window fills.
    fn record(&mut self, timestamp_ms: f64) -> Option<f64> {
        let Some(start) = self.window_start_ms else {
            self.window_start_ms = Some(timestamp_ms);
            return None;
        };
        self.frames += 1;
        if self.frames < FPS_WINDOW_FRAMES {
            return None;
        }
        let elapsed = timestamp_ms - start;
        self.window_start_ms = Some(timestamp_ms);
        let frames = std::mem::take(&mut self.frames);
        (elapsed > 0.0).then(|| frames as f64 * 1000.0 / elapsed)
    }
}

/// Owns the field and the drawing surface for one animated view.
pub struct Animator<S: Surface> {
    field: ParticleField,
    surface: S,
    debouncer: ResizeDebouncer,
    stats: FrameStats,
    fps: FpsProbe,
    show_fps: bool,
    running: bool,
}

impl<S: Surface> Animator<S> {
    /// Validate `config`, lay out the field for `initial`, and request the
    /// first frame.
    ///
    /// # Errors
    ///
    /// [`AppError::Config`] if the configuration is rejected, and
    /// [`AppError::SurfaceUnavailable`] if the host has no surface to draw on.
    /// Nothing is scheduled in either case.
    pub fn start(
        config: &Config,
        initial: Viewport,
        surface: Option<S>,
        scheduler: &mut impl FrameScheduler,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let surface = surface.ok_or(AppError::SurfaceUnavailable)?;

        let mut field = ParticleField::configure(config.field.clone())?;
        field.resize(initial);

        let mut animator = Self {
            field,
            surface,
            debouncer: ResizeDebouncer::new(config.host.resize_debounce_ms),
            stats: FrameStats::default(),
            fps: FpsProbe::default(),
            show_fps: config.debug.show_fps,
            running: true,
        };
        animator.sync_layout_stats();

        info!(
            "Animator started at {}x{} (ratio {:.2}) with {} stars",
            initial.width(),
            initial.height(),
            initial.pixel_ratio(),
            animator.stats.star_count
        );
        scheduler.request_frame();
        Ok(animator)
    }

    /// Queue a resize reported outside the per-frame poll.
    pub fn on_resize(&mut self, event: ResizeEvent) {
        self.stats.resize_events += 1;
        self.debouncer.push(event);
    }

    /// Handle one frame callback at `timestamp_ms`.
    ///
    /// Returns `None` without drawing once the animator has been stopped.
    pub fn on_frame(
        &mut self,
        timestamp_ms: f64,
        resizes: &mut impl ResizeSource,
        scheduler: &mut impl FrameScheduler,
    ) -> Option<FrameReport> {
        if !self.running {
            return None;
        }

        while let Some(event) = resizes.poll_resize(timestamp_ms) {
            self.on_resize(event);
        }

        let regenerated = match self.debouncer.poll(timestamp_ms) {
            Some(event) => {
                self.field.resize(event.viewport());
                self.sync_layout_stats();
                debug!(
                    "Applied debounced resize to {}x{} ({} events coalesced so far)",
                    event.width,
                    event.height,
                    self.debouncer.coalesced()
                );
                true
            }
            None => false,
        };

        let frame = self.field.tick(timestamp_ms);
        render(&frame, &mut self.surface);

        let draw_calls = frame.draw_call_count();
        self.stats.frames_rendered += 1;
        self.stats.last_draw_calls = draw_calls;
        self.stats.last_timestamp_ms = timestamp_ms;
        if let Some(fps) = self.fps.record(timestamp_ms) {
            self.stats.fps = Some(fps);
            if self.show_fps {
                info!("FPS: {fps:.1} ({draw_calls} draw calls)");
            } else {
                debug!("FPS: {fps:.1}");
            }
        }

        scheduler.request_frame();
        Some(FrameReport {
            timestamp_ms,
            draw_calls,
            regenerated,
        })
    }

    /// Stop requesting frames. Later callbacks are ignored.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            info!(
                "Animator stopped after {} frames",
                self.stats.frames_rendered
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn sync_layout_stats(&mut self) {
        let viewport = self.field.viewport();
        self.stats.regenerations = self.field.generation();
        self.stats.star_count = self.field.stars().len();
        self.stats.viewport_width = viewport.width();
        self.stats.viewport_height = viewport.height();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::FrameRequests;
    use stardrift_render::{DrawCommand, RecordingSurface};

    fn started(config: &Config) -> (Animator<RecordingSurface>, FrameRequests) {
        let mut scheduler = FrameRequests::new();
        let animator = Animator::start(
            config,
            Viewport::new(320.0, 240.0, 1.0),
            Some(RecordingSurface::new()),
            &mut scheduler,
        )
        .unwrap();
        (animator, scheduler)
    }

    #[test]
    fn test_start_requests_first_frame() {
        let (animator, scheduler) = started(&Config::default());
        assert!(scheduler.pending());
        assert_eq!(scheduler.total(), 1);
        assert_eq!(animator.stats().regenerations, 1);
        assert_eq!(animator.stats().star_count, 645);
        assert_eq!(animator.stats().frames_rendered, 0);
    }

    #[test]
    fn test_start_without_surface_fails() {
        let mut scheduler = FrameRequests::new();
        let result = Animator::<RecordingSurface>::start(
            &Config::default(),
            Viewport::new(320.0, 240.0, 1.0),
            None,
            &mut scheduler,
        );
        assert!(matches!(result, Err(AppError::SurfaceUnavailable)));
        assert_eq!(scheduler.total(), 0);
    }

    #[test]
    fn test_start_rejects_invalid_config() {
        let mut config = Config::default();
        config.field.glow.min = 30.0;
        let mut scheduler = FrameRequests::new();
        let result = Animator::start(
            &config,
            Viewport::new(320.0, 240.0, 1.0),
            Some(RecordingSurface::new()),
            &mut scheduler,
        );
        assert!(matches!(result, Err(AppError::Config(_))));
        assert!(!scheduler.pending());
    }

    #[test]
    fn test_each_frame_renders_once_and_reschedules() {
        let (mut animator, mut scheduler) = started(&Config::default());
        scheduler.take();
        let report = animator.on_frame(0.0, &mut (), &mut scheduler).unwrap();
        assert!(!report.regenerated);
        assert!(scheduler.take());

        let surface = animator.surface();
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Clear(_))), 1);
        assert_eq!(surface.count(|c| matches!(c, DrawCommand::Circle { .. })), 645);
        assert_eq!(animator.stats().last_draw_calls, report.draw_calls);
    }

    #[test]
    fn test_stop_halts_frames() {
        let (mut animator, mut scheduler) = started(&Config::default());
        animator.on_frame(0.0, &mut (), &mut scheduler);
        animator.stop();
        scheduler.take();
        assert!(animator.on_frame(16.0, &mut (), &mut scheduler).is_none());
        assert!(!scheduler.pending());
        assert_eq!(animator.stats().frames_rendered, 1);
        assert!(!animator.is_running());
    }

    #[test]
    fn test_on_resize_waits_for_quiet_window() {
        let (mut animator, mut scheduler) = started(&Config::default());
        animator.on_resize(ResizeEvent {
            width: 800.0,
            height: 600.0,
            pixel_ratio: 2.0,
            at_ms: 0.0,
        });
        assert!(!animator.on_frame(50.0, &mut (), &mut scheduler).unwrap().regenerated);
        assert!(animator.on_frame(130.0, &mut (), &mut scheduler).unwrap().regenerated);
        assert_eq!(animator.stats().regenerations, 2);
        assert_eq!(animator.stats().viewport_width, 800.0);
        assert_eq!(animator.field().viewport().pixel_ratio(), 2.0);
    }

    #[test]
    fn test_fps_estimated_every_window() {
        let (mut animator, mut scheduler) = started(&Config::default());
        let interval = 1000.0 / 60.0;
        for i in 0..=FPS_WINDOW_FRAMES {
            animator.on_frame(i as f64 * interval, &mut (), &mut scheduler);
        }
        let fps = animator.stats().fps.unwrap();
        assert!((fps - 60.0).abs() < 1e-6, "fps {fps}");
    }

    #[test]
    fn test_fps_probe_needs_full_window() {
        let mut probe = FpsProbe::default();
        for i in 0..FPS_WINDOW_FRAMES {
            assert!(probe.record(i as f64 * 10.0).is_none());
        }
        assert_eq!(probe.record(FPS_WINDOW_FRAMES as f64 * 10.0), Some(100.0));
    }
}
