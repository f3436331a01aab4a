//! A host without a display: a simulated refresh clock, scripted resize
//! events, and PNG capture of rendered frames.

use std::collections::VecDeque;
use std::path::PathBuf;

use stardrift_config::Config;
use stardrift_field::Viewport;
use stardrift_render::{PixelSurface, RenderError, write_png};
use tracing::info;

use crate::animator::{Animator, FrameStats};
use crate::error::AppError;
use crate::host::{FrameScheduler, ResizeEvent, ResizeSource};

/// Refresh clock that fires at a fixed rate, but only when a frame was requested.
#[derive(Debug)]
pub struct SimulatedClock {
    interval_ms: f64,
    now_ms: f64,
    requested: bool,
}

impl SimulatedClock {
    pub fn new(fps: u32) -> Self {
        Self {
            interval_ms: 1000.0 / f64::from(fps.max(1)),
            now_ms: 0.0,
            requested: false,
        }
    }

    /// Timestamp of the next refresh, if a frame is pending.
    pub fn next_frame(&mut self) -> Option<f64> {
        if !std::mem::take(&mut self.requested) {
            return None;
        }
        let t = self.now_ms;
        self.now_ms += self.interval_ms;
        Some(t)
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

impl FrameScheduler for SimulatedClock {
    fn request_frame(&mut self) {
        self.requested = true;
    }
}

/// Resize events delivered once the clock passes their timestamps.
#[derive(Debug, Default)]
pub struct ScriptedResizes {
    events: VecDeque<ResizeEvent>,
}

impl ScriptedResizes {
    pub fn new(mut events: Vec<ResizeEvent>) -> Self {
        events.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Self {
            events: events.into(),
        }
    }

    /// A drag-resize: `count` events spaced `spacing_ms` apart, starting at
    /// `start_ms`, stepping linearly from `from` to `to`.
    pub fn burst(from: Viewport, to: Viewport, start_ms: f64, count: u32, spacing_ms: f64) -> Self {
        let count = count.max(1);
        let events = (1..=count)
            .map(|i| {
                let t = i as f32 / count as f32;
                ResizeEvent {
                    width: from.width() + (to.width() - from.width()) * t,
                    height: from.height() + (to.height() - from.height()) * t,
                    pixel_ratio: to.pixel_ratio(),
                    at_ms: start_ms + f64::from(i - 1) * spacing_ms,
                }
            })
            .collect();
        Self::new(events)
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl ResizeSource for ScriptedResizes {
    fn poll_resize(&mut self, now_ms: f64) -> Option<ResizeEvent> {
        if self.events.front()?.at_ms <= now_ms {
            self.events.pop_front()
        } else {
            None
        }
    }
}

/// A resize burst to replay during a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeScript {
    pub width: u32,
    pub height: u32,
    pub start_ms: f64,
    pub events: u32,
    pub spacing_ms: f64,
}

/// Parameters for [`run_headless`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessOptions {
    /// Frames to render before stopping.
    pub frames: u32,
    /// Directory for PNG captures; nothing is written when `None`.
    pub output_dir: Option<PathBuf>,
    /// Capture every n-th frame, starting with the first.
    pub capture_every: u32,
    pub resize: Option<ResizeScript>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            frames: 120,
            output_dir: None,
            capture_every: 30,
            resize: None,
        }
    }
}

/// Animate `config` for a fixed number of simulated frames onto a software
/// surface and return the final statistics.
pub fn run_headless(config: &Config, options: &HeadlessOptions) -> Result<FrameStats, AppError> {
    let initial = Viewport::from(&config.window);
    let physical = initial.physical_size();
    let surface = PixelSurface::new(physical.width, physical.height);

    let mut clock = SimulatedClock::new(config.host.target_fps);
    let mut resizes = match options.resize {
        Some(script) => ScriptedResizes::burst(
            initial,
            Viewport::new(
                script.width as f32,
                script.height as f32,
                initial.pixel_ratio(),
            ),
            script.start_ms,
            script.events,
            script.spacing_ms,
        ),
        None => ScriptedResizes::default(),
    };

    if let Some(dir) = &options.output_dir {
        std::fs::create_dir_all(dir).map_err(RenderError::from)?;
    }

    let mut animator = Animator::start(config, initial, Some(surface), &mut clock)?;
    let every = options.capture_every.max(1);
    let mut captured = 0u32;

    for index in 0..options.frames {
        let Some(timestamp) = clock.next_frame() else {
            break;
        };
        if animator.on_frame(timestamp, &mut resizes, &mut clock).is_none() {
            break;
        }
        if let Some(dir) = &options.output_dir
            && index % every == 0
        {
            let path = dir.join(format!("frame_{index:05}.png"));
            write_png(animator.surface(), &path)?;
            captured += 1;
        }
    }
    animator.stop();

    let stats = animator.stats().clone();
    info!(
        "Headless run finished: {} frames, {} regenerations, {} captures",
        stats.frames_rendered, stats.regenerations, captured
    );
    Ok(stats)
}
