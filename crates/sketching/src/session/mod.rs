//! Drawing session
//!
//! The session owns everything mutable about a drawing:
//! 1. Pointer events come in via `pointer_down`, `pointer_move`, `pointer_up`
//! 2. The sampling policy filters moves into samples of the current stroke
//! 3. Frame callbacks render the image through a [`DrawTarget`]
//! 4. Tunable updates apply from the next event on
//!
//! It is single-threaded by construction; see [`crate::event_loop`] for the
//! queue that feeds it.

mod pointer;

use sketchpad_config::{DisplayConfig, TunableUpdate, Tunables};
use sketchpad_ipc::PointerObservation;
use tracing::debug;

use crate::render::{DrawTarget, FrameOutcome, FrameStats, RenderLoop};
use crate::sampling::SamplingPolicy;
use crate::types::{Image, Stroke};

/// Notifications for session listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionNotice {
    StrokeStarted { index: usize },
    StrokeFinished { index: usize, samples: usize },
    FrameRendered(FrameStats),
}

type Listener = Box<dyn Fn(&SessionNotice) + Send>;

/// A drawing session
pub struct Session {
    image: Image,
    /// Index of the stroke being drawn (None between gestures)
    current_stroke: Option<usize>,
    sampling: SamplingPolicy,
    render: RenderLoop,
    tunables: Tunables,
    display: DisplayConfig,
    /// Last raw pointer observation of the active gesture
    last_pointer: Option<PointerObservation>,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("stroke_count", &self.image.stroke_count())
            .field("current_stroke", &self.current_stroke)
            .field("tunables", &self.tunables)
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tunables::default(), DisplayConfig::default())
    }
}

impl Session {
    pub fn new(tunables: Tunables, display: DisplayConfig) -> Self {
        Self {
            image: Image::new(),
            current_stroke: None,
            sampling: SamplingPolicy::new(),
            render: RenderLoop::new(),
            tunables,
            display,
            last_pointer: None,
            listeners: Vec::new(),
        }
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    /// Check if a gesture is in progress
    pub fn is_drawing(&self) -> bool {
        self.current_stroke.is_some()
    }

    /// The stroke of the gesture in progress
    pub fn current_stroke(&self) -> Option<&Stroke> {
        self.current_stroke.and_then(|i| self.image.stroke(i))
    }

    pub fn last_pointer(&self) -> Option<&PointerObservation> {
        self.last_pointer.as_ref()
    }

    /// Frames rendered in the last completed second
    pub fn refresh_rate(&self) -> u32 {
        self.render.rate()
    }

    /// Sampling ticks in the last completed second
    pub fn sampling_rate(&self) -> u32 {
        self.sampling.rate()
    }

    /// Register a listener for session notices
    pub fn subscribe(&mut self, listener: impl Fn(&SessionNotice) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub(crate) fn notify(&self, notice: SessionNotice) {
        for listener in &self.listeners {
            listener(&notice);
        }
    }

    /// Apply a live tunable update
    pub fn apply(&mut self, update: TunableUpdate) {
        self.tunables.apply(update);
        debug!("Session: applied {:?}", update);
    }

    /// Handle a frame callback
    pub fn frame<T: DrawTarget + ?Sized>(&mut self, time: f64, target: &mut T) -> FrameOutcome {
        let outcome = self.render.frame(
            time,
            &self.image,
            &mut self.sampling,
            self.last_pointer.as_ref(),
            &self.tunables,
            target,
        );
        if let FrameOutcome::Rendered(stats) = outcome {
            self.notify(SessionNotice::FrameRendered(stats));
        }
        outcome
    }

    /// The viewport changed. Stroke coordinates stay in logical units.
    pub fn resize<T: DrawTarget + ?Sized>(&mut self, display: DisplayConfig, target: &mut T) {
        let DisplayConfig {
            width,
            height,
            scale,
        } = display;
        debug!("Session: resize to {}x{} @{}", width, height, scale);
        self.display = display;
        target.set_viewport(&self.display);
    }
}
