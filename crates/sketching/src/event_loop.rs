//! Single-consumer event loop driving a [`Session`]
//!
//! Pointer events, frame callbacks, resizes and tunable updates from any
//! producer are funneled through one unbounded channel and handled strictly
//! in arrival order, so the session never sees concurrent mutation.

use sketchpad_config::{DisplayConfig, TunableUpdate};
use sketchpad_ipc::{PointerEvent, UiToSketch};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::SketchError;
use crate::render::DrawTarget;
use crate::session::Session;

/// Everything the session reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Pointer { event: PointerEvent, time_ms: f64 },
    Frame { time_ms: f64 },
    Resize(DisplayConfig),
    Update(TunableUpdate),
    Shutdown,
}

impl From<UiToSketch> for SessionEvent {
    fn from(message: UiToSketch) -> Self {
        match message {
            UiToSketch::UpdateTunable(update) => Self::Update(update),
            UiToSketch::Resize(display) => Self::Resize(display),
        }
    }
}

/// Cloneable producer side of the event loop
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl SessionHandle {
    pub fn send(&self, event: SessionEvent) -> Result<(), SketchError> {
        self.tx.send(event).map_err(|_| SketchError::ChannelClosed)
    }

    pub fn pointer(&self, event: PointerEvent, time_ms: f64) -> Result<(), SketchError> {
        self.send(SessionEvent::Pointer { event, time_ms })
    }

    pub fn frame(&self, time_ms: f64) -> Result<(), SketchError> {
        self.send(SessionEvent::Frame { time_ms })
    }

    pub fn resize(&self, display: DisplayConfig) -> Result<(), SketchError> {
        self.send(SessionEvent::Resize(display))
    }

    pub fn update(&self, update: TunableUpdate) -> Result<(), SketchError> {
        self.send(SessionEvent::Update(update))
    }

    pub fn shutdown(&self) -> Result<(), SketchError> {
        self.send(SessionEvent::Shutdown)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Whether the loop keeps running after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Stop,
}

/// Consumer side: owns the session and its draw target
pub struct EventLoop<T: DrawTarget> {
    session: Session,
    target: T,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
}

/// Create an event loop and the handle that feeds it
pub fn channel<T: DrawTarget>(session: Session, target: T) -> (SessionHandle, EventLoop<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        SessionHandle { tx },
        EventLoop {
            session,
            target,
            rx,
        },
    )
}

impl<T: DrawTarget> EventLoop<T> {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Handle one event. Errors are logged and do not stop the loop.
    pub fn handle(&mut self, event: SessionEvent) -> LoopControl {
        match event {
            SessionEvent::Pointer { event, time_ms } => {
                if let Err(e) = self.session.handle_pointer(event, time_ms) {
                    warn!("EventLoop: dropped pointer event at {:.1}ms: {}", time_ms, e);
                }
            }
            SessionEvent::Frame { time_ms } => {
                self.session.frame(time_ms, &mut self.target);
            }
            SessionEvent::Resize(display) => {
                self.session.resize(display, &mut self.target);
            }
            SessionEvent::Update(update) => self.session.apply(update),
            SessionEvent::Shutdown => {
                debug!("EventLoop: shutdown requested");
                return LoopControl::Stop;
            }
        }
        LoopControl::Continue
    }

    /// Process events until shutdown or until every handle is dropped.
    ///
    /// Returns the session and target for inspection.
    pub async fn run(mut self) -> (Session, T) {
        info!("EventLoop: started");
        while let Some(event) = self.rx.recv().await {
            if self.handle(event) == LoopControl::Stop {
                break;
            }
        }
        info!(
            "EventLoop: stopped with {} strokes, {} samples",
            self.session.image().stroke_count(),
            self.session.image().sample_count()
        );
        (self.session, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingTarget;
    use sketchpad_ipc::PointerObservation;

    #[tokio::test]
    async fn test_run_until_handles_dropped() {
        let (handle, event_loop) = channel(Session::default(), RecordingTarget::new());

        handle
            .pointer(PointerEvent::Down(PointerObservation::at(0.0, 0.0, 0.5)), 0.0)
            .unwrap();
        handle
            .pointer(PointerEvent::Move(PointerObservation::at(20.0, 0.0, 0.5)), 5.0)
            .unwrap();
        handle.pointer(PointerEvent::Up, 6.0).unwrap();
        handle.frame(16.0).unwrap();
        drop(handle);

        let (session, target) = event_loop.run().await;
        assert_eq!(session.image().sample_count(), 2);
        assert!(!session.is_drawing());
        assert_eq!(target.path_count(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_stops_loop() {
        let (handle, event_loop) = channel(Session::default(), RecordingTarget::new());
        handle.shutdown().unwrap();
        handle.frame(0.0).unwrap();

        let (_, target) = event_loop.run().await;
        // The frame queued after shutdown is never rendered
        assert!(target.commands().is_empty());
    }

    #[tokio::test]
    async fn test_send_after_stop_fails() {
        let (handle, event_loop) = channel(Session::default(), RecordingTarget::new());
        handle.shutdown().unwrap();
        drop(event_loop.run().await);

        assert!(handle.is_closed());
        assert!(matches!(handle.frame(0.0), Err(SketchError::ChannelClosed)));
    }

    #[tokio::test]
    async fn test_updates_apply_in_order() {
        let (handle, event_loop) = channel(Session::default(), RecordingTarget::new());
        handle.update(TunableUpdate::ShowDebugOverlay(false)).unwrap();
        handle.frame(0.0).unwrap();
        handle.update(TunableUpdate::ShowDebugOverlay(true)).unwrap();
        drop(handle);

        let (session, target) = event_loop.run().await;
        assert!(session.tunables().show_debug_overlay);
        assert!(target.texts().is_empty());
    }

    #[test]
    fn test_ui_message_conversion() {
        let display = DisplayConfig::new(640, 480);
        assert_eq!(
            SessionEvent::from(UiToSketch::Resize(display)),
            SessionEvent::Resize(display)
        );
        assert_eq!(
            SessionEvent::from(UiToSketch::UpdateTunable(TunableUpdate::Smoothing(0.5))),
            SessionEvent::Update(TunableUpdate::Smoothing(0.5))
        );
    }

    #[test]
    fn test_handle_logs_bad_pointer_and_continues() {
        let (_handle, mut event_loop) = channel(Session::default(), RecordingTarget::new());
        let down = SessionEvent::Pointer {
            event: PointerEvent::Down(PointerObservation::at(0.0, 0.0, 0.5)),
            time_ms: 10.0,
        };
        let back_in_time = SessionEvent::Pointer {
            event: PointerEvent::Move(PointerObservation::at(5.0, 0.0, 0.5)),
            time_ms: 1.0,
        };

        assert_eq!(event_loop.handle(down), LoopControl::Continue);
        assert_eq!(event_loop.handle(back_in_time), LoopControl::Continue);
        assert_eq!(event_loop.session().image().sample_count(), 1);
    }
}
