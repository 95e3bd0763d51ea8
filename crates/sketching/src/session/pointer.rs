//! Pointer gesture handling

use sketchpad_ipc::{PointerEvent, PointerObservation};
use tracing::{debug, trace};

use super::{Session, SessionNotice};
use crate::error::SketchError;
use crate::sampling::SampleDecision;
use crate::types::{Sample, Stroke};

impl Session {
    /// Start a gesture: a new stroke seeded with the down position.
    ///
    /// The first sample bypasses both sampling gates. A down that arrives
    /// mid-gesture closes the previous stroke first.
    pub fn pointer_down(
        &mut self,
        obs: PointerObservation,
        now: f64,
    ) -> Result<usize, SketchError> {
        if self.current_stroke.is_some() {
            debug!("Session: pointer down during a gesture, closing previous stroke");
            self.end_gesture();
        }

        let mut stroke = Stroke::new();
        stroke.push(Sample::from_observation(&obs, now))?;
        let index = self.image.add_stroke(stroke);

        self.current_stroke = Some(index);
        self.last_pointer = Some(obs);
        self.sampling.record_tick(now);

        debug!(
            "Session: stroke {} started at ({:.1}, {:.1})",
            index, obs.offset_x, obs.offset_y
        );
        self.notify(SessionNotice::StrokeStarted { index });
        Ok(index)
    }

    /// Offer a move to the sampling policy.
    ///
    /// Every move during a gesture refreshes the pointer snapshot. A move
    /// that passes the rate gate counts as a sampling tick even when the
    /// distance gate then drops it. An accepted move ticks only once the
    /// stroke has taken its sample.
    pub fn pointer_move(
        &mut self,
        obs: PointerObservation,
        now: f64,
    ) -> Result<SampleDecision, SketchError> {
        let Some(index) = self.current_stroke else {
            return Ok(SampleDecision::Ignored);
        };
        self.last_pointer = Some(obs);

        let last_point = self
            .image
            .stroke(index)
            .and_then(|s| s.last())
            .map(|s| s.point);
        let decision = self
            .sampling
            .evaluate(last_point, &obs, now, &self.tunables);

        match decision {
            SampleDecision::RejectRate | SampleDecision::Ignored => {}
            SampleDecision::RejectDistance => self.sampling.record_tick(now),
            SampleDecision::Accept => {
                if let Some(stroke) = self.image.stroke_mut(index) {
                    stroke.push(Sample::from_observation(&obs, now))?;
                    trace!("Session: stroke {} now has {} samples", index, stroke.len());
                }
                self.sampling.record_tick(now);
            }
        }

        Ok(decision)
    }

    /// End the gesture
    pub fn pointer_up(&mut self) {
        self.end_gesture();
    }

    /// The pointer left the surface; ends the gesture like a release
    pub fn pointer_leave(&mut self) {
        self.end_gesture();
    }

    /// Dispatch a typed pointer event
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        now: f64,
    ) -> Result<Option<SampleDecision>, SketchError> {
        match event {
            PointerEvent::Down(obs) => self.pointer_down(obs, now).map(|_| None),
            PointerEvent::Move(obs) => self.pointer_move(obs, now).map(Some),
            PointerEvent::Up => {
                self.pointer_up();
                Ok(None)
            }
            PointerEvent::Leave => {
                self.pointer_leave();
                Ok(None)
            }
        }
    }

    fn end_gesture(&mut self) {
        let Some(index) = self.current_stroke.take() else {
            return;
        };
        self.last_pointer = None;

        let samples = match self.image.stroke_mut(index) {
            Some(stroke) => {
                stroke.finish();
                stroke.len()
            }
            None => 0,
        };
        debug!("Session: stroke {} finished with {} samples", index, samples);
        self.notify(SessionNotice::StrokeFinished { index, samples });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_pointer_dispatch() {
        let mut session = Session::default();
        let obs = PointerObservation::at(1.0, 2.0, 0.3);

        assert_eq!(session.handle_pointer(PointerEvent::Down(obs), 0.0).unwrap(), None);
        assert_eq!(
            session
                .handle_pointer(PointerEvent::Move(PointerObservation::at(4.0, 6.0, 0.3)), 5.0)
                .unwrap(),
            Some(SampleDecision::Accept)
        );
        session.handle_pointer(PointerEvent::Up, 6.0).unwrap();

        assert!(!session.is_drawing());
        assert_eq!(session.image().sample_count(), 2);
    }

    #[test]
    fn test_down_mid_gesture_closes_previous() {
        let mut session = Session::default();
        session
            .pointer_down(PointerObservation::at(0.0, 0.0, 0.5), 0.0)
            .unwrap();
        let second = session
            .pointer_down(PointerObservation::at(50.0, 50.0, 0.5), 1.0)
            .unwrap();

        assert_eq!(second, 1);
        assert!(session.image().strokes()[0].is_finished());
        assert!(!session.image().strokes()[1].is_finished());
    }

    #[test]
    fn test_move_back_in_time_errors() {
        let mut session = Session::default();
        session
            .pointer_down(PointerObservation::at(0.0, 0.0, 0.5), 10.0)
            .unwrap();
        // Unlimited rate: 5ms passes the gate, but the stroke refuses it
        let result = session.pointer_move(PointerObservation::at(5.0, 0.0, 0.5), 5.0);

        assert!(matches!(result, Err(SketchError::Stroke(_))));
        assert_eq!(session.current_stroke().unwrap().len(), 1);
    }

    #[test]
    fn test_refused_sample_does_not_tick() {
        let mut session = Session::default();
        session
            .pointer_down(PointerObservation::at(0.0, 0.0, 0.5), 10.0)
            .unwrap();
        assert!(session
            .pointer_move(PointerObservation::at(5.0, 0.0, 0.5), 5.0)
            .is_err());
        assert_eq!(session.sampling.last_accepted_time(), 10.0);

        // Close the first rate window: only the down was a tick
        let mut target = crate::render::RecordingTarget::new();
        session.frame(1000.0, &mut target);
        session.frame(1010.0, &mut target);
        assert_eq!(session.sampling_rate(), 1);
    }

    #[test]
    fn test_distance_rejection_still_ticks() {
        let mut session = Session::default();
        session.apply(sketchpad_config::TunableUpdate::SamplingDistance {
            enabled: true,
            threshold: 10.0,
        });
        session
            .pointer_down(PointerObservation::at(0.0, 0.0, 0.5), 0.0)
            .unwrap();
        session
            .pointer_move(PointerObservation::at(1.0, 0.0, 0.5), 7.0)
            .unwrap();

        assert_eq!(session.sampling.last_accepted_time(), 7.0);
    }
}
