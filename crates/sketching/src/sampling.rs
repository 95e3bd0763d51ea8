//! Sampling policy
//!
//! Decides which raw pointer-move events become persisted samples. Two
//! independently toggled gates apply:
//! - a rate gate that enforces a minimum time between sampling ticks
//! - a distance gate that drops points too close to the last accepted one
//!
//! Gesture starts bypass both gates; see [`crate::session::Session`].

use sketchpad_config::Tunables;
use sketchpad_ipc::PointerObservation;
use tracing::trace;

use crate::rate::RateCounter;
use crate::vector::Vector2;

/// Outcome of evaluating one pointer-move event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDecision {
    Accept,
    /// Arrived sooner than the sampling period after the last tick
    RejectRate,
    /// Closer to the last accepted point than the distance threshold
    RejectDistance,
    /// No gesture in progress
    Ignored,
}

impl SampleDecision {
    pub fn is_accepted(self) -> bool {
        self == Self::Accept
    }
}

/// Rate/distance gate state
#[derive(Debug, Clone, Default)]
pub struct SamplingPolicy {
    last_accepted_time: f64,
    counter: RateCounter,
}

impl SamplingPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the rate gate lets an event at `now` through
    pub fn passes_rate_gate(&self, now: f64, tunables: &Tunables) -> bool {
        !(tunables.limit_sampling_rate
            && now - self.last_accepted_time < tunables.sampling_period_ms())
    }

    /// Whether the distance gate lets `candidate` through.
    ///
    /// A candidate exactly at the threshold distance is accepted.
    pub fn passes_distance_gate(
        &self,
        last_accepted_point: Option<Vector2>,
        candidate: Vector2,
        tunables: &Tunables,
    ) -> bool {
        match last_accepted_point {
            Some(last) if tunables.limit_sampling_distance => {
                candidate.sub(last).length() >= tunables.sampling_distance_threshold
            }
            _ => true,
        }
    }

    /// Evaluate both gates for a pointer-move event, rate gate first
    pub fn evaluate(
        &self,
        last_accepted_point: Option<Vector2>,
        candidate: &PointerObservation,
        now: f64,
        tunables: &Tunables,
    ) -> SampleDecision {
        let point = Vector2::new(candidate.offset_x, candidate.offset_y);

        let decision = if !self.passes_rate_gate(now, tunables) {
            SampleDecision::RejectRate
        } else if !self.passes_distance_gate(last_accepted_point, point, tunables) {
            SampleDecision::RejectDistance
        } else {
            SampleDecision::Accept
        };

        trace!(
            "sampling: ({:.1}, {:.1}) at {:.1}ms -> {:?}",
            point.x,
            point.y,
            now,
            decision
        );
        decision
    }

    pub fn should_accept(
        &self,
        last_accepted_point: Option<Vector2>,
        candidate: &PointerObservation,
        now: f64,
        tunables: &Tunables,
    ) -> bool {
        self.evaluate(last_accepted_point, candidate, now, tunables)
            .is_accepted()
    }

    /// Record a sampling tick: an event that passed the rate gate
    pub fn record_tick(&mut self, now: f64) {
        self.last_accepted_time = now;
        self.counter.update_and_count(now);
    }

    /// Let the throughput display decay when no samples arrive
    pub fn update_counter(&mut self, now: f64) {
        self.counter.update(now);
    }

    pub fn last_accepted_time(&self) -> f64 {
        self.last_accepted_time
    }

    /// Sampling ticks in the last completed second
    pub fn rate(&self) -> u32 {
        self.counter.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate_limited(limit: u32) -> Tunables {
        let mut tunables = Tunables::default();
        tunables.set_sampling_rate_limit(limit);
        tunables
    }

    fn distance_limited(threshold: f64) -> Tunables {
        let mut tunables = Tunables::default();
        tunables.set_sampling_distance(true, threshold);
        tunables
    }

    #[test]
    fn test_defaults_accept_everything() {
        let policy = SamplingPolicy::new();
        let tunables = Tunables::default();
        let obs = PointerObservation::at(0.1, 0.0, 0.5);

        assert!(policy.should_accept(Some(Vector2::ZERO), &obs, 0.0, &tunables));
    }

    #[test]
    fn test_rate_gate_bounds_burst() {
        let tunables = rate_limited(100); // 10ms period
        let mut policy = SamplingPolicy::new();
        policy.record_tick(0.0);

        // 40 events 3ms apart
        let mut accepted = 1;
        let mut elapsed = 0.0;
        for i in 1..=40 {
            let now = i as f64 * 3.0;
            elapsed = now;
            let obs = PointerObservation::at(i as f64, 0.0, 0.5);
            if policy.should_accept(None, &obs, now, &tunables) {
                policy.record_tick(now);
                accepted += 1;
            }
        }

        let bound = (elapsed / tunables.sampling_period_ms()).floor() as usize + 1;
        assert!(accepted <= bound, "accepted {accepted} > bound {bound}");
        // Ticks land at 0, 12, 24, ...: 3ms steps overshoot the 10ms period
        assert_eq!(accepted, 11);
    }

    #[test]
    fn test_rate_gate_disabled_at_sentinel() {
        let tunables = rate_limited(1000);
        let mut policy = SamplingPolicy::new();
        policy.record_tick(5.0);

        let obs = PointerObservation::at(0.0, 0.0, 0.5);
        assert!(policy.should_accept(None, &obs, 5.0, &tunables));
    }

    #[test]
    fn test_distance_gate() {
        let tunables = distance_limited(10.0);
        let policy = SamplingPolicy::new();
        let last = Some(Vector2::new(0.0, 0.0));

        let near = PointerObservation::at(5.0, 0.0, 0.5);
        assert_eq!(
            policy.evaluate(last, &near, 0.0, &tunables),
            SampleDecision::RejectDistance
        );

        let exact = PointerObservation::at(6.0, 8.0, 0.5);
        assert_eq!(
            policy.evaluate(last, &exact, 0.0, &tunables),
            SampleDecision::Accept
        );

        // No previous point: nothing to compare against
        assert!(policy.should_accept(None, &near, 0.0, &tunables));
    }

    #[test]
    fn test_rate_gate_checked_first() {
        let mut tunables = distance_limited(10.0);
        tunables.set_sampling_rate_limit(10);
        let mut policy = SamplingPolicy::new();
        policy.record_tick(0.0);

        let near = PointerObservation::at(1.0, 0.0, 0.5);
        assert_eq!(
            policy.evaluate(Some(Vector2::ZERO), &near, 50.0, &tunables),
            SampleDecision::RejectRate
        );
    }

    #[test]
    fn test_sampling_rate_counter() {
        let mut policy = SamplingPolicy::new();
        for i in 0..20 {
            policy.record_tick(i as f64 * 10.0);
        }
        assert_eq!(policy.rate(), 0);

        policy.update_counter(1000.0);
        assert_eq!(policy.rate(), 20);
        assert_eq!(policy.last_accepted_time(), 190.0);
    }
}
