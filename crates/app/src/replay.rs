//! Timed input replay
//!
//! A pointer script only carries input timestamps. Replay interleaves
//! virtual frame callbacks at a fixed display rate so the render loop sees
//! the same ordering a browser would produce.

use sketching::SessionEvent;
use sketchpad_ipc::{PointerEvent, PointerObservation, PointerType, TimedInput};

/// Virtual display refresh rate of the replay clock
pub const DISPLAY_HZ: f64 = 120.0;

/// Frames emitted after the last input, long enough for the rate counters
/// to publish a full window
pub const TAIL_MS: f64 = 1100.0;

/// Merge inputs with frame callbacks every `1000 / display_hz` ms.
///
/// A frame at the same timestamp as an input is delivered first.
pub fn interleave_frames(inputs: &[TimedInput], display_hz: f64) -> Vec<SessionEvent> {
    let period = 1000.0 / display_hz;
    let mut events = Vec::with_capacity(inputs.len() * 2);
    let mut next_frame = inputs.first().map(|i| i.time_ms).unwrap_or(0.0);

    for input in inputs {
        while next_frame <= input.time_ms {
            events.push(SessionEvent::Frame {
                time_ms: next_frame,
            });
            next_frame += period;
        }
        events.push(SessionEvent::Pointer {
            event: input.event,
            time_ms: input.time_ms,
        });
    }

    let end = inputs.last().map(|i| i.time_ms).unwrap_or(0.0) + TAIL_MS;
    while next_frame <= end {
        events.push(SessionEvent::Frame {
            time_ms: next_frame,
        });
        next_frame += period;
    }

    events
}

/// Built-in pen gesture: three wavy strokes with a pressure swell,
/// pointer moves every 4ms.
pub fn demo_script() -> Vec<TimedInput> {
    const STROKES: usize = 3;
    const MOVES: usize = 120;
    const MOVE_INTERVAL_MS: f64 = 4.0;
    const GAP_MS: f64 = 200.0;

    let mut inputs = Vec::with_capacity(STROKES * (MOVES + 2));
    let mut time = 0.0;

    for stroke in 0..STROKES {
        let baseline = 120.0 + stroke as f64 * 160.0;
        let observe = |step: usize| {
            let t = step as f64 / MOVES as f64;
            let x = 80.0 + t * 1000.0;
            let y = baseline + (t * std::f64::consts::TAU * 2.0).sin() * 40.0;
            let pressure = (t * std::f64::consts::PI).sin().max(0.05);
            PointerObservation::at(x, y, pressure)
                .with_tilt(20.0 * (1.0 - t), -10.0)
                .with_pointer_type(PointerType::Pen)
        };

        inputs.push(TimedInput {
            time_ms: time,
            event: PointerEvent::Down(observe(0)),
        });
        for step in 1..=MOVES {
            time += MOVE_INTERVAL_MS;
            inputs.push(TimedInput {
                time_ms: time,
                event: PointerEvent::Move(observe(step)),
            });
        }
        inputs.push(TimedInput {
            time_ms: time,
            event: PointerEvent::Up,
        });
        time += GAP_MS;
    }

    inputs
}
