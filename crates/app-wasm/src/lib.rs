//! Sketchpad WASM build
//!
//! Draws pressure-sensitive strokes into a `<canvas id="sketchpad-canvas">`.
//! Pointer events, frame callbacks and resizes are forwarded into the
//! session's event loop, which runs as a local future on the browser thread.
//! Slider controls talk to it through the CustomEvent bridge.

use std::cell::Cell;

use sketching::{channel, Session, SessionNotice};
use sketchpad_config::Tunables;
use sketchpad_ipc::SketchToUi;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

mod bridge;
mod canvas;
mod input;

use canvas::CanvasTarget;

const CANVAS_ID: &str = "sketchpad-canvas";

/// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("missing #sketchpad-canvas"))?
        .dyn_into::<HtmlCanvasElement>()?;

    let display = input::display_config(&window, &canvas);
    let mut session = Session::new(Tunables::default(), display);
    session.subscribe(publish_stats());

    let target = CanvasTarget::new(canvas.clone(), display)?;
    let (handle, event_loop) = channel(session, target);

    bridge::init_bridge(&window, handle.clone())?;
    input::init_pointer(&canvas, &handle)?;
    input::init_resize(&window, canvas, handle.clone())?;
    input::start_frame_loop(&window, handle)?;

    wasm_bindgen_futures::spawn_local(async move {
        let (session, _) = event_loop.run().await;
        web_sys::console::log_1(
            &format!(
                "Sketchpad session ended with {} strokes",
                session.image().stroke_count()
            )
            .into(),
        );
    });

    Ok(())
}

/// Listener that publishes diagnostics to the UI when they change
fn publish_stats() -> impl Fn(&SessionNotice) + Send + 'static {
    let last: Cell<Option<(u32, u32, usize, usize)>> = Cell::new(None);

    move |notice| {
        let SessionNotice::FrameRendered(stats) = notice else {
            return;
        };
        let current = (
            stats.refresh_rate,
            stats.sampling_rate,
            stats.strokes,
            stats.samples,
        );
        if last.replace(Some(current)) == Some(current) {
            return;
        }
        bridge::send_to_ui(SketchToUi::Stats {
            refresh_rate: stats.refresh_rate,
            sampling_rate: stats.sampling_rate,
            strokes: stats.strokes,
            samples: stats.samples,
        });
    }
}
