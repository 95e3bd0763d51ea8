//! JavaScript bridge for UI controls
//!
//! Slider and toggle changes arrive as `sketchpad:ui-to-sketch` CustomEvents
//! on the window object and are forwarded into the session's event loop.
//! Diagnostics go back out as `sketchpad:sketch-to-ui` events.

use sketching::{SessionEvent, SessionHandle};
use sketchpad_ipc::{SketchToUi, UiToSketch};
use wasm_bindgen::prelude::*;

const UI_TO_SKETCH: &str = "sketchpad:ui-to-sketch";
const SKETCH_TO_UI: &str = "sketchpad:sketch-to-ui";

/// Install the window listener for UI -> sketch messages
pub fn init_bridge(window: &web_sys::Window, handle: SessionHandle) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        let Some(detail) = event.detail().as_string() else {
            return;
        };
        match UiToSketch::from_json(&detail) {
            Ok(msg) => {
                if let Err(e) = handle.send(SessionEvent::from(msg)) {
                    web_sys::console::error_1(&format!("Failed to forward UI message: {}", e).into());
                }
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to parse UI message: {}", e).into());
                send_to_ui(SketchToUi::Error {
                    code: "invalid_message".to_string(),
                    message: e.to_string(),
                });
            }
        }
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback(UI_TO_SKETCH, closure.as_ref().unchecked_ref())?;

    // Keep the closure alive
    closure.forget();

    web_sys::console::log_1(&"Sketchpad WASM bridge initialized".into());
    Ok(())
}

/// Send a message to the UI
pub fn send_to_ui(msg: SketchToUi) {
    let Some(window) = web_sys::window() else {
        return;
    };

    match msg.to_json() {
        Ok(json) => {
            let init = web_sys::CustomEventInit::new();
            init.set_detail(&JsValue::from_str(&json));

            let dispatched = web_sys::CustomEvent::new_with_event_init_dict(SKETCH_TO_UI, &init)
                .and_then(|event| window.dispatch_event(&event));
            if let Err(e) = dispatched {
                web_sys::console::error_2(&"Failed to dispatch sketch message:".into(), &e);
            }
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to serialize sketch message: {}", e).into());
        }
    }
}
