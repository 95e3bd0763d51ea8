//! DOM listeners feeding the session handle

use std::cell::RefCell;
use std::rc::Rc;

use sketching::SessionHandle;
use sketchpad_config::DisplayConfig;
use sketchpad_ipc::{PointerEvent, PointerObservation, PointerType};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, Window};

/// Read the fields the session cares about from a DOM pointer event
pub fn observe(event: &web_sys::PointerEvent) -> PointerObservation {
    PointerObservation {
        offset_x: event.offset_x() as f64,
        offset_y: event.offset_y() as f64,
        width: event.width() as f64,
        height: event.height() as f64,
        pressure: event.pressure() as f64,
        tangential_pressure: event.tangential_pressure() as f64,
        tilt_x: event.tilt_x() as f64,
        tilt_y: event.tilt_y() as f64,
        twist: event.twist() as f64,
        pointer_type: PointerType::from_dom(&event.pointer_type()),
    }
}

/// Logical canvas size and device pixel ratio
pub fn display_config(window: &Window, canvas: &HtmlCanvasElement) -> DisplayConfig {
    let width = canvas.client_width().max(1) as u32;
    let height = canvas.client_height().max(1) as u32;
    DisplayConfig::new(width, height).with_scale(window.device_pixel_ratio())
}

fn listen(
    canvas: &HtmlCanvasElement,
    kind: &str,
    handle: SessionHandle,
    to_event: fn(&web_sys::PointerEvent) -> PointerEvent,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |event: web_sys::PointerEvent| {
        event.prevent_default();
        if let Err(e) = handle.pointer(to_event(&event), event.time_stamp()) {
            web_sys::console::error_1(&format!("Pointer event dropped: {}", e).into());
        }
    }) as Box<dyn FnMut(_)>);

    canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Forward pointer down/move/up/leave on the canvas
pub fn init_pointer(canvas: &HtmlCanvasElement, handle: &SessionHandle) -> Result<(), JsValue> {
    // Keep touch and pen drags from scrolling the page
    canvas.style().set_property("touch-action", "none")?;

    listen(canvas, "pointerdown", handle.clone(), |e| {
        PointerEvent::Down(observe(e))
    })?;
    listen(canvas, "pointermove", handle.clone(), |e| {
        PointerEvent::Move(observe(e))
    })?;
    listen(canvas, "pointerup", handle.clone(), |_| PointerEvent::Up)?;
    listen(canvas, "pointerleave", handle.clone(), |_| PointerEvent::Leave)?;
    Ok(())
}

/// Re-derive the viewport whenever the window resizes
pub fn init_resize(
    window: &Window,
    canvas: HtmlCanvasElement,
    handle: SessionHandle,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move || {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = handle.resize(display_config(&window, &canvas)) {
            web_sys::console::error_1(&format!("Resize dropped: {}", e).into());
        }
    }) as Box<dyn FnMut()>);

    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(window: &Window, callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())
}

/// Drive frame callbacks from `requestAnimationFrame`. The loop stops once
/// the session has shut down.
pub fn start_frame_loop(window: &Window, handle: SessionHandle) -> Result<(), JsValue> {
    let callback: FrameCallback = Rc::new(RefCell::new(None));
    let next = Rc::clone(&callback);

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64| {
        if handle.frame(time).is_err() {
            web_sys::console::log_1(&"Sketchpad session closed, stopping frames".into());
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = request_frame(&window, cb) {
                web_sys::console::error_2(&"requestAnimationFrame failed:".into(), &e);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(cb) = callback.borrow().as_ref() {
        request_frame(window, cb)?;
    }
    Ok(())
}
