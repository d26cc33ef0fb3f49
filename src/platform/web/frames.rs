//! Display-refresh scheduling for simulation instances

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::renderer::CanvasSurface;
use crate::sim::Simulation;

/// The effects canvas, shared by every running instance
pub type SharedSurface = Rc<RefCell<CanvasSurface>>;

/// Run `sim` on `surface`: first frame now, then one per display refresh
/// until it ends by itself.
///
/// Instances do not coordinate; each clears the whole canvas every frame.
pub fn launch(sim: Simulation, surface: SharedSurface) {
    log::debug!(
        "{:?} started with {} particles",
        sim.kind(),
        sim.particles().len()
    );
    step(sim, surface);
}

fn step(mut sim: Simulation, surface: SharedSurface) {
    let running = match surface.try_borrow_mut() {
        Ok(mut s) => sim.frame(&mut *s),
        // Surface busy this tick; try again next refresh
        Err(_) => true,
    };
    if running {
        request_animation_frame(move || step(sim, surface));
    } else {
        log::debug!("{:?} finished after {} frames", sim.kind(), sim.frames());
    }
}

fn request_animation_frame(f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(move |_time: f64| f());
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Run `f` once after `delay_ms`; never cancelled
pub fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::once(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms.min(i32::MAX as u32) as i32,
    );
    closure.forget();
}
