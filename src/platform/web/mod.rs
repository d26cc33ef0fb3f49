//! Browser entry point
//!
//! Finds the page elements, probes for external effect modules, then binds
//! the decline/accept inputs to the controller. If anything required is
//! missing the prompt stays inert.

pub mod dom;
pub mod frames;
pub mod provider;

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent, TouchEvent, Window};

use crate::audio::Chime;
use crate::backend::BackendResolver;
use crate::error::BootError;
use crate::interaction::{DeclineInput, DeclineSource, PromptController};
use crate::settings::Settings;

pub use dom::{DomView, PageElements};
pub use provider::JsProvider;

/// Controller plus the view it drives
struct App {
    controller: PromptController,
    view: DomView,
}

type SharedApp = Rc<RefCell<App>>;

pub fn run() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Valentine prompt starting...");

    match boot() {
        Ok(()) => log::info!("Valentine prompt ready"),
        Err(e) => log::warn!("Valentine prompt disabled: {}", e),
    }
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|q| q.matches())
        .unwrap_or(false)
}

fn seed_rng() -> Pcg32 {
    let jitter = (js_sys::Math::random() * u64::MAX as f64) as u64;
    let seed = js_sys::Date::now().to_bits() ^ jitter;
    Pcg32::seed_from_u64(seed)
}

/// Build the resolver from whatever external modules are on the page
fn probe_providers(settings: &Settings, rng: Pcg32) -> BackendResolver {
    let mut resolver = BackendResolver::new(settings.teleport_padding, rng);
    if let Some(provider) = JsProvider::probe(&settings.accelerated_slot) {
        log::info!("Accelerated effects module found at `{}`", settings.accelerated_slot);
        resolver = resolver.with_accelerated(Box::new(provider));
    }
    if let Some(provider) = JsProvider::probe(&settings.alternate_slot) {
        log::info!("Alternate effects module found at `{}`", settings.alternate_slot);
        resolver = resolver.with_alternate(Box::new(provider));
    }
    let tiers: Vec<&str> = resolver.tiers().iter().map(|t| t.as_str()).collect();
    log::info!("Effect backends: {}", tiers.join(" -> "));
    resolver
}

fn boot() -> Result<(), BootError> {
    let window = web_sys::window().ok_or(BootError::NoWindow)?;
    let document = window.document().ok_or(BootError::NoDocument)?;

    let mut settings = Settings::load();
    settings.reduced_motion = prefers_reduced_motion(&window);
    if settings.reduced_motion {
        log::info!("Reduced motion requested - particles off");
    }

    // Nothing is bound unless every required element is present
    let elements = PageElements::locate(&document, &settings.elements)?;

    let mut rng = seed_rng();
    let view_rng = Pcg32::from_rng(&mut rng);
    let resolver = probe_providers(&settings, rng);
    let chime = if settings.chime {
        Chime::new(settings.effective_chime_volume())
    } else {
        None
    };

    let view = DomView::new(elements, view_rng, chime);
    view.fit_surface();

    let app = Rc::new(RefCell::new(App {
        controller: PromptController::new(settings, resolver),
        view,
    }));

    bind_resize(&window, app.clone());
    bind_decline(app.clone());
    bind_accept(app);
    Ok(())
}

fn on_decline(app: &SharedApp, input: DeclineInput) {
    let outcome = {
        let Ok(mut guard) = app.try_borrow_mut() else {
            return;
        };
        let App { controller, view } = &mut *guard;
        controller.decline(view, input)
    };

    if let Some(outcome) = outcome {
        let app = app.clone();
        frames::set_timeout(outcome.clear_after_ms, move || {
            if let Ok(mut guard) = app.try_borrow_mut() {
                let App { controller, view } = &mut *guard;
                controller.finish_relocation(view);
            }
        });
    }
}

fn bind_resize(window: &Window, app: SharedApp) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        if let Ok(guard) = app.try_borrow() {
            guard.view.fit_surface();
        }
    });
    let _ =
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn bind_decline(app: SharedApp) {
    let decline = app.borrow().view.elements().decline.clone();

    // Pointer-positioned inputs, in container coordinates
    let local = |app: &SharedApp, x: i32, y: i32| {
        app.try_borrow()
            .ok()
            .map(|guard| guard.view.to_local(x as f64, y as f64))
    };

    // Click
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            event.prevent_default();
            if let Some(at) = local(&app, event.client_x(), event.client_y()) {
                on_decline(&app, DeclineInput::pointer(DeclineSource::Click, at));
            }
        });
        let _ =
            decline.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Keyboard activate
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if matches!(event.key().as_str(), "Enter" | " ") {
                event.prevent_default();
                on_decline(&app, DeclineInput::keyboard());
            }
        });
        let _ =
            decline.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Hover
    {
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            if let Some(at) = local(&app, event.client_x(), event.client_y()) {
                on_decline(&app, DeclineInput::pointer(DeclineSource::PointerEnter, at));
            }
        });
        let _ = decline
            .add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // First touch point
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            let Some(touch) = event.touches().get(0) else {
                return;
            };
            if let Some(at) = local(&app, touch.client_x(), touch.client_y()) {
                on_decline(&app, DeclineInput::pointer(DeclineSource::TouchStart, at));
            }
        });
        let _ = decline
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn bind_accept(app: SharedApp) {
    let accept = app.borrow().view.elements().accept.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
        if let Ok(mut guard) = app.try_borrow_mut() {
            let App { controller, view } = &mut *guard;
            controller.accept(view);
        }
    });
    let _ = accept.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
