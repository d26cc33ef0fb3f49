//! Page elements and the DOM-backed [`PromptView`]

use std::cell::RefCell;
use std::rc::Rc;

use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use super::frames::{self, SharedSurface};
use crate::audio::Chime;
use crate::error::BootError;
use crate::geometry::{Point, Region};
use crate::interaction::PromptView;
use crate::renderer::{CanvasSurface, Surface};
use crate::settings::ElementIds;
use crate::sim::{Effect, Simulation};

/// Class on the decline button while it teleports
pub const RELOCATING_CLASS: &str = "teleporting";
/// Class hiding the celebration panel until the prompt is accepted
pub const HIDDEN_CLASS: &str = "hidden";

/// Everything the prompt binds to
pub struct PageElements {
    pub container: HtmlElement,
    pub accept: HtmlElement,
    pub decline: HtmlElement,
    pub live: Element,
    pub celebration: HtmlElement,
    /// Optional; without it there are no particle effects
    pub canvas: Option<HtmlCanvasElement>,
}

fn required<T: JsCast>(document: &Document, id: &str) -> Result<T, BootError> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| BootError::MissingElement(id.to_string()))
}

impl PageElements {
    /// Find all required elements, or fail without touching the page
    pub fn locate(document: &Document, ids: &ElementIds) -> Result<Self, BootError> {
        Ok(Self {
            container: required(document, &ids.container)?,
            accept: required(document, &ids.accept)?,
            decline: required(document, &ids.decline)?,
            live: required(document, &ids.live)?,
            celebration: required(document, &ids.celebration)?,
            canvas: document
                .get_element_by_id(&ids.canvas)
                .and_then(|el| el.dyn_into().ok()),
        })
    }
}

fn pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

/// [`PromptView`] over the real page
pub struct DomView {
    elements: PageElements,
    surface: Option<SharedSurface>,
    rng: Pcg32,
    chime: Option<Chime>,
}

impl DomView {
    pub fn new(elements: PageElements, rng: Pcg32, chime: Option<Chime>) -> Self {
        let surface = elements.canvas.clone().and_then(|canvas| {
            let surface = CanvasSurface::new(canvas);
            if surface.is_none() {
                log::warn!("Effects canvas has no 2D context - effects disabled");
            }
            surface.map(|s| Rc::new(RefCell::new(s)))
        });
        Self {
            elements,
            surface,
            rng,
            chime,
        }
    }

    pub fn elements(&self) -> &PageElements {
        &self.elements
    }

    /// Container box in CSS pixels
    fn container_region(&self) -> Region {
        Region::new(
            self.elements.container.offset_width() as f64,
            self.elements.container.offset_height() as f64,
        )
    }

    /// Match the canvas backing store to the container (on boot and resize)
    pub fn fit_surface(&self) {
        if let Some(surface) = &self.surface {
            if let Ok(mut s) = surface.try_borrow_mut() {
                s.fit(self.container_region(), pixel_ratio());
            }
        }
    }

    /// Viewport coordinates to container-local coordinates
    pub fn to_local(&self, client_x: f64, client_y: f64) -> Point {
        let rect = self.elements.container.get_bounding_client_rect();
        Point::new(client_x - rect.left(), client_y - rect.top())
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) {
        let _ = el.style().set_property(property, value);
    }
}

impl PromptView for DomView {
    /// The No teleports anywhere in the viewport
    fn decline_region(&self) -> Region {
        let Some(window) = web_sys::window() else {
            return self.container_region();
        };
        let width = window.inner_width().ok().and_then(|v| v.as_f64());
        let height = window.inner_height().ok().and_then(|v| v.as_f64());
        match (width, height) {
            (Some(w), Some(h)) => Region::new(w, h),
            _ => self.container_region(),
        }
    }

    fn trigger_center(&self) -> Point {
        self.container_region().center()
    }

    fn scale_accept(&mut self, scale: f64) {
        Self::set_style(&self.elements.accept, "transform", &format!("scale({})", scale));
    }

    fn move_decline(&mut self, to: Point) {
        let decline = &self.elements.decline;
        let _ = decline.class_list().add_1(RELOCATING_CLASS);
        Self::set_style(decline, "left", &format!("{}px", to.x));
        Self::set_style(decline, "top", &format!("{}px", to.y));
        Self::set_style(decline, "transform", "translate(-50%, -50%)");
    }

    fn end_relocation(&mut self) {
        let _ = self.elements.decline.class_list().remove_1(RELOCATING_CLASS);
    }

    fn reveal_celebration(&mut self) {
        let celebration = &self.elements.celebration;
        let _ = celebration.class_list().remove_1(HIDDEN_CLASS);
        celebration.set_hidden(false);
    }

    fn clear_announcement(&mut self) {
        self.elements.live.set_text_content(None);
    }

    fn write_announcement(&mut self, message: &str) {
        self.elements.live.set_text_content(Some(message));
    }

    fn launch(&mut self, effect: Effect) -> bool {
        let Some(surface) = &self.surface else {
            return false;
        };
        let region = self.container_region();
        let sim = match surface.try_borrow_mut() {
            Ok(mut s) => Simulation::begin(effect, region, pixel_ratio(), &mut *s, &mut self.rng),
            Err(_) => return false,
        };
        frames::launch(sim, surface.clone());
        true
    }

    fn chime(&mut self) {
        if let Some(chime) = &self.chime {
            chime.play();
        }
    }
}
