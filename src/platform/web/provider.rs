//! External modules found on the page's global object

use js_sys::{Array, ArrayBuffer, Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::backend::{COMPUTE_POSITION, Provider, TRIGGER_EFFECT, normalize_position};
use crate::error::ProviderFault;
use crate::geometry::{Point, Region};

/// A JS object (Emscripten module, transpiled class, ...) that may expose
/// `computeTeleportPosition` and `triggerParticleBurst`
pub struct JsProvider {
    slot: String,
    target: JsValue,
}

impl JsProvider {
    /// Look up `slot` on the global object. None when nothing usable is there.
    pub fn probe(slot: &str) -> Option<Self> {
        let target = Reflect::get(&js_sys::global(), &JsValue::from_str(slot)).ok()?;
        if !(target.is_object() || target.is_function()) {
            return None;
        }
        Some(Self {
            slot: slot.to_string(),
            target,
        })
    }

    /// Capabilities are looked up on every call; modules can finish loading late
    fn method(&self, capability: &'static str) -> Result<Function, ProviderFault> {
        Reflect::get(&self.target, &JsValue::from_str(capability))
            .ok()
            .and_then(|m| m.dyn_into::<Function>().ok())
            .ok_or(ProviderFault::Missing { capability })
    }
}

fn describe(err: &JsValue) -> String {
    err.dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

/// JSON view of a position result. Arrays and typed arrays (a transpiled
/// `double[]`) become plain JSON arrays.
fn to_json(value: &JsValue) -> serde_json::Value {
    if value.is_undefined() || value.is_null() {
        return serde_json::Value::Null;
    }
    let value: JsValue = if Array::is_array(value) || ArrayBuffer::is_view(value) {
        Array::from(value).into()
    } else {
        value.clone()
    };
    js_sys::JSON::stringify(&value)
        .ok()
        .and_then(|s| s.as_string())
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or(serde_json::Value::Null)
}

impl Provider for JsProvider {
    fn name(&self) -> &str {
        &self.slot
    }

    fn compute_position(&self, region: Region, seed: f64) -> Result<Point, ProviderFault> {
        let method = self.method(COMPUTE_POSITION)?;
        let result = method
            .call3(
                &self.target,
                &JsValue::from_f64(region.width),
                &JsValue::from_f64(region.height),
                &JsValue::from_f64(seed),
            )
            .map_err(|e| ProviderFault::Threw {
                capability: COMPUTE_POSITION,
                message: describe(&e),
            })?;
        normalize_position(to_json(&result))
    }

    fn trigger_effect(&self, at: Point) -> Result<(), ProviderFault> {
        let method = self.method(TRIGGER_EFFECT)?;
        method
            .call2(&self.target, &JsValue::from_f64(at.x), &JsValue::from_f64(at.y))
            .map(|_| ())
            .map_err(|e| ProviderFault::Threw {
                capability: TRIGGER_EFFECT,
                message: describe(&e),
            })
    }
}
