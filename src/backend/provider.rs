//! External provider capability surface

use serde::Deserialize;

use crate::error::ProviderFault;
use crate::geometry::{Point, Region};

/// Method name of the position capability on external modules
pub const COMPUTE_POSITION: &str = "computeTeleportPosition";
/// Method name of the effect capability on external modules
pub const TRIGGER_EFFECT: &str = "triggerParticleBurst";

/// A module that may answer position and effect requests.
///
/// A provider can expose only one of the two capabilities; the missing one
/// reports [`ProviderFault::Missing`] on every call.
pub trait Provider {
    /// Human-readable name for logs
    fn name(&self) -> &str;

    fn compute_position(&self, region: Region, seed: f64) -> Result<Point, ProviderFault>;

    fn trigger_effect(&self, at: Point) -> Result<(), ProviderFault>;
}

/// A position as returned by an external module: either `{x, y}` or `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WirePosition {
    Labeled { x: f64, y: f64 },
    Pair([f64; 2]),
}

impl WirePosition {
    /// The point, if both coordinates are finite
    pub fn into_point(self) -> Option<Point> {
        let point = match self {
            WirePosition::Labeled { x, y } => Point::new(x, y),
            WirePosition::Pair([x, y]) => Point::new(x, y),
        };
        point.is_finite().then_some(point)
    }
}

/// Normalize a raw position result into a [`Point`]
pub fn normalize_position(value: serde_json::Value) -> Result<Point, ProviderFault> {
    serde_json::from_value::<WirePosition>(value)
        .ok()
        .and_then(WirePosition::into_point)
        .ok_or(ProviderFault::Malformed {
            capability: COMPUTE_POSITION,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_labeled_point() {
        let p = normalize_position(json!({ "x": 12.5, "y": 40 })).unwrap();
        assert_eq!(p, Point::new(12.5, 40.0));
    }

    #[test]
    fn test_normalize_ordered_pair() {
        let p = normalize_position(json!([100, 7.25])).unwrap();
        assert_eq!(p, Point::new(100.0, 7.25));
    }

    #[test]
    fn test_labeled_point_ignores_extra_fields() {
        let p = normalize_position(json!({ "x": 1, "y": 2, "z": 3 })).unwrap();
        assert_eq!(p, Point::new(1.0, 2.0));
    }

    #[test]
    fn test_malformed_results() {
        let malformed = [
            json!(null),
            json!({ "x": 1 }),
            json!({ "x": "1", "y": 2 }),
            json!({ "x": null, "y": 2 }),
            json!([1]),
            json!([1, 2, 3]),
            json!("10,20"),
        ];
        for value in malformed {
            assert_eq!(
                normalize_position(value.clone()),
                Err(ProviderFault::Malformed {
                    capability: COMPUTE_POSITION
                }),
                "accepted {value}"
            );
        }
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        assert_eq!(WirePosition::Pair([f64::NAN, 1.0]).into_point(), None);
        assert_eq!(
            WirePosition::Labeled {
                x: 1.0,
                y: f64::INFINITY
            }
            .into_point(),
            None
        );
    }
}
