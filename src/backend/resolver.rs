//! Fixed-priority provider chain

use rand_pcg::Pcg32;

use super::provider::Provider;
use crate::geometry::{Point, Region, teleport_position};

/// Which tier answered a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Accelerated,
    Alternate,
    Builtin,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Accelerated => "accelerated",
            Tier::Alternate => "alternate",
            Tier::Builtin => "built-in",
        }
    }
}

/// Resolves position and effect requests through
/// accelerated → alternate → built-in.
///
/// External providers are fixed at construction. Every external call is a
/// fault boundary: a throw, a missing capability or a malformed result just
/// moves on to the next tier.
pub struct BackendResolver {
    accelerated: Option<Box<dyn Provider>>,
    alternate: Option<Box<dyn Provider>>,
    /// Inset used by the built-in teleport
    padding: f64,
    rng: Pcg32,
}

impl BackendResolver {
    /// Resolver with only the built-in tier
    pub fn new(padding: f64, rng: Pcg32) -> Self {
        Self {
            accelerated: None,
            alternate: None,
            padding,
            rng,
        }
    }

    pub fn with_accelerated(mut self, provider: Box<dyn Provider>) -> Self {
        self.accelerated = Some(provider);
        self
    }

    pub fn with_alternate(mut self, provider: Box<dyn Provider>) -> Self {
        self.alternate = Some(provider);
        self
    }

    /// Tiers available, in the order they are asked
    pub fn tiers(&self) -> Vec<Tier> {
        self.external()
            .map(|(tier, _)| tier)
            .chain(std::iter::once(Tier::Builtin))
            .collect()
    }

    fn external(&self) -> impl Iterator<Item = (Tier, &(dyn Provider + 'static))> {
        [
            (Tier::Accelerated, self.accelerated.as_deref()),
            (Tier::Alternate, self.alternate.as_deref()),
        ]
        .into_iter()
        .filter_map(|(tier, provider)| provider.map(|p| (tier, p)))
    }

    /// New position for the decline control inside `region`
    pub fn resolve_position(&mut self, region: Region, seed: f64) -> (Point, Tier) {
        for (tier, provider) in self.external() {
            match provider.compute_position(region, seed) {
                Ok(point) => {
                    log::debug!("Position from {} provider {}", tier.as_str(), provider.name());
                    return (point, tier);
                }
                Err(fault) => {
                    log::debug!(
                        "{} provider {} skipped: {}",
                        tier.as_str(),
                        provider.name(),
                        fault
                    );
                }
            }
        }

        (
            teleport_position(region, self.padding, &mut self.rng),
            Tier::Builtin,
        )
    }

    /// Trigger the visual flourish at `at`; `builtin` runs only when no
    /// external provider answered and reports whether it could draw.
    ///
    /// None when nothing produced an effect.
    pub fn resolve_effect(
        &mut self,
        at: Point,
        builtin: impl FnOnce(Point) -> bool,
    ) -> Option<Tier> {
        for (tier, provider) in self.external() {
            match provider.trigger_effect(at) {
                Ok(()) => {
                    log::debug!("Effect from {} provider {}", tier.as_str(), provider.name());
                    return Some(tier);
                }
                Err(fault) => {
                    log::debug!(
                        "{} provider {} skipped: {}",
                        tier.as_str(),
                        provider.name(),
                        fault
                    );
                }
            }
        }

        if builtin(at) {
            log::debug!("Built-in burst at ({:.0}, {:.0})", at.x, at.y);
            Some(Tier::Builtin)
        } else {
            log::debug!("No effect: built-in burst has nowhere to draw");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::provider::{COMPUTE_POSITION, TRIGGER_EFFECT, normalize_position};
    use crate::error::ProviderFault;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Scriptable provider: each capability is either a canned answer or absent
    struct Mock {
        name: &'static str,
        position: Option<Result<serde_json::Value, String>>,
        effect: Option<Result<(), String>>,
        effect_calls: Rc<Cell<u32>>,
    }

    impl Mock {
        fn new(name: &'static str) -> Self {
            Self {
                name,
                position: None,
                effect: None,
                effect_calls: Rc::new(Cell::new(0)),
            }
        }

        fn position(mut self, value: serde_json::Value) -> Self {
            self.position = Some(Ok(value));
            self
        }

        fn throws(mut self) -> Self {
            self.position = Some(Err("boom".into()));
            self.effect = Some(Err("boom".into()));
            self
        }

        fn effect_ok(mut self) -> Self {
            self.effect = Some(Ok(()));
            self
        }
    }

    impl Provider for Mock {
        fn name(&self) -> &str {
            self.name
        }

        fn compute_position(&self, _region: Region, _seed: f64) -> Result<Point, ProviderFault> {
            match &self.position {
                None => Err(ProviderFault::Missing {
                    capability: COMPUTE_POSITION,
                }),
                Some(Err(message)) => Err(ProviderFault::Threw {
                    capability: COMPUTE_POSITION,
                    message: message.clone(),
                }),
                Some(Ok(value)) => normalize_position(value.clone()),
            }
        }

        fn trigger_effect(&self, _at: Point) -> Result<(), ProviderFault> {
            self.effect_calls.set(self.effect_calls.get() + 1);
            match &self.effect {
                None => Err(ProviderFault::Missing {
                    capability: TRIGGER_EFFECT,
                }),
                Some(Err(message)) => Err(ProviderFault::Threw {
                    capability: TRIGGER_EFFECT,
                    message: message.clone(),
                }),
                Some(Ok(())) => Ok(()),
            }
        }
    }

    fn resolver() -> BackendResolver {
        BackendResolver::new(60.0, Pcg32::seed_from_u64(42))
    }

    const REGION: Region = Region {
        width: 400.0,
        height: 300.0,
    };

    #[test]
    fn test_builtin_only() {
        let mut r = resolver();
        assert_eq!(r.tiers(), vec![Tier::Builtin]);
        let (p, tier) = r.resolve_position(REGION, 1.0);
        assert_eq!(tier, Tier::Builtin);
        assert!((60.0..=340.0).contains(&p.x) && (60.0..=240.0).contains(&p.y));
    }

    #[test]
    fn test_accelerated_wins_when_healthy() {
        let mut r = resolver()
            .with_accelerated(Box::new(
                Mock::new("wasm").position(serde_json::json!({"x": 1, "y": 2})),
            ))
            .with_alternate(Box::new(Mock::new("alt").position(serde_json::json!([3, 4]))));
        assert_eq!(r.tiers(), vec![Tier::Accelerated, Tier::Alternate, Tier::Builtin]);
        assert_eq!(
            r.resolve_position(REGION, 1.0),
            (Point::new(1.0, 2.0), Tier::Accelerated)
        );
    }

    #[test]
    fn test_throwing_accelerated_falls_to_alternate_pair() {
        let mut r = resolver()
            .with_accelerated(Box::new(Mock::new("wasm").throws()))
            .with_alternate(Box::new(
                Mock::new("alt").position(serde_json::json!([123.0, 77.0])),
            ));
        assert_eq!(
            r.resolve_position(REGION, 9.0),
            (Point::new(123.0, 77.0), Tier::Alternate)
        );
    }

    #[test]
    fn test_malformed_results_fall_to_builtin() {
        let mut r = resolver()
            .with_accelerated(Box::new(
                Mock::new("wasm").position(serde_json::json!({"x": "left"})),
            ))
            .with_alternate(Box::new(Mock::new("alt").position(serde_json::json!([1]))));
        let (p, tier) = r.resolve_position(REGION, 0.0);
        assert_eq!(tier, Tier::Builtin);
        assert!(p.x >= 60.0 && p.y >= 60.0);
    }

    #[test]
    fn test_capabilities_checked_per_call() {
        // Accelerated only knows effects, alternate only positions
        let mut r = resolver()
            .with_accelerated(Box::new(Mock::new("wasm").effect_ok()))
            .with_alternate(Box::new(Mock::new("alt").position(serde_json::json!([5, 6]))));

        assert_eq!(r.resolve_position(REGION, 0.0).1, Tier::Alternate);

        let mut builtin_ran = false;
        let tier = r.resolve_effect(Point::new(1.0, 1.0), |_| {
            builtin_ran = true;
            true
        });
        assert_eq!(tier, Some(Tier::Accelerated));
        assert!(!builtin_ran);
    }

    #[test]
    fn test_effect_falls_back_to_builtin_burst() {
        let alt = Mock::new("alt").throws();
        let alt_calls = alt.effect_calls.clone();
        let mut r = resolver()
            .with_accelerated(Box::new(Mock::new("wasm")))
            .with_alternate(Box::new(alt));

        let mut burst_at = None;
        let tier = r.resolve_effect(Point::new(10.0, 20.0), |p| {
            burst_at = Some(p);
            true
        });
        assert_eq!(tier, Some(Tier::Builtin));
        assert_eq!(burst_at, Some(Point::new(10.0, 20.0)));
        assert_eq!(alt_calls.get(), 1);
    }

    #[test]
    fn test_undrawn_builtin_burst_reports_no_effect() {
        let mut r = resolver().with_alternate(Box::new(Mock::new("alt").throws()));
        let mut attempted = false;
        let tier = r.resolve_effect(Point::new(10.0, 20.0), |_| {
            attempted = true;
            false
        });
        assert!(attempted);
        assert_eq!(tier, None);
    }
}
