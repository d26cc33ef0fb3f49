//! Effect backends
//!
//! Positions and effects can come from an external accelerated module, an
//! alternate external module, or the built-in implementation. The resolver
//! asks them in that fixed order and swallows every external failure.

pub mod provider;
pub mod resolver;

pub use provider::{
    COMPUTE_POSITION, Provider, TRIGGER_EFFECT, WirePosition, normalize_position,
};
pub use resolver::{BackendResolver, Tier};
