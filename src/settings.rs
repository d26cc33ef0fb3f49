//! Prompt settings
//!
//! Read once at startup. On the web they come from an optional
//! `<script type="application/json" id="prompt-config">` block, natively from
//! the JSON file named by `VALENTINE_PROMPT_CONFIG`. Anything missing or
//! invalid falls back to the defaults.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Ids of the page elements the prompt binds to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// Container whose box is the drawing/teleport region
    pub container: String,
    pub accept: String,
    pub decline: String,
    /// Live region for screen reader announcements
    pub live: String,
    /// Shown once the prompt is accepted
    pub celebration: String,
    /// Effects canvas (optional on the page)
    pub canvas: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            container: "card-container".into(),
            accept: "btn-yes".into(),
            decline: "btn-no".into(),
            live: "aria-live".into(),
            celebration: "celebration".into(),
            canvas: "effects-canvas".into(),
        }
    }
}

/// Prompt settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Behavior ===
    /// Accept button scale multiplier per decline attempt
    pub growth_multiplier: f64,
    /// Inset kept between the teleported decline button and the region edge (px)
    pub teleport_padding: f64,
    /// How long the "relocating" class stays on the decline button (ms)
    pub relocation_clear_ms: u32,

    // === Announcements ===
    pub decline_message: String,
    pub success_message: String,

    // === Providers ===
    /// Global slot probed for the accelerated module
    pub accelerated_slot: String,
    /// Global slot probed for the alternate module
    pub alternate_slot: String,

    // === Effects ===
    /// Particle effects (burst and confetti)
    pub particles: bool,
    /// Celebratory tone on accept
    pub chime: bool,
    /// Chime volume (0.0 - 1.0)
    pub chime_volume: f32,

    pub elements: ElementIds,

    // === Accessibility ===
    /// Host-reported reduced motion preference (never read from config)
    #[serde(skip)]
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            growth_multiplier: 1.10,
            teleport_padding: 60.0,
            relocation_clear_ms: 280,

            decline_message: "No button moved. Try Yes!".into(),
            success_message: "Yay! You said yes!".into(),

            accelerated_slot: "Module".into(),
            alternate_slot: "ValentineEffects".into(),

            particles: true,
            chime: true,
            chime_volume: 0.6,

            elements: ElementIds::default(),

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Id of the inline JSON config block
    pub const CONFIG_ELEMENT_ID: &'static str = "prompt-config";
    /// Env var naming a JSON config file (native)
    pub const CONFIG_ENV_VAR: &'static str = "VALENTINE_PROMPT_CONFIG";

    /// Parse and validate settings from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.growth_multiplier.is_finite() || self.growth_multiplier < 1.0 {
            return Err(SettingsError::Invalid {
                field: "growth_multiplier",
                reason: format!("must be finite and >= 1, got {}", self.growth_multiplier),
            });
        }
        if !self.teleport_padding.is_finite() || self.teleport_padding < 0.0 {
            return Err(SettingsError::Invalid {
                field: "teleport_padding",
                reason: format!("must be finite and >= 0, got {}", self.teleport_padding),
            });
        }
        Ok(())
    }

    /// Effective particle spawning (respects reduced_motion)
    pub fn effective_particles(&self) -> bool {
        self.particles && !self.reduced_motion
    }

    /// Effective chime volume
    pub fn effective_chime_volume(&self) -> f32 {
        if self.chime {
            self.chime_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn or_default(result: Result<Self, SettingsError>) -> Self {
        match result {
            Ok(settings) => {
                log::info!("Loaded prompt settings");
                settings
            }
            Err(e) => {
                log::warn!("Ignoring prompt settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load settings from the inline config block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) => Self::or_default(Self::from_json(&json)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `VALENTINE_PROMPT_CONFIG` (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::var_os(Self::CONFIG_ENV_VAR) {
            Some(path) => Self::or_default(
                std::fs::read_to_string(path)
                    .map_err(SettingsError::from)
                    .and_then(|json| Self::from_json(&json)),
            ),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{ "growth_multiplier": 1.25, "elements": { "decline": "nope" } }"#;
        let s = Settings::from_json(json).unwrap();
        assert_eq!(s.growth_multiplier, 1.25);
        assert_eq!(s.teleport_padding, 60.0);
        assert_eq!(s.elements.decline, "nope");
        assert_eq!(s.elements.accept, "btn-yes");
    }

    #[test]
    fn test_reduced_motion_is_not_configurable() {
        let s = Settings::from_json(r#"{ "reduced_motion": true }"#).unwrap();
        assert!(!s.reduced_motion);
    }

    #[test]
    fn test_rejects_shrinking_multiplier() {
        let err = Settings::from_json(r#"{ "growth_multiplier": 0.5 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "growth_multiplier", .. }));
    }

    #[test]
    fn test_rejects_negative_padding() {
        let err = Settings::from_json(r#"{ "teleport_padding": -1 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "teleport_padding", .. }));
    }

    #[test]
    fn test_bad_json_is_parse_error() {
        assert!(matches!(Settings::from_json("{"), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_effective_particles_respects_reduced_motion() {
        let mut s = Settings::default();
        assert!(s.effective_particles());
        s.reduced_motion = true;
        assert!(!s.effective_particles());
    }

    #[test]
    fn test_chime_volume() {
        let mut s = Settings::default();
        s.chime_volume = 3.0;
        assert_eq!(s.effective_chime_volume(), 1.0);
        s.chime = false;
        assert_eq!(s.effective_chime_volume(), 0.0);
    }
}
