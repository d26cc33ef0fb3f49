//! Prompt state machine and controller
//!
//! The controller owns the [`InteractionState`] and the [`BackendResolver`];
//! everything visible goes through a [`PromptView`], so the same logic drives
//! the browser page and the terminal prompt.

use crate::backend::{BackendResolver, Tier};
use crate::geometry::{Point, Region};
use crate::settings::Settings;
use crate::sim::Effect;

/// Where the prompt is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for an answer
    Idle,
    /// Decline button is mid-teleport (relocating class applied)
    Declining,
    /// Accepted; terminal, all input ignored
    Celebrating,
}

/// Session state of the prompt
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    /// Scale applied to the accept button (unbounded)
    accept_scale: f64,
    declines: u32,
    relocating: bool,
    celebrated: bool,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self {
            accept_scale: 1.0,
            declines: 0,
            relocating: false,
            celebrated: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.celebrated {
            Phase::Celebrating
        } else if self.relocating {
            Phase::Declining
        } else {
            Phase::Idle
        }
    }

    pub fn accept_scale(&self) -> f64 {
        self.accept_scale
    }

    /// Decline attempts handled so far
    pub fn declines(&self) -> u32 {
        self.declines
    }

    pub fn is_relocating(&self) -> bool {
        self.relocating
    }

    pub fn is_celebrated(&self) -> bool {
        self.celebrated
    }

    /// Register a decline attempt. Returns the new accept scale, or None once
    /// celebrating.
    pub fn decline(&mut self, multiplier: f64) -> Option<f64> {
        if self.celebrated {
            return None;
        }
        self.accept_scale *= multiplier;
        self.declines += 1;
        self.relocating = true;
        Some(self.accept_scale)
    }

    /// Drop the relocating flag, whatever happened since it was set
    pub fn clear_relocating(&mut self) {
        self.relocating = false;
    }

    /// Set the one-shot celebration flag. True only the first time.
    pub fn accept(&mut self) -> bool {
        if self.celebrated {
            return false;
        }
        self.celebrated = true;
        true
    }
}

/// Which input produced a decline attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineSource {
    Click,
    /// Enter or Space on the focused button
    Key,
    PointerEnter,
    TouchStart,
}

/// A decline attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeclineInput {
    pub source: DeclineSource,
    /// Input position in region coordinates, when the input has one
    pub at: Option<Point>,
}

impl DeclineInput {
    pub fn pointer(source: DeclineSource, at: Point) -> Self {
        Self {
            source,
            at: Some(at),
        }
    }

    pub fn keyboard() -> Self {
        Self {
            source: DeclineSource::Key,
            at: None,
        }
    }
}

/// What a handled decline did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeclineOutcome {
    pub accept_scale: f64,
    pub position: Point,
    pub position_tier: Tier,
    /// None when effects are suppressed or nothing could draw
    pub effect_tier: Option<Tier>,
    /// Call [`PromptController::finish_relocation`] after this long
    pub clear_after_ms: u32,
}

/// Everything the controller needs from the page (or terminal)
pub trait PromptView {
    /// Region the decline button may teleport within
    fn decline_region(&self) -> Region;

    /// Fallback effect origin for inputs without coordinates
    fn trigger_center(&self) -> Point;

    fn scale_accept(&mut self, scale: f64);

    /// Place the decline button at `to` and mark it relocating
    fn move_decline(&mut self, to: Point);

    /// Remove the relocating mark
    fn end_relocation(&mut self);

    fn reveal_celebration(&mut self);

    /// Empty the live announcement region
    fn clear_announcement(&mut self);

    fn write_announcement(&mut self, message: &str);

    /// Replace the live announcement. Cleared first so a repeated message
    /// still registers as a change.
    fn announce(&mut self, message: &str) {
        self.clear_announcement();
        self.write_announcement(message);
    }

    /// Start a particle effect. False when there is nothing to draw on.
    fn launch(&mut self, effect: Effect) -> bool;

    /// Celebratory tone; optional
    fn chime(&mut self) {}
}

/// Binds decline/accept inputs to state transitions and effects
pub struct PromptController {
    state: InteractionState,
    resolver: BackendResolver,
    settings: Settings,
}

impl PromptController {
    pub fn new(settings: Settings, resolver: BackendResolver) -> Self {
        Self {
            state: InteractionState::new(),
            resolver,
            settings,
        }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle a decline attempt. Ignored (None, no side effects) once
    /// celebrating.
    pub fn decline(
        &mut self,
        view: &mut dyn PromptView,
        input: DeclineInput,
    ) -> Option<DeclineOutcome> {
        let accept_scale = self.state.decline(self.settings.growth_multiplier)?;
        view.scale_accept(accept_scale);

        let (position, position_tier) = self
            .resolver
            .resolve_position(view.decline_region(), crate::now_seed());
        view.move_decline(position);
        view.announce(&self.settings.decline_message);

        let effect_tier = if self.settings.effective_particles() {
            let at = input.at.unwrap_or_else(|| view.trigger_center());
            self.resolver
                .resolve_effect(at, |origin| view.launch(Effect::Burst { origin }))
        } else {
            None
        };

        log::debug!(
            "Decline #{} via {:?}: scale {:.3}, moved to ({:.0}, {:.0}) by {}",
            self.state.declines(),
            input.source,
            accept_scale,
            position.x,
            position.y,
            position_tier.as_str()
        );

        Some(DeclineOutcome {
            accept_scale,
            position,
            position_tier,
            effect_tier,
            clear_after_ms: self.settings.relocation_clear_ms,
        })
    }

    /// Relocation delay elapsed; always clears, never debounced
    pub fn finish_relocation(&mut self, view: &mut dyn PromptView) {
        self.state.clear_relocating();
        view.end_relocation();
    }

    /// Handle an accept. Returns false (and does nothing) if already accepted.
    pub fn accept(&mut self, view: &mut dyn PromptView) -> bool {
        if !self.state.accept() {
            return false;
        }

        view.reveal_celebration();
        view.announce(&self.settings.success_message);
        if self.settings.effective_particles() && !view.launch(Effect::Confetti) {
            log::debug!("Confetti skipped: nothing to draw on");
        }
        if self.settings.chime {
            view.chime();
        }

        log::info!("Accepted after {} declines", self.state.declines());
        true
    }
}
