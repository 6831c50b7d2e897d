//! Fatigue domain: the stamina economy of one character.
//!
//! ```text
//! FatigueTimer (0.25 s)
//!   ├─ drains (swim / sprint / guard) ─▶ FatiguePipeline ─▶ StaminaLedger
//!   └─ otherwise regen (paid with Satiety) ──────────────▶ StaminaLedger
//!        ↓
//!   refresh_exhausted ─▶ StatModifiers (band mapper)
//! ```
//!
//! Defense mitigation feeds its block cost through the same pipeline.

pub mod accumulator;
pub mod bands;
pub mod events;
pub mod ledger;
pub mod pipeline;
pub mod regen;
pub mod source;
pub mod systems;

pub use accumulator::{activity_drains, ActivityDrain, FatigueTimer, FATIGUE_TICK_INTERVAL};
pub use bands::{
    apply_band, band_modifier_set, update_stat_modifiers, StaminaBand, StatKind, StatModifierSink,
    StatModifiers, EXHAUSTED_BAND_THRESHOLD, LOW_BAND_THRESHOLD, MODIFIER_NAMESPACE,
};
pub use events::{
    EffectCue, ExhaustionChanged, FatigueApplied, StaminaBandChanged, STAGGER_ANIMATION, STAGGER_SOUND,
};
pub use ledger::{StaminaLedger, DEFAULT_MAX_STAMINA};
pub use pipeline::{
    apply_fatigue, FatigueAdjuster, FatigueOutcome, FatiguePipeline, GuardFatigueProtection,
    GUARD_PROTECTION_STAGE, STAGGER_THRESHOLD,
};
pub use regen::{regen_rate, regenerate, RegenOutcome, BASE_REGEN_PER_SECOND, SATIETY_REGEN_THRESHOLD};
pub use source::{FatigueSource, FatigueSourceKind};
pub use systems::{attach_stamina, stamina_components, tick_fatigue};
