//! Fatigue pipeline: ordered adjusters between a proposed fatigue amount and
//! the ledger.
//!
//! ```text
//! proposed ─▶ adjuster 1 ─▶ adjuster 2 ─▶ … ─▶ committed ─▶ StaminaLedger
//! ```
//!
//! Each adjuster sees the previous stage's output. Adjusters are expected to
//! reduce or pass through; a negative result simply turns the application
//! into a no-op.

use bevy::prelude::*;

use super::ledger::StaminaLedger;
use super::source::{FatigueSource, FatigueSourceKind};

/// Proposed amounts above this trigger a stagger cue.
pub const STAGGER_THRESHOLD: f32 = 5.0;

/// Stage name of [`GuardFatigueProtection`].
pub const GUARD_PROTECTION_STAGE: &str = "guard_protection";

/// One stage of the pipeline.
pub trait FatigueAdjuster: Send + Sync {
    fn adjust(&self, fatigue: f32, source: &FatigueSource) -> f32;

    /// Name used in debug logs.
    fn name(&self) -> &str {
        "adjuster"
    }
}

impl<F> FatigueAdjuster for F
where
    F: Fn(f32, &FatigueSource) -> f32 + Send + Sync,
{
    fn adjust(&self, fatigue: f32, source: &FatigueSource) -> f32 {
        self(fatigue, source)
    }
}

/// Guard-specific protection registered when a player joins.
///
/// Scales fatigue from `Defense` sources by `1 - reduction`; other sources
/// pass through. The default reduction is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GuardFatigueProtection {
    pub reduction: f32,
}

impl FatigueAdjuster for GuardFatigueProtection {
    fn adjust(&self, fatigue: f32, source: &FatigueSource) -> f32 {
        if source.kind != FatigueSourceKind::Defense {
            return fatigue;
        }
        fatigue * (1.0 - self.reduction.clamp(0.0, 1.0))
    }

    fn name(&self) -> &str {
        GUARD_PROTECTION_STAGE
    }
}

/// Ordered adjuster chain, one per character.
#[derive(Component, Default)]
pub struct FatiguePipeline {
    stages: Vec<Box<dyn FatigueAdjuster>>,
}

impl std::fmt::Debug for FatiguePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.stages.iter().map(|stage| stage.name()))
            .finish()
    }
}

impl FatiguePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage; stages run in subscription order.
    pub fn subscribe(&mut self, adjuster: impl FatigueAdjuster + 'static) {
        self.stages.push(Box::new(adjuster));
    }

    pub fn with(mut self, adjuster: impl FatigueAdjuster + 'static) -> Self {
        self.subscribe(adjuster);
        self
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn has_stage(&self, name: &str) -> bool {
        self.stages.iter().any(|stage| stage.name() == name)
    }

    /// Runs the chain without touching any ledger.
    pub fn adjust(&self, fatigue: f32, source: &FatigueSource) -> f32 {
        self.stages
            .iter()
            .fold(fatigue, |fatigue, stage| stage.adjust(fatigue, source))
    }
}

/// Result of one fatigue application.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FatigueOutcome {
    pub kind: FatigueSourceKind,
    pub proposed: f32,
    /// Amount after the pipeline; 0.0 when nothing was committed.
    pub committed: f32,
    pub stamina_before: f32,
    pub stamina_after: f32,
    pub staggered: bool,
}

impl FatigueOutcome {
    fn skipped(kind: FatigueSourceKind, proposed: f32, stamina: f32) -> Self {
        Self {
            kind,
            proposed,
            committed: 0.0,
            stamina_before: stamina,
            stamina_after: stamina,
            staggered: false,
        }
    }

    pub fn applied(&self) -> bool {
        self.committed > 0.0
    }
}

/// Runs `proposed` through the pipeline and commits the result.
///
/// Non-positive or non-finite amounts (before or after the chain) are no-ops:
/// no ledger write, no stagger. The ledger's clamp keeps stamina in range.
pub fn apply_fatigue(
    ledger: &mut StaminaLedger,
    pipeline: &FatiguePipeline,
    proposed: f32,
    source: &FatigueSource,
) -> FatigueOutcome {
    let stamina_before = ledger.stamina();

    if !proposed.is_finite() || proposed <= 0.0 {
        return FatigueOutcome::skipped(source.kind, proposed, stamina_before);
    }

    let committed = pipeline.adjust(proposed, source);
    if !committed.is_finite() || committed <= 0.0 {
        return FatigueOutcome::skipped(source.kind, proposed, stamina_before);
    }

    ledger.set_stamina(stamina_before - committed);

    FatigueOutcome {
        kind: source.kind,
        proposed,
        committed,
        stamina_before,
        stamina_after: ledger.stamina(),
        staggered: proposed > STAGGER_THRESHOLD,
    }
}
