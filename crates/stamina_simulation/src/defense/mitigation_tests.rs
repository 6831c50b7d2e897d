//! Tests for defense mitigation.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::rngs::mock::StepRng;

    use crate::components::{ControlState, DefenseProfile, HeldItem, Orientation, ProtectionChance};
    use crate::defense::events::Notice;
    use crate::defense::mitigation::*;
    use crate::fatigue::{FatiguePipeline, FatigueSource, StaminaLedger};

    const DEFENDER: Entity = Entity::PLACEHOLDER;

    /// Always rolls 0.0 (every chance > 0 succeeds).
    fn lucky() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Always rolls just under 1.0 (only chance 1.0 succeeds).
    fn unlucky() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn shield(absorption: f32, active: f32, passive: f32) -> HeldItem {
        HeldItem::new("wooden shield")
            .with_defense(DefenseProfile {
                damage_absorption: absorption,
                protection_chance: ProtectionChance { active, passive },
                ..DefenseProfile::default()
            })
            .with_durability(100)
    }

    fn defender<'a>(controls: &'a ControlState, item: Option<&'a HeldItem>) -> Defender<'a> {
        Defender {
            entity: DEFENDER,
            position: Vec3::ZERO,
            facing: Orientation::default(),
            controls,
            item,
        }
    }

    /// Attack straight down the defender's facing axis.
    fn frontal_hit(amount: f32) -> Hit {
        Hit {
            attacker: None,
            source_position: Some(Vec3::new(0.0, 0.0, 2.0)),
            amount,
        }
    }

    #[test]
    fn test_exhausted_defender_cannot_block() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 1.0, 1.0);
        let mut ledger = StaminaLedger::restore(0.0, 100.0, true);

        let outcome = mitigate_damage(
            &frontal_hit(10.0),
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut lucky(),
            MitigationSettings::default(),
        );

        assert_eq!(outcome.final_damage, 10.0);
        assert_eq!(outcome.verdict, MitigationVerdict::Skipped(SkipReason::OutOfStamina));
        assert_eq!(outcome.effects, vec![DefenseEffect::Notify(Notice::FatigueBreakthrough)]);
        assert_eq!(ledger.stamina(), 0.0);
    }

    #[test]
    fn test_certain_block_on_axis() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 1.0, 0.0);
        let mut ledger = StaminaLedger::restore(50.0, 100.0, false);

        let outcome = mitigate_damage(
            &frontal_hit(5.0),
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut unlucky(),
            MitigationSettings::default(),
        );

        assert_eq!(outcome.final_damage, 3.0);
        assert!(outcome.roll_succeeded());
        assert_eq!(ledger.stamina(), 35.0);

        let MitigationVerdict::Guarded { mode, fatigue, .. } = outcome.verdict else {
            panic!("expected a guarded hit, got {:?}", outcome.verdict);
        };
        assert_eq!(mode, GuardMode::Active);
        assert_eq!(fatigue.map(|f| f.committed), Some(LIGHT_BLOCK_FATIGUE));

        assert_eq!(
            outcome.effects,
            vec![
                DefenseEffect::Stagger,
                DefenseEffect::Notify(Notice::DamageBlocked {
                    blocked: 2.0,
                    total: 5.0,
                    item: "wooden shield".to_string(),
                    mode: GuardMode::Active,
                }),
                DefenseEffect::PlaySound("sounds/held/shieldblock-wood-light.ogg".to_string()),
                DefenseEffect::BroadcastBlock,
                DefenseEffect::WearItem(3),
            ]
        );
    }

    #[test]
    fn test_failed_roll_still_costs_stamina() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 0.5, 0.0);
        let mut ledger = StaminaLedger::new(100.0);

        let outcome = mitigate_damage(
            &frontal_hit(8.0),
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut unlucky(),
            MitigationSettings::default(),
        );

        assert_eq!(outcome.final_damage, 8.0);
        assert!(!outcome.roll_succeeded());
        // Heavy hit: 8 > 6
        assert_eq!(ledger.stamina(), 100.0 - HEAVY_BLOCK_FATIGUE);
        assert!(outcome
            .effects
            .contains(&DefenseEffect::PlaySound("sounds/held/shieldblock-wood-heavy.ogg".to_string())));
        assert!(!outcome.effects.contains(&DefenseEffect::BroadcastBlock));
    }

    #[test]
    fn test_attack_from_behind_passes_through() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 1.0, 1.0);
        let mut ledger = StaminaLedger::new(100.0);
        let hit = Hit {
            attacker: None,
            source_position: Some(Vec3::new(0.0, 0.0, -2.0)),
            amount: 10.0,
        };

        let outcome = mitigate_damage(
            &hit,
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut lucky(),
            MitigationSettings::default(),
        );

        assert_eq!(outcome.verdict, MitigationVerdict::OutOfArc);
        assert_eq!(outcome.final_damage, 10.0);
        assert!(outcome.effects.is_empty());
        assert_eq!(ledger.stamina(), 100.0);
    }

    #[test]
    fn test_unknown_direction_passes_through() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 1.0, 1.0);
        let mut ledger = StaminaLedger::new(100.0);
        let hit = Hit {
            attacker: None,
            source_position: None,
            amount: 4.0,
        };

        let outcome = mitigate_damage(
            &hit,
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut lucky(),
            MitigationSettings::default(),
        );

        assert_eq!(
            outcome.verdict,
            MitigationVerdict::Skipped(SkipReason::IndeterminateDirection)
        );
        assert_eq!(outcome.final_damage, 4.0);
    }

    #[test]
    fn test_no_defense_profile_passes_through() {
        let controls = ControlState::guarding();
        let sword = HeldItem::new("sword");
        let mut ledger = StaminaLedger::new(100.0);

        for item in [None, Some(&sword)] {
            let outcome = mitigate_damage(
                &frontal_hit(7.0),
                &defender(&controls, item),
                &mut ledger,
                &FatiguePipeline::new(),
                &mut lucky(),
                MitigationSettings::default(),
            );
            assert_eq!(outcome.verdict, MitigationVerdict::Skipped(SkipReason::NoDefenseProfile));
            assert_eq!(outcome.final_damage, 7.0);
        }
    }

    #[test]
    fn test_aiming_uses_passive_chance() {
        let controls = ControlState {
            guard: true,
            aiming: true,
            ..ControlState::default()
        };
        let item = shield(2.0, 1.0, 0.0);
        let mut ledger = StaminaLedger::new(100.0);

        let outcome = mitigate_damage(
            &frontal_hit(5.0),
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut lucky(),
            MitigationSettings::default(),
        );

        // Passive chance 0.0 never beats a roll of 0.0
        assert!(!outcome.roll_succeeded());
        assert_eq!(outcome.final_damage, 5.0);
        assert!(matches!(
            outcome.verdict,
            MitigationVerdict::Guarded { mode: GuardMode::Passive, .. }
        ));
    }

    #[test]
    fn test_absorption_never_exceeds_damage() {
        let controls = ControlState::guarding();
        let item = shield(10.0, 1.0, 1.0);
        let mut ledger = StaminaLedger::new(100.0);

        let outcome = mitigate_damage(
            &frontal_hit(3.0),
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut lucky(),
            MitigationSettings::default(),
        );

        assert_eq!(outcome.final_damage, 0.0);
        assert_eq!(outcome.absorbed(), 3.0);
        assert!(!outcome
            .effects
            .iter()
            .any(|effect| matches!(effect, DefenseEffect::WearItem(_))));
    }

    #[test]
    fn test_invalid_damage_is_noop() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 1.0, 1.0);
        let mut ledger = StaminaLedger::new(100.0);

        for amount in [0.0, -4.0, f32::NAN] {
            let outcome = mitigate_damage(
                &frontal_hit(amount),
                &defender(&controls, Some(&item)),
                &mut ledger,
                &FatiguePipeline::new(),
                &mut lucky(),
                MitigationSettings::default(),
            );
            assert_eq!(outcome.verdict, MitigationVerdict::Skipped(SkipReason::InvalidDamage));
            assert!(outcome.effects.is_empty());
        }
        assert_eq!(ledger.stamina(), 100.0);
    }

    #[test]
    fn test_client_side_skips_broadcast_and_wear() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 1.0, 1.0);
        let mut ledger = StaminaLedger::new(100.0);

        let outcome = mitigate_damage(
            &frontal_hit(9.0),
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut lucky(),
            MitigationSettings {
                stamina_enabled: true,
                authoritative: false,
            },
        );

        assert_eq!(outcome.final_damage, 7.0);
        assert!(!outcome.effects.contains(&DefenseEffect::BroadcastBlock));
        assert!(!outcome
            .effects
            .iter()
            .any(|effect| matches!(effect, DefenseEffect::WearItem(_))));
    }

    #[test]
    fn test_disabled_stamina_guards_for_free() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 1.0, 1.0);
        let mut ledger = StaminaLedger::restore(0.0, 100.0, true);

        let outcome = mitigate_damage(
            &frontal_hit(5.0),
            &defender(&controls, Some(&item)),
            &mut ledger,
            &FatiguePipeline::new(),
            &mut lucky(),
            MitigationSettings {
                stamina_enabled: false,
                authoritative: true,
            },
        );

        assert_eq!(outcome.final_damage, 3.0);
        assert!(matches!(
            outcome.verdict,
            MitigationVerdict::Guarded { fatigue: None, .. }
        ));
        assert!(!outcome.effects.contains(&DefenseEffect::Stagger));
    }

    #[test]
    fn test_block_fatigue_goes_through_pipeline() {
        let controls = ControlState::guarding();
        let item = shield(2.0, 1.0, 1.0);
        let mut ledger = StaminaLedger::new(100.0);
        let pipeline = FatiguePipeline::new().with(|fatigue: f32, source: &FatigueSource| {
            assert_eq!(source.source_entity, DEFENDER);
            fatigue - 10.0
        });

        mitigate_damage(
            &frontal_hit(20.0),
            &defender(&controls, Some(&item)),
            &mut ledger,
            &pipeline,
            &mut lucky(),
            MitigationSettings::default(),
        );

        assert_eq!(ledger.stamina(), 80.0);
    }
}
