#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use loco::combat::{resolve_with, Battler, CombatRules, CombatStats, Outcome, Role, Side};

/// One fuzzed combatant.
#[derive(Arbitrary, Debug)]
struct UnitInput {
    /// Role index, taken modulo 4.
    role: u8,
    hp: u16,
    attack: u16,
    defense: u16,
    speed: u8,
    mana: u8,
}

/// Structured input for battle fuzzing.
#[derive(Arbitrary, Debug)]
struct BattleInput {
    players: Vec<UnitInput>,
    enemies: Vec<UnitInput>,
    /// Turn limit, clamped to 1..=64.
    max_turns: u8,
    heal_cost: u8,
    mana_regen: u8,
}

const ROLES: [Role; 4] = [Role::Tank, Role::Dps, Role::Apprentice, Role::Healer];

fn battler(input: &UnitInput, side: Side, i: usize) -> Battler {
    Battler::new(
        format!("{side:?}{i}"),
        ROLES[usize::from(input.role % 4)],
        side,
        CombatStats::new(
            u32::from(input.hp),
            u32::from(input.attack),
            u32::from(input.defense),
            u32::from(input.speed),
        ),
        u32::from(input.mana),
    )
}

fuzz_target!(|input: BattleInput| {
    let players: Vec<_> = input
        .players
        .iter()
        .take(8)
        .enumerate()
        .map(|(i, u)| battler(u, Side::Player, i))
        .collect();
    let enemies: Vec<_> = input
        .enemies
        .iter()
        .take(8)
        .enumerate()
        .map(|(i, u)| battler(u, Side::Enemy, i))
        .collect();

    let rules = CombatRules {
        max_turns: u32::from(input.max_turns.clamp(1, 64)),
        heal_cost: u32::from(input.heal_cost),
        mana_regen: u32::from(input.mana_regen),
        ..CombatRules::default()
    };

    let report = resolve_with(&rules, players, enemies);

    assert!(report.turns >= 1 && report.turns <= rules.max_turns);
    for unit in report.players.iter().chain(&report.enemies) {
        assert!(unit.hp <= unit.max_hp, "hp above max: {unit:?}");
        assert!(unit.mana <= unit.max_mana, "mana above max: {unit:?}");
        if unit.hp == 0 {
            assert!(!unit.alive, "dead unit marked alive: {unit:?}");
        }
    }
    if report.outcome == Outcome::Win {
        assert!(report.enemies.iter().all(|e| !e.alive));
    }
});
