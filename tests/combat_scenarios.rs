//! Integration tests for full battles built from rosters and packs.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use loco::combat::{resolve, resolve_with, Battler, CombatRules, CombatStats, Outcome, Role, Side};
use loco::encounter::{calculate_rewards, generate_pack, ArchetypeCatalog, EnemyRarity};
use loco::roster::{pack_to_battlers, CharacterSheet};

fn unit(name: &str, role: Role, hp: u32, attack: u32, defense: u32, speed: u32) -> Battler {
    Battler::new(name, role, Side::Player, CombatStats::new(hp, attack, defense, speed), 10)
}

#[test]
fn test_overleveled_party_wins_and_is_rewarded() {
    let catalog = ArchetypeCatalog::default();
    let pack = generate_pack(1, &catalog, 7);
    assert!(!pack.is_empty());

    let party = vec![
        CharacterSheet::new("Ana", Role::Tank).with_level(60).to_battler(),
        CharacterSheet::new("Bo", Role::Dps).with_level(60).to_battler(),
        CharacterSheet::new("Cy", Role::Healer).with_level(60).to_battler(),
    ];
    let report = resolve(party, pack_to_battlers(&pack));
    assert_eq!(report.outcome, Outcome::Win);
    assert!(report.log.last().unwrap().contains("The players won!"));
    assert!(report.enemies.iter().all(|e| !e.alive));

    let rewards = calculate_rewards(&pack);
    assert!(rewards.xp >= 25 * u64::try_from(pack.len()).unwrap());
}

#[test]
fn test_underleveled_party_loses() {
    let pack = generate_pack(90, &ArchetypeCatalog::default(), 11);
    let party = vec![CharacterSheet::new("Ana", Role::Apprentice).to_battler()];
    let report = resolve(party, pack_to_battlers(&pack));
    assert_eq!(report.outcome, Outcome::Lose);
    assert_eq!(report.log.last().unwrap(), "The players have been defeated!");
}

#[test]
fn test_stalemate_is_a_draw() {
    let players = vec![unit("Wall", Role::Tank, 500, 1, 100, 1)];
    let mut enemy = unit("Rock", Role::Dps, 500, 1, 100, 1);
    enemy.side = Side::Enemy;

    let rules = CombatRules {
        max_turns: 5,
        ..CombatRules::default()
    };
    let report = resolve_with(&rules, players, vec![enemy]);
    assert_eq!(report.outcome, Outcome::Draw);
    assert_eq!(report.turns, 5);
    // Minimum damage of 1 per hit
    assert_eq!(report.players[0].hp, 495);
}

#[test]
fn test_log_starts_with_first_turn() {
    let players = vec![unit("Hero", Role::Dps, 50, 30, 0, 5)];
    let enemies = vec![unit("Slime", Role::Dps, 10, 1, 0, 1)];
    let report = resolve(players, enemies);
    assert_eq!(report.log[0], "--- Turn 1 ---");
    assert_eq!(report.log[1], "Hero attacks Slime for 30 damage.");
    assert_eq!(report.outcome, Outcome::Win);
    assert_eq!(report.turns, 1);
}

#[test]
fn test_rewards_by_rarity() {
    let catalog = ArchetypeCatalog::default();
    let goblin = catalog.get("Goblin").unwrap();
    let pack = vec![
        loco::EnemyInstance::new(goblin, 10, EnemyRarity::Normal),
        loco::EnemyInstance::new(goblin, 10, EnemyRarity::Legend),
    ];
    let rewards = calculate_rewards(&pack);
    assert_eq!(rewards.xp, 70 + 140);
    assert_eq!(rewards.orbs_bronze, 1);
    assert_eq!(rewards.orbs_gold, 2);
    assert_eq!(rewards.coin_value(), 201);
}
