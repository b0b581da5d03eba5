//! Battle command implementation.

use std::path::Path;

use super::output::{format_battle_text, JsonBattleResult};
use super::{load_catalog, seed_or_clock, CliError, OutputFormat};
use loco::combat::{resolve_with, Outcome, Role};
use loco::encounter::{calculate_rewards, generate_pack};
use loco::roster::{pack_to_battlers, CharacterSheet};
use loco::{SimConfig, ZoneCoord};

/// Execute the battle command.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the party is empty or
/// output serialization fails.
pub(crate) fn execute(
    config: &SimConfig,
    zone: ZoneCoord,
    classes: &[Role],
    level: u32,
    seed: Option<u64>,
    catalog: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    if classes.is_empty() {
        return Err(CliError::new("Party needs at least one class"));
    }
    let catalog = load_catalog(catalog)?;
    let seed = seed_or_clock(seed);
    let pack_level = zone.level();

    let pack = generate_pack(pack_level, &catalog, seed);
    if pack.is_empty() {
        return Err(CliError::new(format!(
            "No enemies in zone {zone} (level {pack_level})"
        )));
    }

    let mut party: Vec<CharacterSheet> = classes
        .iter()
        .enumerate()
        .map(|(i, &class)| CharacterSheet::new(format!("{class}{}", i + 1), class).with_level(level))
        .collect();
    let battlers = party.iter().map(CharacterSheet::to_battler).collect();

    let report = resolve_with(&config.combat, battlers, pack_to_battlers(&pack));
    let rewards = (report.outcome == Outcome::Win).then(|| calculate_rewards(&pack));

    match format {
        OutputFormat::Text => {
            print!("{}", format_battle_text(seed, &pack, &report, rewards.as_ref()));
            if let Some(rewards) = &rewards {
                for sheet in &mut party {
                    let levels = sheet.progress.gain_xp(rewards.xp);
                    if levels > 0 {
                        println!("  {} reached level {}", sheet.name, sheet.progress.level);
                    }
                }
            }
        }
        OutputFormat::Json => {
            let result = JsonBattleResult {
                seed,
                level: pack_level,
                pack: &pack,
                report: &report,
                rewards,
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
