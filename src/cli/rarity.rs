//! Rarity command implementation.

use super::output::{format_rarity_csv, format_rarity_text, JsonRarityResult, RarityStats};
use super::{progress_bar, seed_or_clock, CliError, StatsFormat};
use loco::encounter::EnemyRarity;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

/// Rolls drawn from one seeded RNG.
const CHUNK_SIZE: u64 = 10_000;

/// Execute the rarity command.
///
/// # Errors
///
/// Returns an error if output serialization fails.
pub(crate) fn execute(
    rolls: u64,
    seed: Option<u64>,
    format: StatsFormat,
    progress: bool,
) -> Result<(), CliError> {
    let base_seed = seed_or_clock(seed);
    let chunks = rolls.div_ceil(CHUNK_SIZE);
    let pb = progress.then(|| progress_bar(chunks, "chunks")).transpose()?;

    let start = Instant::now();

    // Each chunk owns its RNG so results only depend on the seed
    let stats = (0..chunks)
        .into_par_iter()
        .fold(RarityStats::default, |mut local, chunk| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(chunk));
            let size = CHUNK_SIZE.min(rolls - chunk * CHUNK_SIZE);
            for _ in 0..size {
                local.add(EnemyRarity::roll(&mut rng));
            }
            // Per chunk, not per roll
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local
        })
        .reduce(RarityStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();

    match format {
        StatsFormat::Text => {
            print!("{}", format_rarity_text(&stats));
            println!();
            println!("Duration: {:.2}s", duration.as_secs_f64());
        }
        StatsFormat::Json => {
            let result = JsonRarityResult::from_stats(&stats, base_seed);
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        StatsFormat::Csv => print!("{}", format_rarity_csv(&stats)),
    }

    Ok(())
}
