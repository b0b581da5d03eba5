#![no_main]

use arbitrary::Arbitrary;
use chrono::{DateTime, Duration};
use libfuzzer_sys::fuzz_target;
use loco::encounter::ArchetypeCatalog;
use loco::world::{Cell, ZoneCoord};
use loco::zone_state::{MoveOutcome, MoveRequest, ZoneStateManager};

/// One fuzzed move.
#[derive(Arbitrary, Debug)]
struct Step {
    dx: i8,
    dy: i8,
    /// Seconds to advance the clock.
    wait: u16,
}

/// Structured input for movement fuzzing.
#[derive(Arbitrary, Debug)]
struct MovementInput {
    zone_x: i8,
    zone_y: i8,
    start_x: i8,
    start_y: i8,
    steps: Vec<Step>,
}

fuzz_target!(|input: MovementInput| {
    let manager = ZoneStateManager::in_memory(ArchetypeCatalog::default());
    let mut zone = ZoneCoord::wrapping(i32::from(input.zone_x), i32::from(input.zone_y));
    let mut cell = Cell::new(i32::from(input.start_x), i32::from(input.start_y));
    let Some(mut now) = DateTime::from_timestamp(1_700_000_000, 0) else {
        return;
    };

    for step in input.steps.iter().take(256) {
        now += Duration::seconds(i64::from(step.wait));
        let to = Cell::new(cell.x + i32::from(step.dx), cell.y + i32::from(step.dy));
        let outcome = manager.move_player(MoveRequest::new(zone, cell, to), now);

        match &outcome {
            MoveOutcome::Rejected(_) => {}
            MoveOutcome::ZoneChanged { cell, .. } => assert!(cell.in_bounds() && cell.edge().is_none()),
            MoveOutcome::SpawnTriggered { spawn, pack, .. } => {
                assert!(!spawn.is_alive);
                assert!(!pack.is_empty());
                assert!(!zone.is_safe());
            }
            MoveOutcome::Moved { cell } | MoveOutcome::ShopEntered { cell } => {
                assert!(cell.in_bounds());
            }
        }
        if let Some((next_zone, next_cell)) = outcome.position(zone) {
            zone = next_zone;
            cell = next_cell;
        }
    }
});
