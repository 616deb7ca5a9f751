use proptest::prelude::*;
use toroid_core::{Position, SIZE};
use toroid_world::{apply_rule, next_generation, FixedFlips, Grid, RandomFlips, Simulation};

fn arb_grid() -> impl Strategy<Value = Grid> {
    prop::collection::vec(any::<bool>(), SIZE * SIZE).prop_map(|alive| {
        let live = alive
            .into_iter()
            .enumerate()
            .filter(|&(_, a)| a)
            .map(|(i, _)| Position::new(i / SIZE, i % SIZE));
        Grid::from_live(live)
    })
}

fn shifted(grid: &Grid, d_row: isize, d_col: isize) -> Grid {
    Grid::from_live(
        grid.live_positions()
            .into_iter()
            .map(|p| p.offset(d_row, d_col, SIZE)),
    )
}

fn assert_age_invariant(grid: &Grid) -> Result<(), TestCaseError> {
    for (pos, cell) in grid.iter() {
        if cell.is_alive() {
            prop_assert!(cell.age() >= 1, "live cell {} has age 0", pos);
        } else {
            prop_assert_eq!(cell.age(), 0, "dead cell {} has nonzero age", pos);
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn test_age_invariant_holds_across_generations(
        grid in arb_grid(),
        seed in any::<u64>(),
        generations in 1u32..30,
    ) {
        assert_age_invariant(&grid)?;
        let mut sim = Simulation::with_seed(grid, Some(seed));
        for _ in 0..generations {
            sim.advance();
            assert_age_invariant(sim.current())?;
        }
    }

    #[test]
    fn test_neighbor_counts_bounded(grid in arb_grid()) {
        for pos in grid.positions() {
            let n = grid.count_live_neighbors(pos.row, pos.col);
            prop_assert!(n <= 8);
        }
    }

    #[test]
    fn test_population_matches_scan(grid in arb_grid(), seed in any::<u64>()) {
        let next = next_generation(&grid, &mut RandomFlips::seeded(seed));
        let mut scanned = 0;
        for row in 0..SIZE {
            for col in 0..SIZE {
                if next.get(row, col).is_alive() {
                    scanned += 1;
                }
            }
        }
        prop_assert_eq!(next.count_alive(), scanned);
    }

    #[test]
    fn test_rule_only_step_follows_table(grid in arb_grid()) {
        let next = next_generation(&grid, &mut FixedFlips::never());
        for (pos, cell) in grid.iter() {
            let n = grid.count_live_neighbors(pos.row, pos.col);
            let after = next.get(pos.row, pos.col);
            prop_assert_eq!(after.is_alive(), apply_rule(cell.is_alive(), n));
            if cell.is_alive() && after.is_alive() {
                prop_assert_eq!(after.age(), cell.age() + 1);
            }
        }
    }

    #[test]
    fn test_forced_flips_invert_rule(grid in arb_grid()) {
        let ruled = next_generation(&grid, &mut FixedFlips::never());
        let flipped = next_generation(&grid, &mut FixedFlips::always());
        for (pos, cell) in flipped.iter() {
            let before = grid.get(pos.row, pos.col);
            prop_assert_eq!(cell.is_alive(), !ruled.get(pos.row, pos.col).is_alive());
            let expected_age = match (before.is_alive(), cell.is_alive()) {
                (_, false) => 0,
                (false, true) => 1,
                (true, true) => before.age() + 1,
            };
            prop_assert_eq!(cell.age(), expected_age);
        }
    }

    #[test]
    fn test_rule_commutes_with_torus_shift(
        grid in arb_grid(),
        d_row in -6isize..6,
        d_col in -6isize..6,
    ) {
        let step_then_shift = shifted(&next_generation(&grid, &mut FixedFlips::never()), d_row, d_col);
        let shift_then_step = next_generation(&shifted(&grid, d_row, d_col), &mut FixedFlips::never());
        prop_assert_eq!(
            step_then_shift.live_positions(),
            shift_then_step.live_positions()
        );
    }

    #[test]
    fn test_input_grid_untouched(grid in arb_grid(), seed in any::<u64>()) {
        let before = grid.clone();
        let _ = next_generation(&grid, &mut RandomFlips::seeded(seed));
        prop_assert_eq!(grid, before);
    }
}

#[test]
fn test_block_stable_without_flips() {
    let block = Grid::from_live([
        Position::new(1, 1),
        Position::new(1, 2),
        Position::new(2, 1),
        Position::new(2, 2),
    ]);
    let mut sim = Simulation::new(block.clone(), FixedFlips::never());
    for generation in 1..=10u32 {
        sim.advance();
        assert_eq!(sim.current().live_positions(), block.live_positions());
        assert_eq!(sim.current().get(1, 1).age(), generation + 1);
    }
}

#[test]
fn test_corner_counts_wrap() {
    let grid = Grid::from_live([Position::new(0, 0)]);
    let last = SIZE - 1;
    assert_eq!(grid.count_live_neighbors(last, last), 1);
    assert_eq!(grid.count_live_neighbors(last, 0), 1);
    assert_eq!(grid.count_live_neighbors(0, last), 1);
}

#[test]
fn test_run_summary_serializes() {
    let mut sim = Simulation::new(Grid::new(), FixedFlips::always());
    let summary = sim.run(2, |_, _, _| {});
    // Empty board flips full; the crowded full board then dies by rule and flips back alive
    assert_eq!(summary.peak_population, SIZE * SIZE);
    assert_eq!(summary.final_population, SIZE * SIZE);
    assert_eq!(summary.total_births, SIZE * SIZE);
    assert_eq!(summary.total_deaths, 0);
    assert_eq!(summary.oldest_age, 2);

    let json = serde_json::to_value(summary).unwrap();
    assert_eq!(json["generations"], 2);
    assert_eq!(json["total_flips"], 72);
}
