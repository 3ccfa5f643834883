//! Integration test: saved boards load back unchanged.

use gol_board::{load, parse, save};
use gol_test_utils::random_grid;
use proptest::prelude::*;

proptest! {
    #[test]
    fn canonical_text_round_trips(
        rows in 1usize..30,
        cols in 1usize..40,
        seed in any::<u64>(),
    ) {
        let grid = random_grid(rows, cols, 0.4, seed);
        let text = grid.to_text();
        let parsed = parse(&text).unwrap();
        prop_assert_eq!(parsed.to_text(), text);
        prop_assert_eq!(parsed, grid);
    }
}

#[test]
fn file_round_trip() {
    let grid = random_grid(17, 23, 0.3, 99);
    let path = std::env::temp_dir().join(format!("gol-board-{}.txt", std::process::id()));
    save(&grid, &path).unwrap();
    let loaded = load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, grid);
}
