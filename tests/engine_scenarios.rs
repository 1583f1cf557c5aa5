use std::collections::{BTreeMap, BTreeSet};

use waypath::generator::grid::parse_path;
use waypath::{
    CellId, Difficulty, EngineConfig, Generator, PathSession, Puzzle, SessionState, Violation,
    create_session, score, validate,
};

/// 3x3 grid with waypoints on the diagonal and no obstacles
fn diagonal_puzzle() -> Puzzle {
    Puzzle::new(
        "diagonal",
        3,
        Difficulty::Easy,
        BTreeMap::from([
            (CellId::new(0, 0), 1),
            (CellId::new(1, 1), 2),
            (CellId::new(2, 2), 3),
        ]),
        BTreeSet::new(),
    )
    .expect("valid puzzle")
}

#[test]
fn diagonal_scenario_scores_three_stars() {
    let puzzle = diagonal_puzzle();
    let path = parse_path("0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-1,2-2").unwrap();

    let validation = validate(&path, &puzzle);
    assert!(validation.is_valid);

    let result = score(&path, &puzzle, 45_000, &EngineConfig::default());
    assert!(result.is_valid);
    assert_eq!(result.completion_time_seconds, 45);
    assert_eq!(result.move_count, 9);
    assert_eq!(result.efficiency_percent, 100);
    assert_eq!(result.time_bonus, 255);
    assert_eq!(result.stars, 3);
    assert!(result.errors.is_empty());
}

#[test]
fn swapping_the_last_two_cells_breaks_continuity() {
    let puzzle = diagonal_puzzle();
    let path = parse_path("0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-2,2-1").unwrap();

    let validation = validate(&path, &puzzle);
    assert!(!validation.is_valid);
    // 2-0 -> 2-2 is a jump; the waypoints are still met in order
    assert_eq!(validation.violations, vec![Violation::InvalidPath]);

    let result = score(&path, &puzzle, 45_000, &EngineConfig::default());
    assert_eq!(result.stars, 0);
    assert_eq!(result.errors, vec![Violation::InvalidPath]);
}

#[test]
fn session_replay_of_the_scenario_completes() {
    let mut session = create_session(diagonal_puzzle());
    let path = parse_path("0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-1,2-2").unwrap();
    assert!(session.start(path[0]));
    for cell in &path[1..] {
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.extend(*cell));
    }
    assert_eq!(session.state(), SessionState::Completed);
    assert_eq!(session.path(), path.as_slice());
}

#[test]
fn generated_puzzles_are_well_formed_for_every_size_and_tier() {
    let config = EngineConfig::default();
    let mut generator = Generator::with_seed(config.clone(), 1234);

    for size in config.min_grid_size..=config.max_grid_size {
        for difficulty in Difficulty::ALL {
            let puzzle = generator.generate(size, difficulty);

            let numbers: BTreeSet<usize> = puzzle.waypoints().values().copied().collect();
            assert_eq!(numbers.len(), puzzle.waypoints().len(), "duplicate numbers");
            assert_eq!(
                numbers,
                (1..=puzzle.waypoints().len()).collect::<BTreeSet<usize>>()
            );
            assert!(
                puzzle
                    .waypoints()
                    .keys()
                    .all(|c| !puzzle.obstacles().contains(c))
            );
        }
    }
}

#[test]
fn solver_paths_replay_through_the_session() {
    let config = EngineConfig {
        max_verify_attempts: 500,
        ..EngineConfig::default()
    };
    let mut generator = Generator::with_seed(config, 99);

    for size in 3..=5 {
        let (puzzle, solution) = generator
            .generate_verified(size, Difficulty::Hard)
            .expect("no solvable hard puzzle");
        assert_eq!(solution.len(), puzzle.available_cell_count());
        assert!(validate(&solution, &puzzle).is_valid);

        let mut session = PathSession::new(puzzle);
        assert!(session.start(solution[0]));
        for cell in &solution[1..] {
            assert!(session.extend(*cell));
        }
        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.completion_result().is_valid);
    }
}

#[test]
fn puzzle_json_round_trip_keeps_the_rules() {
    let puzzle = diagonal_puzzle();
    let json = serde_json::to_string(&puzzle).unwrap();
    let loaded: Puzzle = serde_json::from_str(&json).unwrap();

    let path = parse_path("0-0,0-1,0-2,1-2,1-1,1-0,2-0,2-1,2-2").unwrap();
    assert_eq!(validate(&path, &loaded), validate(&path, &puzzle));
}
