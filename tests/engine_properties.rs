use std::time::Duration;

use grid_snake::config::GameConfig;
use grid_snake::game::{DeathReason, GameState, GameStatus};
use grid_snake::input::Direction;
use grid_snake::snake::Position;

fn open_board(width: u16, height: u16, start: Position) -> GameConfig {
    GameConfig {
        width,
        height,
        walls: Vec::new(),
        start,
        ..GameConfig::default()
    }
}

/// Drives a snake around a large board, feeding it food on a fixed pattern,
/// and checks growth bookkeeping after every tick.
#[test]
fn growth_tracks_food_eaten_each_tick() {
    let mut state = GameState::new_with_seed(&open_board(60, 60, Position::new(2, 2)), 9);
    let turns = [Direction::Right, Direction::Down, Direction::Left, Direction::Down];

    for step in 0..120u32 {
        if step % 10 == 0 {
            state.request_direction(turns[(step / 10) as usize % turns.len()]);
        }
        if step % 3 == 0 {
            let head = state.snake().head();
            state.food.set_primary(head);
        }

        let before = state.score();
        let starts_on_food = state.snake().head() == state.food.primary();

        state.tick();
        if state.is_game_over() {
            break;
        }

        let expected = before + usize::from(starts_on_food);
        assert_eq!(state.score(), expected, "step {step}");
        assert_eq!(state.score(), state.eaten() as usize);
    }
}

#[test]
fn boundary_scenario_ends_game() {
    let mut state = GameState::new_with_seed(&open_board(10, 10, Position::new(9, 5)), 1);
    state.food.set_primary(Position::new(0, 0));

    state.tick();

    assert_eq!(state.snake().head().x, 10);
    assert_eq!(state.status(), GameStatus::GameOver);
}

#[test]
fn wall_scenario_ends_game() {
    let mut config = open_board(20, 20, Position::new(9, 10));
    config.walls = vec![Position::new(10, 10)];
    let mut state = GameState::new_with_seed(&config, 1);
    state.food.set_primary(Position::new(0, 0));

    state.tick();

    assert_eq!(state.snake().head(), Position::new(10, 10));
    assert!(state.is_game_over());
    assert_eq!(state.death_reason(), Some(DeathReason::Wall));
}

#[test]
fn game_over_is_terminal() {
    let mut state = GameState::new_with_seed(&open_board(3, 3, Position::new(2, 1)), 1);
    state.food.set_primary(Position::new(0, 0));

    state.tick();
    assert!(state.is_game_over());
    let frozen = state.snapshot();

    for _ in 0..5 {
        state.tick();
    }
    assert_eq!(state.snapshot(), frozen);
    assert_eq!(state.tick_count(), 1);
}

#[test]
fn reversal_guard_only_blocks_the_opposite() {
    let mut state = GameState::new_with_seed(&GameConfig::default(), 1);
    assert_eq!(state.direction(), Direction::Right);

    assert!(!state.request_direction(Direction::Left));
    assert_eq!(state.direction(), Direction::Right);

    assert!(state.request_direction(Direction::Down));
    assert!(state.request_direction(Direction::Right));
    assert!(state.request_direction(Direction::Up));
}

#[test]
fn bonus_celebration_window_has_no_growth() {
    let mut state = GameState::new_with_seed(&open_board(20, 20, Position::new(1, 1)), 1);
    state.food.set_primary(Position::new(19, 19));
    state.food.set_bonus(Position::new(1, 1));

    state.tick();
    assert!(state.food.celebration_active());
    assert_eq!(state.score(), 0);

    // Ten ticks at 100 ms is one second: still celebrating.
    for _ in 0..10 {
        state.tick();
        state.advance_timers(Duration::from_millis(100));
    }
    assert!(state.food.celebration_active());

    state.advance_timers(Duration::from_millis(1_000));
    assert!(!state.food.celebration_active());
    assert_eq!(state.score(), 0);
}

#[test]
fn snapshot_reports_engine_state() {
    let state = GameState::new_with_seed(&GameConfig::default(), 3);
    let snapshot = state.snapshot();

    assert_eq!(snapshot.head, Position::new(5, 5));
    assert!(snapshot.body.is_empty());
    assert_eq!(snapshot.walls.len(), 12);
    assert_eq!(snapshot.food, state.food.primary());
    assert_eq!(snapshot.bonus_food, None);
    assert!(!snapshot.celebration_active);
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.status, GameStatus::Running);
}
