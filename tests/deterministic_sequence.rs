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

#[test]
fn stepwise_food_collection_and_wall_collision() {
    let mut state = GameState::new_with_seed(&open_board(6, 4, Position::new(1, 1)), 42);
    state.food.set_primary(Position::new(2, 1));

    state.tick();
    assert_eq!(state.status(), GameStatus::Running);
    assert_eq!(state.snake().head(), Position::new(2, 1));
    assert_eq!(state.score(), 0);

    state.tick();
    assert_eq!(state.score(), 1);
    assert_eq!(state.snake().body(), &[Position::new(2, 1)]);

    state.food.set_primary(Position::new(5, 3));
    assert!(state.request_direction(Direction::Up));
    state.tick();
    assert_eq!(state.status(), GameStatus::Running);
    assert_eq!(state.snake().head(), Position::new(3, 0));

    state.tick();
    assert_eq!(state.status(), GameStatus::GameOver);
    assert_eq!(state.death_reason(), Some(DeathReason::OutOfBounds));
    assert_eq!(state.score(), 1);
}

#[test]
fn same_seed_same_game() {
    let config = GameConfig::default();
    let mut a = GameState::new_with_seed(&config, 1234);
    let mut b = GameState::new_with_seed(&config, 1234);

    for step in 0..30 {
        if step % 7 == 3 {
            a.request_direction(Direction::Down);
            b.request_direction(Direction::Down);
        }
        if step % 7 == 5 {
            a.request_direction(Direction::Right);
            b.request_direction(Direction::Right);
        }
        a.tick();
        b.tick();
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
