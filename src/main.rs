use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{ConfigError, GameConfig, SpawnPolicy, THEME_CLASSIC};
use grid_snake::game::GameState;
use grid_snake::headless;
use grid_snake::input::{self, GameInput};
use grid_snake::logging;
use grid_snake::renderer::Screen;
use grid_snake::schedule::TickClock;
use grid_snake::terminal_runtime::TerminalSession;

/// How long one frame waits for a key press before redrawing.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a tile grid with walls and bonus food")]
struct Cli {
    /// Board width in tiles.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in tiles.
    #[arg(long)]
    height: Option<u16>,

    /// JSON config file; defaults to the platform config directory.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Never place food on walls, the snake or the other food.
    #[arg(long = "avoid-occupied")]
    avoid_occupied: bool,

    /// Append logs to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Run without a terminal UI, printing one JSON snapshot per tick.
    #[arg(long, requires = "script")]
    headless: bool,

    /// Moves for headless mode: U, D, L, R, or '.' to keep going.
    #[arg(long, value_name = "MOVES", requires = "headless")]
    script: Option<String>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path)?;
    } else if cli.headless {
        logging::init_stderr_logging()?;
    }

    let config = resolve_config(&cli).map_err(invalid_input)?;
    tracing::info!(
        width = config.width,
        height = config.height,
        walls = config.walls.len(),
        seed = ?cli.seed,
        policy = ?config.spawn_policy,
        "starting"
    );

    if cli.headless {
        return run_headless(&cli, &config);
    }

    let mut session = TerminalSession::enter(&THEME_CLASSIC)?;
    run(&mut session, &config, cli.seed)
}

fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::load_default_location()?,
    };

    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if cli.avoid_occupied {
        config.spawn_policy = SpawnPolicy::AvoidOccupied;
    }

    config.validate()?;
    Ok(config)
}

fn new_game(config: &GameConfig, seed: Option<u64>) -> GameState {
    match seed {
        Some(seed) => GameState::new_with_seed(config, seed),
        None => GameState::new(config),
    }
}

fn run(session: &mut TerminalSession, config: &GameConfig, seed: Option<u64>) -> io::Result<()> {
    let mut state = new_game(config, seed);
    let mut screen = Screen::Start;
    let mut clock = TickClock::new(config.tick_interval());
    let mut last_frame = Instant::now();

    loop {
        session.draw_game(&state, screen)?;

        if let Some(game_input) = input::poll_input(INPUT_POLL_INTERVAL)? {
            if game_input == GameInput::Quit {
                break;
            }

            match game_input {
                GameInput::Confirm if state.is_game_over() => {
                    state = new_game(config, seed);
                    screen = Screen::Playing;
                    clock.reset();
                }
                other => handle_input(&mut state, &mut screen, &mut clock, other),
            }
        }

        let now = Instant::now();
        let elapsed = now - last_frame;
        last_frame = now;

        if screen == Screen::Paused {
            continue;
        }

        if screen == Screen::Playing {
            for _ in 0..clock.advance(elapsed) {
                state.tick();
            }
        }
        state.advance_timers(elapsed);
    }

    tracing::info!(score = state.score(), ticks = state.tick_count(), "quit");
    Ok(())
}

fn handle_input(
    state: &mut GameState,
    screen: &mut Screen,
    clock: &mut TickClock,
    input: GameInput,
) {
    match (input, *screen) {
        (GameInput::Confirm, Screen::Start) => {
            *screen = Screen::Playing;
            clock.reset();
        }
        (GameInput::Pause, Screen::Playing) if !state.is_game_over() => {
            *screen = Screen::Paused;
        }
        (GameInput::Pause, Screen::Paused) => {
            *screen = Screen::Playing;
            clock.reset();
        }
        (GameInput::Direction(direction), Screen::Playing) => {
            state.request_direction(direction);
        }
        _ => {}
    }
}

fn run_headless(cli: &Cli, config: &GameConfig) -> io::Result<()> {
    let moves = headless::parse_script(cli.script.as_deref().unwrap_or_default())
        .map_err(invalid_input)?;

    let mut state = new_game(config, cli.seed);
    let mut stdout = io::stdout().lock();
    headless::run_script(&mut state, &moves, config.tick_interval(), &mut stdout)?;

    tracing::info!(
        score = state.score(),
        ticks = state.tick_count(),
        reason = ?state.death_reason(),
        "headless run finished"
    );
    Ok(())
}

fn invalid_input<E>(error: E) -> io::Error
where
    E: Error + Send + Sync + 'static,
{
    io::Error::new(io::ErrorKind::InvalidInput, error)
}
