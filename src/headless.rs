use std::io::{self, Write};
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

use crate::game::GameState;
use crate::input::Direction;

/// Script character meaning "keep the current direction".
pub const KEEP_DIRECTION: char = '.';

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ScriptError {
    #[error("unexpected move {found:?} at position {index}; expected U, D, L, R or '.'")]
    InvalidMove { index: usize, found: char },
}

/// Parses a move script into one optional direction request per tick.
///
/// Whitespace is ignored so long scripts can be wrapped.
pub fn parse_script(script: &str) -> Result<Vec<Option<Direction>>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(index, c)| {
            if c == KEEP_DIRECTION {
                return Ok(None);
            }
            Direction::from_script_char(c)
                .map(Some)
                .ok_or(ScriptError::InvalidMove { index, found: c })
        })
        .collect()
}

/// Plays `moves` against `state`, writing one JSON snapshot line per tick.
///
/// Each step also advances the timers by `tick_interval`, as if the game ran
/// in real time. Stops early at game over.
pub fn run_script<R, W>(
    state: &mut GameState<R>,
    moves: &[Option<Direction>],
    tick_interval: Duration,
    out: &mut W,
) -> io::Result<()>
where
    R: Rng,
    W: Write,
{
    for request in moves {
        if state.is_game_over() {
            break;
        }

        if let Some(direction) = *request {
            if !state.request_direction(direction) {
                tracing::debug!(?direction, tick = state.tick_count(), "reversal ignored");
            }
        }

        state.tick();
        state.advance_timers(tick_interval);

        serde_json::to_writer(&mut *out, &state.snapshot())?;
        writeln!(out)?;
    }

    out.flush()
}
