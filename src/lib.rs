//! Tile-grid Snake: a discrete-time engine plus a thin terminal front-end.
//!
//! The engine lives in [`game::GameState`]; everything under [`renderer`],
//! [`ui`] and [`terminal_runtime`] only reads its state.

pub mod config;
pub mod food;
pub mod game;
pub mod headless;
pub mod input;
pub mod logging;
pub mod obstacles;
pub mod renderer;
pub mod schedule;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
