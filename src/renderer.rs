use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, GLYPH_BONUS_FOOD, GLYPH_FOOD, GLYPH_TILE, GLYPH_WALL, GridSize,
    TILE_COLUMNS, Theme,
};
use crate::game::GameState;
use crate::snake::Position;
use crate::ui::centered_rect;
use crate::ui::hud::render_hud;
use crate::ui::menu::{
    render_celebration, render_game_over_menu, render_pause_menu, render_start_menu,
};

/// Which overlay the front-end shows on top of the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Screen {
    Start,
    Playing,
    Paused,
}

/// Renders the full game frame from immutable state.
pub fn render<R>(frame: &mut Frame<'_>, state: &GameState<R>, screen: Screen, theme: &Theme) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, theme);

    let board = board_rect(play_area, state.bounds());
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg))
        .style(Style::new().bg(theme.play_bg));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    let bounds = state.bounds();
    for wall in state.obstacles().iter() {
        draw_tile(frame, inner, bounds, wall, GLYPH_WALL, Style::new().fg(theme.wall));
    }

    draw_tile(
        frame,
        inner,
        bounds,
        state.food.primary(),
        GLYPH_FOOD,
        Style::new().fg(theme.food),
    );
    if let Some(bonus) = state.food.bonus() {
        draw_tile(
            frame,
            inner,
            bounds,
            bonus,
            GLYPH_BONUS_FOOD,
            Style::new().fg(theme.bonus_food).add_modifier(Modifier::BOLD),
        );
    }

    for segment in state.snake().body() {
        draw_tile(
            frame,
            inner,
            bounds,
            *segment,
            GLYPH_TILE,
            Style::new().fg(theme.snake_body),
        );
    }
    draw_tile(
        frame,
        inner,
        bounds,
        state.snake().head(),
        GLYPH_TILE,
        Style::new().fg(theme.snake_head),
    );

    if state.food.celebration_active() {
        render_celebration(frame, inner, theme);
    }

    if state.is_game_over() {
        render_game_over_menu(frame, board, state.score(), state.death_reason(), theme);
        return;
    }

    match screen {
        Screen::Start => render_start_menu(frame, board, theme),
        Screen::Paused => render_pause_menu(frame, board, theme),
        Screen::Playing => {}
    }
}

/// Bordered board sized to the grid, centered in `area`.
fn board_rect(area: Rect, bounds: GridSize) -> Rect {
    let width = bounds.width.saturating_mul(TILE_COLUMNS).saturating_add(2);
    let height = bounds.height.saturating_add(2);
    centered_rect(area, width, height)
}

fn draw_tile(
    frame: &mut Frame<'_>,
    inner: Rect,
    bounds: GridSize,
    position: Position,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = tile_to_terminal(inner, bounds, position) else {
        return;
    };

    frame.buffer_mut().set_string(x, y, glyph, style);
}

/// Maps a tile to the terminal cell of its left column, if it is visible.
fn tile_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(TILE_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(TILE_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
