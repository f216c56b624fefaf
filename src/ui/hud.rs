use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::GameState;

const HUD_MARGIN_X: u16 = 1;

/// Renders the one-line HUD under the board and returns the area above it.
#[must_use]
pub fn render_hud<R>(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &GameState<R>,
    theme: &Theme,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
    let hud_area = inset_horizontal(hud_area, HUD_MARGIN_X);

    let bounds = state.bounds();
    let info = format!(
        "{}x{} | walls {}",
        bounds.width,
        bounds.height,
        state.obstacles().len()
    );
    let info_width = u16::try_from(UnicodeWidthStr::width(info.as_str())).unwrap_or(u16::MAX);

    // Each paragraph styles its whole area, so the two must not overlap.
    let [score_area, info_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(info_width)]).areas(hud_area);

    frame.render_widget(
        Paragraph::new(score_line(state.score(), state.is_game_over(), theme))
            .alignment(Alignment::Left),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(info)
            .alignment(Alignment::Right)
            .style(Style::default().fg(theme.hud_muted)),
        info_area,
    );

    play_area
}

fn score_line(score: usize, game_over: bool, theme: &Theme) -> Line<'static> {
    let (label, color) = if game_over {
        ("Game Over: ", theme.game_over)
    } else {
        ("Score: ", theme.hud_score)
    };

    Line::from(vec![
        Span::styled(label, Style::default().fg(color)),
        Span::styled(
            score.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

fn inset_horizontal(area: Rect, margin: u16) -> Rect {
    let total_margin = margin.saturating_mul(2);
    Rect {
        x: area.x.saturating_add(margin),
        y: area.y,
        width: area.width.saturating_sub(total_margin),
        height: area.height,
    }
}
