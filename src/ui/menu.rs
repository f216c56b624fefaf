use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::DeathReason;
use crate::ui::centered_rect;

const POPUP_PADDING_X: u16 = 4;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = [
        "SNAKE",
        "",
        "Eat food, dodge walls and yourself.",
        "Every 5th food brings a bonus.",
        "",
        "Arrows / WASD / hjkl  move",
        "P / Esc  pause",
        "Enter / Space  start",
        "Q  quit",
    ];
    render_popup(frame, area, " start ", &lines, theme);
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let lines = ["PAUSED", "", "P / Esc  resume", "Q  quit"];
    render_popup(frame, area, " pause ", &lines, theme);
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: usize,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let score_text = format!("Score: {score}");
    let lines = [
        "GAME OVER",
        "",
        score_text.as_str(),
        death_reason_text(death_reason),
        "",
        "Enter / Space  play again",
        "Q  quit",
    ];
    render_popup(frame, area, " game over ", &lines, theme);
}

/// Draws the transient banner shown after bonus food is eaten.
pub fn render_celebration(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let text = "Awesome!";
    let banner = centered_rect(area, text_width(text), 1);

    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).style(
            Style::default()
                .fg(theme.celebration)
                .add_modifier(Modifier::BOLD),
        ),
        banner,
    );
}

fn death_reason_text(death_reason: Option<DeathReason>) -> &'static str {
    match death_reason {
        Some(DeathReason::SelfCollision) => "Cause: bit yourself",
        Some(DeathReason::Wall) => "Cause: hit a wall",
        Some(DeathReason::OutOfBounds) => "Cause: left the board",
        None => "",
    }
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: &[&str], theme: &Theme) {
    let (width, height) = popup_size(lines);
    let popup = centered_rect(area, width, height);
    frame.render_widget(Clear, popup);

    let mut body: Vec<Line<'_>> = lines.iter().map(|line| Line::from(*line)).collect();
    if let Some(heading) = body.first_mut() {
        *heading = Line::styled(
            lines[0],
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        );
    }

    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

/// Border plus padding around the widest line.
fn popup_size(lines: &[&str]) -> (u16, u16) {
    let widest = lines.iter().map(|line| text_width(line)).max().unwrap_or(0);
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);

    (widest.saturating_add(POPUP_PADDING_X + 2), height)
}

fn text_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::{death_reason_text, popup_size};
    use crate::game::DeathReason;

    #[test]
    fn popup_fits_widest_line() {
        assert_eq!(popup_size(&["ab", "abcdef", ""]), (12, 5));
    }

    #[test]
    fn every_death_reason_has_text() {
        for reason in [
            DeathReason::SelfCollision,
            DeathReason::Wall,
            DeathReason::OutOfBounds,
        ] {
            assert!(!death_reason_text(Some(reason)).is_empty());
        }
        assert!(death_reason_text(None).is_empty());
    }
}
