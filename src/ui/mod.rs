use ratatui::layout::Rect;

pub mod hud;
pub mod menu;

/// Returns a `width` x `height` rect centered in `area`, shrunk to fit.
#[must_use]
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
