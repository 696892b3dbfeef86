use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub title_bar: Rect,
    pub location: Rect,
    pub total_sqft: Rect,
    pub bhk: Rect,
    pub bath: Rect,
    pub button: Rect,
    pub key_help: Rect,
    pub result: Rect,
    pub activity: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Main vertical split: title | content | status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let title_bar = main_chunks[0];
    let content = main_chunks[1];
    let status_bar = main_chunks[2];

    // Horizontal: form | gap | result column
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([Constraint::Percentage(45), Constraint::Min(30)])
        .split(content);

    let form_panel = h_chunks[0];
    let right_panel = h_chunks[1];

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Location
            Constraint::Length(3), // Total area
            Constraint::Length(3), // BHK | Bath
            Constraint::Length(3), // Button
            Constraint::Min(0),    // Key help
        ])
        .split(form_panel);

    let pair = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(form_chunks[2]);

    // Right column: result | activity
    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(right_panel);

    AppLayout {
        title_bar,
        location: form_chunks[0],
        total_sqft: form_chunks[1],
        bhk: pair[0],
        bath: pair[1],
        button: form_chunks[3],
        key_help: form_chunks[4],
        result: right_chunks[0],
        activity: right_chunks[1],
        status_bar,
    }
}

/// Centered rectangle of the given percentage size, clamped to `min_w`/`min_h`.
pub fn centered(area: Rect, pct_w: u16, pct_h: u16, min_w: u16, min_h: u16) -> Rect {
    let w = (area.width * pct_w / 100)
        .max(min_w)
        .min(area.width.saturating_sub(2));
    let h = (area.height * pct_h / 100)
        .max(min_h)
        .min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_area() {
        let area = Rect::new(0, 0, 100, 30);
        let l = compute_layout(area);
        assert_eq!(l.title_bar.height, 1);
        assert_eq!(l.status_bar.y, 29);
        assert_eq!(l.location.height, 3);
        assert!(l.bhk.x < l.bath.x);
        assert!(l.result.x > l.location.x);
        assert!(l.activity.y >= l.result.y + l.result.height);
    }

    #[test]
    fn test_centered_is_clamped() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered(area, 50, 50, 60, 20);
        assert_eq!(r.width, 38);
        assert_eq!(r.height, 8);
        assert_eq!(r.x, 1);
        assert_eq!(r.y, 1);
    }
}
