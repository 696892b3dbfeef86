use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let shown = state.estimate.as_ref().filter(|e| e.is_displayable());

    let (title, border) = match shown {
        Some(_) => (" Estimated Value ", Style::default().fg(Theme::ACCENT_GREEN)),
        None => (" Ready to Estimate ", Theme::border()),
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type_focused())
        .border_style(border)
        .style(Theme::panel_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match shown {
        Some(est) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("₹{} {}", est.formatted_value(), est.unit),
                Theme::price(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "*Based on current market analysis",
                Style::default().fg(Theme::TEXT_SECONDARY),
            )),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Fill in your property details",
                Style::default().fg(Theme::TEXT_SECONDARY),
            )),
            Line::from(Span::styled(
                "to get an instant price estimate",
                Style::default().fg(Theme::TEXT_SECONDARY),
            )),
        ],
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
