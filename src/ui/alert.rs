use crate::app::state::AppState;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

pub fn render(frame: &mut Frame, state: &AppState) {
    let Some(message) = state.alert.as_deref() else {
        return;
    };

    let popup_area = centered(frame.area(), 40, 20, 36, 7);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Notice ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type_focused())
        .border_style(Style::default().fg(Theme::ACCENT_AMBER))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Theme::input_text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Theme::key_hint()),
            Span::styled(" OK", Style::default().fg(Theme::TEXT_SECONDARY)),
        ]),
    ];
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}
