use crate::app::state::*;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Most recent activity at the bottom; older entries scroll off the top.
pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Activity ")
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border())
        .style(Theme::panel_bg());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    let skip = state.activity.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .activity
        .iter()
        .skip(skip)
        .map(|entry| {
            let style = match entry.kind {
                ActivityKind::System => Theme::system_message(),
                ActivityKind::Estimate => Theme::estimate_message(),
                ActivityKind::Error => Theme::error_message(),
            };
            Line::from(vec![
                Span::styled(format!("{} ", entry.timestamp), Theme::timestamp()),
                Span::styled(entry.text.as_str(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
