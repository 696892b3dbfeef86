use crate::app::state::AppState;
use crate::ui::layout::centered;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

pub fn render(frame: &mut Frame, state: &AppState) {
    let picker = &state.picker;
    if !picker.visible {
        return;
    }

    let popup_area = centered(frame.area(), 60, 80, 40, 12);
    frame.render_widget(Clear, popup_area);

    let title = if picker.loaded {
        format!(" Location ({} shown) ", picker.filtered.len())
    } else {
        " Location (list unavailable) ".to_string()
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Style::default().fg(Theme::ACCENT_LAVENDER))
        .style(Style::default().bg(Theme::BG_SURFACE));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if inner.height < 4 || inner.width < 10 {
        return;
    }

    // Filter bar
    let filter_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let filter_line = Line::from(vec![
        Span::styled(" Filter: ", Theme::key_hint()),
        Span::styled(
            if picker.filter.is_empty() {
                "(type to filter locations)"
            } else {
                picker.filter.as_str()
            },
            if picker.filter.is_empty() {
                Style::default().fg(Theme::TEXT_MUTED)
            } else {
                Style::default().fg(Theme::TEXT_PRIMARY)
            },
        ),
        Span::styled("█", Style::default().fg(Theme::ACCENT_TEAL)),
    ]);
    frame.render_widget(Paragraph::new(filter_line), filter_area);

    // Separator
    let sep_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "─".repeat(inner.width as usize),
            Style::default().fg(Theme::BORDER_DIM),
        ))),
        sep_area,
    );

    // List area: filter + separator above, help below
    let list_h = (inner.height as usize).saturating_sub(3);
    let list_area = Rect::new(
        inner.x,
        inner.y + 2,
        inner.width.saturating_sub(1),
        list_h as u16,
    );

    let rows = picker.row_count();
    let start = scroll_start(picker.selected, list_h, rows);
    let end = (start + list_h).min(rows);
    let lines: Vec<Line> = (start..end)
        .map(|row| {
            let label = picker.row_label(row);
            let style = if row == picker.selected {
                Theme::selected_row()
            } else if row == 0 {
                Style::default().fg(Theme::TEXT_MUTED)
            } else {
                Style::default().fg(Theme::TEXT_PRIMARY)
            };
            Line::from(Span::styled(format!("  {}", label), style))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), list_area);

    if rows > list_h {
        let scrollbar_area = Rect::new(
            inner.x + inner.width.saturating_sub(1),
            inner.y + 2,
            1,
            list_h as u16,
        );
        let mut scrollbar_state =
            ScrollbarState::new(rows.saturating_sub(list_h)).position(start);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .thumb_style(Theme::scrollbar_thumb())
                .track_style(Theme::scrollbar_track()),
            scrollbar_area,
            &mut scrollbar_state,
        );
    }

    // Help
    let help_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
    let help = Line::from(vec![
        Span::styled(" ↑↓/PgUp/Dn", Theme::key_hint()),
        Span::styled(" Navigate  ", Style::default().fg(Theme::TEXT_SECONDARY)),
        Span::styled("Enter", Theme::key_hint()),
        Span::styled(" Select  ", Style::default().fg(Theme::TEXT_SECONDARY)),
        Span::styled("Esc", Theme::key_hint()),
        Span::styled(" Close", Style::default().fg(Theme::TEXT_SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(help), help_area);
}

/// First visible row so that `selected` stays on screen.
fn scroll_start(selected: usize, visible: usize, rows: usize) -> usize {
    if visible == 0 || rows <= visible {
        return 0;
    }
    let start = (selected + 1).saturating_sub(visible);
    start.min(rows - visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_start() {
        assert_eq!(scroll_start(0, 10, 5), 0);
        assert_eq!(scroll_start(9, 10, 50), 0);
        assert_eq!(scroll_start(10, 10, 50), 1);
        assert_eq!(scroll_start(49, 10, 50), 40);
        assert_eq!(scroll_start(3, 0, 50), 0);
    }
}
