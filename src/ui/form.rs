use crate::app::state::*;
use crate::ui::layout::AppLayout;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(frame: &mut Frame, layout: &AppLayout, state: &AppState) {
    render_field(frame, layout.location, state, FormField::Location, Focus::Location);
    render_field(frame, layout.total_sqft, state, FormField::TotalSqft, Focus::TotalSqft);
    render_field(frame, layout.bhk, state, FormField::Bhk, Focus::Bhk);
    render_field(frame, layout.bath, state, FormField::Bath, Focus::Bath);
    render_button(frame, layout.button, state);
    render_help(frame, layout.key_help);
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let (border_style, border_type, bg) = if focused {
        (
            Theme::border_focused(),
            Theme::border_type_focused(),
            Theme::panel_bg_focused(),
        )
    } else {
        (Theme::border(), Theme::border_type(), Theme::panel_bg())
    };
    Block::default()
        .title(format!(" {} ", title))
        .title_style(if focused { Theme::title() } else { Theme::border() })
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style)
        .padding(Padding::horizontal(1))
        .style(bg)
}

fn render_field(frame: &mut Frame, area: Rect, state: &AppState, field: FormField, focus: Focus) {
    let focused = state.focus == focus;
    let block = field_block(field.label(), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let value = state.form.get(field);
    let mut spans = Vec::new();
    if focused {
        spans.push(Span::styled("❯ ", Style::default().fg(Theme::ACCENT_TEAL)));
    }
    if value.is_empty() {
        spans.push(Span::styled(field.placeholder(), Theme::placeholder()));
    } else {
        spans.push(Span::styled(value, Theme::input_text()));
    }
    if field == FormField::Location {
        // Selector affordance on the right edge
        let used: usize = spans.iter().map(|s| s.content.width()).sum();
        let pad = (inner.width as usize).saturating_sub(used + 1);
        spans.push(Span::raw(" ".repeat(pad)));
        spans.push(Span::styled("▾", Style::default().fg(Theme::TEXT_SECONDARY)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);

    if focused && field != FormField::Location && inner.width > 0 {
        // Cursor offset: chevron "❯ " (2 cells) + text width before the cursor
        let cursor = state.editor.cursor.min(value.len());
        let before = value.get(..cursor).unwrap_or(value);
        let cursor_x = inner.x + 2 + before.width() as u16;
        frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
    }
}

fn render_button(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::EstimateButton;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused {
            Theme::border_type_focused()
        } else {
            Theme::border_type()
        })
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let (label, style) = if state.is_loading() {
        let frame_idx = (state.tick_count / 2) as usize % SPINNER.len();
        (
            format!("{} Calculating...", SPINNER[frame_idx]),
            Theme::button_disabled(),
        )
    } else {
        ("Get Estimate".to_string(), Theme::button())
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {} ", label), style)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let hint = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!(" {:<10}", key), Theme::key_hint()),
            Span::styled(what, Style::default().fg(Theme::TEXT_SECONDARY)),
        ])
    };
    let lines = vec![
        Line::from(""),
        hint("Tab/↑↓", "Move between fields"),
        hint("Enter", "Pick location / get estimate"),
        hint("F5", "Get estimate"),
        hint("Ctrl+U", "Clear field"),
        hint("Ctrl+C", "Quit"),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}
