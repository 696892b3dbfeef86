mod activity;
mod alert;
mod form;
mod layout;
mod location_picker;
mod result_panel;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    render_title(frame, app_layout.title_bar);
    form::render(frame, &app_layout, state);
    result_panel::render(frame, app_layout.result, state);
    activity::render(frame, app_layout.activity, state);
    status_bar::render(frame, app_layout.status_bar, state);

    // Popups last so they draw on top
    location_picker::render(frame, state);
    alert::render(frame, state);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" ⌂ Property Price Estimator ", Theme::title()),
        Span::styled(
            "Get instant property value estimates",
            Style::default().fg(Theme::TEXT_SECONDARY),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::FormField;
    use crate::config::AppConfig;
    use ratatui::backend::TestBackend;

    fn screen_text(state: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_placeholder_before_estimate() {
        let state = AppState::new(AppConfig::default());
        let text = screen_text(&state);
        assert!(text.contains("Ready to Estimate"));
        assert!(text.contains("Select location"));
        assert!(text.contains("Get Estimate"));
    }

    #[test]
    fn test_estimate_rendered_with_unit() {
        let mut state = AppState::new(AppConfig::default());
        state.set_field(FormField::Location, "Whitefield".into());
        state.apply_estimate(0, 153.7);
        let text = screen_text(&state);
        assert!(text.contains("1.537 Crore"));
        assert!(text.contains("Whitefield"));
    }

    #[test]
    fn test_alert_popup_rendered() {
        let mut state = AppState::new(AppConfig::default());
        state.alert = Some("Please fill all the fields.".into());
        assert!(screen_text(&state).contains("Please fill all the fields."));
    }
}
