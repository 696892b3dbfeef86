use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::state::*;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info, warn};

pub const INCOMPLETE_FORM_ALERT: &str = "Please fill all the fields.";

const PICKER_PAGE: isize = 10;

/// What asked for an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A field changed.
    Auto,
    /// The user pressed the estimate button.
    Manual,
}

/// Ask for the location list. Only the first call yields an action.
pub fn load_locations(state: &mut AppState) -> Option<Action> {
    if state.locations_requested {
        return None;
    }
    state.locations_requested = true;
    state.dirty = true;
    Some(Action::FetchLocations)
}

/// Issue an estimate for the current form, if it is complete.
///
/// An incomplete form raises an alert on the manual path and is silently
/// ignored on the automatic one. Manual requests are also ignored while
/// another request is in flight.
pub fn request_estimate(state: &mut AppState, trigger: Trigger) -> Option<Action> {
    if !state.form.is_complete() {
        if trigger == Trigger::Manual {
            state.alert = Some(INCOMPLETE_FORM_ALERT.to_string());
            state.dirty = true;
        }
        return None;
    }
    match trigger {
        Trigger::Auto if !state.config.behavior.auto_estimate => return None,
        Trigger::Manual if state.is_loading() => return None,
        _ => {}
    }

    let request_id = state.allocate_request_id();
    state.in_flight += 1;
    state.dirty = true;
    debug!(request_id, ?trigger, "issuing estimate request");
    Some(Action::FetchEstimate {
        request_id,
        input: state.form.clone(),
    })
}

pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<Action> {
    match event {
        AppEvent::Terminal(cevent) => {
            state.dirty = true;
            handle_terminal(state, cevent)
        }
        AppEvent::LocationsLoaded { locations } => {
            let count = locations.len();
            if state.apply_locations(locations) {
                info!(count, "locations loaded");
                state.system_message(format!("Loaded {} locations.", count));
            } else {
                debug!(count, "ignoring repeated location list");
            }
            vec![]
        }
        AppEvent::LocationsFailed { error } => {
            warn!(%error, "failed to load locations");
            state.locations_failed = true;
            state.error_message(format!("Could not load locations: {}", error));
            vec![]
        }
        AppEvent::EstimateReady { request_id, price } => {
            state.in_flight = state.in_flight.saturating_sub(1);
            state.dirty = true;
            if state.apply_estimate(request_id, price) {
                let shown = state
                    .estimate
                    .as_ref()
                    .map(|e| e.display())
                    .unwrap_or_default();
                info!(request_id, price, %shown, "estimate received");
                state.estimate_message(format!("#{} {} (raw {})", request_id, shown, price));
            } else {
                debug!(request_id, price, "discarding stale estimate");
            }
            vec![]
        }
        AppEvent::EstimateFailed { request_id, error } => {
            state.in_flight = state.in_flight.saturating_sub(1);
            warn!(request_id, %error, "estimate request failed");
            state.error_message(format!("Estimate #{} failed: {}", request_id, error));
            vec![]
        }
        AppEvent::Tick => handle_tick(state),
    }
}

fn handle_tick(state: &mut AppState) -> Vec<Action> {
    state.tick_count = state.tick_count.wrapping_add(1);
    // Keep the spinner moving.
    if state.is_loading() {
        state.dirty = true;
    }
    vec![]
}

fn handle_terminal(state: &mut AppState, event: CEvent) -> Vec<Action> {
    match event {
        CEvent::Key(key) if key.kind == KeyEventKind::Press => handle_key(state, key),
        CEvent::Resize(_, _) => {
            state.dirty = true;
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    // Global keybindings
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return vec![Action::Quit];
    }

    // Alert captures all input until dismissed
    if state.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            state.alert = None;
        }
        return vec![];
    }

    if state.picker.visible {
        return handle_picker_key(state, key);
    }

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            state.focus_next();
            vec![]
        }
        KeyCode::BackTab | KeyCode::Up => {
            state.focus_prev();
            vec![]
        }
        KeyCode::F(5) => request_estimate(state, Trigger::Manual).into_iter().collect(),
        KeyCode::Enter => {
            if state.focus == Focus::Location {
                let current = state.form.location.clone();
                state.picker.open(&current);
                vec![]
            } else {
                request_estimate(state, Trigger::Manual).into_iter().collect()
            }
        }
        _ => match state.focus.field() {
            Some(FormField::Location) => handle_location_key(state, key),
            Some(field) => handle_text_key(state, field, key),
            None => vec![],
        },
    }
}

/// The location field is a selector: typing opens the picker pre-filtered,
/// Backspace/Delete clear it.
fn handle_location_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Backspace | KeyCode::Delete => update_field(state, FormField::Location, String::new()),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let current = state.form.location.clone();
            state.picker.open(&current);
            state.picker.push_filter(c);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_text_key(state: &mut AppState, field: FormField, key: KeyEvent) -> Vec<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let mut text = state.form.get(field).to_string();
    let ed = &mut state.editor;

    match key.code {
        KeyCode::Char('w') if ctrl => ed.delete_word_back(&mut text),
        KeyCode::Char('u') if ctrl => ed.clear(&mut text),
        KeyCode::Char(c) if !ctrl && !alt => ed.insert_char(&mut text, c),
        KeyCode::Backspace => ed.delete_back(&mut text),
        KeyCode::Delete => ed.delete_forward(&mut text),
        KeyCode::Left => {
            ed.move_left(&text);
            return vec![];
        }
        KeyCode::Right => {
            ed.move_right(&text);
            return vec![];
        }
        KeyCode::Home => {
            ed.move_home();
            return vec![];
        }
        KeyCode::End => {
            ed.move_end(&text);
            return vec![];
        }
        _ => return vec![],
    }

    update_field(state, field, text)
}

fn handle_picker_key(state: &mut AppState, key: KeyEvent) -> Vec<Action> {
    match key.code {
        KeyCode::Esc => state.picker.close(),
        // Nothing matches the filter; keep the current location.
        KeyCode::Enter if !state.picker.filter.is_empty() && state.picker.filtered.is_empty() => {}
        KeyCode::Enter => {
            let value = state.picker.selected_value();
            state.picker.close();
            return update_field(state, FormField::Location, value);
        }
        KeyCode::Up => state.picker.move_by(-1),
        KeyCode::Down => state.picker.move_by(1),
        KeyCode::PageUp => state.picker.move_by(-PICKER_PAGE),
        KeyCode::PageDown => state.picker.move_by(PICKER_PAGE),
        KeyCode::Home => state.picker.move_first(),
        KeyCode::End => state.picker.move_last(),
        KeyCode::Backspace => state.picker.pop_filter(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.picker.push_filter(c)
        }
        _ => {}
    }
    vec![]
}

/// Every edit funnels through here so a changed value re-estimates.
fn update_field(state: &mut AppState, field: FormField, value: String) -> Vec<Action> {
    if state.set_field(field, value) {
        request_estimate(state, Trigger::Auto).into_iter().collect()
    } else {
        vec![]
    }
}
