use crate::app::event::RequestId;
use crate::config::{self, AppConfig};
use crate::estimate::EstimateResult;
use chrono::Local;
use tracing::{debug, warn};

/// The four inputs of the estimate form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Location,
    TotalSqft,
    Bhk,
    Bath,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Location,
        FormField::TotalSqft,
        FormField::Bhk,
        FormField::Bath,
    ];

    /// Form field name expected by the prediction service.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Location => "location",
            FormField::TotalSqft => "total_sqft",
            FormField::Bhk => "bhk",
            FormField::Bath => "bath",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Location => "Location",
            FormField::TotalSqft => "Total Area (sq ft)",
            FormField::Bhk => "BHK",
            FormField::Bath => "Bathrooms",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Location => "Select location",
            FormField::TotalSqft => "e.g., 1200",
            FormField::Bhk => "e.g., 2",
            FormField::Bath => "e.g., 2",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub total_sqft: String,
    pub bhk: String,
    pub bath: String,
    pub location: String,
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Location => &self.location,
            FormField::TotalSqft => &self.total_sqft,
            FormField::Bhk => &self.bhk,
            FormField::Bath => &self.bath,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Location => &mut self.location,
            FormField::TotalSqft => &mut self.total_sqft,
            FormField::Bhk => &mut self.bhk,
            FormField::Bath => &mut self.bath,
        }
    }

    /// True once every field holds something. Contents are not validated.
    pub fn is_complete(&self) -> bool {
        FormField::ALL.iter().all(|f| !self.get(*f).is_empty())
    }

    /// `(name, value)` pairs in submission order.
    pub fn wire_fields(&self) -> Vec<(&'static str, &str)> {
        [
            FormField::TotalSqft,
            FormField::Bhk,
            FormField::Bath,
            FormField::Location,
        ]
        .into_iter()
        .map(|f| (f.wire_name(), self.get(f)))
        .collect()
    }
}

/// Cursor over the focused text field. The text itself lives in
/// [`FormInput`] and is written back through [`AppState::set_field`].
#[derive(Debug, Default)]
pub struct LineEditor {
    pub cursor: usize,
}

impl LineEditor {
    pub fn insert_char(&mut self, text: &mut String, c: char) {
        self.clamp(text);
        text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self, text: &mut String) {
        self.clamp(text);
        if self.cursor > 0 {
            let prev = text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
            text.drain(prev..self.cursor);
            self.cursor = prev;
        }
    }

    pub fn delete_forward(&mut self, text: &mut String) {
        self.clamp(text);
        if self.cursor < text.len() {
            let next = text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(text.len());
            text.drain(self.cursor..next);
        }
    }

    pub fn move_left(&mut self, text: &str) {
        self.clamp(text);
        if self.cursor > 0 {
            self.cursor = text[..self.cursor]
                .char_indices()
                .next_back()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_right(&mut self, text: &str) {
        self.clamp(text);
        if self.cursor < text.len() {
            self.cursor = text[self.cursor..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor + i)
                .unwrap_or(text.len());
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self, text: &str) {
        self.cursor = text.len();
    }

    pub fn delete_word_back(&mut self, text: &mut String) {
        self.clamp(text);
        if self.cursor == 0 {
            return;
        }
        let mut pos = self.cursor;
        // Skip trailing whitespace
        while pos > 0 && text.as_bytes().get(pos - 1) == Some(&b' ') {
            pos -= 1;
        }
        // Skip word characters
        while pos > 0 && text.as_bytes().get(pos - 1) != Some(&b' ') {
            pos -= 1;
        }
        text.drain(pos..self.cursor);
        self.cursor = pos;
    }

    pub fn clear(&mut self, text: &mut String) {
        text.clear();
        self.cursor = 0;
    }

    fn clamp(&mut self, text: &str) {
        if self.cursor > text.len() || !text.is_char_boundary(self.cursor) {
            self.cursor = text.len();
        }
    }
}

/// Popup list of locations. Row 0 is the empty "Select location" option;
/// row `n > 0` is `filtered[n - 1]`.
#[derive(Debug, Default)]
pub struct LocationPicker {
    pub visible: bool,
    pub locations: Vec<String>,
    pub loaded: bool,
    pub filter: String,
    pub filtered: Vec<usize>,
    pub selected: usize,
}

impl LocationPicker {
    pub fn open(&mut self, current: &str) {
        self.visible = true;
        self.filter.clear();
        self.refilter();
        self.selected = self
            .locations
            .iter()
            .position(|l| l == current)
            .map(|i| i + 1)
            .unwrap_or(0);
    }

    pub fn close(&mut self) {
        self.visible = false;
        self.filter.clear();
    }

    pub fn row_count(&self) -> usize {
        self.filtered.len() + 1
    }

    pub fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        self.filtered = self
            .locations
            .iter()
            .enumerate()
            .filter(|(_, l)| needle.is_empty() || l.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();
        // Land on the first match rather than the empty option while filtering.
        self.selected = if self.filter.is_empty() || self.filtered.is_empty() {
            0
        } else {
            1
        };
    }

    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.refilter();
    }

    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.refilter();
    }

    pub fn move_by(&mut self, delta: isize) {
        let last = self.row_count() - 1;
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, last as isize) as usize;
    }

    pub fn move_first(&mut self) {
        self.selected = 0;
    }

    pub fn move_last(&mut self) {
        self.selected = self.row_count() - 1;
    }

    /// Value to store in the location field for the selected row.
    pub fn selected_value(&self) -> String {
        match self.selected {
            0 => String::new(),
            n => self
                .filtered
                .get(n - 1)
                .and_then(|&i| self.locations.get(i))
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub fn row_label(&self, row: usize) -> &str {
        match row {
            0 => FormField::Location.placeholder(),
            n => self
                .filtered
                .get(n - 1)
                .and_then(|&i| self.locations.get(i))
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActivityKind {
    System,
    Estimate,
    Error,
}

#[derive(Debug, Clone)]
pub struct ActivityEntry {
    pub timestamp: String,
    pub text: String,
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Location,
    TotalSqft,
    Bhk,
    Bath,
    EstimateButton,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Location,
        Focus::TotalSqft,
        Focus::Bhk,
        Focus::Bath,
        Focus::EstimateButton,
    ];

    pub fn field(self) -> Option<FormField> {
        match self {
            Focus::Location => Some(FormField::Location),
            Focus::TotalSqft => Some(FormField::TotalSqft),
            Focus::Bhk => Some(FormField::Bhk),
            Focus::Bath => Some(FormField::Bath),
            Focus::EstimateButton => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Focus::Location => "LOCATION",
            Focus::TotalSqft => "AREA",
            Focus::Bhk => "BHK",
            Focus::Bath => "BATH",
            Focus::EstimateButton => "ESTIMATE",
        }
    }

    fn step(self, delta: isize) -> Focus {
        let len = Self::ORDER.len() as isize;
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(idx + delta).rem_euclid(len) as usize]
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub service_url: String,
    pub form: FormInput,
    pub editor: LineEditor,
    pub focus: Focus,
    pub picker: LocationPicker,
    pub locations_requested: bool,
    pub locations_failed: bool,
    pub estimate: Option<EstimateResult>,
    pub in_flight: usize,
    pub next_request_id: RequestId,
    pub last_applied: Option<RequestId>,
    pub alert: Option<String>,
    pub activity: Vec<ActivityEntry>,
    pub tick_count: u64,
    pub should_quit: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new(mut config: AppConfig) -> Self {
        let rejected_format = config::reset_invalid_timestamp_format(&mut config);
        let service_url = config.service.base_url.clone();
        let mut state = Self {
            config,
            service_url,
            form: FormInput::default(),
            editor: LineEditor::default(),
            focus: Focus::Location,
            picker: LocationPicker::default(),
            locations_requested: false,
            locations_failed: false,
            estimate: None,
            in_flight: 0,
            next_request_id: 0,
            last_applied: None,
            alert: None,
            activity: Vec::new(),
            tick_count: 0,
            should_quit: false,
            dirty: true,
        };
        if let Some(format) = rejected_format {
            warn!(%format, "invalid timestamp format, using default");
            state.error_message(format!(
                "Invalid timestamp format \"{}\", using \"{}\"",
                format, state.config.ui.timestamp_format
            ));
        }
        state
    }

    /// Store `value` in `field`. Returns whether the stored value changed.
    pub fn set_field(&mut self, field: FormField, value: String) -> bool {
        let slot = self.form.slot_mut(field);
        if *slot == value {
            return false;
        }
        debug!(field = field.wire_name(), %value, "field updated");
        *slot = value;
        self.dirty = true;
        true
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Record a successful estimate. Returns false when the response was
    /// discarded as stale.
    pub fn apply_estimate(&mut self, request_id: RequestId, price: f64) -> bool {
        if self.config.behavior.discard_stale_responses
            && self.last_applied.is_some_and(|last| request_id < last)
        {
            return false;
        }
        self.estimate = Some(EstimateResult::from_raw(price));
        self.last_applied = Some(request_id);
        self.dirty = true;
        true
    }

    /// Populate the selector. Only the first successful load is applied.
    pub fn apply_locations(&mut self, locations: Vec<String>) -> bool {
        if self.picker.loaded {
            return false;
        }
        self.picker.locations = locations;
        self.picker.loaded = true;
        self.picker.refilter();
        self.dirty = true;
        true
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        if let Some(field) = focus.field() {
            let len = self.form.get(field).len();
            self.editor.cursor = len;
        }
        self.dirty = true;
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.step(1));
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.step(-1));
    }

    fn push_activity(&mut self, text: String, kind: ActivityKind) {
        let entry = ActivityEntry {
            timestamp: Local::now()
                .format(&self.config.ui.timestamp_format)
                .to_string(),
            text,
            kind,
        };
        self.activity.push(entry);
        let max = self.config.ui.max_activity.max(1);
        if self.activity.len() > max {
            let excess = self.activity.len() - max;
            self.activity.drain(..excess);
        }
        self.dirty = true;
    }

    pub fn system_message(&mut self, text: String) {
        self.push_activity(text, ActivityKind::System);
    }

    pub fn estimate_message(&mut self, text: String) {
        self.push_activity(text, ActivityKind::Estimate);
    }

    pub fn error_message(&mut self, text: String) {
        self.push_activity(text, ActivityKind::Error);
    }

    pub fn status_line(&self) -> String {
        let mut s = format!("Service: {}", self.service_url);
        if self.picker.loaded {
            s.push_str(&format!(" | Locations: {}", self.picker.locations.len()));
        } else if self.locations_failed {
            s.push_str(" | Locations: unavailable");
        } else if self.locations_requested {
            s.push_str(" | Locations: loading");
        }
        if self.in_flight > 0 {
            s.push_str(&format!(" | In flight: {}", self.in_flight));
        }
        s
    }
}
