use std::time::{Duration, Instant};

use arboard::Clipboard;
use ratatui::crossterm::event::KeyEvent;
use tracing::{debug, info, trace};

use crate::bindings;
use crate::dispatch::{Dispatcher, EventKind};
use crate::domain::{Message, RosterConfig, RosterError};
use crate::inputter::{InputResult, Inputter};
use crate::page::{ElementId, Page};

#[derive(Debug, PartialEq)]
pub enum Status {
    READY,
    QUITTING,
}

#[derive(Debug, Clone, Copy)]
enum Modus {
    PAGE,
    POPUP,
}

// Tab order over the interactive elements.
const FOCUS_ORDER: [ElementId; 12] = [
    ElementId::Btn1,
    ElementId::Btn2,
    ElementId::Btn3,
    ElementId::Btn4,
    ElementId::Btn5,
    ElementId::Input1,
    ElementId::Check1,
    ElementId::Drop1,
    ElementId::FieldFirst,
    ElementId::FieldMiddle,
    ElementId::FieldLast,
    ElementId::SubmitBtn,
];

pub struct Model {
    pub status: Status,
    modus: Modus,
    page: Page,
    dispatcher: Dispatcher,
    focus: usize,
    input: Inputter,
    editing_backup: String,
    clipboard: Option<Clipboard>,
    status_message: String,
    last_status_message_update: Instant,
}

impl Model {
    pub fn init(config: &RosterConfig) -> Result<Self, RosterError> {
        let mut dispatcher = Dispatcher::default();
        bindings::install(&mut dispatcher);

        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                debug!("Clipboard unavailable: {e:?}");
                None
            }
        };

        let mut model = Self {
            status: Status::READY,
            modus: Modus::PAGE,
            page: Page::new(config.console_limit),
            dispatcher,
            focus: 0,
            input: Inputter::default(),
            editing_backup: String::new(),
            clipboard,
            status_message: "Started roster!".to_string(),
            last_status_message_update: Instant::now(),
        };
        model.focus_changed();
        Ok(model)
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn focused(&self) -> ElementId {
        FOCUS_ORDER[self.focus]
    }

    pub fn show_help(&self) -> bool {
        matches!(self.modus, Modus::POPUP)
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn status_message_age(&self) -> Duration {
        self.last_status_message_update.elapsed()
    }

    pub fn input_state(&self) -> InputResult {
        self.input.get()
    }

    // While a text element has focus the controller forwards keys raw.
    pub fn raw_keyevents(&self) -> bool {
        matches!(self.modus, Modus::PAGE) && self.page.field(self.focused()).is_some()
    }

    pub fn update(&mut self, message: Message) -> Result<(), RosterError> {
        trace!("Update: Modus {:?}, Message {:?}", self.modus, message);
        match self.modus {
            Modus::POPUP => match message {
                Message::Quit => self.quit(),
                Message::Help | Message::Exit | Message::Activate => self.close_help(),
                _ => (),
            },
            Modus::PAGE => match message {
                Message::Quit => self.quit(),
                Message::FocusNext => self.focus_next(),
                Message::FocusPrev => self.focus_prev(),
                Message::Activate => self.activate(),
                Message::Help => self.open_help(),
                Message::CopyRow => self.copy_last_row(),
                Message::RawKey(key) => self.raw_input(key),
                Message::Exit => (),
            },
        }
        Ok(())
    }

    fn quit(&mut self) {
        info!("Quitting ...");
        self.status = Status::QUITTING;
    }

    fn open_help(&mut self) {
        self.modus = Modus::POPUP;
    }

    fn close_help(&mut self) {
        self.modus = Modus::PAGE;
    }

    fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.last_status_message_update = Instant::now();
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FOCUS_ORDER.len();
        self.focus_changed();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
        self.focus_changed();
    }

    // Load the newly focused element into the editor and remember the value
    // Esc falls back to.
    fn focus_changed(&mut self) {
        let target = self.focused();
        trace!("Focus on {target}");
        if let Some(value) = self.page.field(target).map(|f| f.value.clone()) {
            self.editing_backup = value.clone();
            self.input.clear();
            self.input.set(&value);
        }
    }

    fn activate(&mut self) {
        let target = self.focused();
        match target {
            ElementId::Btn1
            | ElementId::Btn2
            | ElementId::Btn3
            | ElementId::Btn4
            | ElementId::Btn5 => {
                self.dispatcher.dispatch(&mut self.page, target, EventKind::Click);
            }
            ElementId::Check1 => {
                self.page.check1.checked = !self.page.check1.checked;
                self.dispatcher.dispatch(&mut self.page, target, EventKind::Change);
            }
            ElementId::Drop1 => {
                self.page.drop1.cycle();
                self.dispatcher.dispatch(&mut self.page, target, EventKind::Change);
            }
            ElementId::SubmitBtn => self.submit(),
            // Text elements are driven through raw key events instead.
            ElementId::Input1
            | ElementId::FieldFirst
            | ElementId::FieldMiddle
            | ElementId::FieldLast
            | ElementId::NameForm => (),
        }
    }

    fn submit(&mut self) {
        self.dispatcher
            .dispatch(&mut self.page, ElementId::NameForm, EventKind::Submit);
        self.set_status_message(format!("{} rows in the table", self.page.table.nrows()));
    }

    fn raw_input(&mut self, key: KeyEvent) {
        let target = self.focused();
        let result = self.input.read(key);

        let new_value = if result.canceled {
            self.editing_backup.clone()
        } else {
            result.input.clone()
        };

        let mut changed = false;
        if let Some(field) = self.page.field_mut(target) {
            if field.value != new_value {
                field.value = new_value;
                changed = true;
            }
        }

        if result.canceled {
            self.input.clear();
            self.input.set(&self.editing_backup);
        }

        if changed {
            self.dispatcher.dispatch(&mut self.page, target, EventKind::Input);
        }

        if result.finished && !result.canceled {
            match target {
                ElementId::FieldFirst | ElementId::FieldMiddle | ElementId::FieldLast => {
                    self.submit()
                }
                _ => (),
            }
            // Editing continues from the committed value.
            let value = self
                .page
                .field(target)
                .map(|f| f.value.clone())
                .unwrap_or_default();
            self.editing_backup = value.clone();
            self.input.clear();
            self.input.set(&value);
        }
    }

    fn copy_last_row(&mut self) {
        let content = match self.page.table.rows().last() {
            Some(row) => row
                .cells()
                .iter()
                .map(|c| Model::wrap_cell_content(c))
                .collect::<Vec<String>>()
                .join(","),
            None => {
                self.set_status_message("Nothing to copy");
                return;
            }
        };

        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(content) {
                Ok(_) => {
                    trace!("Copied row content to clipboard.");
                    self.set_status_message("Copied last row");
                }
                Err(e) => {
                    trace!("Error copying to clipboard: {:?}", e);
                    self.set_status_message("Copy failed");
                }
            },
            None => self.set_status_message("Clipboard unavailable"),
        }
    }

    fn wrap_cell_content(c: &str) -> String {
        let needs_escaping = c.chars().any(|c| c == '"');
        let needs_wrapping = c.chars().any(|c| c == ' ' || c == '\t' || c == ',');
        let mut out = String::from(c);

        if needs_escaping {
            out = out.replace("\"", "\"\"");
        }
        if needs_wrapping || needs_escaping {
            out = format!("\"{out}\"");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyCode;

    fn test_model() -> Model {
        Model::init(&RosterConfig::default().console_limit(20)).unwrap()
    }

    fn focus_on(model: &mut Model, id: ElementId) {
        while model.focused() != id {
            model.update(Message::FocusNext).unwrap();
        }
    }

    fn type_str(model: &mut Model, s: &str) {
        for chr in s.chars() {
            model
                .update(Message::RawKey(KeyEvent::from(KeyCode::Char(chr))))
                .unwrap();
        }
    }

    #[test]
    fn focus_cycles_over_every_element() {
        let mut model = test_model();
        let start = model.focused();
        for _ in 0..FOCUS_ORDER.len() {
            model.update(Message::FocusNext).unwrap();
        }
        assert_eq!(model.focused(), start);

        model.update(Message::FocusPrev).unwrap();
        assert_eq!(model.focused(), *FOCUS_ORDER.last().unwrap());
    }

    #[test]
    fn typing_edits_the_focused_field_and_fires_input() {
        let mut model = test_model();
        focus_on(&mut model, ElementId::Input1);
        type_str(&mut model, "hi");

        assert_eq!(model.page().input1.value, "hi");
        // The input listener logged the value after the last edit.
        assert_eq!(model.page().console.last(), Some("hi"));
    }

    #[test]
    fn submit_button_appends_the_captured_record() {
        let mut model = test_model();
        focus_on(&mut model, ElementId::FieldFirst);
        type_str(&mut model, "Ada");
        focus_on(&mut model, ElementId::FieldLast);
        type_str(&mut model, "Lovelace");
        focus_on(&mut model, ElementId::SubmitBtn);

        model.update(Message::Activate).unwrap();

        let rows = model.page().table.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells(), ["Ada", "", "Lovelace"]);
        // Submission left the form fields alone.
        assert_eq!(model.page().first.value, "Ada");
    }

    #[test]
    fn enter_inside_a_form_field_submits() {
        let mut model = test_model();
        focus_on(&mut model, ElementId::FieldMiddle);
        type_str(&mut model, "B");
        model
            .update(Message::RawKey(KeyEvent::from(KeyCode::Enter)))
            .unwrap();

        assert_eq!(model.page().table.nrows(), 1);
        assert_eq!(model.page().table.rows()[0].cells(), ["", "B", ""]);
    }

    #[test]
    fn every_submission_appends_one_more_row() {
        let mut model = test_model();
        focus_on(&mut model, ElementId::SubmitBtn);
        for n in 1..=3 {
            model.update(Message::Activate).unwrap();
            assert_eq!(model.page().table.nrows(), n);
        }
    }

    #[test]
    fn escape_restores_the_previous_field_value() {
        let mut model = test_model();
        focus_on(&mut model, ElementId::FieldFirst);
        type_str(&mut model, "Ada");
        // Leave and come back, committing "Ada" as the fallback value.
        model.update(Message::FocusNext).unwrap();
        model.update(Message::FocusPrev).unwrap();

        type_str(&mut model, "xxx");
        assert_eq!(model.page().first.value, "Adaxxx");
        model
            .update(Message::RawKey(KeyEvent::from(KeyCode::Esc)))
            .unwrap();
        assert_eq!(model.page().first.value, "Ada");
    }

    #[test]
    fn buttons_log_on_activation() {
        let mut model = test_model();
        model.update(Message::Activate).unwrap();
        assert_eq!(model.page().console.last(), Some("I was clicked"));

        focus_on(&mut model, ElementId::Btn2);
        model.update(Message::Activate).unwrap();
        assert_eq!(model.page().console.last(), Some("btn2 was clicked"));
    }

    #[test]
    fn checkbox_activation_toggles_and_logs() {
        let mut model = test_model();
        focus_on(&mut model, ElementId::Check1);
        model.update(Message::Activate).unwrap();
        assert!(model.page().check1.checked);
        assert_eq!(model.page().console.last(), Some("Am I checked: true"));

        model.update(Message::Activate).unwrap();
        assert!(!model.page().check1.checked);
        assert_eq!(model.page().console.last(), Some("Am I checked: false"));
    }

    #[test]
    fn dropdown_activation_cycles_and_logs() {
        let mut model = test_model();
        focus_on(&mut model, ElementId::Drop1);
        model.update(Message::Activate).unwrap();
        assert_eq!(model.page().drop1.value(), "cats");
        assert_eq!(model.page().console.last(), Some("cats is selected."));
    }

    #[test]
    fn help_popup_opens_and_closes() {
        let mut model = test_model();
        assert!(!model.show_help());
        model.update(Message::Help).unwrap();
        assert!(model.show_help());
        // Raw key handling is off while the popup is shown.
        assert!(!model.raw_keyevents());
        model.update(Message::Exit).unwrap();
        assert!(!model.show_help());
    }

    #[test]
    fn quit_message_ends_the_session() {
        let mut model = test_model();
        model.update(Message::Quit).unwrap();
        assert_eq!(model.status, Status::QUITTING);
    }

    #[test]
    fn raw_keyevents_only_for_text_elements() {
        let mut model = test_model();
        assert!(!model.raw_keyevents());
        focus_on(&mut model, ElementId::Input1);
        assert!(model.raw_keyevents());
        focus_on(&mut model, ElementId::SubmitBtn);
        assert!(!model.raw_keyevents());
    }

    #[test]
    fn copy_with_no_rows_reports_nothing_to_copy() {
        let mut model = test_model();
        model.update(Message::CopyRow).unwrap();
        assert_eq!(model.status_message(), "Nothing to copy");
    }

    #[test]
    fn wrap_cell_content_quotes_and_escapes() {
        assert_eq!(Model::wrap_cell_content("plain"), "plain");
        assert_eq!(Model::wrap_cell_content("two words"), "\"two words\"");
        assert_eq!(Model::wrap_cell_content("a,b"), "\"a,b\"");
        assert_eq!(Model::wrap_cell_content("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
