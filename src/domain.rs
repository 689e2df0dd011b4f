use std::io::Error;

use derive_setters::Setters;
use ratatui::crossterm::event::KeyEvent;

pub const HELP_TEXT: &str = "\
 Tab / Shift-Tab   move focus
 Left / Right      move focus
 Enter / Space     activate the focused element
 y                 copy the last table row
 h                 toggle this help
 q                 quit

 Focus a text field and type to edit it.
 Enter inside the name form submits the form,
 Esc restores the field to its previous value.";

#[derive(Debug, Clone, Setters)]
pub struct RosterConfig {
    /// How long the controller waits for a terminal event, in milliseconds.
    pub event_poll_time: u64,
    /// How many console lines are kept in scrollback.
    pub console_limit: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            console_limit: 100,
        }
    }
}

#[derive(Debug)]
pub enum RosterError {
    IoError(Error),
    InvalidConfig(String),
}

impl From<Error> for RosterError {
    fn from(err: Error) -> Self {
        RosterError::IoError(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    Quit,
    FocusNext,
    FocusPrev,
    Activate,
    Help,
    Exit,
    CopyRow,
    RawKey(KeyEvent),
}
