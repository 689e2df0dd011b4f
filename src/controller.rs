use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};
use tracing::trace;

use crate::domain::{Message, RosterConfig, RosterError};
use crate::model::Model;

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &RosterConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self, model: &Model) -> Result<Option<Message>, RosterError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(self.handle_key(key, model.raw_keyevents()));
        }
        Ok(None)
    }

    // With `raw` set the focused element consumes the keyboard, only focus
    // movement keeps its global meaning.
    fn handle_key(&self, key: event::KeyEvent, raw: bool) -> Option<Message> {
        let message = match (key.code, key.modifiers) {
            (KeyCode::Tab, _) => Some(Message::FocusNext),
            (KeyCode::BackTab, _) => Some(Message::FocusPrev),
            _ if raw => Some(Message::RawKey(key)),
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(Message::Quit),
            (KeyCode::Char('h'), KeyModifiers::NONE) => Some(Message::Help),
            (KeyCode::Char('y'), KeyModifiers::NONE) => Some(Message::CopyRow),
            (KeyCode::Enter, KeyModifiers::NONE) | (KeyCode::Char(' '), KeyModifiers::NONE) => {
                Some(Message::Activate)
            }
            (KeyCode::Right, _) | (KeyCode::Down, _) => Some(Message::FocusNext),
            (KeyCode::Left, _) | (KeyCode::Up, _) => Some(Message::FocusPrev),
            (KeyCode::Esc, _) => Some(Message::Exit),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}
