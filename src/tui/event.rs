use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
        Ok(AppEvent::Tick)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    Select,
    Back,
    LoadMore,
    PreviousPost,
    NextPost,
    OpenInBrowser,
    ExitPreview,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Enter => Action::Select,
            KeyCode::Esc | KeyCode::Char('b') => Action::Back,
            KeyCode::Char('l') => Action::LoadMore,
            KeyCode::Char('p') => Action::PreviousPost,
            KeyCode::Char('n') => Action::NextPost,
            KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('x') => Action::ExitPreview,
            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Action::from(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(Action::from(key(KeyCode::Char('l'))), Action::LoadMore);
        assert_eq!(Action::from(key(KeyCode::Enter)), Action::Select);
        assert_eq!(Action::from(key(KeyCode::Esc)), Action::Back);
        assert_eq!(Action::from(key(KeyCode::Char('z'))), Action::None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Action::from(key), Action::Quit);
    }
}
