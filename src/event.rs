use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone)]
pub enum Event {
    /// First event after the terminal is ready; the issues list appears
    Init,
    Tick,
    Render,
    Resize(u16, u16),
    Key(KeyEvent),
}

impl Event {
    /// Ctrl+C quits from any screen, unlike `q` which only backs out
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
        )
    }
}
