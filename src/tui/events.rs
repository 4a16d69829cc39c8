//! TUI Event System
//!
//! Handles user input and application events for the terminal interface.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

/// Events that can occur in the TUI
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// User pressed a key
    Key(KeyEvent),

    /// Mouse scroll event
    MouseScroll(i8), // positive = up, negative = down

    /// Left mouse button pressed at (column, row)
    MouseClick(u16, u16),

    /// Terminal was resized
    Resize(u16, u16),

    /// Tick event for redraws
    Tick,
}

/// Event handler for the TUI
pub struct EventHandler {
    /// Event sender
    tx: mpsc::UnboundedSender<TuiEvent>,

    /// Event receiver
    rx: mpsc::UnboundedReceiver<TuiEvent>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Get a sender for sending events
    pub fn sender(&self) -> mpsc::UnboundedSender<TuiEvent> {
        self.tx.clone()
    }

    /// Receive the next event (blocks until available)
    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.rx.recv().await
    }

    /// Start listening for terminal events
    ///
    /// Uses crossterm's async EventStream so the reader never blocks the
    /// runtime thread.
    pub fn start_terminal_listener(tx: mpsc::UnboundedSender<TuiEvent>) {
        use crossterm::event::EventStream;
        use futures::StreamExt;

        tokio::spawn(async move {
            let mut reader = EventStream::new();
            let tick_interval = std::time::Duration::from_millis(250);

            loop {
                // Race: next terminal event vs tick timer
                let event = tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(event)) => Some(event),
                            Some(Err(e)) => {
                                tracing::warn!("Terminal event error: {}", e);
                                None
                            }
                            None => break, // Stream closed
                        }
                    }
                    _ = tokio::time::sleep(tick_interval) => None,
                };

                let should_break = match event {
                    Some(crossterm::event::Event::Key(key)) => {
                        // Only process key press events to avoid duplicates
                        if key.kind == crossterm::event::KeyEventKind::Press {
                            tx.send(TuiEvent::Key(key)).is_err()
                        } else {
                            false
                        }
                    }
                    Some(crossterm::event::Event::Mouse(mouse)) => {
                        use crossterm::event::{MouseButton, MouseEventKind};
                        match mouse.kind {
                            MouseEventKind::ScrollUp => tx.send(TuiEvent::MouseScroll(1)).is_err(),
                            MouseEventKind::ScrollDown => {
                                tx.send(TuiEvent::MouseScroll(-1)).is_err()
                            }
                            MouseEventKind::Down(MouseButton::Left) => tx
                                .send(TuiEvent::MouseClick(mouse.column, mouse.row))
                                .is_err(),
                            _ => false,
                        }
                    }
                    Some(crossterm::event::Event::Resize(w, h)) => {
                        tx.send(TuiEvent::Resize(w, h)).is_err()
                    }
                    Some(_) => false,
                    None => tx.send(TuiEvent::Tick).is_err(),
                };
                if should_break {
                    break;
                }
            }
        });
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper function to check if a key event matches
pub fn key_matches(event: &KeyEvent, code: KeyCode, modifiers: KeyModifiers) -> bool {
    event.code == code && event.modifiers == modifiers
}

/// Common key bindings
pub mod keys {
    use super::*;

    /// Ctrl+C - Quit
    pub fn is_quit(event: &KeyEvent) -> bool {
        key_matches(event, KeyCode::Char('c'), KeyModifiers::CONTROL)
    }

    /// q - Quit from screens without text entry
    pub fn is_soft_quit(event: &KeyEvent) -> bool {
        key_matches(event, KeyCode::Char('q'), KeyModifiers::empty())
    }

    /// Ctrl+R - Restart the assessment
    pub fn is_restart(event: &KeyEvent) -> bool {
        key_matches(event, KeyCode::Char('r'), KeyModifiers::CONTROL)
    }

    /// Enter - Select/Confirm
    pub fn is_enter(event: &KeyEvent) -> bool {
        event.code == KeyCode::Enter && event.modifiers.is_empty()
    }

    /// Escape, Left or Backspace - Back
    pub fn is_back(event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Esc | KeyCode::Left | KeyCode::Backspace)
            && event.modifiers.is_empty()
    }

    /// Up arrow or k
    pub fn is_up(event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Up | KeyCode::Char('k')) && event.modifiers.is_empty()
    }

    /// Down arrow or j
    pub fn is_down(event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Down | KeyCode::Char('j')) && event.modifiers.is_empty()
    }

    /// Space - Select / toggle
    pub fn is_toggle(event: &KeyEvent) -> bool {
        event.code == KeyCode::Char(' ')
    }

    /// Tab or Right - next focusable
    pub fn is_focus_next(event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Right)
            || (event.code == KeyCode::Tab && !event.modifiers.contains(KeyModifiers::SHIFT))
    }

    /// Shift+Tab or Left - previous focusable
    pub fn is_focus_prev(event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::BackTab | KeyCode::Left)
            || (event.code == KeyCode::Tab && event.modifiers.contains(KeyModifiers::SHIFT))
    }

    /// 1-9 - zero-based option index
    pub fn option_digit(event: &KeyEvent) -> Option<usize> {
        match event.code {
            KeyCode::Char(c @ '1'..='9') if event.modifiers.is_empty() => {
                c.to_digit(10).map(|d| d as usize - 1)
            }
            _ => None,
        }
    }
}
