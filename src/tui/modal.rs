//! Zoom Modal
//!
//! Accessible overlay used to show the summary document enlarged. It owns no
//! content; it tracks open/closed, which of its controls has focus, and the
//! host element to hand focus back to on close.
//!
//! While open it captures every key (focus trap) and suspends scrolling of
//! the screen underneath. Closing releases both.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What asked the modal to open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTrigger {
    Click,
    Key(KeyCode),
}

/// Focusable controls inside the modal, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalControl {
    Close,
    Download,
}

/// Result of routing a key into the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome<F> {
    /// Key consumed, nothing for the host to do
    Handled,
    /// Modal closed; focus goes back to this host element
    Closed(Option<F>),
    /// A non-close control was activated
    Activated(ModalControl),
}

#[derive(Debug, Clone)]
pub struct ModalState<F> {
    open: bool,
    controls: Vec<ModalControl>,
    focused: usize,
    restore_focus: Option<F>,
    scroll: u16,
}

impl<F: Copy> ModalState<F> {
    /// `controls` must start with [`ModalControl::Close`], which gets focus on open
    pub fn new(controls: Vec<ModalControl>) -> Self {
        Self {
            open: false,
            controls,
            focused: 0,
            restore_focus: None,
            scroll: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the screen underneath may scroll
    pub fn scroll_locked(&self) -> bool {
        self.open
    }

    pub fn controls(&self) -> &[ModalControl] {
        &self.controls
    }

    pub fn focused(&self) -> Option<ModalControl> {
        self.controls.get(self.focused).copied()
    }

    /// Scroll offset of the modal body
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Open from a trigger element that currently holds `current_focus`.
    ///
    /// Clicks always open; keys only on Enter or Space. Returns whether the
    /// modal opened.
    pub fn open_with(&mut self, trigger: ModalTrigger, current_focus: F) -> bool {
        if self.open {
            return false;
        }
        if let ModalTrigger::Key(code) = trigger
            && !matches!(code, KeyCode::Enter | KeyCode::Char(' '))
        {
            return false;
        }

        self.open = true;
        self.restore_focus = Some(current_focus);
        self.focused = self
            .controls
            .iter()
            .position(|c| *c == ModalControl::Close)
            .unwrap_or(0);
        self.scroll = 0;
        tracing::debug!("Modal opened via {:?}", trigger);
        true
    }

    /// Close and return the element that had focus before opening
    pub fn close(&mut self) -> Option<F> {
        if !self.open {
            return None;
        }
        self.open = false;
        self.scroll = 0;
        tracing::debug!("Modal closed");
        self.restore_focus.take()
    }

    /// A click outside the modal body
    pub fn click_backdrop(&mut self) -> Option<F> {
        self.close()
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> ModalOutcome<F> {
        if !self.open {
            return ModalOutcome::Handled;
        }

        match event.code {
            KeyCode::Esc => ModalOutcome::Closed(self.close()),
            KeyCode::BackTab => {
                self.focus_prev();
                ModalOutcome::Handled
            }
            KeyCode::Tab if event.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus_prev();
                ModalOutcome::Handled
            }
            KeyCode::Tab => {
                self.focus_next();
                ModalOutcome::Handled
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focused() {
                Some(ModalControl::Close) | None => ModalOutcome::Closed(self.close()),
                Some(control) => ModalOutcome::Activated(control),
            },
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                ModalOutcome::Handled
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = self.scroll.saturating_add(1);
                ModalOutcome::Handled
            }
            _ => ModalOutcome::Handled,
        }
    }

    fn focus_next(&mut self) {
        if !self.controls.is_empty() {
            self.focused = (self.focused + 1) % self.controls.len();
        }
    }

    fn focus_prev(&mut self) {
        if !self.controls.is_empty() {
            self.focused = (self.focused + self.controls.len() - 1) % self.controls.len();
        }
    }
}
