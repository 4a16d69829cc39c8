//! TUI Application State
//!
//! Routes terminal input into the wizard session and keeps the bits of
//! screen state the engine doesn't own: the option cursor, the draft
//! selection, summary button focus and the zoom modal.

use super::events::{TuiEvent, keys};
use super::modal::{ModalControl, ModalOutcome, ModalState, ModalTrigger};
use super::render;
use crate::wizard::{DirectorySaveTarget, Selection, View, WizardSession, WizardStep};
use crossterm::event::KeyEvent;
use ratatui::layout::{Position, Rect};

/// Focusable buttons on the summary screen, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryButton {
    Download,
    Restart,
    RequestAnalysis,
    Preview,
}

impl SummaryButton {
    pub const ALL: [SummaryButton; 4] = [
        Self::Download,
        Self::Restart,
        Self::RequestAnalysis,
        Self::Preview,
    ];

    fn position(self) -> usize {
        Self::ALL.iter().position(|b| *b == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Draft input of the question on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionForm {
    pub cursor: usize,
    pub option_count: usize,
    pub selection: Selection,
}

pub struct App {
    pub session: WizardSession,
    save_target: DirectorySaveTarget,
    pub form: Option<QuestionForm>,
    pub summary_focus: SummaryButton,
    pub modal: ModalState<SummaryButton>,
    /// One-line status under the summary (saved path, contact link)
    pub status: Option<String>,
    /// Summary scroll offset; frozen while the modal is open
    pub scroll: u16,
    pub terminal_size: (u16, u16),
    pub should_quit: bool,
}

impl App {
    pub fn new(session: WizardSession, save_target: DirectorySaveTarget) -> Self {
        let mut app = Self {
            session,
            save_target,
            form: None,
            summary_focus: SummaryButton::Download,
            modal: ModalState::new(vec![ModalControl::Close, ModalControl::Download]),
            status: None,
            scroll: 0,
            terminal_size: (0, 0),
            should_quit: false,
        };
        app.sync_form();
        app
    }

    /// Current view from the engine
    pub fn view(&self) -> View {
        self.session.view()
    }

    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::MouseScroll(delta) => {
                if !self.modal.scroll_locked() {
                    self.scroll = if delta > 0 {
                        self.scroll.saturating_sub(1)
                    } else {
                        self.scroll.saturating_add(1)
                    };
                }
            }
            TuiEvent::MouseClick(column, row) => self.handle_click(column, row),
            TuiEvent::Resize(w, h) => self.terminal_size = (w, h),
            TuiEvent::Tick => {}
        }
    }

    pub fn handle_key(&mut self, event: KeyEvent) {
        if keys::is_quit(&event) {
            self.should_quit = true;
            return;
        }

        if self.modal.is_open() {
            self.handle_modal_key(event);
            return;
        }

        match self.session.step() {
            WizardStep::NotStarted => {
                if keys::is_enter(&event) {
                    self.session.start();
                    self.after_transition();
                } else if keys::is_soft_quit(&event) {
                    self.should_quit = true;
                }
            }
            WizardStep::Question(_) => self.handle_question_key(event),
            WizardStep::Summary => self.handle_summary_key(event),
        }
    }

    fn handle_question_key(&mut self, event: KeyEvent) {
        if keys::is_restart(&event) {
            self.session.restart();
            self.after_transition();
            return;
        }
        if keys::is_back(&event) {
            self.session.prev();
            self.after_transition();
            return;
        }
        if keys::is_enter(&event) {
            let Some(form) = &self.form else { return };
            if self.session.next(form.selection.clone()).is_ok() {
                self.after_transition();
            }
            return;
        }
        if keys::is_soft_quit(&event) {
            self.should_quit = true;
            return;
        }

        let Some(form) = self.form.as_mut() else {
            return;
        };
        if keys::is_up(&event) {
            form.cursor = form.cursor.saturating_sub(1);
        } else if keys::is_down(&event) {
            form.cursor = (form.cursor + 1).min(form.option_count.saturating_sub(1));
        } else if keys::is_toggle(&event) {
            let cursor = form.cursor;
            self.toggle_option(cursor);
        } else if let Some(index) = keys::option_digit(&event)
            && index < form.option_count
        {
            form.cursor = index;
            self.toggle_option(index);
        }
    }

    fn toggle_option(&mut self, index: usize) {
        let Some(question) = self
            .session
            .step()
            .question_index()
            .and_then(|i| self.session.content().question(i))
        else {
            return;
        };
        let Some(option) = question.options.get(index) else {
            return;
        };
        if let Some(form) = self.form.as_mut() {
            form.selection.toggle(option.value);
        }
    }

    fn handle_summary_key(&mut self, event: KeyEvent) {
        use crossterm::event::KeyCode;

        if keys::is_focus_next(&event) {
            self.summary_focus = self.summary_focus.next();
        } else if keys::is_focus_prev(&event) {
            self.summary_focus = self.summary_focus.prev();
        } else if keys::is_up(&event) {
            self.scroll = self.scroll.saturating_sub(1);
        } else if keys::is_down(&event) {
            self.scroll = self.scroll.saturating_add(1);
        } else if matches!(event.code, KeyCode::Enter | KeyCode::Char(' ')) {
            self.activate(self.summary_focus, ModalTrigger::Key(event.code));
        } else if event.code == KeyCode::Char('d') {
            self.download();
        } else if event.code == KeyCode::Char('r') || keys::is_restart(&event) {
            self.session.restart();
            self.after_transition();
        } else if keys::is_soft_quit(&event) {
            self.should_quit = true;
        }
    }

    fn activate(&mut self, button: SummaryButton, trigger: ModalTrigger) {
        match button {
            SummaryButton::Download => self.download(),
            SummaryButton::Restart => {
                self.session.restart();
                self.after_transition();
            }
            SummaryButton::RequestAnalysis => {
                let strings = self.session.content().strings;
                self.status = Some(format!("{}: {}", strings.request_analysis, strings.contact_url));
            }
            SummaryButton::Preview => {
                self.modal.open_with(trigger, button);
            }
        }
    }

    fn handle_modal_key(&mut self, event: KeyEvent) {
        match self.modal.handle_key(event) {
            ModalOutcome::Handled => {}
            ModalOutcome::Closed(restore) => {
                if let Some(button) = restore {
                    self.summary_focus = button;
                }
            }
            ModalOutcome::Activated(ModalControl::Download) => self.download(),
            ModalOutcome::Activated(ModalControl::Close) => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        let (width, height) = self.terminal_size;
        let area = Rect::new(0, 0, width, height);
        let position = Position::new(column, row);
        let strings = self.session.content().strings;

        if self.modal.is_open() {
            let hit = render::modal_control_rects(area, strings, self.modal.controls())
                .into_iter()
                .find(|(_, rect)| rect.contains(position));
            match hit {
                Some((ModalControl::Close, _)) => {
                    if let Some(button) = self.modal.close() {
                        self.summary_focus = button;
                    }
                }
                Some((ModalControl::Download, _)) => self.download(),
                None => {
                    if !render::modal_area(area).contains(position)
                        && let Some(button) = self.modal.click_backdrop()
                    {
                        self.summary_focus = button;
                    }
                }
            }
            return;
        }

        if self.session.step() != WizardStep::Summary {
            return;
        }
        if let Some((button, _)) = render::summary_button_rects(area, strings)
            .into_iter()
            .find(|(_, rect)| rect.contains(position))
        {
            self.summary_focus = button;
            self.activate(button, ModalTrigger::Click);
        }
    }

    fn download(&mut self) {
        if let Some(path) = self.session.download(&self.save_target) {
            let label = self.session.content().strings.saved_to;
            self.status = Some(format!("{} {}", label, path.display()));
        }
    }

    /// Reset screen-local state after the engine moved
    fn after_transition(&mut self) {
        self.scroll = 0;
        self.status = None;
        self.summary_focus = SummaryButton::Download;
        self.sync_form();
    }

    fn sync_form(&mut self) {
        self.form = match self.session.view() {
            View::Question {
                options, selection, ..
            } => {
                let cursor = options.iter().position(|o| o.checked).unwrap_or(0);
                Some(QuestionForm {
                    cursor,
                    option_count: options.len(),
                    selection,
                })
            }
            _ => None,
        };
    }
}
