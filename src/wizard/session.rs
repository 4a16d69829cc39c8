//! Wizard Session
//!
//! One running questionnaire: content for the chosen locale, the current
//! state, the last rendered summary and any pending validation notice.
//! Hosts drive it through `start`, `next`, `prev`, `restart` and `download`,
//! then call [`WizardSession::view`] to repaint.

use super::answers::{AnswerSet, Selection};
use super::content::{Content, Locale};
use super::export::{SaveTarget, SummaryExport};
use super::state::{WizardEvent, WizardState, WizardStep};
use super::summary::{SummaryDocument, synthesize};
use super::view::{View, render};
use crate::error::ValidationError;
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;

/// Source of "today" for summary and export dates
pub type Clock = fn() -> NaiveDate;

fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

pub struct WizardSession {
    content: Content,
    state: WizardState,
    /// Most recently rendered summary, kept for download
    summary: Option<SummaryDocument>,
    notice: Option<String>,
    clock: Clock,
}

impl WizardSession {
    pub fn new(locale: Locale) -> Self {
        Self::with_clock(locale, utc_today)
    }

    pub fn with_clock(locale: Locale, clock: Clock) -> Self {
        tracing::debug!("Creating wizard session (locale: {})", locale.code());
        Self {
            content: Content::for_locale(locale),
            state: WizardState::new(),
            summary: None,
            notice: None,
            clock,
        }
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn locale(&self) -> Locale {
        self.content.locale
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.state.answers
    }

    pub fn summary(&self) -> Option<&SummaryDocument> {
        self.summary.as_ref()
    }

    /// Localized validation message from the last failed `next`
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn start(&mut self) {
        self.dispatch(WizardEvent::Start);
        tracing::info!("Assessment started");
    }

    /// Capture `selection` for the current question and advance.
    ///
    /// On failure the step and answers stay as they were and the localized
    /// "select an answer" notice is set for the next render.
    pub fn next(&mut self, selection: Selection) -> Result<WizardStep, ValidationError> {
        match self.state.apply(&self.content, WizardEvent::Next(selection)) {
            Ok(state) => {
                let entered_summary = !self.state.is_summary() && state.is_summary();
                self.state = state;
                self.notice = None;
                if entered_summary {
                    let doc = synthesize(&self.content, &self.state.answers, (self.clock)());
                    tracing::info!(
                        "Risk summary generated: {} risk(s), {} recommendation(s)",
                        doc.risks.len(),
                        doc.recommendations.len()
                    );
                    self.summary = Some(doc);
                }
                Ok(self.state.step)
            }
            Err(err) => {
                tracing::debug!("Answer capture failed: {}", err);
                self.notice = Some(self.content.strings.select_answer.to_string());
                Err(err)
            }
        }
    }

    pub fn prev(&mut self) {
        self.dispatch(WizardEvent::Prev);
    }

    /// Back to the start screen with nothing answered
    pub fn restart(&mut self) {
        self.dispatch(WizardEvent::Restart);
        tracing::info!("Assessment restarted");
    }

    /// Offer the last rendered summary to `target`.
    ///
    /// Does nothing until a summary exists. Save failures are logged and
    /// swallowed; the host only learns the saved path when it worked.
    pub fn download(&self, target: &dyn SaveTarget) -> Option<PathBuf> {
        let summary = self.summary.as_ref()?;
        let export = SummaryExport::new(summary, (self.clock)());
        match target.offer(&export) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Failed to save {}: {}", export.filename, e);
                None
            }
        }
    }

    /// Current screen contents
    pub fn view(&self) -> View {
        render(
            &self.content,
            &self.state,
            self.summary.as_ref(),
            self.notice.as_deref(),
        )
    }

    fn dispatch(&mut self, event: WizardEvent) {
        // Only capture can fail, and that goes through `next`
        if let Ok(state) = self.state.apply(&self.content, event) {
            self.state = state;
            self.notice = None;
        }
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
