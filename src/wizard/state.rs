//! Pure state machine for the risk wizard. No I/O.

use super::answers::{AnswerSet, Selection, capture};
use super::content::Content;
use crate::error::ValidationError;

/// Where the wizard is. Linear: not started, questions 0..N, summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    NotStarted,
    Question(usize),
    Summary,
}

impl WizardStep {
    pub fn question_index(self) -> Option<usize> {
        match self {
            Self::Question(index) => Some(index),
            _ => None,
        }
    }
}

/// User intents routed through the control surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    Start,
    /// Capture the given input for the current question, then advance
    Next(Selection),
    Prev,
    Restart,
}

/// Step and answers, always replaced together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: WizardStep,
    pub answers: AnswerSet,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the state that follows `event`.
    ///
    /// Events that make no sense for the current step return an unchanged
    /// copy. Only a failed capture is an error, and it leaves `self` intact.
    pub fn apply(&self, content: &Content, event: WizardEvent) -> Result<Self, ValidationError> {
        match (event, self.step) {
            (WizardEvent::Start, _) => Ok(Self {
                step: WizardStep::Question(0),
                answers: AnswerSet::new(),
            }),
            (WizardEvent::Restart, _) => Ok(Self::new()),
            (WizardEvent::Next(selection), WizardStep::Question(index)) => {
                let Some(question) = content.question(index) else {
                    return Ok(self.clone());
                };
                let answer = capture(question, &selection)?;
                let mut answers = self.answers.clone();
                answers.insert(question.id, answer);
                let step = if index < content.last_index() {
                    WizardStep::Question(index + 1)
                } else {
                    WizardStep::Summary
                };
                Ok(Self { step, answers })
            }
            (WizardEvent::Prev, WizardStep::Question(index)) if index > 0 => Ok(Self {
                step: WizardStep::Question(index - 1),
                answers: self.answers.clone(),
            }),
            _ => Ok(self.clone()),
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.step.question_index()
    }

    pub fn is_summary(&self) -> bool {
        self.step == WizardStep::Summary
    }
}
