//! Wizard Views
//!
//! Plain data describing what should be on screen for a state. Built fresh on
//! every transition; renderers draw it without reaching back into the engine.

use super::answers::Selection;
use super::content::{Content, InputKind};
use super::state::{WizardState, WizardStep};
use super::summary::SummaryDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Start {
        intro: &'static str,
        start_label: &'static str,
    },
    Question {
        id: &'static str,
        index: usize,
        total: usize,
        progress_label: String,
        /// Fraction of questions reached, 0.0..=1.0
        progress: f64,
        prompt: &'static str,
        kind: InputKind,
        placeholder: &'static str,
        options: Vec<OptionView>,
        /// Input pre-populated from the answer set
        selection: Selection,
        show_prev: bool,
        prev_label: &'static str,
        next_label: &'static str,
        notice: Option<String>,
    },
    Summary {
        title: &'static str,
        subtitle: &'static str,
        risks_heading: &'static str,
        risks: Vec<String>,
        recommendations_heading: &'static str,
        recommendations: Vec<String>,
        download_label: &'static str,
        restart_label: &'static str,
        /// Full Markdown document, shown in the zoom modal
        markdown: String,
    },
}

/// Render a state into a view.
///
/// `summary` is the document generated on entering the summary step; when it
/// is missing the summary view comes out empty rather than re-deriving a date.
pub fn render(
    content: &Content,
    state: &WizardState,
    summary: Option<&SummaryDocument>,
    notice: Option<&str>,
) -> View {
    let s = content.strings;
    match state.step {
        WizardStep::NotStarted => View::Start {
            intro: s.intro,
            start_label: s.start,
        },
        WizardStep::Question(index) => {
            let Some(q) = content.question(index) else {
                return View::Start {
                    intro: s.intro,
                    start_label: s.start,
                };
            };
            let total = content.question_count();
            let selection = Selection::restore(q, state.answers.get(q.id));
            let options = q
                .options
                .iter()
                .map(|opt| OptionView {
                    value: opt.value,
                    label: content.text(&opt.label),
                    checked: selection.is_selected(opt.value),
                })
                .collect();

            View::Question {
                id: q.id,
                index,
                total,
                progress_label: format!("{} {} {} {}", s.progress, index + 1, s.of, total),
                progress: (index + 1) as f64 / total as f64,
                prompt: content.text(&q.prompt),
                kind: q.kind,
                placeholder: s.placeholder,
                options,
                selection,
                show_prev: index > 0,
                prev_label: s.prev,
                next_label: if index == content.last_index() {
                    s.finish
                } else {
                    s.next
                },
                notice: notice.map(str::to_string),
            }
        }
        WizardStep::Summary => {
            let t = content.template;
            let (risks, recommendations, markdown) = match summary {
                Some(doc) => (
                    doc.risks.clone(),
                    doc.recommendations.clone(),
                    doc.to_markdown(),
                ),
                None => (Vec::new(), Vec::new(), String::new()),
            };
            View::Summary {
                title: s.summary_title,
                subtitle: s.summary_subtitle,
                risks_heading: t.risks_heading,
                risks,
                recommendations_heading: t.recommendations_heading,
                recommendations,
                download_label: s.download,
                restart_label: s.restart,
                markdown,
            }
        }
    }
}
