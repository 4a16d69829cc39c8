//! Risk Self-Check Wizard
//!
//! A five-question assessment that ends in a Markdown risk summary.
//! The engine is host-agnostic: [`state`] holds the pure transition function,
//! [`view`] the pure render function, and [`WizardSession`] ties them to a
//! locale, a clock and the last generated summary.

pub mod answers;
pub mod content;
pub mod export;
pub mod session;
pub mod state;
pub mod summary;
pub mod view;

pub use answers::{Answer, AnswerSet, Selection};
pub use content::{Content, InputKind, Locale, QUESTIONS, Question};
pub use export::{DirectorySaveTarget, SaveTarget, SummaryExport};
pub use session::WizardSession;
pub use state::{WizardEvent, WizardState, WizardStep};
pub use summary::{SummaryDocument, synthesize};
pub use view::View;
