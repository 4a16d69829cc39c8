//! riskcheck - Protocol Risk Self-Check
//!
//! A short terminal questionnaire for DeFi and blockchain protocol teams. Five
//! questions about the protocol produce a preliminary risk summary with
//! recommendations, which can be saved as a Markdown file.
//!
//! ## Features
//!
//! - **Deterministic rules:** the same answers always give the same summary
//! - **English and Japanese:** chosen from a language tag, English by default
//! - **Terminal UI:** built with Ratatui, keyboard and mouse driven
//! - **Scriptable:** summarize a JSON answer file without the UI
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive assessment
//! riskcheck
//!
//! # Japanese questionnaire
//! riskcheck --lang ja
//!
//! # Non-interactive summary
//! riskcheck summarize answers.json --save
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod tui;
pub mod wizard;

// Re-export commonly used types
pub use error::{RiskCheckError, ValidationError};
pub use wizard::{Locale, SummaryDocument, WizardSession};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
