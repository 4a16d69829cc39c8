//! CLI Module
//!
//! Command-line interface for riskcheck using Clap v4.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::ValidationError;
use crate::wizard::{
    AnswerSet, Content, DirectorySaveTarget, InputKind, Locale, SaveTarget, Selection,
    SummaryDocument, SummaryExport, WizardSession, WizardStep,
};

/// riskcheck - Protocol risk self-check
#[derive(Parser, Debug)]
#[command(name = "riskcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug mode (creates log files in ~/.riskcheck/logs/)
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Language tag ("en", "ja", "ja-JP", ...); anything else means English
    #[arg(short, long, global = true)]
    pub lang: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive assessment (default)
    Check,

    /// List the questions and their options
    Questions {
        #[arg(short, long, default_value = "text")]
        format: QuestionFormat,
    },

    /// Summarize a JSON answer file without the interactive wizard
    Summarize {
        /// Path to a JSON object of question id -> value (or list of values)
        answers: PathBuf,

        #[arg(short, long, default_value = "markdown")]
        format: SummaryFormat,

        /// Also save the Markdown file into the export directory
        #[arg(long)]
        save: bool,
    },

    /// Initialize configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum QuestionFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SummaryFormat {
    Markdown,
    Json,
}

/// Main CLI entry point
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        None | Some(Commands::Check) => cmd_check(&config).await,
        Some(Commands::Questions { format }) => cmd_questions(&config, format),
        Some(Commands::Summarize {
            answers,
            format,
            save,
        }) => cmd_summarize(&config, &answers, format, save),
        Some(Commands::Init { force }) => cmd_init(force),
        Some(Commands::Config) => cmd_config(&config),
    }
}

/// Load configuration from file or defaults, then apply the `--lang` flag
pub fn load_config(config_path: Option<&str>, lang: Option<String>) -> Result<Config> {
    let config = if let Some(path) = config_path {
        tracing::info!("Loading configuration from custom path: {}", path);
        Config::load_from_path(path)?
    } else {
        tracing::debug!("Loading default configuration");
        Config::load()?
    };
    let config = config.with_lang(lang);

    config.validate()?;

    Ok(config)
}

async fn cmd_check(config: &Config) -> Result<()> {
    let locale = config.locale();
    tracing::info!("Starting interactive assessment (locale: {})", locale.code());

    let app = crate::tui::App::new(
        WizardSession::new(locale),
        DirectorySaveTarget::new(config.export.dir.clone()),
    );
    crate::tui::run(app).await.context("TUI error")
}

#[derive(Debug, Serialize)]
struct QuestionListing {
    id: &'static str,
    kind: InputKind,
    prompt: &'static str,
    options: Vec<OptionListing>,
}

#[derive(Debug, Serialize)]
struct OptionListing {
    value: &'static str,
    label: &'static str,
}

fn question_listing(content: &Content) -> Vec<QuestionListing> {
    content
        .questions
        .iter()
        .map(|q| QuestionListing {
            id: q.id,
            kind: q.kind,
            prompt: content.text(&q.prompt),
            options: q
                .options
                .iter()
                .map(|o| OptionListing {
                    value: o.value,
                    label: content.text(&o.label),
                })
                .collect(),
        })
        .collect()
}

fn format_questions(content: &Content, format: QuestionFormat) -> Result<String> {
    let listing = question_listing(content);
    match format {
        QuestionFormat::Json => {
            serde_json::to_string_pretty(&listing).context("Failed to serialize questions")
        }
        QuestionFormat::Text => {
            let mut out = String::new();
            for (i, q) in listing.iter().enumerate() {
                let kind = match q.kind {
                    InputKind::Select => "one",
                    InputKind::Checkbox => "any",
                };
                out.push_str(&format!("{}. {} [{}] ({})\n", i + 1, q.prompt, q.id, kind));
                for o in &q.options {
                    out.push_str(&format!("   - {:<14} {}\n", o.value, o.label));
                }
            }
            Ok(out)
        }
    }
}

fn cmd_questions(config: &Config, format: QuestionFormat) -> Result<()> {
    let content = Content::for_locale(config.locale());
    print!("{}", format_questions(&content, format)?);
    Ok(())
}

/// Replay an answer set through a fresh session, question by question.
///
/// Uses the same capture rules as the interactive wizard, so a missing or
/// unknown answer fails exactly where the wizard would have re-prompted.
pub fn summarize_answers(
    locale: Locale,
    answers: &AnswerSet,
    today: NaiveDate,
) -> std::result::Result<SummaryDocument, ValidationError> {
    let mut session = WizardSession::new(locale);
    let content = *session.content();

    for (id, _) in answers.iter() {
        if !content.questions.iter().any(|q| q.id == id.as_str()) {
            tracing::warn!("Ignoring answer for unknown question '{}'", id);
        }
    }

    session.start();
    while let WizardStep::Question(index) = session.step() {
        let Some(question) = content.question(index) else {
            break;
        };
        let selection = match answers.get(question.id) {
            Some(answer) => Selection::from_answer(answer),
            None => Selection::empty_for(question),
        };
        session.next(selection)?;
    }

    // Re-synthesize against the caller's date so output is reproducible
    Ok(crate::wizard::synthesize(&content, session.answers(), today))
}

fn read_answers(path: &Path) -> Result<AnswerSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read answer file: {:?}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse answer file: {:?}", path))
}

fn format_summary(summary: &SummaryDocument, format: SummaryFormat) -> Result<String> {
    match format {
        SummaryFormat::Markdown => Ok(summary.to_markdown()),
        SummaryFormat::Json => {
            serde_json::to_string_pretty(summary).context("Failed to serialize summary")
        }
    }
}

fn cmd_summarize(config: &Config, path: &Path, format: SummaryFormat, save: bool) -> Result<()> {
    let answers = read_answers(path)?;
    let today = Utc::now().date_naive();
    let summary = summarize_answers(config.locale(), &answers, today)
        .with_context(|| format!("Invalid answers in {:?}", path))?;

    println!("{}", format_summary(&summary, format)?);

    if save {
        let target = DirectorySaveTarget::new(config.export.dir.clone());
        let saved = target.offer(&SummaryExport::new(&summary, today))?;
        eprintln!("✅ Summary saved to: {}", saved.display());
    }

    Ok(())
}

/// Initialize configuration file
fn cmd_init(force: bool) -> Result<()> {
    println!("🛡️  riskcheck Configuration Initialization\n");

    let config_path =
        Config::system_config_path().context("Could not determine config directory")?;

    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at: {}\nUse --force to overwrite",
            config_path.display()
        );
    }

    Config::default().save(&config_path)?;

    println!("✅ Configuration initialized at: {}", config_path.display());
    println!("\n📝 Next steps:");
    println!("   1. Set [wizard] lang to \"ja\" for the Japanese questionnaire");
    println!("   2. Point [export] dir at where summaries should be saved");
    println!("   3. Run 'riskcheck' to start the assessment");

    Ok(())
}

/// Show configuration
fn cmd_config(config: &Config) -> Result<()> {
    println!("🛡️  riskcheck {} Configuration\n", crate::VERSION);
    println!("Language: {} ({})", config.wizard.lang, config.locale().code());
    println!("Export directory: {}", config.export.dir.display());
    println!("Log level: {}", config.logging.level);
    match &config.logging.file {
        Some(file) => println!("Log file: {}", file.display()),
        None => println!("Log file: [NOT SET]"),
    }
    if let Some(path) = Config::system_config_path() {
        println!(
            "\nSystem config: {} {}",
            path.display(),
            if path.exists() { "" } else { "(missing)" }
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::Answer;
    use tempfile::TempDir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn answers(json: &str) -> AnswerSet {
        serde_json::from_str(json).unwrap()
    }

    const FULL: &str = r#"{
        "protocol_type": "lending",
        "stage": "testnet",
        "value_at_risk": "very_high",
        "concerns": ["oracle", "mev"],
        "audit_status": "planned"
    }"#;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_check() {
        let cli = Cli::parse_from(["riskcheck"]);
        assert!(cli.command.is_none());
        assert!(!cli.debug);

        let cli = Cli::parse_from(["riskcheck", "--lang", "ja", "questions", "-f", "json"]);
        assert_eq!(cli.lang.as_deref(), Some("ja"));
        assert!(matches!(
            cli.command,
            Some(Commands::Questions {
                format: QuestionFormat::Json
            })
        ));
    }

    #[test]
    fn test_summarize_args() {
        let cli = Cli::parse_from(["riskcheck", "summarize", "answers.json", "--save"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Summarize {
                ref answers,
                format: SummaryFormat::Markdown,
                save: true,
            }) if answers == &PathBuf::from("answers.json")
        ));
    }

    #[test]
    fn test_summarize_full_answers() {
        let doc = summarize_answers(Locale::En, &answers(FULL), date()).unwrap();
        assert_eq!(doc.protocol_type.as_deref(), Some("lending"));
        assert_eq!(doc.generated, date());
        assert!(!doc.risks.is_empty());
        assert!(!doc.recommendations.is_empty());
    }

    #[test]
    fn test_summarize_missing_answer_fails() {
        let mut set = AnswerSet::new();
        for (id, answer) in answers(FULL).iter().filter(|(id, _)| *id != "stage") {
            set.insert(id.clone(), answer.clone());
        }
        let err = summarize_answers(Locale::En, &set, date()).unwrap_err();
        assert_eq!(err.question(), "stage");
    }

    #[test]
    fn test_summarize_unknown_option_fails() {
        let mut set = answers(FULL);
        set.insert("audit_status", Answer::Single("someday".into()));
        let err = summarize_answers(Locale::En, &set, date()).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownOption { .. }));
    }

    #[test]
    fn test_summarize_ignores_unknown_question() {
        let mut set = answers(FULL);
        set.insert("team_size", Answer::Single("3".into()));
        assert!(summarize_answers(Locale::En, &set, date()).is_ok());
    }

    #[test]
    fn test_read_answers_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("answers.json");
        std::fs::write(&path, FULL).unwrap();
        let set = read_answers(&path).unwrap();
        assert_eq!(set.len(), 5);
        assert!(set.contains("concerns", "mev"));

        std::fs::write(&path, "not json").unwrap();
        assert!(read_answers(&path).is_err());
    }

    #[test]
    fn test_format_summary_json() {
        let doc = summarize_answers(Locale::Ja, &answers(FULL), date()).unwrap();
        let json = format_summary(&doc, SummaryFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["locale"], "ja");
        assert_eq!(value["generated"], "2026-10-19");
    }

    #[test]
    fn test_format_questions() {
        let content = Content::for_locale(Locale::En);
        let text = format_questions(&content, QuestionFormat::Text).unwrap();
        assert!(text.starts_with("1. What type of protocol are you building? [protocol_type] (one)"));
        assert!(text.contains("[concerns] (any)"));

        let json = format_questions(&content, QuestionFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 5);
        assert_eq!(value[3]["kind"], "checkbox");
    }
}
