//! Answers and input capture

use super::content::{InputKind, Question};
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A captured answer. Serializes as a bare string or array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multi(Vec<String>),
}

impl Answer {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(_) => None,
        }
    }

    /// True if this answer is, or includes, `value`
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Self::Single(v) => v == value,
            Self::Multi(values) => values.iter().any(|v| v == value),
        }
    }
}

/// Answers keyed by question id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, Answer>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Answer> {
        self.0.get(id)
    }

    pub fn insert(&mut self, id: impl Into<String>, answer: Answer) {
        self.0.insert(id.into(), answer);
    }

    pub fn single(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(Answer::as_single)
    }

    pub fn contains(&self, id: &str, value: &str) -> bool {
        self.get(id).is_some_and(|a| a.contains(value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Answer)> {
        self.0.iter()
    }
}

/// Uncommitted input of the question currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(Option<String>),
    Multi(Vec<String>),
}

impl Selection {
    /// Empty input matching the question's kind
    pub fn empty_for(question: &Question) -> Self {
        match question.kind {
            InputKind::Select => Self::Single(None),
            InputKind::Checkbox => Self::Multi(Vec::new()),
        }
    }

    /// Input pre-populated from a previously captured answer
    pub fn restore(question: &Question, answer: Option<&Answer>) -> Self {
        match (question.kind, answer) {
            (InputKind::Select, Some(Answer::Single(v))) => Self::Single(Some(v.clone())),
            (InputKind::Checkbox, Some(Answer::Multi(values))) => Self::Multi(values.clone()),
            _ => Self::empty_for(question),
        }
    }

    /// Choose a single value (select) or flip it (checkbox)
    pub fn toggle(&mut self, value: &str) {
        match self {
            Self::Single(current) => *current = Some(value.to_string()),
            Self::Multi(values) => {
                if let Some(pos) = values.iter().position(|v| v == value) {
                    values.remove(pos);
                } else {
                    values.push(value.to_string());
                }
            }
        }
    }

    pub fn is_selected(&self, value: &str) -> bool {
        match self {
            Self::Single(current) => current.as_deref() == Some(value),
            Self::Multi(values) => values.iter().any(|v| v == value),
        }
    }

    /// Selection equivalent of a stored answer, used to replay answer files
    pub fn from_answer(answer: &Answer) -> Self {
        match answer {
            Answer::Single(v) => Self::Single(Some(v.clone())),
            Answer::Multi(values) => Self::Multi(values.clone()),
        }
    }
}

/// Validate the active input against its question and turn it into an answer.
///
/// Single-select needs one known, non-empty value. Multi-select needs at least
/// one known value; the result is deduplicated and kept in option order.
pub fn capture(question: &Question, selection: &Selection) -> Result<Answer, ValidationError> {
    let missing = || ValidationError::MissingAnswer {
        question: question.id.to_string(),
    };
    let unknown = |value: &str| ValidationError::UnknownOption {
        question: question.id.to_string(),
        value: value.to_string(),
    };

    match (question.kind, selection) {
        (InputKind::Select, Selection::Single(value)) => {
            let value = value.as_deref().filter(|v| !v.is_empty()).ok_or_else(missing)?;
            if !question.has_option(value) {
                return Err(unknown(value));
            }
            Ok(Answer::Single(value.to_string()))
        }
        (InputKind::Checkbox, Selection::Multi(values)) => {
            if let Some(bad) = values.iter().find(|v| !question.has_option(v)) {
                return Err(unknown(bad));
            }
            let checked: Vec<String> = question
                .options
                .iter()
                .filter(|opt| values.iter().any(|v| v == opt.value))
                .map(|opt| opt.value.to_string())
                .collect();
            if checked.is_empty() {
                return Err(missing());
            }
            Ok(Answer::Multi(checked))
        }
        // Input of the wrong shape never reaches a valid answer
        _ => Err(missing()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::content::QUESTIONS;

    fn question(id: &str) -> &'static Question {
        QUESTIONS.iter().find(|q| q.id == id).unwrap()
    }

    #[test]
    fn test_capture_single_select() {
        let q = question("stage");
        let answer = capture(q, &Selection::Single(Some("mainnet".into()))).unwrap();
        assert_eq!(answer, Answer::Single("mainnet".into()));
    }

    #[test]
    fn test_capture_single_select_empty() {
        let q = question("stage");
        assert_eq!(
            capture(q, &Selection::Single(None)),
            Err(ValidationError::MissingAnswer {
                question: "stage".into()
            })
        );
        assert!(capture(q, &Selection::Single(Some(String::new()))).is_err());
    }

    #[test]
    fn test_capture_single_select_unknown_value() {
        let q = question("stage");
        let err = capture(q, &Selection::Single(Some("beta".into()))).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownOption { .. }));
    }

    #[test]
    fn test_capture_multi_select_empty_is_rejected() {
        let q = question("concerns");
        assert!(capture(q, &Selection::Multi(vec![])).is_err());
    }

    #[test]
    fn test_capture_multi_select_orders_and_dedupes() {
        let q = question("concerns");
        let sel = Selection::Multi(vec!["oracle".into(), "economic".into(), "oracle".into()]);
        assert_eq!(
            capture(q, &sel).unwrap(),
            Answer::Multi(vec!["economic".into(), "oracle".into()])
        );
    }

    #[test]
    fn test_capture_wrong_shape() {
        assert!(capture(question("concerns"), &Selection::Single(Some("oracle".into()))).is_err());
        assert!(capture(question("stage"), &Selection::Multi(vec!["design".into()])).is_err());
    }

    #[test]
    fn test_selection_toggle() {
        let mut single = Selection::Single(None);
        single.toggle("amm");
        single.toggle("l2");
        assert!(single.is_selected("l2"));
        assert!(!single.is_selected("amm"));

        let mut multi = Selection::Multi(vec![]);
        multi.toggle("mev");
        multi.toggle("oracle");
        multi.toggle("mev");
        assert_eq!(multi, Selection::Multi(vec!["oracle".into()]));
    }

    #[test]
    fn test_selection_restore() {
        let q = question("concerns");
        let answer = Answer::Multi(vec!["mev".into()]);
        assert_eq!(
            Selection::restore(q, Some(&answer)),
            Selection::Multi(vec!["mev".into()])
        );
        assert_eq!(Selection::restore(q, None), Selection::Multi(vec![]));
    }

    #[test]
    fn test_answer_set_json_shape() {
        let json = r#"{"protocol_type":"amm","concerns":["economic","oracle"]}"#;
        let answers: AnswerSet = serde_json::from_str(json).unwrap();
        assert_eq!(answers.single("protocol_type"), Some("amm"));
        assert!(answers.contains("concerns", "oracle"));
        assert!(!answers.contains("concerns", "mev"));
        assert_eq!(answers.single("concerns"), None);
        assert_eq!(answers.len(), 2);
    }
}
