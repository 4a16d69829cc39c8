//! Risk Summary Synthesis
//!
//! Turns a finished answer set into a risk / recommendation report by walking
//! an ordered rule table. Each matching rule appends its fragments; nothing is
//! ever removed or reordered, so the output order is the rule order.

use super::answers::AnswerSet;
use super::content::{Content, Locale, Text, ids};
use chrono::NaiveDate;
use serde::Serialize;

/// When a rule fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Single-select answer equals one of `values`
    AnyOf {
        question: &'static str,
        values: &'static [&'static str],
    },
    /// Multi-select answer includes `value`
    Includes {
        question: &'static str,
        value: &'static str,
    },
}

impl Condition {
    pub fn matches(&self, answers: &AnswerSet) -> bool {
        match self {
            Self::AnyOf { question, values } => answers
                .single(question)
                .is_some_and(|answer| values.contains(&answer)),
            Self::Includes { question, value } => answers.contains(question, value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub when: Condition,
    pub risk: Option<Text>,
    pub recommendation: Option<Text>,
}

/// Rule table, evaluated top to bottom
pub const RULES: &[Rule] = &[
    Rule {
        when: Condition::AnyOf {
            question: ids::PROTOCOL_TYPE,
            values: &["amm"],
        },
        risk: Some(Text {
            en: "Pricing formula invariants and MEV extraction potential",
            ja: "価格設定式の不変条件とMEV抽出の可能性",
        }),
        recommendation: None,
    },
    Rule {
        when: Condition::AnyOf {
            question: ids::PROTOCOL_TYPE,
            values: &["bridge"],
        },
        risk: Some(Text {
            en: "Validator collusion risks and message replay attacks",
            ja: "バリデータ共謀リスクとメッセージリプレイ攻撃",
        }),
        recommendation: None,
    },
    Rule {
        when: Condition::AnyOf {
            question: ids::PROTOCOL_TYPE,
            values: &["l2"],
        },
        risk: Some(Text {
            en: "Sequencer centralization and data availability assumptions",
            ja: "シーケンサーの中央集権化とデータ可用性の仮定",
        }),
        recommendation: None,
    },
    Rule {
        when: Condition::AnyOf {
            question: ids::VALUE_AT_RISK,
            values: &["high", "very_high"],
        },
        risk: Some(Text {
            en: "High TVL increases economic attack motivation",
            ja: "高いTVLは経済的攻撃の動機を増加させます",
        }),
        recommendation: Some(Text {
            en: "Consider formal verification of critical invariants",
            ja: "形式的検証による重要な不変条件の証明を検討",
        }),
    },
    Rule {
        when: Condition::Includes {
            question: ids::CONCERNS,
            value: "economic",
        },
        risk: Some(Text {
            en: "Incentive misalignments may lead to unexpected behavior",
            ja: "インセンティブの不整合により予期しない動作が発生する可能性",
        }),
        recommendation: Some(Text {
            en: "Game-theoretic analysis under various scenarios recommended",
            ja: "様々なシナリオでのゲーム理論分析が推奨されます",
        }),
    },
    Rule {
        when: Condition::Includes {
            question: ids::CONCERNS,
            value: "oracle",
        },
        risk: Some(Text {
            en: "Dependence on oracle failures or data feed manipulation",
            ja: "オラクル障害またはデータフィード操作への依存",
        }),
        recommendation: None,
    },
    Rule {
        when: Condition::AnyOf {
            question: ids::STAGE,
            values: &["design", "prototype"],
        },
        risk: None,
        recommendation: Some(Text {
            en: "Design-level analysis is most effective at this early stage",
            ja: "早期段階での設計レベル分析が最も効果的です",
        }),
    },
    Rule {
        when: Condition::AnyOf {
            question: ids::AUDIT_STATUS,
            values: &["completed"],
        },
        risk: None,
        recommendation: Some(Text {
            en: "Code audit complete, but design-level review provides additional assurance",
            ja: "コード監査は完了していますが、設計レベルのレビューで追加の保証が得られます",
        }),
    },
];

/// Placeholder for metadata fields that were never answered
const NOT_AVAILABLE: &str = "N/A";

/// Synthesized report. Derived from answers; never edited after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryDocument {
    pub locale: Locale,
    pub generated: NaiveDate,
    pub protocol_type: Option<String>,
    pub stage: Option<String>,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Evaluate [`RULES`] against `answers`.
///
/// Pure: the same content, answers and date always give the same document.
pub fn synthesize(content: &Content, answers: &AnswerSet, generated: NaiveDate) -> SummaryDocument {
    let mut risks = Vec::new();
    let mut recommendations = Vec::new();

    for rule in RULES.iter().filter(|rule| rule.when.matches(answers)) {
        if let Some(risk) = &rule.risk {
            risks.push(content.text(risk).to_string());
        }
        if let Some(rec) = &rule.recommendation {
            recommendations.push(content.text(rec).to_string());
        }
    }

    tracing::debug!(
        risks = risks.len(),
        recommendations = recommendations.len(),
        "Synthesized risk summary"
    );

    SummaryDocument {
        locale: content.locale,
        generated,
        protocol_type: answers.single(ids::PROTOCOL_TYPE).map(str::to_string),
        stage: answers.single(ids::STAGE).map(str::to_string),
        risks,
        recommendations,
    }
}

impl SummaryDocument {
    /// Render the fixed Markdown template for this document's locale
    pub fn to_markdown(&self) -> String {
        let t = Content::for_locale(self.locale).template;
        let bullets = |items: &[String]| {
            items
                .iter()
                .map(|item| format!("- {item}"))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "# {title}\n\
             \n\
             **{generated_label}:** {generated}  \n\
             **{protocol_label}:** {protocol}  \n\
             **{stage_label}:** {stage}\n\
             \n\
             ## {risks_heading}\n\
             \n\
             {risks}\n\
             \n\
             ## {recs_heading}\n\
             \n\
             {recs}\n\
             \n\
             ---\n\
             \n\
             {note}\n",
            title = t.title,
            generated_label = t.generated,
            generated = self.generated.format("%Y-%m-%d"),
            protocol_label = t.protocol_type,
            protocol = self.protocol_type.as_deref().unwrap_or(NOT_AVAILABLE),
            stage_label = t.stage,
            stage = self.stage.as_deref().unwrap_or(NOT_AVAILABLE),
            risks_heading = t.risks_heading,
            risks = bullets(&self.risks),
            recs_heading = t.recommendations_heading,
            recs = bullets(&self.recommendations),
            note = t.note,
        )
    }
}
