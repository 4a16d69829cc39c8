//! Wizard Content
//!
//! The question set, UI strings, and summary template, keyed by locale.
//! Both locales share ids, option values and rule conditions; only the
//! human-readable text differs, so everything lives in one table and is
//! resolved through [`Text::get`].

use serde::Serialize;

/// Display language of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ja,
}

impl Locale {
    /// Resolve a language tag the way a page `lang` attribute is read.
    ///
    /// Any tag mentioning `ja` or `jp` selects Japanese; anything else,
    /// including empty or garbage input, falls back to English.
    pub fn from_lang_attr(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.contains("ja") || tag.contains("jp") {
            Self::Ja
        } else {
            Self::En
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
        }
    }
}

/// A string available in every supported locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Text {
    pub en: &'static str,
    pub ja: &'static str,
}

impl Text {
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.en,
            Locale::Ja => self.ja,
        }
    }
}

/// How a question collects its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Exactly one value from the option set
    Select,
    /// One or more values from the option set
    Checkbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub prompt: Text,
    pub kind: InputKind,
    pub options: &'static [QuestionOption],
}

impl Question {
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|opt| opt.value == value)
    }
}

const fn opt(value: &'static str, en: &'static str, ja: &'static str) -> QuestionOption {
    QuestionOption {
        value,
        label: Text { en, ja },
    }
}

/// Question ids referenced by the summary rules
pub mod ids {
    pub const PROTOCOL_TYPE: &str = "protocol_type";
    pub const STAGE: &str = "stage";
    pub const VALUE_AT_RISK: &str = "value_at_risk";
    pub const CONCERNS: &str = "concerns";
    pub const AUDIT_STATUS: &str = "audit_status";
}

/// The questionnaire, in presentation order
pub const QUESTIONS: &[Question] = &[
    Question {
        id: ids::PROTOCOL_TYPE,
        prompt: Text {
            en: "What type of protocol are you building?",
            ja: "プロトコルタイプは何ですか？",
        },
        kind: InputKind::Select,
        options: &[
            opt("amm", "AMM / DEX", "AMM / DEX"),
            opt("lending", "Lending / Borrowing", "レンディング / ボローイング"),
            opt("bridge", "Cross-chain bridge", "クロスチェーンブリッジ"),
            opt("l2", "L2 / Rollup", "L2 / ロールアップ"),
            opt("governance", "Governance / DAO", "ガバナンス / DAO"),
            opt("other", "Other", "その他"),
        ],
    },
    Question {
        id: ids::STAGE,
        prompt: Text {
            en: "What stage is your protocol at?",
            ja: "現在の開発段階は？",
        },
        kind: InputKind::Select,
        options: &[
            opt("design", "Design phase (no code yet)", "設計段階（コードなし）"),
            opt("prototype", "Prototype", "プロトタイプ"),
            opt("testnet", "Testnet", "テストネット"),
            opt("mainnet", "Live on mainnet", "メインネット稼働中"),
        ],
    },
    Question {
        id: ids::VALUE_AT_RISK,
        prompt: Text {
            en: "Expected TVL (Total Value Locked)?",
            ja: "予想されるTVL（ロック総額）は？",
        },
        kind: InputKind::Select,
        options: &[
            opt("low", "Under $1M", "$1M未満"),
            opt("medium", "$1M - $50M", "$1M - $50M"),
            opt("high", "$50M - $500M", "$50M - $500M"),
            opt("very_high", "Over $500M", "$500M以上"),
        ],
    },
    Question {
        id: ids::CONCERNS,
        prompt: Text {
            en: "What areas concern you most? (select all that apply)",
            ja: "最も懸念している領域は？（複数選択可）",
        },
        kind: InputKind::Checkbox,
        options: &[
            opt("economic", "Economic incentives and fees", "経済的インセンティブと手数料"),
            opt("oracle", "Oracles and data feeds", "オラクルとデータフィード"),
            opt("governance", "Governance and permissions", "ガバナンスと権限"),
            opt("mev", "MEV and ordering", "MEVと順序付け"),
            opt(
                "edge_cases",
                "Edge cases and boundary conditions",
                "エッジケースと境界条件",
            ),
            opt(
                "composability",
                "Interactions with other protocols",
                "他のプロトコルとの相互作用",
            ),
        ],
    },
    Question {
        id: ids::AUDIT_STATUS,
        prompt: Text {
            en: "Have you had a code audit?",
            ja: "コード監査を受けましたか？",
        },
        kind: InputKind::Select,
        options: &[
            opt("none", "No, not yet", "いいえ、まだです"),
            opt("planned", "Planned", "計画中です"),
            opt("completed", "Yes, completed", "はい、完了しました"),
        ],
    },
];

/// Fixed UI copy for one locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiStrings {
    pub intro: &'static str,
    pub start: &'static str,
    pub next: &'static str,
    pub prev: &'static str,
    pub finish: &'static str,
    pub download: &'static str,
    pub restart: &'static str,
    pub progress: &'static str,
    pub of: &'static str,
    pub placeholder: &'static str,
    pub select_answer: &'static str,
    pub summary_title: &'static str,
    pub summary_subtitle: &'static str,
    pub request_analysis: &'static str,
    pub contact_url: &'static str,
    pub zoom: &'static str,
    pub close: &'static str,
    pub saved_to: &'static str,
}

/// Labels interpolated into the Markdown summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryTemplate {
    pub title: &'static str,
    pub generated: &'static str,
    pub protocol_type: &'static str,
    pub stage: &'static str,
    pub risks_heading: &'static str,
    pub recommendations_heading: &'static str,
    pub note: &'static str,
}

const EN_STRINGS: UiStrings = UiStrings {
    intro: "This assessment takes about 2 minutes. You'll receive a customized risk summary and recommendations based on your answers.",
    start: "Start Assessment",
    next: "Next",
    prev: "Previous",
    finish: "Generate Risk Summary",
    download: "Download Summary",
    restart: "Start New Assessment",
    progress: "Step",
    of: "of",
    placeholder: "Select...",
    select_answer: "Please select an answer",
    summary_title: "Risk Summary Complete",
    summary_subtitle: "Preliminary assessment based on your answers",
    request_analysis: "Request Full Analysis",
    contact_url: "https://inferara.com/en/contact/#request-analysis",
    zoom: "Preview",
    close: "Close",
    saved_to: "Saved to",
};

const JA_STRINGS: UiStrings = UiStrings {
    intro: "この評価には約2分かかります。回答に基づいて、カスタマイズされたリスクサマリーと推奨事項を提供します。",
    start: "評価を開始",
    next: "次へ",
    prev: "前へ",
    finish: "リスクサマリーを生成",
    download: "サマリーをダウンロード",
    restart: "新規評価を開始",
    progress: "ステップ",
    of: "/",
    placeholder: "選択してください...",
    select_answer: "回答を選択してください",
    summary_title: "リスクサマリー完了",
    summary_subtitle: "回答に基づいた予備的な評価です",
    request_analysis: "完全な分析をリクエスト",
    contact_url: "https://inferara.com/jp/contact/#request-analysis",
    zoom: "プレビュー",
    close: "閉じる",
    saved_to: "保存先",
};

const EN_TEMPLATE: SummaryTemplate = SummaryTemplate {
    title: "Protocol Risk Summary",
    generated: "Generated",
    protocol_type: "Protocol Type",
    stage: "Stage",
    risks_heading: "Key Risk Areas",
    recommendations_heading: "Recommendations",
    note: "**Note:** This is a preliminary assessment. For comprehensive analysis, [contact Inferara](https://inferara.com/en/contact/#request-analysis).",
};

const JA_TEMPLATE: SummaryTemplate = SummaryTemplate {
    title: "プロトコルリスクサマリー",
    generated: "生成日",
    protocol_type: "プロトコルタイプ",
    stage: "ステージ",
    risks_heading: "主要なリスク領域",
    recommendations_heading: "推奨事項",
    note: "**注:** これは簡易評価です。包括的な分析については、[Inferaraにお問い合わせください](https://inferara.com/jp/contact/#request-analysis)。",
};

/// Everything the engine needs for one locale, resolved once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Content {
    pub locale: Locale,
    pub questions: &'static [Question],
    pub strings: &'static UiStrings,
    pub template: &'static SummaryTemplate,
}

impl Content {
    pub fn for_locale(locale: Locale) -> Self {
        let (strings, template) = match locale {
            Locale::En => (&EN_STRINGS, &EN_TEMPLATE),
            Locale::Ja => (&JA_STRINGS, &JA_TEMPLATE),
        };
        Self {
            locale,
            questions: QUESTIONS,
            strings,
            template,
        }
    }

    pub fn question(&self, index: usize) -> Option<&'static Question> {
        self.questions.get(index)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    /// Shorthand for a [`Text`] in this content's locale
    pub fn text(&self, text: &Text) -> &'static str {
        text.get(self.locale)
    }
}

impl Default for Content {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en", Locale::En)]
    #[case("en-US", Locale::En)]
    #[case("", Locale::En)]
    #[case("fr", Locale::En)]
    #[case("???", Locale::En)]
    #[case("ja", Locale::Ja)]
    #[case("ja-JP", Locale::Ja)]
    #[case("jp", Locale::Ja)]
    #[case("ja_JP.UTF-8", Locale::Ja)]
    #[case("  JA  ", Locale::Ja)]
    fn test_locale_from_lang_attr(#[case] tag: &str, #[case] expected: Locale) {
        assert_eq!(Locale::from_lang_attr(tag), expected);
    }

    #[test]
    fn test_question_ids_in_order() {
        let order: Vec<&str> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(
            order,
            vec!["protocol_type", "stage", "value_at_risk", "concerns", "audit_status"]
        );
    }

    #[test]
    fn test_only_concerns_is_multi_select() {
        for q in QUESTIONS {
            let expected = if q.id == ids::CONCERNS {
                InputKind::Checkbox
            } else {
                InputKind::Select
            };
            assert_eq!(q.kind, expected, "unexpected kind for {}", q.id);
        }
    }

    #[test]
    fn test_every_text_is_translated() {
        for q in QUESTIONS {
            assert!(!q.prompt.en.is_empty() && !q.prompt.ja.is_empty());
            assert!(!q.options.is_empty());
            for o in q.options {
                assert!(!o.label.en.is_empty() && !o.label.ja.is_empty(), "{}", o.value);
            }
        }
    }

    #[test]
    fn test_option_lookup() {
        let stage = &QUESTIONS[1];
        assert!(stage.has_option("mainnet"));
        assert!(!stage.has_option("beta"));
    }

    #[test]
    fn test_content_for_locale() {
        let en = Content::for_locale(Locale::En);
        let ja = Content::for_locale(Locale::Ja);
        assert_eq!(en.strings.next, "Next");
        assert_eq!(ja.strings.next, "次へ");
        assert_eq!(en.question_count(), 5);
        assert_eq!(en.last_index(), 4);
        assert_eq!(ja.text(&QUESTIONS[0].options[1].label), "レンディング / ボローイング");
        assert!(en.question(5).is_none());
    }
}
