//! 分析結果のドメイン型
//!
//! 外部サービスはフラットな camelCase の JSON（`AnalysisWire`）を返す。
//! ドメイン側では共通フィールド（`AnalysisBase`）とカテゴリ別の中身（`CategoryDetail`）に分け、
//! 「どのカテゴリにどのフィールドがあるか」を型で表す。カテゴリは要求側のものを使う。

use crate::domain::AnalysisCategory;
use common::error::Error;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFamilyMember {
    pub form: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub meaning: String,
    /// 接辞の意味の説明
    #[serde(default)]
    pub morphology: Option<String>,
    /// Formal / Informal / Literary
    #[serde(default)]
    pub register: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhraseEntry {
    pub phrase: String,
    #[serde(default)]
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SynonymEntry {
    pub synonym: String,
    #[serde(default)]
    pub explanation: String,
}

/// 紛らわしい語とその違い
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfusablePair {
    pub word: String,
    #[serde(default)]
    pub difference: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub question: String,
    pub correct_answer: String,
    /// 多肢選択の選択肢（穴埋めなら空）
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpgradeVersion {
    /// 例: "C2/Pro (Native)"
    #[serde(default)]
    pub level: String,
    pub text: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GrammarPractice {
    pub mcq: Quiz,
    pub rewrite: Quiz,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarBlock {
    pub topic: String,
    #[serde(default)]
    pub quick_map: Vec<String>,
    #[serde(default)]
    pub memory_trick: String,
    #[serde(default)]
    pub expert_trap: String,
    pub practice: GrammarPractice,
}

/// 外部サービスが返す JSON そのままの形
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisWire {
    pub word: String,
    /// サービス側のエコー。使わず要求カテゴリで上書きする
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub greeting: String,
    #[serde(default)]
    pub pronunciation: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default)]
    pub etymology: String,
    #[serde(default)]
    pub word_family: Vec<WordFamilyMember>,
    #[serde(default)]
    pub nook_library: Vec<PhraseEntry>,
    #[serde(default)]
    pub twin_flowers: Vec<SynonymEntry>,
    #[serde(default)]
    pub opposite_stones: Vec<String>,
    #[serde(default)]
    pub sound_effect: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub tricky_pairs: Vec<ConfusablePair>,
    #[serde(default)]
    pub quiz: Option<Quiz>,
    #[serde(default)]
    pub vocab_upgrades: Vec<UpgradeVersion>,
    #[serde(default)]
    pub grammar: Option<GrammarBlock>,
}

/// 全カテゴリ共通のフィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisBase {
    pub term: String,
    pub greeting: String,
    pub pronunciation: String,
    pub definition: String,
    pub etymology: String,
    pub synonyms: Vec<SynonymEntry>,
    pub antonyms: Vec<String>,
    pub sound_effect: String,
    pub example: String,
    pub confusables: Vec<ConfusablePair>,
}

/// カテゴリごとに意味を持つフィールド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryDetail {
    WordFormation {
        word_family: Vec<WordFamilyMember>,
        quiz: Option<Quiz>,
    },
    IdiomsPhrasal {
        phrases: Vec<PhraseEntry>,
        quiz: Option<Quiz>,
    },
    Grammar(GrammarBlock),
    Challenge { upgrades: Vec<UpgradeVersion> },
}

impl CategoryDetail {
    pub fn category(&self) -> AnalysisCategory {
        match self {
            Self::WordFormation { .. } => AnalysisCategory::WordFormation,
            Self::IdiomsPhrasal { .. } => AnalysisCategory::IdiomsPhrasal,
            Self::Grammar(_) => AnalysisCategory::Grammar,
            Self::Challenge { .. } => AnalysisCategory::Challenge,
        }
    }
}

/// 表示中の分析結果。成功のたびに丸ごと置き換え、部分的に書き換えない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub base: AnalysisBase,
    pub detail: CategoryDetail,
}

impl AnalysisResult {
    /// ワイヤレコードを要求カテゴリで解釈する。
    /// GRAMMAR で grammar ブロックが無い、CHALLENGE で書き換えが 1 つも無い応答は不正とする。
    pub fn from_wire(wire: AnalysisWire, requested: AnalysisCategory) -> Result<Self, Error> {
        let detail = match requested {
            AnalysisCategory::WordFormation => CategoryDetail::WordFormation {
                word_family: wire.word_family,
                quiz: wire.quiz,
            },
            AnalysisCategory::IdiomsPhrasal => CategoryDetail::IdiomsPhrasal {
                phrases: wire.nook_library,
                quiz: wire.quiz,
            },
            AnalysisCategory::Grammar => CategoryDetail::Grammar(wire.grammar.ok_or_else(|| {
                Error::json("Malformed response: GRAMMAR result without grammar block")
            })?),
            AnalysisCategory::Challenge => {
                if wire.vocab_upgrades.is_empty() {
                    return Err(Error::json(
                        "Malformed response: CHALLENGE result without vocabUpgrades",
                    ));
                }
                CategoryDetail::Challenge {
                    upgrades: wire.vocab_upgrades,
                }
            }
        };
        Ok(Self {
            base: AnalysisBase {
                term: wire.word,
                greeting: wire.greeting,
                pronunciation: wire.pronunciation,
                definition: wire.definition,
                etymology: wire.etymology,
                synonyms: wire.twin_flowers,
                antonyms: wire.opposite_stones,
                sound_effect: wire.sound_effect,
                example: wire.example,
                confusables: wire.tricky_pairs,
            },
            detail,
        })
    }

    pub fn term(&self) -> &str {
        &self.base.term
    }

    pub fn category(&self) -> AnalysisCategory {
        self.detail.category()
    }

    /// 空文字なら None
    pub fn sound_effect(&self) -> Option<&str> {
        Some(self.base.sound_effect.as_str()).filter(|s| !s.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(json: &str) -> AnalysisWire {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_from_wire_stamps_requested_category() {
        let w = wire(r#"{"word":"Heart","category":"GRAMMAR","wordFamily":[{"form":"hearty","level":"B2","meaning":"warm"}]}"#);
        let r = AnalysisResult::from_wire(w, AnalysisCategory::WordFormation).unwrap();
        assert_eq!(r.category(), AnalysisCategory::WordFormation);
        match r.detail {
            CategoryDetail::WordFormation { ref word_family, .. } => {
                assert_eq!(word_family[0].form, "hearty");
                assert!(word_family[0].morphology.is_none());
            }
            _ => panic!("expected word formation"),
        }
    }

    #[test]
    fn test_from_wire_grammar_requires_block() {
        let w = wire(r#"{"word":"Inversion"}"#);
        let err = AnalysisResult::from_wire(w, AnalysisCategory::Grammar).unwrap_err();
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_from_wire_grammar_block() {
        let w = wire(
            r#"{"word":"Inversion","grammar":{"topic":"Inversion","quickMap":["Never + aux + S"],
            "memoryTrick":"Flip it!","expertTrap":"No inversion after 'only if' clause start",
            "practice":{"mcq":{"question":"Q1","options":["a","b"],"correctAnswer":"a"},
            "rewrite":{"question":"Q2","correctAnswer":"A2"}}}}"#,
        );
        let r = AnalysisResult::from_wire(w, AnalysisCategory::Grammar).unwrap();
        match r.detail {
            CategoryDetail::Grammar(ref g) => {
                assert_eq!(g.quick_map.len(), 1);
                assert_eq!(g.practice.mcq.options, vec!["a", "b"]);
                assert!(g.practice.rewrite.options.is_empty());
            }
            _ => panic!("expected grammar"),
        }
    }

    #[test]
    fn test_from_wire_challenge_requires_upgrade() {
        let w = wire(r#"{"word":"I am happy","vocabUpgrades":[]}"#);
        assert!(AnalysisResult::from_wire(w, AnalysisCategory::Challenge).is_err());

        let w = wire(r#"{"word":"I am happy","vocabUpgrades":[{"level":"C2/Pro (Native)","text":"I am elated","notes":"elated"}]}"#);
        let r = AnalysisResult::from_wire(w, AnalysisCategory::Challenge).unwrap();
        assert_eq!(r.category(), AnalysisCategory::Challenge);
    }

    #[test]
    fn test_sound_effect_blank_is_none() {
        let w = wire(r#"{"word":"Blue","soundEffect":"  "}"#);
        let r = AnalysisResult::from_wire(w, AnalysisCategory::IdiomsPhrasal).unwrap();
        assert_eq!(r.sound_effect(), None);
    }

    #[test]
    fn test_wire_without_word_is_error() {
        assert!(serde_json::from_str::<AnalysisWire>(r#"{"greeting":"hi"}"#).is_err());
    }
}
