//! 分析の指示文を組み立てる
//!
//! 構成: ペルソナ → 言語ルール → 対象 → 選択カテゴリのルール → 共通ルール。
//! 語・発音・form・phrase は言語設定にかかわらず英語のまま返させる。

use crate::domain::{AnalysisCategory, AnalysisRequest, Language};

const PERSONA: &str = "\
Role: You are \"Isabelle\", the Academic Manager at \"Word Horizon\" island 🏝️.
Style: Friendly, sweet, use emojis (🌿, 🍎, ✨, 🐾) and sound effects (e.g., *Ta-da!*). Be concise and structured.
Source: Use only Cambridge Dictionary and academic grammar references.";

fn language_rule(language: Language) -> String {
    format!(
        "\
LANGUAGE RULE:
- ALL greetings, explanations, definitions, meanings, logic breakdowns and nuances MUST be written 100% in {lang}.
- Technical values stay in English regardless of language: 'word', 'pronunciation', 'form', 'phrase'.",
        lang = language.display_name()
    )
}

fn category_rules(category: AnalysisCategory) -> &'static str {
    match category {
        AnalysisCategory::WordFormation => "\
CATEGORY RULES (WORD_FORMATION):
- List EVERY variation of the word family from A1 to C2, one entry per form, in 'wordFamily'.
- Include advanced forms and affixes: -hearted, -worthy, -some, -esque, -proof, out-, counter-, over-, under-.
- For each entry explain the affix meaning in 'morphology' (logic breakdown).
- For each entry give the register (Formal / Informal / Literary) in 'register'.
- Add confusable forms to 'trickyPairs' when they exist.
- Create one gap-fill sentence in 'quiz'.",
        AnalysisCategory::IdiomsPhrasal => "\
CATEGORY RULES (IDIOMS_PHRASAL):
- List 5 to 10 items (idioms AND phrasal verbs) in 'nookLibrary', one entry per item.
- Create one gap-fill sentence in 'quiz'.",
        AnalysisCategory::Grammar => "\
CATEGORY RULES (GRAMMAR):
- The input is a grammar topic. Fill the 'grammar' block.
- 'quickMap': the formulas and rules as short bullet points.
- 'memoryTrick': one mnemonic to remember the rule.
- 'expertTrap': the common mistake examiners look for.
- 'practice': one multiple-choice question ('mcq' with 'options') and one sentence rewrite ('rewrite').
- 'definition' is a short, sweet introduction. Leave per-word fields (pronunciation, example, etymology, wordFamily, nookLibrary) empty.",
        AnalysisCategory::Challenge => "\
CATEGORY RULES (CHALLENGE):
- The input is a sentence. Fill 'vocabUpgrades' with at least one rewrite.
- First entry: { level: \"C2/Pro (Native)\", text: the sentence rewritten at native C2 level, notes: the specific vocabulary changes }.
- A second version may follow, but the C2 native upgrade comes first.
- Leave per-word fields (pronunciation, wordFamily, nookLibrary) empty.",
    }
}

fn general_rules(language: Language) -> String {
    format!(
        "\
GENERAL RULES:
- Output lists strictly as vertical entries for readability.
- 'example': a sweet, island-life themed sentence in {lang}.",
        lang = language.display_name()
    )
}

/// 要求から指示文を作る（純粋関数）
pub fn build_prompt(request: &AnalysisRequest) -> String {
    [
        PERSONA.to_string(),
        language_rule(request.language),
        format!(
            "Task: Analyze input \"{}\" in category \"{}\".",
            request.term,
            request.category.as_str()
        ),
        category_rules(request.category).to_string(),
        general_rules(request.language),
    ]
    .join("\n\n")
}
