//! 分析結果の出力スキーマ（Gemini 方言: 大文字の type と propertyOrdering）
//!
//! 必須フィールドは常に返させ、カテゴリ固有のフィールドは任意にする。
//! OpenAI 互換プロバイダでは common::llm::openai_compat::to_json_schema で変換される。

use serde_json::{json, Map, Value};

/// 常に返させるトップレベルのフィールド
pub const REQUIRED_FIELDS: [&str; 12] = [
    "word",
    "category",
    "greeting",
    "pronunciation",
    "definition",
    "etymology",
    "wordFamily",
    "nookLibrary",
    "twinFlowers",
    "oppositeStones",
    "soundEffect",
    "example",
];

/// カテゴリに応じて返させるフィールド
pub const OPTIONAL_FIELDS: [&str; 4] = ["trickyPairs", "quiz", "vocabUpgrades", "grammar"];

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// 並び順の通りに properties と propertyOrdering を作る
fn object(fields: &[(&str, Value)]) -> Value {
    let mut properties = Map::new();
    for (name, schema) in fields {
        properties.insert((*name).to_string(), schema.clone());
    }
    let ordering: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "propertyOrdering": ordering,
    })
}

fn quiz(fields_in_order: &[&str]) -> Value {
    let fields: Vec<(&str, Value)> = fields_in_order
        .iter()
        .map(|name| {
            let schema = if *name == "options" {
                array_of(string())
            } else {
                string()
            };
            (*name, schema)
        })
        .collect();
    object(&fields)
}

/// 分析要求に添える出力スキーマ
pub fn analysis_schema() -> Value {
    let word_family = array_of(object(&[
        ("form", string()),
        ("level", string()),
        ("meaning", string()),
        ("morphology", string()),
        ("register", string()),
    ]));
    let nook_library = array_of(object(&[("phrase", string()), ("meaning", string())]));
    let twin_flowers = array_of(object(&[("synonym", string()), ("explanation", string())]));
    let tricky_pairs = array_of(object(&[("word", string()), ("difference", string())]));
    let vocab_upgrades = array_of(object(&[
        ("level", string()),
        ("text", string()),
        ("notes", string()),
    ]));
    let grammar = object(&[
        ("topic", string()),
        ("quickMap", array_of(string())),
        ("memoryTrick", string()),
        ("expertTrap", string()),
        (
            "practice",
            object(&[
                ("mcq", quiz(&["question", "options", "correctAnswer"])),
                ("rewrite", quiz(&["question", "correctAnswer"])),
            ]),
        ),
    ]);

    let mut schema = object(&[
        ("word", string()),
        ("category", string()),
        ("greeting", string()),
        ("pronunciation", string()),
        ("definition", string()),
        ("etymology", string()),
        ("wordFamily", word_family),
        ("nookLibrary", nook_library),
        ("twinFlowers", twin_flowers),
        ("oppositeStones", array_of(string())),
        ("soundEffect", string()),
        ("example", string()),
        ("trickyPairs", tricky_pairs),
        ("quiz", quiz(&["question", "correctAnswer", "options"])),
        ("vocabUpgrades", vocab_upgrades),
        ("grammar", grammar),
    ]);
    schema["required"] = json!(REQUIRED_FIELDS);
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_are_declared_properties() {
        let s = analysis_schema();
        let required: Vec<&str> = s["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, REQUIRED_FIELDS.to_vec());
        for name in REQUIRED_FIELDS.iter().chain(OPTIONAL_FIELDS.iter()) {
            assert!(s["properties"].get(*name).is_some(), "missing property {}", name);
        }
    }

    #[test]
    fn test_optional_fields_not_required() {
        let s = analysis_schema();
        let required = s["required"].as_array().unwrap();
        for name in OPTIONAL_FIELDS {
            assert!(!required.iter().any(|v| v == name));
        }
    }

    #[test]
    fn test_property_ordering_follows_declaration() {
        let s = analysis_schema();
        let ordering = s["propertyOrdering"].as_array().unwrap();
        assert_eq!(ordering.len(), 16);
        assert_eq!(ordering[0], "word");
        assert_eq!(ordering[15], "grammar");
        let mcq = &s["properties"]["grammar"]["properties"]["practice"]["properties"]["mcq"];
        assert_eq!(mcq["propertyOrdering"], json!(["question", "options", "correctAnswer"]));
        assert_eq!(mcq["properties"]["options"]["type"], "ARRAY");
    }
}
