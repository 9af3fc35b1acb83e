//! Test fixtures and factory functions for creating test data.

use drill_core::CardRecord;
use hanyu_drills_terminal::content::{Selection, ViewType};

/// Vocabulary file with one lesson holding two dialogue groups.
pub const VOCABULARY_JSON: &str = r#"{
    "Section 1": {
        "Lesson 1": {
            "Dialogue 1": [
                { "simplified": "走", "pinyin": "zǒu", "english": "to walk" },
                { "simplified": "路人", "pinyin": "lùrén", "english": "pedestrian" }
            ],
            "Dialogue 2": [
                { "simplified": "你好", "traditional": "你好", "pinyin": "nǐ hǎo", "english": "hello" }
            ]
        },
        "Lesson 2": {
            "Dialogue 1": []
        }
    }
}"#;

/// Grammar file with a structure field.
pub const GRAMMAR_JSON: &str = r#"{
    "Section 2": {
        "Lesson 5": {
            "Pattern A": [
                { "simplified": "因为", "pinyin": "yīnwèi", "english": "because", "structure": "因为……所以……" }
            ]
        }
    }
}"#;

/// The two-card deck used by the walk/pedestrian scenarios.
pub fn walk_and_pedestrian() -> Vec<CardRecord> {
    vec![
        CardRecord::new("走", "zǒu", "to walk"),
        CardRecord::new("路人", "lùrén", "pedestrian"),
    ]
}

pub fn hello() -> Vec<CardRecord> {
    vec![CardRecord::new("你好", "nǐ hǎo", "hello")]
}

/// `n` distinct generated records.
pub fn numbered(n: usize) -> Vec<CardRecord> {
    (0..n)
        .map(|i| CardRecord::new(format!("字{i}"), format!("zi{i}"), format!("word {i}")))
        .collect()
}

pub fn vocabulary_selection(lesson: &str, dialogue: &str) -> Selection {
    Selection {
        view_type: Some(ViewType::Vocabulary),
        section: Some("Section 1".to_string()),
        lesson: Some(lesson.to_string()),
        dialogue: Some(dialogue.to_string()),
    }
}
