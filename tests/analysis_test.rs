//! Integration tests for model loading and the keyword/entity summarizer.

use std::sync::Arc;

use docfmt::infer::summary::frequent_words;
use docfmt::nlp::BlankModel;
use docfmt::render::value_to_json;
use docfmt::{load_model, Capability, DegradeReason, DocFormatter, Error, JsonFormat};

#[test]
fn test_load_known_model() {
    let model = load_model("en_core_rules").unwrap();
    assert_eq!(model.name(), "en_core_rules");
    assert_eq!(model.capability(), Capability::Full);
}

#[test]
fn test_load_falls_back_to_blank() {
    let model = load_model("en_core_web_sm").unwrap();
    assert_eq!(model.name(), "blank:en");
    assert_eq!(model.capability(), Capability::Basic);

    let explicit = load_model("blank:en").unwrap();
    assert_eq!(explicit.capability(), Capability::Basic);
}

#[test]
fn test_load_unknown_language_fails() {
    assert!(matches!(
        load_model("zz_core_news_sm"),
        Err(Error::ModelUnavailable(_))
    ));
}

#[test]
fn test_analyze_file_full() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.txt");
    std::fs::write(
        &path,
        "Dr. Smith joined Stanford University in 2019.\n\nThe effective method reduces the overall error.",
    )
    .unwrap();

    let formatter = DocFormatter::with_default_model().unwrap();
    let outcome = formatter.analyze_file(&path).unwrap();
    assert!(!outcome.is_degraded());

    let result = outcome.value;
    assert_eq!(result.sentence_count, 2);
    let labels: Vec<(&str, &str)> = result
        .entities
        .iter()
        .map(|e| (e.text.as_str(), e.label.as_str()))
        .collect();
    assert!(labels.contains(&("Stanford University", "ORG")));
    assert!(labels.contains(&("2019", "DATE")));
    assert!(result.noun_chunks.len() <= 50);
}

#[test]
fn test_analyze_basic_mode() {
    let formatter = DocFormatter::new(Arc::new(BlankModel::new("en")));
    let outcome = formatter.analyze_text("Rust is fast. Rust is safe! Is it fun? Yes, rust rules.");

    assert_eq!(outcome.reason(), Some(&DegradeReason::CapabilityUnavailable));
    let result = outcome.value;
    assert!(result.entities.is_empty());
    assert!(result.noun_chunks.is_empty());
    assert_eq!(result.sentence_count, 4);
    assert_eq!(result.token_count, 12);
    assert_eq!(result.keywords, vec!["rust", "fast", "safe", "rules"]);
}

#[test]
fn test_basic_keywords_never_short() {
    let text = "a an the of to it is be by on at Data data dataset, go! up; keyword keyword... x-ray";
    let keywords = frequent_words(text, 50);

    assert!(keywords.len() <= 50);
    assert!(keywords.iter().all(|k| k.chars().count() > 3));
    assert_eq!(keywords[0], "data");
    assert_eq!(keywords[1], "keyword");
    assert!(keywords.contains(&"xray".to_string()));
}

#[test]
fn test_analysis_json_keys() {
    let result = docfmt::analyze_text("Graph methods help researchers.").unwrap();
    let json = value_to_json(&result, JsonFormat::Compact).unwrap();

    for key in ["\"entities\"", "\"sentences\"", "\"tokens\"", "\"keywords\"", "\"noun_chunks\""] {
        assert!(json.contains(key), "missing {} in {}", key, json);
    }
    assert!(!json.contains('\n'));
}

#[test]
fn test_oracle_shared_across_threads() {
    let model = load_model("en_core_rules").unwrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let model = Arc::clone(&model);
            std::thread::spawn(move || {
                let text = format!("Section {}\n\nThe model is shared read-only.", i);
                model.parse(&text).unwrap().sentences.len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 2);
    }
}
