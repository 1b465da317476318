mod common;

use std::sync::Arc;

use codefence::theme::{Theme, ThemeSpec};
use codefence::HighlighterCache;

use common::{initialized_pipeline, test_pipeline};

#[test]
fn second_initialization_returns_the_same_instance() {
    let pipeline = test_pipeline();
    let first = pipeline
        .initialize_highlighter(&ThemeSpec::default())
        .unwrap();
    let second = pipeline
        .initialize_highlighter(&ThemeSpec::default())
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn first_caller_wins_on_theme_choice() {
    let pipeline = test_pipeline();
    let first = pipeline
        .initialize_highlighter(&ThemeSpec::Name("github-dark".to_string()))
        .unwrap();
    let second = pipeline
        .initialize_highlighter(&ThemeSpec::Name("github-light".to_string()))
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.theme().name, "GitHub Dark");
}

#[test]
fn concurrent_first_calls_share_one_construction() {
    let cache = Arc::new(HighlighterCache::new());
    let spec = ThemeSpec::default();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let spec = spec.clone();
            std::thread::spawn(move || cache.get_or_init(&spec).unwrap())
        })
        .collect();

    let instances: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for instance in &instances[1..] {
        assert!(Arc::ptr_eq(&instances[0], instance));
    }
}

#[test]
fn unknown_theme_name_yields_theme_load_error() {
    let pipeline = test_pipeline();
    let err = pipeline
        .initialize_highlighter(&ThemeSpec::Name("not-a-real-theme".to_string()))
        .unwrap_err();
    assert_eq!(err.name, "not-a-real-theme");
    assert!(err.to_string().contains("not-a-real-theme"));
}

#[test]
fn failed_initialization_does_not_poison_the_cache() {
    let pipeline = test_pipeline();
    assert!(pipeline
        .initialize_highlighter(&ThemeSpec::Name("bogus".to_string()))
        .is_err());
    // A later retry with a valid theme still succeeds
    let highlighter = pipeline
        .initialize_highlighter(&ThemeSpec::default())
        .unwrap();
    assert_eq!(highlighter.theme().name, "Nord Dark");
}

#[test]
fn loaded_theme_object_skips_name_resolution() {
    let pipeline = test_pipeline();
    let theme = Theme::from_builtin("github-light").unwrap();
    let highlighter = pipeline
        .initialize_highlighter(&ThemeSpec::Loaded(theme))
        .unwrap();
    assert_eq!(highlighter.theme().name, "GitHub Light");
}

#[test]
fn tokenization_is_stable_for_identical_input() {
    let pipeline = initialized_pipeline();
    let highlighter = pipeline.highlighter().unwrap();
    let code = "function add(a, b) {\n  return a + b;\n}";
    assert_eq!(
        highlighter.tokenize(code, "javascript"),
        highlighter.tokenize(code, "javascript")
    );
}
