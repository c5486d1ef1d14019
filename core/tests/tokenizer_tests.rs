use notegrep_core::tokenizer::{token_stream, tokenize, word_count};
use std::collections::HashSet;

#[test]
fn it_preserves_contractions() {
    let terms = tokenize("I'm not going to break the don't and won't contractions");
    assert!(terms.contains_key("i'm"));
    assert!(terms.contains_key("don't"));
    assert!(terms.contains_key("won't"));
    assert!(!terms.contains_key("don"));
    assert!(!terms.contains_key("won"));
}

#[test]
fn it_preserves_diacritics() {
    let terms = tokenize("Tiếng Việt có nhiều dấu");
    assert!(terms.contains_key("tiếng"));
    assert!(terms.contains_key("việt"));
    assert!(terms.contains_key("có"));
    assert!(terms.contains_key("nhiều"));
    assert!(terms.contains_key("dấu"));
}

#[test]
fn it_keeps_hashtags_as_single_terms() {
    let terms = tokenize("Text with #hashtags and #multiple-tags");
    assert!(terms.contains_key("#hashtags"));
    assert!(terms.contains_key("#multiple-tags"));
}

#[test]
fn it_keeps_numbers_and_drops_symbols() {
    let terms = tokenize("numbers 123 and symbols @#$%");
    assert!(terms.contains_key("123"));
    assert!(terms.contains_key("#"));
    assert!(!terms.contains_key("@"));
    assert!(!terms.contains_key("$"));
    assert!(!terms.contains_key("%"));
}

#[test]
fn it_filters_stopwords() {
    let terms = tokenize("The quick brown fox and the lazy dog");
    assert!(!terms.contains_key("the"));
    assert!(!terms.contains_key("and"));
    assert!(terms.contains_key("quick"));
    assert!(terms.contains_key("lazy"));
}

#[test]
fn empty_and_noise_inputs_yield_empty_maps() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \n\t  ").is_empty());
    assert!(tokenize("@$%^&*()!").is_empty());
    assert!(tokenize("the and of to").is_empty());
}

#[test]
fn tokenizing_is_idempotent_on_plain_ascii() {
    let text = "simple plain lowercase words repeated words";
    let first: HashSet<String> = tokenize(text).into_keys().collect();
    let rejoined = token_stream(text).join(" ");
    let second: HashSet<String> = tokenize(&rejoined).into_keys().collect();
    assert_eq!(first, second);
}

#[test]
fn counts_and_positions_aggregate_per_term() {
    let terms = tokenize("alpha beta alpha gamma alpha");
    assert_eq!(terms["alpha"].count, 3);
    assert_eq!(terms["alpha"].positions, vec![0, 2, 4]);
    assert_eq!(terms["beta"].positions, vec![1]);
}

#[test]
fn word_count_counts_raw_whitespace_words() {
    assert_eq!(word_count("the quick brown fox"), 4);
    assert_eq!(word_count(""), 0);
    assert_eq!(word_count("  spaced   out  "), 2);
}
