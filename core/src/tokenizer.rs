use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Everything outside this class becomes a space: letters and digits in
    // any script, both apostrophe variants (contractions), '#' (tags),
    // '_' and '-' (multi-word tags), and whitespace.
    static ref SCRUB: Regex = Regex::new(r"[^\p{L}\p{N}'’#_\-\s]").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","also","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","could","did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","him","his","how",
            "if","in","into","is","it","its","just",
            "more","most","my","no","nor","not","now",
            "of","off","on","once","only","or","other","our","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","them","then","there","these","they","this","those","through","to","too",
            "under","until","up","very","was","we","were","what","when","where","which","while","who","whom","why","will","with",
            "you","your",
            // markdown noise that survives the character scrub
            "-","--","---","_","__","___",
        ];
        words.iter().copied().collect()
    };
}

/// Aggregated statistics for one term in one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermStats {
    pub count: u32,
    /// Zero-based indices into the post-stopword token stream.
    pub positions: Vec<u32>,
}

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// The ordered stream of normalized, stopword-filtered tokens.
///
/// Splitting a text line by line and concatenating the per-line streams
/// yields the same stream as tokenizing the whole text, since newlines are
/// whitespace to the scrub step. The highlighter relies on this.
pub fn token_stream(text: &str) -> Vec<String> {
    let normalized = text.nfc().collect::<String>().to_lowercase();
    let scrubbed = SCRUB.replace_all(&normalized, " ");
    scrubbed
        .split_whitespace()
        .filter(|t| !is_stopword(t))
        .map(|t| t.to_string())
        .collect()
}

/// Tokenize text into term -> {count, positions}. Positions index the
/// post-stopword stream. Empty, symbols-only, or stopwords-only input
/// yields an empty map.
pub fn tokenize(text: &str) -> HashMap<String, TermStats> {
    let mut terms: HashMap<String, TermStats> = HashMap::new();
    for (pos, token) in token_stream(text).into_iter().enumerate() {
        let entry = terms.entry(token).or_insert_with(|| TermStats {
            count: 0,
            positions: Vec::new(),
        });
        entry.count += 1;
        entry.positions.push(pos as u32);
    }
    terms
}

/// Raw whitespace word count, the TF denominator for a document.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let terms = tokenize("Quick quick brown fox");
        assert_eq!(terms["quick"].count, 2);
        assert_eq!(terms["brown"].count, 1);
    }

    #[test]
    fn positions_index_post_stopword_stream() {
        let terms = tokenize("the quick brown fox");
        assert_eq!(terms["quick"].positions, vec![0]);
        assert_eq!(terms["brown"].positions, vec![1]);
        assert_eq!(terms["fox"].positions, vec![2]);
    }
}
