use crate::tokenizer;
use crate::vault::Note;
use serde::{Deserialize, Serialize};

/// One indexed note: a raw content snapshot plus the metadata the scorer
/// and highlighter need. Keyed by `id`, the note's relative path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub file_name: String,
    pub path: String,
    pub content: String,
    /// Milliseconds since the epoch at the time of the snapshot.
    pub last_modified: i64,
    /// Deduplicated, sorted.
    pub tags: Vec<String>,
    /// Whitespace word count of `content`, the TF denominator.
    pub token_count: u32,
}

impl Document {
    pub fn from_note(id: &str, note: &Note) -> Self {
        let file_name = id.rsplit('/').next().unwrap_or(id).to_string();
        let mut tags = note.tags.clone();
        tags.sort();
        tags.dedup();
        Document {
            id: id.to_string(),
            file_name,
            path: id.to_string(),
            content: note.content.clone(),
            last_modified: note.last_modified,
            tags,
            token_count: u32::try_from(tokenizer::word_count(&note.content)).unwrap_or(u32::MAX),
        }
    }
}

/// One term's occurrences in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPosting {
    pub term: String,
    pub document_id: String,
    pub frequency: u32,
    /// Ordered zero-based indices into the document's post-stopword token
    /// stream.
    pub positions: Vec<u32>,
}

/// A matched line of context: the line's text and its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLine {
    pub text: String,
    pub position: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub file: String,
    pub file_name: String,
    pub path: String,
    pub score: f64,
    pub matches: Vec<MatchLine>,
}
