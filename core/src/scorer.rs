use crate::model::{Document, TermPosting};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Term frequency: occurrences over the document's word count, 0 for an
/// empty document.
pub fn tf(frequency: u32, token_count: u32) -> f64 {
    if token_count == 0 {
        return 0.0;
    }
    f64::from(frequency) / f64::from(token_count)
}

/// Inverse document frequency: ln(N / df), defined as 0 when no document
/// contains the term.
pub fn idf(total_docs: u64, docs_with_term: u64) -> f64 {
    if docs_with_term == 0 {
        return 0.0;
    }
    (total_docs as f64 / docs_with_term as f64).ln()
}

/// Relevance accumulated for one candidate document, with the matched
/// token positions merged across query terms for highlighting.
#[derive(Debug, Clone)]
pub struct DocScore {
    pub document_id: String,
    pub score: f64,
    pub positions: Vec<u32>,
}

/// Score every document holding at least one posting for a query term.
///
/// `term_hits` carries one posting list per query term; its length per
/// entry is that term's document frequency. Documents absent from every
/// list are not candidates and are not scored at all. Output is sorted
/// descending by score with ascending document id as tie-break.
pub fn score_documents(
    term_hits: &[Vec<TermPosting>],
    total_docs: u64,
    documents: &HashMap<String, Document>,
) -> Vec<DocScore> {
    let mut hits: HashMap<String, DocScore> = HashMap::new();
    for postings in term_hits {
        let term_idf = idf(total_docs, postings.len() as u64);
        for posting in postings {
            let Some(document) = documents.get(&posting.document_id) else {
                continue;
            };
            let entry = hits
                .entry(posting.document_id.clone())
                .or_insert_with(|| DocScore {
                    document_id: posting.document_id.clone(),
                    score: 0.0,
                    positions: Vec::new(),
                });
            entry.score += tf(posting.frequency, document.token_count) * term_idf;
            entry.positions.extend_from_slice(&posting.positions);
        }
    }
    let mut ranked: Vec<DocScore> = hits.into_values().collect();
    for hit in &mut ranked {
        hit.positions.sort_unstable();
        hit.positions.dedup();
    }
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.document_id.cmp(&b.document_id))
    });
    ranked
}
