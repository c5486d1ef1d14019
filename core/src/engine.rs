use crate::highlight::extract_matches;
use crate::model::{Document, SearchResult, TermPosting};
use crate::paginate::{paginate, Page};
use crate::queue::IndexQueue;
use crate::scorer::score_documents;
use crate::store::DocumentStore;
use crate::tokenizer;
use crate::vault::Vault;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Exclusion rules the host supplies: notes whose content starts with a
/// command prefix and notes living under the conversation folder never
/// enter the index.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub command_prefixes: Vec<String>,
    pub conversation_folder: Option<String>,
}

impl EngineConfig {
    pub fn is_command_content(&self, content: &str) -> bool {
        let head = content.trim_start();
        self.command_prefixes
            .iter()
            .any(|p| !p.is_empty() && head.starts_with(p.as_str()))
    }

    pub fn is_conversation_path(&self, path: &str) -> bool {
        self.conversation_folder
            .as_deref()
            .is_some_and(|folder| !folder.is_empty() && path.starts_with(folder))
    }
}

/// The engine façade: wires the vault, the transactional store, and the
/// single-consumer indexing queue, and exposes the search surface.
///
/// Public entry points are failure boundaries. Errors are logged as
/// warnings and converted to safe defaults; nothing here panics or
/// propagates.
pub struct SearchEngine {
    store: DocumentStore,
    vault: Arc<dyn Vault>,
    config: EngineConfig,
    queue: IndexQueue,
}

impl SearchEngine {
    pub fn new(store: DocumentStore, vault: Arc<dyn Vault>, config: EngineConfig) -> Self {
        let queue = {
            let store = store.clone();
            let vault = Arc::clone(&vault);
            let config = config.clone();
            IndexQueue::spawn(move |id| index_one(&store, vault.as_ref(), &config, id))
        };
        Self {
            store,
            vault,
            config,
            queue,
        }
    }

    /// Rebuild the queue from every currently eligible note, discarding
    /// whatever was pending.
    pub fn index_all_files(&self) {
        match self.vault.list_notes() {
            Ok(ids) => {
                let eligible: Vec<String> = ids
                    .into_iter()
                    .filter(|id| !self.config.is_conversation_path(id))
                    .collect();
                tracing::info!(queued = eligible.len(), "rebuilding index queue");
                self.queue.replace_all(eligible);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to list notes, index rebuild skipped");
            }
        }
    }

    /// Host notification: a note was created or modified.
    pub fn on_file_changed(&self, path: &str) {
        if self.config.is_conversation_path(path) {
            return;
        }
        // Command-style content is excluded up front and, if previously
        // indexed, actively removed. The worker re-checks at pop time with
        // the freshest content.
        match self.vault.read_note(path) {
            Ok(Some(note)) if self.config.is_command_content(&note.content) => {
                if let Err(err) = self.store.delete_document(path) {
                    tracing::warn!(document = %path, error = %err, "failed to remove excluded document");
                }
            }
            _ => self.queue.enqueue(path),
        }
    }

    /// Host notification: a note was deleted. The worker observes the
    /// missing file at pop time and drops the document with its postings.
    pub fn on_file_deleted(&self, path: &str) {
        self.queue.enqueue(path);
    }

    /// Host notification: a note moved. The old id is dropped; the new id
    /// is indexed if it passes the exclusion filters.
    pub fn on_file_renamed(&self, old_path: &str, new_path: &str) {
        self.queue.enqueue(old_path);
        self.on_file_changed(new_path);
    }

    /// Ranked TF-IDF search, truncated to `limit` results. Empty or
    /// stopwords-only queries return an empty list.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        let mut results = self.search_all(query);
        results.truncate(limit);
        results
    }

    /// Ranked search sliced into a 1-based page.
    pub fn search_page(&self, query: &str, page: usize, page_size: usize) -> Page<SearchResult> {
        paginate(self.search_all(query), page, page_size)
    }

    /// Whether at least one document has ever been indexed.
    pub fn is_index_built(&self) -> bool {
        self.store.exists_any()
    }

    pub fn document_count(&self) -> u64 {
        self.store.count_documents()
    }

    /// Block until every queued indexing pass has completed. Used by the
    /// CLI after a bulk build and by tests.
    pub fn wait_for_pending(&self) {
        self.queue.wait_idle();
    }

    fn search_all(&self, query: &str) -> Vec<SearchResult> {
        match self.search_inner(query) {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(query, error = %err, "search failed, returning no results");
                Vec::new()
            }
        }
    }

    fn search_inner(&self, query: &str) -> Result<Vec<SearchResult>> {
        let mut terms: Vec<String> = tokenizer::tokenize(query).into_keys().collect();
        terms.sort();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let mut term_hits: Vec<Vec<TermPosting>> = Vec::with_capacity(terms.len());
        let mut candidates: HashSet<String> = HashSet::new();
        for term in &terms {
            let postings = self.store.query_terms_by_term(term)?;
            for posting in &postings {
                candidates.insert(posting.document_id.clone());
            }
            term_hits.push(postings);
        }
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut documents: HashMap<String, Document> = HashMap::with_capacity(candidates.len());
        for id in candidates {
            match self.store.get(&id)? {
                Some(document) => {
                    documents.insert(id, document);
                }
                None => {
                    tracing::warn!(document = %id, "posting without document, skipping");
                }
            }
        }

        let ranked = score_documents(&term_hits, self.store.count_documents(), &documents);
        Ok(ranked
            .into_iter()
            .filter_map(|hit| {
                let document = documents.get(&hit.document_id)?;
                Some(SearchResult {
                    file: document.id.clone(),
                    file_name: document.file_name.clone(),
                    path: document.path.clone(),
                    score: hit.score,
                    matches: extract_matches(&document.content, &hit.positions),
                })
            })
            .collect())
    }
}

/// One pass of the indexing pipeline, run by the queue worker. Content is
/// read at pop time, so a rapid double-edit collapses into one pass over
/// the freshest state.
fn index_one(store: &DocumentStore, vault: &dyn Vault, config: &EngineConfig, id: &str) -> Result<()> {
    let Some(note) = vault.read_note(id)? else {
        return store.delete_document(id);
    };
    if config.is_conversation_path(id) || config.is_command_content(&note.content) {
        return store.delete_document(id);
    }
    let document = Document::from_note(id, &note);
    let postings = build_postings(id, &document.content);
    store.replace_document(&document, &postings)
}

fn build_postings(document_id: &str, content: &str) -> Vec<TermPosting> {
    let mut postings: Vec<TermPosting> = tokenizer::tokenize(content)
        .into_iter()
        .map(|(term, stats)| TermPosting {
            term,
            document_id: document_id.to_string(),
            frequency: stats.count,
            positions: stats.positions,
        })
        .collect();
    postings.sort_by(|a, b| a.term.cmp(&b.term));
    postings
}
