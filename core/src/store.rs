use crate::model::{Document, TermPosting};
use crate::tokenizer;
use anyhow::Result;
use sled::transaction::TransactionError;
use sled::Transactional;
use std::path::Path;

const SEP: u8 = 0;

fn posting_key(term: &str, document_id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(term.len() + 1 + document_id.len());
    key.extend_from_slice(term.as_bytes());
    key.push(SEP);
    key.extend_from_slice(document_id.as_bytes());
    key
}

fn posting_prefix(term: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(term.len() + 1);
    key.extend_from_slice(term.as_bytes());
    key.push(SEP);
    key
}

/// Transactional storage for documents and term postings.
///
/// Two sled trees: `documents` (id -> Document) and `postings`
/// (`term \0 doc_id` -> TermPosting). The posting keys a document owns are
/// derived by re-tokenizing its stored content snapshot, which is exactly
/// the text its current postings were built from, so deletes cascade
/// without scanning the whole posting space.
#[derive(Clone)]
pub struct DocumentStore {
    db: sled::Db,
    documents: sled::Tree,
    postings: sled::Tree,
}

impl DocumentStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_db(sled::open(path)?)
    }

    /// In-memory store for tests; nothing touches disk.
    pub fn temporary() -> Result<Self> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: sled::Db) -> Result<Self> {
        let documents = db.open_tree("documents")?;
        let postings = db.open_tree("postings")?;
        Ok(Self {
            db,
            documents,
            postings,
        })
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Idempotent upsert keyed by `document.id`. Does not touch postings;
    /// the indexing pipeline uses [`replace_document`](Self::replace_document)
    /// to keep both tables in step.
    pub fn put(&self, document: &Document) -> Result<()> {
        let value = bincode::serialize(document)?;
        self.documents.insert(document.id.as_bytes(), value)?;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<Document>> {
        match self.documents.get(id.as_bytes())? {
            Some(value) => Ok(Some(bincode::deserialize(&value)?)),
            None => Ok(None),
        }
    }

    /// Delete a document and cascade to all of its postings, atomically.
    /// A no-op for unknown ids.
    pub fn delete_document(&self, id: &str) -> Result<()> {
        let stale = self.owned_posting_keys(id)?;
        let doc_key = id.as_bytes().to_vec();
        let result: Result<(), TransactionError<()>> = (&self.documents, &self.postings)
            .transaction(|(documents, postings)| {
                documents.remove(doc_key.as_slice())?;
                for key in &stale {
                    postings.remove(key.as_slice())?;
                }
                Ok(())
            });
        result.map_err(storage_error)
    }

    /// Insert many postings in one atomic batch.
    pub fn bulk_add_terms(&self, postings: &[TermPosting]) -> Result<()> {
        let mut batch = sled::Batch::default();
        for posting in postings {
            let value = bincode::serialize(posting)?;
            batch.insert(posting_key(&posting.term, &posting.document_id), value);
        }
        self.postings.apply_batch(batch)?;
        Ok(())
    }

    /// Remove every posting owned by a document.
    pub fn delete_terms_by_document(&self, id: &str) -> Result<()> {
        let mut batch = sled::Batch::default();
        for key in self.owned_posting_keys(id)? {
            batch.remove(key);
        }
        self.postings.apply_batch(batch)?;
        Ok(())
    }

    /// Every posting whose term equals `term`, ordered by document id.
    pub fn query_terms_by_term(&self, term: &str) -> Result<Vec<TermPosting>> {
        let mut out = Vec::new();
        for item in self.postings.scan_prefix(posting_prefix(term)) {
            let (_, value) = item?;
            out.push(bincode::deserialize(&value)?);
        }
        Ok(out)
    }

    pub fn count_documents(&self) -> u64 {
        self.documents.len() as u64
    }

    /// Whether at least one document has ever been indexed.
    pub fn exists_any(&self) -> bool {
        self.documents.iter().next().is_some()
    }

    /// The whole per-document update in one transaction: drop the
    /// document's stale postings, upsert the document, insert the new
    /// posting set. A reader never observes the intermediate states.
    ///
    /// Stale keys are collected before the transaction opens; the indexing
    /// queue serializes writers, so they cannot change underneath it.
    pub fn replace_document(&self, document: &Document, postings: &[TermPosting]) -> Result<()> {
        let stale = self.owned_posting_keys(&document.id)?;
        let doc_key = document.id.as_bytes().to_vec();
        let doc_value = bincode::serialize(document)?;
        let mut encoded = Vec::with_capacity(postings.len());
        for posting in postings {
            let value = bincode::serialize(posting)?;
            encoded.push((posting_key(&posting.term, &posting.document_id), value));
        }
        let result: Result<(), TransactionError<()>> = (&self.documents, &self.postings)
            .transaction(|(documents, postings)| {
                for key in &stale {
                    postings.remove(key.as_slice())?;
                }
                documents.insert(doc_key.as_slice(), doc_value.clone())?;
                for (key, value) in &encoded {
                    postings.insert(key.as_slice(), value.clone())?;
                }
                Ok(())
            });
        result.map_err(storage_error)
    }

    /// Posting keys currently owned by a document, derived from its stored
    /// content snapshot.
    fn owned_posting_keys(&self, id: &str) -> Result<Vec<Vec<u8>>> {
        let Some(document) = self.get(id)? else {
            return Ok(Vec::new());
        };
        Ok(tokenizer::tokenize(&document.content)
            .into_keys()
            .map(|term| posting_key(&term, id))
            .collect())
    }
}

fn storage_error(err: TransactionError<()>) -> anyhow::Error {
    match err {
        TransactionError::Abort(()) => anyhow::anyhow!("transaction aborted"),
        TransactionError::Storage(e) => e.into(),
    }
}
