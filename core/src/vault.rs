use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;
use walkdir::WalkDir;

/// A note as handed over by the host's file layer.
#[derive(Debug, Clone)]
pub struct Note {
    pub content: String,
    pub tags: Vec<String>,
    /// Milliseconds since the epoch.
    pub last_modified: i64,
}

/// The host file-store contract. `read_note` returns `Ok(None)` for a
/// missing note so the indexing worker can treat deletes and renames as
/// ordinary queue entries.
pub trait Vault: Send + Sync {
    fn read_note(&self, id: &str) -> Result<Option<Note>>;
    fn list_notes(&self) -> Result<Vec<String>>;
}

const NOTE_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Filesystem vault rooted at a notes directory. Note ids are
/// forward-slash relative paths.
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl Vault for FsVault {
    fn read_note(&self, id: &str) -> Result<Option<Note>> {
        let path = self.root.join(id);
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let last_modified = fs::metadata(&path)?
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        let tags = extract_tags(&content);
        Ok(Some(Note {
            content,
            tags,
            last_modified,
        }))
    }

    fn list_notes(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        for entry in WalkDir::new(&self.root).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if !p.is_file() {
                continue;
            }
            let Some(ext) = p.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            if !NOTE_EXTENSIONS.contains(&ext) {
                continue;
            }
            if let Ok(rel) = p.strip_prefix(&self.root) {
                let id = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Tags from a YAML-ish frontmatter `tags:` entry plus inline `#hashtags`.
pub fn extract_tags(content: &str) -> Vec<String> {
    let mut tags = Vec::new();
    tags.extend(frontmatter_tags(content));
    for token in crate::tokenizer::token_stream(content) {
        if let Some(name) = token.strip_prefix('#') {
            if !name.is_empty() {
                tags.push(name.to_string());
            }
        }
    }
    tags.sort();
    tags.dedup();
    tags
}

fn frontmatter_tags(content: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut lines = content.lines();
    if lines.next().map(str::trim) != Some("---") {
        return tags;
    }
    let mut in_tags_list = false;
    for line in lines {
        let trimmed = line.trim();
        if trimmed == "---" {
            break;
        }
        if let Some(rest) = trimmed.strip_prefix("tags:") {
            let rest = rest.trim();
            if rest.is_empty() {
                in_tags_list = true;
                continue;
            }
            // inline form: tags: [a, b] or tags: a, b
            let rest = rest.trim_start_matches('[').trim_end_matches(']');
            tags.extend(
                rest.split(',')
                    .map(|t| t.trim().trim_start_matches('#').to_string())
                    .filter(|t| !t.is_empty()),
            );
            in_tags_list = false;
        } else if in_tags_list {
            if let Some(item) = trimmed.strip_prefix('-') {
                let item = item.trim().trim_start_matches('#');
                if !item.is_empty() {
                    tags.push(item.to_string());
                }
            } else {
                in_tags_list = false;
            }
        }
    }
    tags
}
