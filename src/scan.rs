//! Corpus discovery for the descriptor store.
//!
//! Descriptors live as files under a single inputs directory; the
//! identifier of a document is its store-relative path without the
//! extension, joined with `/`. Identifiers that would corrupt generated
//! link markup (leading punctuation, whitespace, dots) are not public
//! and are skipped without comment, as are identifiers whose backing
//! file has no physical presence.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::Result;
use ignore::WalkBuilder;
use regex::Regex;

/// Identifiers must be safe to embed in reStructuredText link targets.
static PUBLIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][\w/]*$").expect("valid identifier pattern"));

/// Enumerates descriptor documents under a configured store directory.
pub struct CorpusScanner {
    inputs_dir: PathBuf,
    extension: String,
}

impl CorpusScanner {
    pub fn new(inputs_dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            inputs_dir: inputs_dir.into(),
            extension: extension.to_string(),
        }
    }

    /// Whether an identifier is eligible for the public index.
    pub fn is_public_id(id: &str) -> bool {
        PUBLIC_ID.is_match(id)
    }

    /// Enumerate document identifiers under the store, sorted.
    ///
    /// Non-public identifiers (system entries like `__system__/adql`,
    /// editor leftovers with funky characters) are silently skipped;
    /// they are routine, not errors. Unreadable directory entries are
    /// skipped the same way.
    pub fn document_ids(&self) -> Result<Vec<String>> {
        let walker = WalkBuilder::new(&self.inputs_dir)
            .hidden(true)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .build();

        let mut ids: Vec<String> = walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| self.id_for_path(entry.path()))
            .filter(|id| Self::is_public_id(id))
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Map an identifier to its backing file in the store.
    pub fn resolve(&self, id: &str) -> PathBuf {
        self.inputs_dir.join(format!("{}.{}", id, self.extension))
    }

    /// Derive the identifier for a store file, or None for files that
    /// are not descriptors (wrong extension, outside the store).
    fn id_for_path(&self, path: &Path) -> Option<String> {
        if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
            return None;
        }
        let rel = path.strip_prefix(&self.inputs_dir).ok()?;
        let stem = rel.with_extension("");
        let parts: Vec<&str> = stem
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<_>>()?;
        Some(parts.join("/"))
    }
}
