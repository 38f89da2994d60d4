//! Aggregation of per-document key sets into the corpus-wide index.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::extract::gather_paths;
use crate::scan::CorpusScanner;
use crate::special::SpecialRule;

/// Reverse index from xpath-like key to the documents exhibiting it.
///
/// Ordered maps keep both the keys and the per-key document sets sorted
/// and deduplicated, so rendering is deterministic by construction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PathIndex {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `doc_id` exhibits `key`.
    pub fn add(&mut self, key: String, doc_id: &str) {
        self.entries.entry(key).or_default().insert(doc_id.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in lexicographic order with their document sets.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every document identifier referenced anywhere in the index,
    /// deduplicated and sorted.
    pub fn document_ids(&self) -> BTreeSet<&str> {
        self.entries
            .values()
            .flat_map(|docs| docs.iter().map(String::as_str))
            .collect()
    }
}

/// Build the aggregate index over the scanner's corpus, reporting
/// progress on stderr.
pub fn build_index(scanner: &CorpusScanner, rules: &[SpecialRule]) -> Result<PathIndex> {
    build_index_with_progress(scanner, rules, false)
}

/// Build the aggregate index, optionally reporting progress on stderr.
///
/// A document that fails extraction aborts the whole build: this is an
/// offline batch tool, and a malformed descriptor means the corpus
/// needs fixing. A truncated index would silently mislead readers.
pub fn build_index_with_progress(
    scanner: &CorpusScanner,
    rules: &[SpecialRule],
    silent: bool,
) -> Result<PathIndex> {
    let ids = scanner.document_ids()?;

    let progress = if !silent {
        let pb = ProgressBar::new(ids.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap(),
        );
        pb.set_message("Scanning descriptors...");
        Some(pb)
    } else {
        None
    };

    let mut index = PathIndex::new();
    for id in &ids {
        if let Some(pb) = &progress {
            pb.inc(1);
        }

        let path = scanner.resolve(id);
        if !path.is_file() {
            // Virtual entry with no physical backing; not an error.
            continue;
        }

        let content =
            fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let keys = gather_paths(&content, rules)
            .with_context(|| format!("malformed descriptor '{id}'"))?;
        for key in keys {
            index.add(key, id);
        }
        // content and keys dropped here, before the next descriptor
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok(index)
}
