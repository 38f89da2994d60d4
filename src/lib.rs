//! # rdex - element and attribute cross-reference index
//!
//! rdex scans a corpus of XML resource descriptors and builds a reverse
//! index from xpath-like keys (element paths, attribute paths, and a
//! few value-keyed forms) to the documents exhibiting them, rendered as
//! a linked reStructuredText document on stdout.
//!
//! ## Architecture
//!
//! - [`scan`] - Corpus discovery and identifier filtering
//! - [`extract`] - Streaming per-document key extraction
//! - [`special`] - Value-keyed rules (mixin, displayHint, property)
//! - [`index`] - Aggregation into the corpus-wide index
//! - [`render`] - Deterministic reStructuredText output
//! - [`config`] - Config file and CLI settings resolution
//!
//! ## Quick Start
//!
//! ```ignore
//! use chrono::Local;
//! use rdex::index::build_index;
//! use rdex::render::render_index;
//! use rdex::scan::CorpusScanner;
//! use rdex::special::default_rules;
//!
//! let scanner = CorpusScanner::new("/var/gavo/inputs", "rd");
//! let index = build_index(&scanner, &default_rules())?;
//! print!("{}", render_index(&index, "http://example.org/rds", "rd", Local::now()));
//! ```

pub mod config;
pub mod extract;
pub mod index;
pub mod render;
pub mod scan;
pub mod special;
