//! `htmerge_core` inlines the local scripts and stylesheets referenced by a
//! html document, producing a single self-contained document.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Host document
//!   → split on `\n` into lines
//!   → Classifier (script reference, stylesheet reference or plain)
//!   → Resolver (extract the attribute value, clean it into a path, load it)
//!   → Engine (append the inline block or the untouched line to the output)
//! ```
//!
//! Detection is deliberately line oriented substring matching, not html
//! parsing. A tag split over two lines is left as is.
//!
//! ## Modules
//!
//! - [`classify`] — Per-line classification and the script/stylesheet tag
//!   detectors.
//! - [`resolver`] — Path extraction, path cleaning and resource loading.
//! - [`config`] — Configuration loading from `htmerge.toml`.
//!
//! ## Key Types
//!
//! - [`MergeOutput`] — The merged text plus the inlined references and any
//!   recovered problems.
//! - [`ResourceLoader`] — Read access to referenced files. [`FsLoader`] reads
//!   from disk.
//! - [`LineClassifier`] — Decides what each line is. [`TagClassifier`] is the
//!   substring implementation.
//! - [`MergeConfig`] — Configuration loaded from `htmerge.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use htmerge_core::{MergeConfig, merge_file, write_output};
//! use std::path::Path;
//!
//! let config = MergeConfig::default();
//! let output = merge_file(Path::new("index.html"), &config).unwrap();
//!
//! if output.has_failures() {
//!     eprintln!("some resources could not be read");
//! }
//!
//! write_output(Path::new("merged_index.html"), &output).unwrap();
//! ```

pub use classify::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use resolver::*;

pub mod classify;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod resolver;

#[cfg(test)]
mod __fixtures;
