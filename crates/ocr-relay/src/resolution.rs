//! Two-source lookup of the text to show right now.
//!
//! The external recognizer may publish its latest result by writing a
//! hand-off file. When that file yields a non-empty first line it wins;
//! otherwise the newest record in the history answers. An empty answer is
//! still a successful resolution.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::store::ResultStore;

/// Default location of the hand-off file written by the recognizer.
pub const DEFAULT_HANDOFF_PATH: &str = "/tmp/ocr_result.txt";

/// Upper bound on bytes read from the hand-off file; longer lines are cut.
pub const MAX_HANDOFF_LINE_BYTES: u64 = 64 * 1024;

/// Where a resolved text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    HandoffFile,
    History,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub source: ResolutionSource,
}

/// Resolves the latest text from the hand-off file, falling back to the store.
#[derive(Debug, Clone)]
pub struct Resolver {
    handoff_path: PathBuf,
    store: Arc<ResultStore>,
}

impl Resolver {
    pub fn new(handoff_path: impl Into<PathBuf>, store: Arc<ResultStore>) -> Self {
        Self {
            handoff_path: handoff_path.into(),
            store,
        }
    }

    pub fn handoff_path(&self) -> &Path {
        &self.handoff_path
    }

    /// Run the lookup. Never fails and never mutates the store.
    pub fn resolve(&self) -> Resolved {
        let from_file = read_first_line(&self.handoff_path);
        if !from_file.is_empty() {
            tracing::debug!("Resolved OCR text from hand-off file: {}", from_file);
            return Resolved {
                text: from_file,
                source: ResolutionSource::HandoffFile,
            };
        }

        match self.store.latest() {
            Some(record) => {
                tracing::debug!("Resolved OCR text from history: {}", record.text());
                Resolved {
                    text: record.into_text(),
                    source: ResolutionSource::History,
                }
            }
            None => Resolved {
                text: String::new(),
                source: ResolutionSource::Empty,
            },
        }
    }
}

/// First line of `path` without its terminator; empty if the file cannot be read.
///
/// At most [`MAX_HANDOFF_LINE_BYTES`] are read. A missing file, an empty file,
/// an empty first line and undecodable bytes all produce the empty string.
pub fn read_first_line(path: &Path) -> String {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!("Hand-off file {} not available: {}", path.display(), e);
            return String::new();
        }
    };

    let mut line = String::new();
    if let Err(e) = BufReader::new(file.take(MAX_HANDOFF_LINE_BYTES)).read_line(&mut line) {
        tracing::debug!("Failed to read hand-off file {}: {}", path.display(), e);
        return String::new();
    }

    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
