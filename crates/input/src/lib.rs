//! Multitouch Input
//!
//! Everything that produces pointer snapshots for the detectors:
//!
//! - **Adapter:** turns per-contact touch reports into snapshots with
//!   down / pointer-down / move / pointer-up / up actions
//! - **Streams:** JSONL files with a `# {header}` first line, read through
//!   [`JsonlSource`] and written with [`writer::EventWriter`]
//! - **Synthetic:** scripted drag, pinch, rotate, and shove gestures
//!
//! Sources share the pull-based [`EventSource`] trait so a host can drive
//! detectors from any of them.

pub mod adapter;
pub mod synthetic;
pub mod writer;

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use multitouch_common::error::{MultitouchError, MultitouchResult};
use multitouch_model::event::{EventStreamHeader, PointerSnapshot};

pub use adapter::{ContactPhase, ContactReport, TouchAdapter};
pub use synthetic::{GestureShape, SyntheticGesture};
pub use writer::EventWriter;

/// A pull-based producer of pointer snapshots.
pub trait EventSource {
    /// Next snapshot, or `None` once the source is exhausted.
    fn poll(&mut self) -> MultitouchResult<Option<PointerSnapshot>>;

    /// Source name for logging.
    fn name(&self) -> &str;
}

/// Drain a source into a vector.
pub fn collect_all(source: &mut dyn EventSource) -> MultitouchResult<Vec<PointerSnapshot>> {
    let mut snapshots = Vec::new();
    while let Some(snapshot) = source.poll()? {
        snapshots.push(snapshot);
    }
    tracing::debug!(source = source.name(), count = snapshots.len(), "Source drained");
    Ok(snapshots)
}

/// Snapshots already held in memory, e.g. from a synthetic gesture.
#[derive(Debug, Default)]
pub struct MemorySource {
    name: String,
    pending: VecDeque<PointerSnapshot>,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, snapshots: Vec<PointerSnapshot>) -> Self {
        Self {
            name: name.into(),
            pending: snapshots.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl EventSource for MemorySource {
    fn poll(&mut self) -> MultitouchResult<Option<PointerSnapshot>> {
        Ok(self.pending.pop_front())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Reads snapshots line by line from a JSONL stream.
///
/// Blank lines and `#` comments are skipped; a `#` line holding a JSON
/// object before the first snapshot is taken as the stream header.
pub struct JsonlSource {
    name: String,
    reader: Box<dyn BufRead>,
    header: Option<EventStreamHeader>,
    line: usize,
    seen_snapshot: bool,
}

impl JsonlSource {
    /// Open a stream file.
    pub fn open(path: impl AsRef<Path>) -> MultitouchResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(MultitouchError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path)?;
        Ok(Self::from_reader(
            path.display().to_string(),
            BufReader::new(file),
        ))
    }

    pub fn from_reader(name: impl Into<String>, reader: impl BufRead + 'static) -> Self {
        Self {
            name: name.into(),
            reader: Box::new(reader),
            header: None,
            line: 0,
            seen_snapshot: false,
        }
    }

    /// Header parsed so far; available once the first line has been read.
    pub fn header(&self) -> Option<&EventStreamHeader> {
        self.header.as_ref()
    }

    /// Number of lines consumed.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl EventSource for JsonlSource {
    fn poll(&mut self) -> MultitouchResult<Option<PointerSnapshot>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.reader.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let line = buf.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(comment) = line.strip_prefix('#') {
                let comment = comment.trim();
                if !self.seen_snapshot && self.header.is_none() && comment.starts_with('{') {
                    let header = serde_json::from_str(comment)
                        .map_err(|e| MultitouchError::stream(self.line, e.to_string()))?;
                    self.header = Some(header);
                }
                continue;
            }

            let snapshot: PointerSnapshot = serde_json::from_str(line)
                .map_err(|e| MultitouchError::stream(self.line, e.to_string()))?;
            self.seen_snapshot = true;
            return Ok(Some(snapshot));
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
