//! Append-only JSONL writer for snapshot streams.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use multitouch_common::error::MultitouchResult;
use multitouch_model::event::{EventStreamHeader, PointerSnapshot};

/// Snapshots between forced flushes.
const FLUSH_EVERY: u64 = 1000;

/// Writes snapshots to a JSONL file, one per line, after a `# {header}` line.
pub struct EventWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    events_written: u64,
}

impl EventWriter {
    /// Create (or truncate) `path` and write the header line.
    pub fn new(path: impl Into<PathBuf>, header: &EventStreamHeader) -> MultitouchResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "# {}", serde_json::to_string(header)?)?;

        tracing::debug!(path = %path.display(), "Event stream opened");
        Ok(Self {
            writer,
            path,
            events_written: 0,
        })
    }

    pub fn write_snapshot(&mut self, snapshot: &PointerSnapshot) -> MultitouchResult<()> {
        writeln!(self.writer, "{}", serde_json::to_string(snapshot)?)?;
        self.events_written += 1;
        if self.events_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }
        Ok(())
    }

    pub fn write_all(&mut self, snapshots: &[PointerSnapshot]) -> MultitouchResult<()> {
        snapshots.iter().try_for_each(|s| self.write_snapshot(s))
    }

    pub fn flush(&mut self) -> MultitouchResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn events_written(&self) -> u64 {
        self.events_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to flush event stream");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collect_all, JsonlSource};
    use multitouch_model::event::PointerSample;

    #[test]
    fn test_written_stream_reads_back() {
        let dir = std::env::temp_dir().join("multitouch_test_writer");
        let _ = std::fs::remove_dir_all(&dir);

        let path = dir.join("nested").join("stream.jsonl");
        let header = EventStreamHeader::with_epoch("2026-01-01T00:00:00Z", 800, 600, 120);
        let snapshots = vec![
            PointerSnapshot::down(0, 10.0, 10.0),
            PointerSnapshot::moved(8, vec![PointerSample::new(0, 12.0, 10.0, 0.9)]),
            PointerSnapshot::up(16, vec![PointerSample::new(0, 12.0, 10.0, 0.9)]),
        ];

        {
            let mut writer = EventWriter::new(&path, &header).unwrap();
            writer.write_all(&snapshots).unwrap();
            assert_eq!(writer.events_written(), 3);
            assert_eq!(writer.path(), path.as_path());
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# {"));
        assert_eq!(content.lines().count(), 4);

        let mut source = JsonlSource::open(&path).unwrap();
        let read_back = collect_all(&mut source).unwrap();
        assert_eq!(read_back, snapshots);
        assert_eq!(source.header(), Some(&header));

        std::fs::remove_dir_all(&dir).ok();
    }
}
