pub mod config;
pub mod info;
pub mod replay;
pub mod synth;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use multitouch_input::{collect_all, JsonlSource};
use multitouch_model::event::{EventStreamHeader, PointerSnapshot};

/// Read a whole stream file, header included.
fn load_stream(path: &Path) -> anyhow::Result<(Option<EventStreamHeader>, Vec<PointerSnapshot>)> {
    let mut source = JsonlSource::open(path)
        .with_context(|| format!("Failed to open stream {}", path.display()))?;
    let snapshots = collect_all(&mut source)
        .with_context(|| format!("Failed to read stream {}", path.display()))?;
    Ok((source.header().cloned(), snapshots))
}
