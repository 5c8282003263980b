//! Show stream information.

use std::path::PathBuf;

use multitouch_common::clock::ms_to_secs;
use multitouch_model::sequence::sequence_stats;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let (header, snapshots) = super::load_stream(&path)?;
    let stats = sequence_stats(&snapshots);

    println!("Stream: {}", path.display());
    if let Some(h) = &header {
        println!("  Schema: {}", h.schema_version);
        println!("  Recorded: {}", h.epoch_wall);
        println!("  Surface: {}x{}", h.surface_width, h.surface_height);
        println!("  Sample rate: {} Hz", h.pointer_sample_rate_hz);
    }
    println!();

    println!("Contents:");
    println!("  Snapshots: {}", stats.snapshots);
    println!("  Gestures: {}", stats.gestures);
    println!("  Moves: {}", stats.moves);
    println!("  Max pointers: {}", stats.max_pointers);
    println!("  Duration: {:.3}s", ms_to_secs(stats.duration_ms));

    Ok(())
}
