//! Write a scripted gesture stream.

use std::path::PathBuf;

use anyhow::Context;
use multitouch_input::{EventWriter, SyntheticGesture};
use multitouch_model::event::EventStreamHeader;

use crate::SynthKind;

pub fn run(
    kind: SynthKind,
    output: PathBuf,
    amount: Option<f64>,
    steps: u32,
    interval_ms: u64,
    radius: f64,
) -> anyhow::Result<()> {
    if steps == 0 {
        anyhow::bail!("--steps must be at least 1");
    }
    if interval_ms == 0 {
        anyhow::bail!("--interval-ms must be at least 1");
    }

    let gesture = match kind {
        SynthKind::Drag => SyntheticGesture::drag(amount.unwrap_or(200.0), 0.0),
        SynthKind::Pinch => {
            let factor = amount.unwrap_or(2.0);
            if factor <= 0.0 {
                anyhow::bail!("pinch factor must be positive, got {factor}");
            }
            SyntheticGesture::pinch(factor)
        }
        SynthKind::Rotate => SyntheticGesture::rotate(amount.unwrap_or(90.0)),
        SynthKind::Shove => SyntheticGesture::shove(amount.unwrap_or(100.0)),
    }
    .with_radius(radius)
    .with_steps(steps)
    .with_frame_interval(interval_ms);

    let snapshots = gesture.snapshots()?;
    let (width, height) = gesture.extent();
    let rate_hz = (1_000 / interval_ms).max(1) as u32;
    let header = EventStreamHeader::new(width, height, rate_hz);

    let mut writer = EventWriter::new(&output, &header)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    writer.write_all(&snapshots)?;
    writer.flush()?;

    println!(
        "Wrote {} snapshot(s) of a {kind:?} gesture to {}",
        writer.events_written(),
        writer.path().display()
    );
    Ok(())
}
