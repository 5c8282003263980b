//! Replay a stream through the demo host.

use std::path::PathBuf;

use anyhow::Context;
use multitouch_common::config::AppConfig;
use multitouch_input::{EventSource, JsonlSource};

use crate::host::TouchHost;

pub fn run(config: &AppConfig, path: PathBuf, trace: bool, json: bool) -> anyhow::Result<()> {
    let mut source = JsonlSource::open(&path)
        .with_context(|| format!("Failed to open stream {}", path.display()))?;
    let mut host = TouchHost::from_config(config);

    let summary = if trace {
        while let Some(event) = source
            .poll()
            .with_context(|| format!("Failed to read stream {}", path.display()))?
        {
            host.on_touch(&event);
            let line = serde_json::json!({
                "t": event.timestamp_ms,
                "action": event.action,
                "gesturing": host.is_gesturing(),
                "state": host.state(),
            });
            println!("{line}");
        }
        host.summary()
    } else {
        host.replay(&mut source)
            .with_context(|| format!("Failed to replay {}", path.display()))?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let state = summary.state;
    println!("Replayed {} event(s) ({} ignored)", summary.events, summary.ignored);
    println!("  Scale: {:.4}", state.scale);
    println!("  Rotation: {:.2}°", state.rotation_degrees);
    println!("  Focus: ({:.1}, {:.1})", state.focus.x, state.focus.y);
    println!("  Alpha: {}", state.alpha);
    let m = summary.matrix;
    println!("  Matrix: [{:.4} {:.4} {:.2}; {:.4} {:.4} {:.2}]", m.a, m.b, m.tx, m.c, m.d, m.ty);
    Ok(())
}
