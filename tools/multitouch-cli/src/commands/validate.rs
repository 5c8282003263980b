//! Validate a touch stream file.

use std::path::PathBuf;

use multitouch_model::sequence::validate_sequence;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating stream at: {}", path.display());

    let (header, snapshots) = super::load_stream(&path)?;

    match &header {
        Some(h) => println!("  Schema: {}", h.schema_version),
        None => println!("  Schema: (no header)"),
    }
    println!("  Snapshots: {}", snapshots.len());

    let issues = validate_sequence(&snapshots);
    if issues.is_empty() {
        println!("\nStream is valid.");
        return Ok(());
    }

    println!("\nValidation issues:");
    for issue in &issues {
        println!("  - {issue}");
    }
    anyhow::bail!("{} issue(s) found", issues.len())
}
