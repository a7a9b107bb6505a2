use std::fs;
use std::path::Path;

use anyhow::Context;
use owo_colors::OwoColorize;
use tracesheet_core::extract::FlatRecord;
use tracesheet_core::sheet::write_csv;

pub fn write_records(records: &[FlatRecord], path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }

    let mut file =
        fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_csv(records, &mut file).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn print_summary(records: usize, traces: usize, path: &Path) {
    println!(
        "-- {} records ({} traces) -> {} --",
        records,
        traces,
        path.display().cyan()
    );
}
