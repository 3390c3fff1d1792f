pub mod csv;
pub mod json;
pub mod terminal;

use crate::probe::{FileReport, Status};
use std::io;
use std::path::Path;

/// Write a report file, format picked from the extension
pub fn generate<P: AsRef<Path>>(path: P, results: &[FileReport]) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);

    match ext.as_str() {
        "json" => json::write(&mut file, results)?,
        _ => csv::write(&mut file, results)?,
    }

    io::Write::flush(&mut file)?;
    tracing::info!(path = %path.display(), files = results.len(), "report written");
    Ok(())
}

/// Summary statistics for a batch of results
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub measured: usize,
    pub unknown: usize,
    pub unsupported: usize,
    pub error: usize,
    /// Sum over measured files
    pub total_duration_ms: u64,
}

impl Summary {
    pub fn from_results(results: &[FileReport]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for r in results {
            match r.status {
                Status::Measured => summary.measured += 1,
                Status::Unknown => summary.unknown += 1,
                Status::Unsupported => summary.unsupported += 1,
                Status::Error => summary.error += 1,
            }
            summary.total_duration_ms += r.duration_ms.unwrap_or(0);
        }

        summary
    }
}

/// `m:ss.mmm`, or `h:mm:ss.mmm` past an hour
pub fn format_duration(ms: u64) -> String {
    let (hours, rest) = (ms / 3_600_000, ms % 3_600_000);
    let (minutes, rest) = (rest / 60_000, rest % 60_000);
    let (seconds, millis) = (rest / 1000, rest % 1000);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}.{millis:03}")
    } else {
        format!("{minutes}:{seconds:02}.{millis:03}")
    }
}
