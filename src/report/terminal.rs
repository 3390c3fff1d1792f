//! Human-readable table for stdout

use crate::probe::{FileReport, Status};
use crate::report::{format_duration, Summary};
use colored::{ColoredString, Colorize};
use std::io::{self, Write};

fn status_label(status: Status) -> ColoredString {
    let label = format!("{status:<11}");
    match status {
        Status::Measured => label.green(),
        Status::Unknown => label.yellow(),
        Status::Unsupported => label.dimmed(),
        Status::Error => label.red().bold(),
    }
}

pub fn write<W: Write>(writer: &mut W, results: &[FileReport]) -> io::Result<()> {
    for r in results {
        let duration = r
            .duration_ms
            .map(format_duration)
            .unwrap_or_else(|| "-".to_string());

        let detail = match (r.status, &r.error) {
            (Status::Error, Some(e)) => e.clone(),
            (Status::Measured, _) => {
                let mut detail = format!(
                    "{} frames, {} Hz, {} kbps",
                    r.frames,
                    r.sample_rate.unwrap_or(0),
                    r.bitrate_kbps.unwrap_or(0)
                );
                if r.is_vbr {
                    detail.push_str(" (VBR)");
                }
                detail
            }
            _ => String::new(),
        };

        writeln!(
            writer,
            "{} {:>12}  {}  {}",
            status_label(r.status),
            duration,
            r.file_path,
            detail.dimmed()
        )?;
    }

    let summary = Summary::from_results(results);
    writeln!(
        writer,
        "\n{} files: {} measured, {} unknown, {} unsupported, {} errors, {} total",
        summary.total,
        summary.measured.to_string().green(),
        summary.unknown.to_string().yellow(),
        summary.unsupported,
        summary.error.to_string().red(),
        format_duration(summary.total_duration_ms).bold()
    )
}
