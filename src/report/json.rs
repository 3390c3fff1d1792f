//! JSON report generation

use crate::probe::FileReport;
use crate::report::Summary;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: JsonSummary,
    files: &'a [FileReport],
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    measured: usize,
    unknown: usize,
    unsupported: usize,
    error: usize,
    total_duration_ms: u64,
}

pub fn write<W: Write>(writer: &mut W, results: &[FileReport]) -> io::Result<()> {
    let summary = Summary::from_results(results);

    let report = JsonReport {
        generated: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        summary: JsonSummary {
            total: summary.total,
            measured: summary.measured,
            unknown: summary.unknown,
            unsupported: summary.unsupported,
            error: summary.error,
            total_duration_ms: summary.total_duration_ms,
        },
        files: results,
    };

    serde_json::to_writer_pretty(&mut *writer, &report).map_err(io::Error::other)?;
    writeln!(writer)
}
