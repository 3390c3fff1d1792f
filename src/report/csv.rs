//! CSV report generation

use crate::probe::FileReport;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, results: &[FileReport]) -> io::Result<()> {
    writeln!(
        writer,
        "status,filepath,format,size_bytes,duration_ms,frames,sample_rate,bitrate_kbps,vbr,error"
    )?;

    for r in results {
        writeln!(
            writer,
            "{},{},{},{},{},{},{},{},{},{}",
            r.status,
            escape_csv(&r.file_path),
            r.format.map(|f| f.as_str()).unwrap_or("n/a"),
            r.size_bytes,
            or_na(r.duration_ms),
            r.frames,
            or_na(r.sample_rate),
            or_na(r.bitrate_kbps),
            r.is_vbr,
            escape_csv(r.error.as_deref().unwrap_or("")),
        )?;
    }

    Ok(())
}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::tests::sample_results;

    #[test]
    fn test_csv_rows() {
        let mut out = Vec::new();
        write(&mut out, &sample_results()).expect("write");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[1],
            "MEASURED,\"out/hello, world.mp3\",mp3,41700,2612,100,44100,128,false,"
        );
        assert_eq!(lines[2], "UNKNOWN,out/empty.mp3,mp3,500,n/a,0,n/a,n/a,false,");
        assert!(lines[4].starts_with("ERROR,out/gone.mp3,n/a,0,n/a"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
