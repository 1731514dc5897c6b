use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use super::error::RecordError;
use super::line::{decode_line, extract_json};
use super::report::{LoadReport, Phase};
use crate::error::{LoaderError, Result};

/// What a record handler did with one JSON document.
#[derive(Debug)]
pub enum RecordOutcome {
    Saved,
    Skipped(RecordError),
}

/// Open a dump file for streaming. A missing file is reported as
/// [`LoaderError::DumpNotFound`].
pub fn open_dump(path: &Path) -> Result<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoaderError::DumpNotFound(path.to_path_buf()),
        _ => LoaderError::Io(e),
    })
}

/// Feed every line of `reader` to `handler`, one at a time.
///
/// Lines that cannot be decoded or carry no JSON object are skipped before the
/// handler sees them. A handler error aborts the pass; records saved before it
/// stay saved.
pub fn drain_dump<R, F>(
    mut reader: R,
    source: &Path,
    phase: Phase,
    progress_interval: u64,
    mut handler: F,
) -> Result<LoadReport>
where
    R: BufRead,
    F: FnMut(&str) -> Result<RecordOutcome>,
{
    let started = Instant::now();
    let mut report = LoadReport::new(phase);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        report.lines_read += 1;
        let line_no = report.lines_read;

        let outcome = match decode_line(&buf).and_then(extract_json) {
            Ok(json) => handler(json)?,
            Err(err) => RecordOutcome::Skipped(err),
        };

        match outcome {
            RecordOutcome::Saved => report.saved += 1,
            RecordOutcome::Skipped(err) => {
                report.skipped += 1;
                warn!(%phase, dump = %source.display(), line = line_no, error = %err, "skipping line");
            }
        }

        if progress_interval > 0 && line_no % progress_interval == 0 {
            info!(%phase, lines = line_no, saved = report.saved, skipped = report.skipped, "progress");
        }
    }

    report.finish(started.elapsed());
    info!(%phase, dump = %source.display(), "{report}");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn drain(input: &str, handler: impl FnMut(&str) -> Result<RecordOutcome>) -> Result<LoadReport> {
        drain_dump(Cursor::new(input.as_bytes().to_vec()), Path::new("test.txt"), Phase::Authors, 0, handler)
    }

    #[test]
    fn test_handler_sees_only_json_part() {
        let mut seen = Vec::new();
        let report = drain("a\t{\"x\":1}\nb\t{\"x\":2}\n", |json| {
            seen.push(json.to_string());
            Ok(RecordOutcome::Saved)
        })
        .unwrap();

        assert_eq!(seen, vec!["{\"x\":1}", "{\"x\":2}"]);
        assert_eq!(report.lines_read, 2);
        assert_eq!(report.saved, 2);
    }

    #[test]
    fn test_bad_lines_are_counted_and_stream_continues() {
        let mut calls = 0;
        let report = drain("no json\n\nok{}\n", |_| {
            calls += 1;
            Ok(RecordOutcome::Skipped(RecordError::EmptyId))
        })
        .unwrap();

        assert_eq!(calls, 1);
        assert_eq!(report.lines_read, 3);
        assert_eq!(report.saved, 0);
        assert_eq!(report.skipped, 3);
    }

    #[test]
    fn test_last_line_without_newline_is_read() {
        let report = drain("p{}\nq{}", |_| Ok(RecordOutcome::Saved)).unwrap();
        assert_eq!(report.lines_read, 2);
    }

    #[test]
    fn test_handler_error_aborts_pass() {
        let mut calls = 0;
        let result = drain("p{}\nq{}\nr{}\n", |_| {
            calls += 1;
            if calls == 2 {
                Err(LoaderError::Config("store down".into()))
            } else {
                Ok(RecordOutcome::Saved)
            }
        });

        assert!(matches!(result, Err(LoaderError::Config(_))));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_open_missing_dump() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(open_dump(&path), Err(LoaderError::DumpNotFound(p)) if p == path));
    }
}
