use std::fmt;
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Authors,
    Works,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Authors => write!(f, "authors"),
            Phase::Works => write!(f, "works"),
        }
    }
}

/// Counters for one pass over a dump file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub phase: Phase,
    pub lines_read: u64,
    pub saved: u64,
    pub skipped: u64,
    pub elapsed_ms: u64,
}

impl LoadReport {
    pub fn new(phase: Phase) -> Self {
        Self {
            phase,
            lines_read: 0,
            saved: 0,
            skipped: 0,
            elapsed_ms: 0,
        }
    }

    pub(crate) fn finish(&mut self, elapsed: Duration) {
        self.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} lines read, {} saved, {} skipped in {}ms",
            self.phase, self.lines_read, self.saved, self.skipped, self.elapsed_ms
        )
    }
}

/// Result of a full two-phase run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub authors: LoadReport,
    pub works: LoadReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mut report = LoadReport::new(Phase::Works);
        report.lines_read = 10;
        report.saved = 8;
        report.skipped = 2;
        report.finish(Duration::from_millis(42));
        assert_eq!(report.to_string(), "works: 10 lines read, 8 saved, 2 skipped in 42ms");
    }
}
