//! JSON report output

use crate::error::Result;
use crate::stats::RunReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write the aggregate run report as pretty-printed JSON
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{OpType, RunReport, WorkerStats};
    use std::time::Duration;

    #[test]
    fn test_write_report_round_trip() {
        let mut stats = WorkerStats::new(0);
        stats.record_io(OpType::Write, 4096, Duration::from_micros(50));
        let report = RunReport::from_workers(&[stats], Duration::from_secs(1));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["write_ops"], 1);
        assert_eq!(parsed["write_bytes"], 4096);
        assert_eq!(parsed["workers"], 1);
    }
}
