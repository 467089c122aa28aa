//! Human-readable text output

use crate::partition::{self, ChunkRange};
use crate::stats::RunReport;
use crate::tiler::Tiling;

/// Print the aggregate run report to the console
pub fn print_report(report: &RunReport) {
    println!("───────────────────────────────────────────");
    println!("Run summary");
    println!("───────────────────────────────────────────");
    println!("Elapsed:  {:.3}s", report.elapsed_secs);
    println!("Workers:  {}", report.workers);
    println!(
        "Read:     {} ops, {} bytes",
        report.read_ops, report.read_bytes
    );
    println!(
        "Write:    {} ops, {} bytes",
        report.write_ops, report.write_bytes
    );
    println!(
        "Total:    {:.0} ops/s, {:.2} MiB/s",
        report.ops_per_sec(),
        report.mib_per_sec()
    );
    println!(
        "Latency:  p50 {}us, p90 {}us, p99 {}us, max {}us",
        report.latency_p50_us, report.latency_p90_us, report.latency_p99_us, report.latency_max_us
    );
    if report.verify_failures > 0 {
        println!("Verify:   {} chunk(s) FAILED", report.verify_failures);
    }
}

/// Print the per-worker partition table
pub fn print_partition_table(tiling: &Tiling, ranges: &[ChunkRange]) {
    println!("{}", tiling);
    println!("worker  chunks        hyperslab");
    for (worker, range) in ranges.iter().enumerate() {
        match partition::combined_rectangle(tiling, range) {
            Ok(rect) => println!("{:>6}  {:<12}  {}", worker, range.to_string(), rect),
            Err(e) => println!("{:>6}  {:<12}  <{}>", worker, range.to_string(), e),
        }
    }
}
