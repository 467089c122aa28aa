//! Output formatting
//!
//! Text summaries for the console, JSON reports for tooling, and the
//! whitespace-separated coordinate file format produced and consumed by the
//! sampling drivers.

pub mod coords;
pub mod json;
pub mod text;
