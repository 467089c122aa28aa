//! Coordinate file format
//!
//! Whitespace-separated text, one record per line: `tile_id row col` for
//! tagged coordinates, `row col` for plain ones. This is the interchange
//! format between the sampling driver and the benchmark read loops, so a
//! malformed line is a hard error rather than a skipped record.

use crate::error::{Result, TileBenchError};
use crate::sampler::{Coordinate, TaggedCoordinate};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write plain `row col` records
pub fn write_plain(path: &Path, coords: &[Coordinate]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for c in coords {
        writeln!(writer, "{} {}", c.row, c.col)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write tagged `tile_id row col` records
pub fn write_tagged(path: &Path, coords: &[TaggedCoordinate]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for c in coords {
        writeln!(writer, "{} {} {}", c.tile_id, c.row, c.col)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read plain `row col` records
pub fn read_plain(path: &Path) -> Result<Vec<Coordinate>> {
    let reader = BufReader::new(File::open(path)?);
    let mut coords = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_fields(&line, idx + 1, 2)?;
        coords.push(Coordinate {
            row: fields[0],
            col: fields[1],
        });
    }
    Ok(coords)
}

/// Read tagged `tile_id row col` records
pub fn read_tagged(path: &Path) -> Result<Vec<TaggedCoordinate>> {
    let reader = BufReader::new(File::open(path)?);
    let mut coords = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = parse_fields(&line, idx + 1, 3)?;
        coords.push(TaggedCoordinate {
            tile_id: fields[0],
            row: fields[1],
            col: fields[2],
        });
    }
    Ok(coords)
}

fn parse_fields(line: &str, line_no: usize, expected: usize) -> Result<Vec<u64>> {
    let fields: Vec<u64> = line
        .split_whitespace()
        .map(|f| {
            f.parse::<u64>().map_err(|_| TileBenchError::MalformedRecord {
                line: line_no,
                reason: format!("'{}' is not an unsigned integer", f),
            })
        })
        .collect::<Result<_>>()?;
    if fields.len() != expected {
        return Err(TileBenchError::MalformedRecord {
            line: line_no,
            reason: format!("expected {} fields, found {}", expected, fields.len()),
        });
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_plain_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coords.txt");
        let coords = vec![
            Coordinate { row: 0, col: 5 },
            Coordinate { row: 12, col: 3 },
        ];
        write_plain(&path, &coords).unwrap();
        assert_eq!(read_plain(&path).unwrap(), coords);
    }

    #[test]
    fn test_tagged_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coords.txt");
        let coords = vec![
            TaggedCoordinate {
                tile_id: 3,
                row: 4,
                col: 7,
            },
            TaggedCoordinate {
                tile_id: 0,
                row: 1,
                col: 1,
            },
        ];
        write_tagged(&path, &coords).unwrap();
        assert_eq!(read_tagged(&path).unwrap(), coords);
    }

    #[test]
    fn test_tagged_format_is_whitespace_separated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coords.txt");
        write_tagged(
            &path,
            &[TaggedCoordinate {
                tile_id: 3,
                row: 4,
                col: 7,
            }],
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "3 4 7\n");
    }

    #[test]
    fn test_malformed_line_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coords.txt");
        std::fs::write(&path, "1 2 3\n4 nope 6\n").unwrap();
        match read_tagged(&path).unwrap_err() {
            TileBenchError::MalformedRecord { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_field_count_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coords.txt");
        std::fs::write(&path, "1 2 3\n").unwrap();
        assert!(matches!(
            read_plain(&path).unwrap_err(),
            TileBenchError::MalformedRecord { .. }
        ));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("coords.txt");
        std::fs::write(&path, "1 2\n\n3 4\n").unwrap();
        assert_eq!(read_plain(&path).unwrap().len(), 2);
    }
}
