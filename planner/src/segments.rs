use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Row {line} has {found} data columns, expected exactly 2 (start, duration)")]
    ColumnCount { line: usize, found: usize },
    #[error("Row {line} field '{field}' is not a number")]
    InvalidNumber {
        line: usize,
        field: String,
        source: std::num::ParseFloatError,
    },
}

/// a contiguous interval for which data is known to be available
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub duration: f64,
}

/// parse the availability table written by the query job
///
/// The first line is a header and is discarded. Every other line is tab
/// separated with the start and duration at the odd column offsets, i.e.,
/// `id <tab> start <tab> stop <tab> duration`. An empty table after the
/// header is a valid result, callers have to decide what "no work" means.
pub fn parse_segments(table: &str) -> Result<Vec<Segment>, ParseError> {
    let mut segments = Vec::new();

    for (index, row) in table.lines().enumerate().skip(1) {
        let line = index + 1;
        let fields = row.split('\t').skip(1).step_by(2).collect_vec();

        if fields.len() != 2 {
            return Err(ParseError::ColumnCount {
                line,
                found: fields.len(),
            });
        }

        let (start, duration) = (parse_field(fields[0], line)?, parse_field(fields[1], line)?);
        segments.push(Segment { start, duration });
    }

    Ok(segments)
}

fn parse_field(field: &str, line: usize) -> Result<f64, ParseError> {
    field.parse().map_err(|source| ParseError::InvalidNumber {
        line,
        field: field.to_owned(),
        source,
    })
}
