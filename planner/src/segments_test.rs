use crate::segments::{parse_segments, ParseError, Segment};

const HEADER: &str = "# seg\tstart\tstop\tduration\n";

#[test]
pub fn parses_tab_separated_rows() {
    let table = format!("{HEADER}0\t1000.0\t1250.0\t250.0\n1\t2000.0\t2100.0\t100.0");

    let segments = parse_segments(&table).unwrap();

    assert_eq!(
        segments,
        vec![
            Segment {
                start: 1000.0,
                duration: 250.0
            },
            Segment {
                start: 2000.0,
                duration: 100.0
            },
        ]
    );
}

#[test]
pub fn header_only_yields_empty_result() {
    assert_eq!(parse_segments(HEADER).unwrap(), Vec::new());
    assert_eq!(parse_segments("").unwrap(), Vec::new());
}

#[test]
pub fn rejects_wrong_column_count() {
    let table = format!("{HEADER}0\t1000.0");

    match parse_segments(&table) {
        Err(ParseError::ColumnCount { line, found }) => {
            assert_eq!(line, 2);
            assert_eq!(found, 1);
        }
        other => panic!("expected a column count error, got {other:?}"),
    }
}

#[test]
pub fn rejects_non_numeric_fields() {
    let table = format!("{HEADER}0\tabc\t1250.0\t250.0");

    match parse_segments(&table) {
        Err(ParseError::InvalidNumber { line, field, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(field, "abc");
        }
        other => panic!("expected an invalid number error, got {other:?}"),
    }
}

#[test]
pub fn ignores_even_offset_columns() {
    // a trailing fifth column sits at an even offset and carries no data
    let table = format!("{HEADER}0\t1000.0\t1250.0\t250.0\tcomment");

    let segments = parse_segments(&table).unwrap();

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].start, 1000.0);
    assert_eq!(segments[0].duration, 250.0);
}
