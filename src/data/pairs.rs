use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    data::volume::int_label,
    error::{MeterError, Operand},
};

/// One CSV record: a predicted label and the ground truth it is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LabelPairRecord {
    pub predicted: i64,
    pub target: i64,
}

/// A batch of label pairs, split into the two flat sequences the meter takes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPairs {
    pub predicted: Vec<usize>,
    pub target: Vec<usize>,
}

impl LabelPairs {
    pub fn len(&self) -> usize {
        self.predicted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicted.is_empty()
    }
}

/**
Reads `predicted,target` label pairs from a CSV file.

## Arguments
* `path` - Path to the CSV file.
* `has_headers` - Whether the first row is a header row.
* `classes` - Number of classes, used when reporting negative labels.

## Returns
The pairs in file order, or a `MeterError` if the file cannot be read or holds a negative label.
 */
#[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_label_pairs<P: AsRef<Path>>(
    path: P,
    has_headers: bool,
    classes: usize,
) -> Result<LabelPairs, MeterError> {
    let file = File::open(path.as_ref())?;
    let pairs = parse_label_pairs(file, has_headers, classes)?;
    debug!(pairs = pairs.len(), "Read label pairs");
    Ok(pairs)
}

pub fn parse_label_pairs<R: Read>(
    reader: R,
    has_headers: bool,
    classes: usize,
) -> Result<LabelPairs, MeterError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut pairs = LabelPairs::default();
    for record in csv_reader.deserialize::<LabelPairRecord>() {
        let record = record?;
        pairs
            .predicted
            .push(int_label(record.predicted, Operand::Predicted, classes)?);
        pairs
            .target
            .push(int_label(record.target, Operand::Target, classes)?);
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_with_headers() {
        let data = "predicted,target\n0,0\n1, 2\n2,2\n";
        let pairs = parse_label_pairs(data.as_bytes(), true, 3).unwrap();
        assert_eq!(pairs.predicted, vec![0, 1, 2]);
        assert_eq!(pairs.target, vec![0, 2, 2]);
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_parse_without_headers() {
        let data = "1,0\n0,1\n";
        let pairs = parse_label_pairs(data.as_bytes(), false, 2).unwrap();
        assert_eq!(pairs.predicted, vec![1, 0]);
        assert_eq!(pairs.target, vec![0, 1]);
    }

    #[test]
    fn test_negative_label_is_rejected() {
        let data = "predicted,target\n0,-2\n";
        let err = parse_label_pairs(data.as_bytes(), true, 3).unwrap_err();
        assert!(matches!(
            err,
            MeterError::LabelRange {
                operand: Operand::Target,
                value: -2,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_record() {
        let data = "predicted,target\n0,cat\n";
        let err = parse_label_pairs(data.as_bytes(), true, 3).unwrap_err();
        assert!(matches!(err, MeterError::CsvError(_)));
    }

    #[test]
    fn test_read_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"predicted,target\n2,1\n").unwrap();
        let pairs = read_label_pairs(temp_file.path(), true, 3).unwrap();
        assert_eq!(pairs.predicted, vec![2]);
        assert_eq!(pairs.target, vec![1]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_label_pairs("does/not/exist.csv", true, 3).unwrap_err();
        assert!(matches!(err, MeterError::IoError(_)));
    }
}
