//! Structural and type validation of datasets

use crate::dataset::Dataset;
use crate::value::{ColumnType, Value};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of validating a dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    /// False only for a dataset without rows or without columns
    pub is_valid: bool,

    /// Why the dataset is invalid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub row_count: usize,

    pub column_count: usize,

    /// Per-column findings, in column order
    pub columns: Vec<ColumnReport>,

    /// Missing cells over all columns
    pub missing_values: usize,

    /// Missing cells as a percentage of all cells, two decimals
    pub missing_percentage: f64,
}

impl ValidationReport {
    /// Findings for one column
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnReport> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Whether any column holds values of more than one type
    #[must_use]
    pub fn has_type_mismatches(&self) -> bool {
        self.columns.iter().any(|c| c.mismatch_count > 0)
    }
}

/// Validation findings for a single column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnReport {
    pub name: String,

    /// Majority type of the non-null values
    pub inferred_type: ColumnType,

    /// Rows lacking the key or holding null
    pub missing_count: usize,

    /// Non-null values whose type differs from `inferred_type`
    pub mismatch_count: usize,
}

/// Infer per-column types and count missing and mismatched cells.
/// Type mismatches are reported, never fatal.
#[must_use]
pub fn validate_dataset(dataset: &Dataset) -> ValidationReport {
    let columns = dataset.columns();
    let row_count = dataset.len();
    let column_count = columns.len();

    let reports: Vec<ColumnReport> = columns
        .into_iter()
        .map(|name| column_report(dataset, name))
        .collect();

    let missing_values = reports.iter().map(|c| c.missing_count).sum();

    let message = if row_count == 0 {
        Some("Dataset is empty".to_string())
    } else if column_count == 0 {
        Some("Dataset has no columns".to_string())
    } else {
        None
    };

    debug!(
        "Validated dataset: {} rows, {} columns, {} missing",
        row_count, column_count, missing_values
    );

    ValidationReport {
        is_valid: message.is_none(),
        message,
        row_count,
        column_count,
        columns: reports,
        missing_values,
        missing_percentage: percentage(missing_values, row_count * column_count),
    }
}

fn column_report(dataset: &Dataset, name: String) -> ColumnReport {
    let mut missing_count = 0;
    let mut tally = TypeTally::default();

    for row in dataset.rows() {
        match row.get(&name).and_then(Value::column_type) {
            Some(kind) => tally.add(kind),
            None => missing_count += 1,
        }
    }

    let inferred_type = tally.dominant();
    let mismatch_count = tally.total() - tally.count(inferred_type);

    ColumnReport {
        name,
        inferred_type,
        missing_count,
        mismatch_count,
    }
}

#[derive(Debug, Default)]
struct TypeTally {
    numeric: usize,
    boolean: usize,
    string: usize,
}

impl TypeTally {
    const fn add(&mut self, kind: ColumnType) {
        match kind {
            ColumnType::Numeric => self.numeric += 1,
            ColumnType::Boolean => self.boolean += 1,
            ColumnType::String => self.string += 1,
            ColumnType::Unknown => {}
        }
    }

    const fn count(&self, kind: ColumnType) -> usize {
        match kind {
            ColumnType::Numeric => self.numeric,
            ColumnType::Boolean => self.boolean,
            ColumnType::String => self.string,
            ColumnType::Unknown => 0,
        }
    }

    const fn total(&self) -> usize {
        self.numeric + self.boolean + self.string
    }

    /// Majority type; ties go to numeric, then boolean, then string
    fn dominant(&self) -> ColumnType {
        [ColumnType::Numeric, ColumnType::Boolean, ColumnType::String]
            .into_iter()
            .filter(|kind| self.count(*kind) > 0)
            .fold(None, |best: Option<ColumnType>, kind| match best {
                Some(b) if self.count(b) >= self.count(kind) => Some(b),
                _ => Some(kind),
            })
            .unwrap_or(ColumnType::Unknown)
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (part as f64 / whole as f64 * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_tie_precedence() {
        let tally = TypeTally {
            numeric: 2,
            boolean: 2,
            string: 2,
        };
        assert_eq!(tally.dominant(), ColumnType::Numeric);

        let tally = TypeTally {
            numeric: 0,
            boolean: 3,
            string: 3,
        };
        assert_eq!(tally.dominant(), ColumnType::Boolean);

        let tally = TypeTally {
            numeric: 1,
            boolean: 0,
            string: 4,
        };
        assert_eq!(tally.dominant(), ColumnType::String);

        assert_eq!(TypeTally::default().dominant(), ColumnType::Unknown);
    }

    #[test]
    fn test_percentage_rounding() {
        assert!((percentage(1, 3) - 33.33).abs() < 1e-9);
        assert!((percentage(0, 0)).abs() < f64::EPSILON);
    }
}
