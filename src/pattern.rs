//! Categorical frequency analysis of a column

use crate::config::AnalyzerConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::value::{Value, ValueKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Value frequencies and uniqueness of one column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnPattern {
    pub column: String,

    /// Distinct values in order of first occurrence; null is a value
    pub unique_values: Vec<Value>,

    /// Occurrences of each distinct value, same order as `unique_values`
    pub frequency: Vec<ValueCount>,

    /// Highest counts first, ties in order of first occurrence
    pub most_common: Vec<ValueCount>,

    /// Present cells minus distinct values
    pub duplicate_count: usize,

    /// Rows carrying the column (null included)
    pub total_count: usize,

    /// Rows lacking the column
    pub missing_count: usize,
}

impl ColumnPattern {
    /// Walk the column and tally values
    pub fn detect(dataset: &Dataset, column: &str, most_common_limit: usize) -> Result<Self> {
        dataset.require_column(column)?;

        let mut frequency: Vec<ValueCount> = Vec::new();
        let mut index: HashMap<ValueKey, usize> = HashMap::new();
        let mut missing_count = 0;

        for row in dataset.rows() {
            let Some(value) = row.get(column) else {
                missing_count += 1;
                continue;
            };

            if let Some(&pos) = index.get(&value.key()) {
                frequency[pos].count += 1;
            } else {
                index.insert(value.key(), frequency.len());
                frequency.push(ValueCount {
                    value: value.clone(),
                    count: 1,
                });
            }
        }

        let total_count = dataset.len() - missing_count;
        let unique_values: Vec<Value> = frequency.iter().map(|f| f.value.clone()).collect();

        let mut most_common = frequency.clone();
        most_common.sort_by(|a, b| b.count.cmp(&a.count));
        most_common.truncate(most_common_limit);

        debug!(
            "Detected pattern for {}: {} unique of {} values",
            column,
            unique_values.len(),
            total_count
        );

        Ok(Self {
            column: column.to_string(),
            duplicate_count: total_count - unique_values.len(),
            unique_values,
            frequency,
            most_common,
            total_count,
            missing_count,
        })
    }

    /// Occurrences of `value` in the column
    #[must_use]
    pub fn count_of(&self, value: &Value) -> usize {
        let key = value.key();
        self.frequency
            .iter()
            .find(|f| f.value.key() == key)
            .map_or(0, |f| f.count)
    }

    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.unique_values.len()
    }
}

/// A value and how often it occurs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueCount {
    pub value: Value,
    pub count: usize,
}

/// Detect the value pattern of a column with the default settings
pub fn detect_pattern(dataset: &Dataset, column: &str) -> Result<ColumnPattern> {
    ColumnPattern::detect(dataset, column, AnalyzerConfig::shared().most_common_limit)
}
