//! Group-by aggregation

use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use crate::stats::mean;
use crate::value::{Value, ValueKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Aggregate function applied to each group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum AggregateOp {
    Sum,
    Avg,
    Count,
    Min,
    Max,
}

impl AggregateOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Count => "count",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    /// Apply to a group's usable numbers; `rows` is the group size
    #[allow(clippy::cast_precision_loss)]
    fn apply(self, numbers: &[f64], rows: usize) -> Option<f64> {
        if self == Self::Count {
            return Some(rows as f64);
        }
        if numbers.is_empty() {
            return None;
        }
        let value: f64 = match self {
            Self::Sum => numbers.iter().sum(),
            Self::Avg => mean(numbers),
            Self::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Count => rows as f64,
        };
        value.is_finite().then_some(value)
    }
}

impl FromStr for AggregateOp {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Self::Sum),
            "avg" | "average" | "mean" => Ok(Self::Avg),
            "count" => Ok(Self::Count),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(AnalysisError::UnknownAggregationOp(s.to_string())),
        }
    }
}

impl TryFrom<String> for AggregateOp {
    type Error = AnalysisError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to group by, what to aggregate and how
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregationSpec {
    pub group_by: String,
    pub aggregate_column: String,
    pub operation: AggregateOp,
}

impl AggregationSpec {
    /// Build a spec from an operation name
    pub fn new(
        group_by: impl Into<String>,
        aggregate_column: impl Into<String>,
        operation: &str,
    ) -> Result<Self> {
        Ok(Self {
            group_by: group_by.into(),
            aggregate_column: aggregate_column.into(),
            operation: operation.parse()?,
        })
    }
}

/// Aggregate of one group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupAggregate {
    /// Group key; rows without the group-by column form the null group
    pub group: Value,

    /// Null when the group has no usable numbers (never for count), or
    /// when the sum exceeds the `f64` range
    pub value: Option<f64>,

    /// Rows in the group
    pub row_count: usize,
}

struct Group {
    key: Value,
    numbers: Vec<f64>,
    rows: usize,
}

/// Group rows and aggregate each group, in group-discovery order
pub fn aggregate_rows(dataset: &Dataset, spec: &AggregationSpec) -> Result<Vec<GroupAggregate>> {
    if dataset.is_empty() {
        return Ok(Vec::new());
    }
    for column in [&spec.group_by, &spec.aggregate_column] {
        if !dataset.has_column(column) {
            return Err(AnalysisError::ColumnNotFound(column.clone()));
        }
    }

    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<ValueKey, usize> = HashMap::new();

    for row in dataset.rows() {
        let key = row.get_or_null(&spec.group_by);
        let pos = *index.entry(key.key()).or_insert_with(|| {
            groups.push(Group {
                key: key.clone(),
                numbers: Vec::new(),
                rows: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[pos];
        group.rows += 1;
        if let Some(n) = row.get(&spec.aggregate_column).and_then(Value::as_number) {
            group.numbers.push(n);
        }
    }

    debug!(
        "Aggregated {}({}) by {}: {} groups",
        spec.operation,
        spec.aggregate_column,
        spec.group_by,
        groups.len()
    );

    Ok(groups
        .into_iter()
        .map(|group| GroupAggregate {
            value: spec.operation.apply(&group.numbers, group.rows),
            group: group.key,
            row_count: group.rows,
        })
        .collect())
}
