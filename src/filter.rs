//! Predicate-based row selection

use crate::dataset::{Dataset, Row};
use crate::error::{AnalysisError, Result};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Comparison applied by a filter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum FilterOperator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
    Contains,
}

impl FilterOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Ge => "ge",
            Self::Le => "le",
            Self::Contains => "contains",
        }
    }

    /// Whether the operator orders numbers (gt, lt, ge, le)
    #[must_use]
    pub const fn is_ordering(self) -> bool {
        matches!(self, Self::Gt | Self::Lt | Self::Ge | Self::Le)
    }

    const fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Gt => ordering.is_gt(),
            Self::Lt => ordering.is_lt(),
            Self::Ge => ordering.is_ge(),
            Self::Le => ordering.is_le(),
            Self::Eq => ordering.is_eq(),
            Self::Ne => ordering.is_ne(),
            Self::Contains => false,
        }
    }
}

impl FromStr for FilterOperator {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "eq" | "=" | "==" => Ok(Self::Eq),
            "ne" | "!=" => Ok(Self::Ne),
            "gt" | ">" => Ok(Self::Gt),
            "lt" | "<" => Ok(Self::Lt),
            "ge" | ">=" => Ok(Self::Ge),
            "le" | "<=" => Ok(Self::Le),
            "contains" => Ok(Self::Contains),
            _ => Err(AnalysisError::UnknownOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for FilterOperator {
    type Error = AnalysisError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column, operator and comparison value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterPredicate {
    pub column: String,
    pub operator: FilterOperator,
    pub value: Value,
}

impl FilterPredicate {
    /// Build a predicate from an operator name or symbol
    pub fn new(column: impl Into<String>, operator: &str, value: impl Into<Value>) -> Result<Self> {
        Ok(Self {
            column: column.into(),
            operator: operator.parse()?,
            value: value.into(),
        })
    }

    /// Whether a cell satisfies the predicate. `None` means an ordering
    /// operator could not coerce the cell or the predicate value.
    fn test(&self, cell: &Value, needle: &str) -> Option<bool> {
        match self.operator {
            FilterOperator::Eq => Some(values_equal(cell, &self.value)),
            FilterOperator::Ne => Some(!values_equal(cell, &self.value)),
            FilterOperator::Contains => Some(
                cell.as_text()
                    .is_some_and(|text| text.to_lowercase().contains(needle)),
            ),
            op => {
                let ordering = cell.as_number()?.partial_cmp(&self.value.as_number()?)?;
                Some(op.accepts(ordering))
            }
        }
    }
}

/// Filtered rows plus the rows an ordering operator had to drop
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterResult {
    pub rows: Vec<Row>,

    /// Rows excluded because a value did not coerce to a number
    pub skipped_count: usize,
}

/// Rows matching `predicate`, in original order
pub fn filter_rows(dataset: &Dataset, predicate: &FilterPredicate) -> Result<Vec<Row>> {
    filter_rows_detailed(dataset, predicate).map(|result| result.rows)
}

/// Like [`filter_rows`], also reporting rows dropped for failed coercion
pub fn filter_rows_detailed(dataset: &Dataset, predicate: &FilterPredicate) -> Result<FilterResult> {
    if dataset.is_empty() {
        return Ok(FilterResult::default());
    }

    let column = predicate.column.as_str();

    if predicate.operator == FilterOperator::Contains
        && !dataset
            .rows()
            .iter()
            .any(|row| row.get(column).is_some_and(Value::is_text))
    {
        return Err(AnalysisError::TypeMismatch {
            column: column.to_string(),
            operator: predicate.operator.to_string(),
            details: "no value in the column is a string".into(),
        });
    }

    let needle = predicate.value.to_string().to_lowercase();
    let mut result = FilterResult::default();

    for row in dataset.rows() {
        match predicate.test(row.get_or_null(column), &needle) {
            Some(true) => result.rows.push(row.clone()),
            Some(false) => {}
            None => result.skipped_count += 1,
        }
    }

    if result.skipped_count > 0 {
        warn!(
            "Filter {} {} {}: skipped {} rows that are not numeric",
            column, predicate.operator, predicate.value, result.skipped_count
        );
    }

    debug!(
        "Filtered {} of {} rows on {}",
        result.rows.len(),
        dataset.len(),
        column
    );

    Ok(result)
}

/// Numeric equality when both sides coerce, exact value equality otherwise.
/// Two JSON numbers compare by key so large integers stay exact.
fn values_equal(cell: &Value, target: &Value) -> bool {
    if let (Value::Number(_), Value::Number(_)) = (cell, target) {
        return cell.key() == target.key();
    }
    match (cell.as_number(), target.as_number()) {
        (Some(a), Some(b)) => a.partial_cmp(&b) == Some(Ordering::Equal),
        _ => cell == target,
    }
}
