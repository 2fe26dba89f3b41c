//! Error types for email and dataset analysis

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during an analysis call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Malformed email address or recipient entry
    #[error("Failed to parse address {input:?}: {reason}")]
    Parse { input: String, reason: String },

    /// Column absent from every row of the dataset
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// No cell of the column could be coerced to a number
    #[error("No numeric values found in column {0}")]
    NoNumericData(String),

    /// Operator applied to a column whose values have the wrong type
    #[error("Operator {operator} cannot be applied to column {column}: {details}")]
    TypeMismatch {
        column: String,
        operator: String,
        details: String,
    },

    /// Filter operator not recognised
    #[error("Unknown filter operator: {0}")]
    UnknownOperator(String),

    /// Aggregation operation not recognised
    #[error("Unknown aggregation operation: {0}")]
    UnknownAggregationOp(String),

    /// Structurally invalid dataset input
    #[error("Invalid dataset: {0}")]
    Validation(String),

    /// Invalid analyzer configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl AnalysisError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Stable snake_case name of the error kind
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse_error",
            Self::ColumnNotFound(_) => "column_not_found",
            Self::NoNumericData(_) => "no_numeric_data",
            Self::TypeMismatch { .. } => "type_mismatch",
            Self::UnknownOperator(_) => "unknown_operator",
            Self::UnknownAggregationOp(_) => "unknown_aggregation_op",
            Self::Validation(_) => "validation_error",
            Self::Configuration(_) => "configuration_error",
        }
    }

    /// The raw input that triggered the failure, when there is one
    #[must_use]
    pub fn offending_value(&self) -> Option<&str> {
        match self {
            Self::Parse { input: value, .. }
            | Self::ColumnNotFound(value)
            | Self::NoNumericData(value)
            | Self::TypeMismatch { column: value, .. }
            | Self::UnknownOperator(value)
            | Self::UnknownAggregationOp(value) => Some(value),
            Self::Validation(_) | Self::Configuration(_) => None,
        }
    }

    /// Structured form of the error for the serialization boundary
    #[must_use]
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind().to_string(),
            message: self.to_string(),
            value: self.offending_value().map(str::to_string),
        }
    }
}

/// Serializable failure record: kind, message and offending value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorReport {
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
