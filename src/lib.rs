// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! Business Signal Extraction
//!
//! Heuristic analysis of two kinds of business input: already-extracted
//! email fields and row-oriented tabular datasets. Every call is a
//! self-contained, synchronous computation over its inputs; the only shared
//! state is read-only configuration.
//!
//! # Features
//!
//! - Sender and recipient parsing with de-duplication
//! - Urgency, tone, topics, action items and reading time from email text
//! - Dataset validation with per-column type inference
//! - Descriptive statistics, value patterns, filtering and grouped aggregation
//! - Every input and output is a serde record
//!
//! # Example
//!
//! ```rust
//! use signal_extract::{analyze_email, compute_numeric_stats, Dataset};
//!
//! let email = analyze_email(
//!     "Jane Doe <jane@example.com>",
//!     "bob@example.com, carol@example.com",
//!     "",
//!     "",
//!     "Quarterly numbers",
//!     "Please review the attached figures. This is urgent.",
//! )
//! .unwrap();
//!
//! assert_eq!(email.sender.domain, "example.com");
//! assert!(email.insights.urgency.is_urgent);
//!
//! let data = Dataset::from_json_str(r#"[{"Sales": 100}, {"Sales": 300}]"#).unwrap();
//! let stats = compute_numeric_stats(&data, "Sales").unwrap();
//! assert_eq!(stats.mean, 200.0);
//! ```

mod aggregate;
mod config;
mod content;
mod dataset;
mod email;
mod error;
mod filter;
mod lexicon;
mod parser;
mod pattern;
mod stats;
mod types;
mod validate;
mod value;

pub use aggregate::{AggregateOp, AggregationSpec, GroupAggregate, aggregate_rows};
pub use config::{AnalyzerConfig, CompiledConfig, LexiconConfig};
pub use content::{ContentAnalyzer, analyze_content, split_sentences};
pub use dataset::{Dataset, Row};
pub use email::{EmailAnalyzer, EmailInput, analyze_email};
pub use error::{AnalysisError, ErrorReport, Result};
pub use filter::{
    FilterOperator, FilterPredicate, FilterResult, filter_rows, filter_rows_detailed,
};
pub use lexicon::{Lexicons, PhraseMatcher};
pub use parser::{analyze_identity, analyze_recipients, split_address_list};
pub use pattern::{ColumnPattern, ValueCount, detect_pattern};
pub use stats::{
    ColumnStats, compute_numeric_stats, mean, median, quantile_linear, sample_std_dev,
};
pub use types::*;
pub use validate::{ColumnReport, ValidationReport, validate_dataset};
pub use value::{ColumnType, Value, ValueKey};
