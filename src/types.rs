//! Core types for analyzed emails

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The combined analysis of one email message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmailAnalysisResult {
    /// Sender address
    pub sender: ParsedAddress,

    /// To, then Cc, then Bcc recipients, de-duplicated
    pub recipients: Vec<ParsedRecipient>,

    /// Subject line as supplied
    pub subject: String,

    /// Signals derived from subject and body
    pub insights: ContentInsights,
}

impl EmailAnalysisResult {
    /// Recipients of a single kind, in original order
    pub fn recipients_of(&self, kind: RecipientKind) -> impl Iterator<Item = &ParsedRecipient> {
        self.recipients.iter().filter(move |r| r.kind == kind)
    }
}

/// Email address with optional display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedAddress {
    /// Display name (e.g., "John Doe")
    pub name: Option<String>,

    /// Email address (e.g., "john@example.com")
    pub email: String,

    /// Lower-cased domain extracted from address
    pub domain: String,

    /// Local part (before @)
    pub local_part: String,
}

impl ParsedAddress {
    /// Parse an address from `Name <addr>` or bare `addr` form
    ///
    /// Nothing may follow the closing `>`, and the address itself may not
    /// contain angle brackets or whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        let s = raw.trim();

        let (name, email) = if let Some(start) = find_unquoted(s, '<') {
            let end = s[start..]
                .find('>')
                .map(|offset| start + offset)
                .ok_or_else(|| AnalysisError::parse(raw, "missing closing '>'"))?;
            if !s[end + 1..].trim().is_empty() {
                return Err(AnalysisError::parse(raw, "unexpected text after '>'"));
            }
            let name_part = s[..start].trim().trim_matches('"').trim();
            let name = (!name_part.is_empty()).then(|| name_part.to_string());
            (name, s[start + 1..end].trim())
        } else {
            (None, s)
        };

        if email.contains(['<', '>']) {
            return Err(AnalysisError::parse(raw, "stray angle bracket in address"));
        }
        if email.contains(char::is_whitespace) {
            return Err(AnalysisError::parse(raw, "address contains whitespace"));
        }

        let (local, domain) = email
            .rsplit_once('@')
            .ok_or_else(|| AnalysisError::parse(raw, "address has no '@'"))?;

        if local.contains('@') {
            return Err(AnalysisError::parse(raw, "address has more than one '@'"));
        }
        if local.is_empty() {
            return Err(AnalysisError::parse(raw, "address has an empty local part"));
        }
        if domain.is_empty() {
            return Err(AnalysisError::parse(raw, "address has an empty domain"));
        }

        Ok(Self {
            name,
            local_part: local.to_string(),
            domain: domain.to_lowercase(),
            email: email.to_string(),
        })
    }
}

/// Byte offset of the first `target` outside double quotes
fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    s.char_indices().find_map(|(idx, c)| {
        if c == '"' {
            in_quotes = !in_quotes;
            None
        } else {
            (c == target && !in_quotes).then_some(idx)
        }
    })
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => write!(f, "{}", self.email),
        }
    }
}

/// Header field a recipient was listed in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    To,
    Cc,
    Bcc,
}

impl RecipientKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::To => "to",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
        }
    }
}

impl fmt::Display for RecipientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipient address tagged with the field it came from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedRecipient {
    #[serde(flatten)]
    pub address: ParsedAddress,

    pub kind: RecipientKind,
}

/// Signals derived from the text of an email
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentInsights {
    pub urgency: UrgencySignal,

    pub tone: Tone,

    /// Most frequent body terms, highest count first
    pub topics: Vec<String>,

    /// Sentences that ask for something to be done
    pub action_items: Vec<String>,

    /// Estimated reading time, at least one minute
    pub reading_time_minutes: u32,

    /// Whitespace-separated words in the body
    pub word_count: usize,

    /// Characters in the body
    pub character_count: usize,

    /// Question marks in the body
    pub question_count: usize,
}

/// Urgency detection result
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrgencySignal {
    pub is_urgent: bool,

    /// Distinct urgency markers in order of first appearance
    pub markers: Vec<String>,
}

/// Tone along two independent axes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tone {
    pub formality: Formality,
    pub polarity: Polarity,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Formality {
    Formal,
    #[default]
    Informal,
}

/// Sentiment polarity from lexicon hit counts
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Polarity {
    /// Polarity from a positive-minus-negative score
    #[must_use]
    pub const fn from_score(score: i64) -> Self {
        if score > 0 {
            Self::Positive
        } else if score < 0 {
            Self::Negative
        } else {
            Self::Neutral
        }
    }
}
