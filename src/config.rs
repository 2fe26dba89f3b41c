//! Analyzer configuration
//!
//! All tunables of the analyzers live here. A configuration is plain data
//! and can be loaded from JSON; missing fields take their defaults.

use crate::error::{AnalysisError, Result};
use crate::lexicon::Lexicons;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SHARED: LazyLock<CompiledConfig> = LazyLock::new(CompiledConfig::builtin);

/// Top-level analyzer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Words per minute used for the reading-time estimate.
    pub reading_speed_wpm: u32,
    /// Number of topics reported per email.
    pub topic_count: usize,
    /// Shortest word (in characters) that can count as a topic.
    pub min_topic_word_len: usize,
    /// Upper bound on reported action items, unbounded when absent.
    pub max_action_items: Option<usize>,
    /// Number of entries in a column pattern's `most_common` list.
    pub most_common_limit: usize,
    /// Keyword lists used by the content analyzer.
    pub lexicons: LexiconConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            reading_speed_wpm: 200,
            topic_count: 5,
            min_topic_word_len: 3,
            max_action_items: None,
            most_common_limit: 5,
            lexicons: LexiconConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Process-wide default configuration.
    #[must_use]
    pub fn shared() -> &'static Self {
        CompiledConfig::shared().settings()
    }

    /// Load and validate a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| AnalysisError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the analyzers cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.reading_speed_wpm == 0 {
            return Err(AnalysisError::Configuration(
                "reading_speed_wpm must be greater than zero".into(),
            ));
        }
        if self.topic_count == 0 {
            return Err(AnalysisError::Configuration(
                "topic_count must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// A validated configuration together with the lexicons compiled from it.
///
/// Analyzers only accept this form, so the keyword tables they match with
/// are always the ones the configuration describes.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    settings: AnalyzerConfig,
    lexicons: Lexicons,
}

impl CompiledConfig {
    /// Validate `settings` and compile its lexicons
    pub fn new(settings: AnalyzerConfig) -> Result<Self> {
        settings.validate()?;
        let lexicons = Lexicons::new(&settings.lexicons)?;
        Ok(Self { settings, lexicons })
    }

    /// Load, validate and compile a configuration from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::new(AnalyzerConfig::from_json_str(json)?)
    }

    /// Process-wide compiled default configuration
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    // Escaped literal alternations always compile
    fn builtin() -> Self {
        Self::new(AnalyzerConfig::default()).expect("default configuration compiles")
    }

    #[must_use]
    pub const fn settings(&self) -> &AnalyzerConfig {
        &self.settings
    }

    #[must_use]
    pub const fn lexicons(&self) -> &Lexicons {
        &self.lexicons
    }
}

/// Keyword and phrase lists. Matching is case-insensitive and on whole
/// words; multi-word phrases tolerate any run of whitespace between words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    pub urgency: Vec<String>,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    /// Markers of formal register (besides salutation and signature).
    pub formal: Vec<String>,
    /// Markers of casual register (besides contractions).
    pub casual: Vec<String>,
    pub stop_words: Vec<String>,
    /// Imperative verbs that mark a sentence as an action item when first.
    pub action_verbs: Vec<String>,
    /// Phrases that mark a sentence as an action item anywhere.
    pub action_phrases: Vec<String>,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            urgency: words(&[
                "urgent",
                "urgently",
                "asap",
                "as soon as possible",
                "critical",
                "emergency",
                "immediately",
                "right away",
                "action required",
                "time sensitive",
                "deadline",
                "high priority",
            ]),
            positive: words(&[
                "great",
                "excellent",
                "success",
                "successful",
                "happy",
                "appreciate",
                "appreciated",
                "thank you",
                "thanks",
                "wonderful",
                "pleased",
                "glad",
                "congratulations",
                "good news",
            ]),
            negative: words(&[
                "problem",
                "problems",
                "issue",
                "issues",
                "error",
                "errors",
                "failed",
                "failure",
                "disappointed",
                "concern",
                "concerns",
                "complaint",
                "frustrated",
                "unfortunately",
                "delay",
                "delayed",
            ]),
            formal: words(&[
                "dear",
                "sincerely",
                "regards",
                "respectfully",
                "hereby",
                "kindly",
                "further to",
                "please find",
            ]),
            casual: words(&[
                "hey", "lol", "cool", "awesome", "cheers", "gonna", "wanna", "btw", "yeah",
            ]),
            stop_words: words(&[
                "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of",
                "with", "is", "be", "that", "this", "it", "from", "by", "as", "are", "was",
                "were", "been", "being", "have", "has", "had", "do", "does", "did", "will",
                "would", "could", "should", "may", "might", "can", "must", "shall", "you",
                "your", "yours", "we", "our", "ours", "they", "their", "them", "he", "she",
                "his", "her", "its", "me", "my", "not", "all", "any", "some", "there", "here",
                "what", "which", "who", "when", "where", "why", "how", "also", "just", "than",
                "then", "into", "about", "please", "thanks", "let", "know", "get",
            ]),
            action_verbs: words(&[
                "submit", "send", "review", "complete", "prepare", "schedule", "update",
                "confirm", "call", "check", "finish", "provide", "share", "approve", "sign",
                "attend", "forward", "reply", "respond", "contact", "book", "arrange",
                "follow", "ensure", "fix", "implement", "organize", "draft", "file", "let",
            ]),
            action_phrases: words(&[
                "please",
                "need to",
                "needs to",
                "must",
                "required to",
                "make sure",
                "can you",
                "could you",
                "would you",
                "will you",
            ]),
        }
    }
}
