//! Compiled keyword tables
//!
//! A [`Lexicons`] value is built once from a [`LexiconConfig`] and then only
//! read. Analyzers borrow it through a
//! [`CompiledConfig`](crate::config::CompiledConfig), so one instance can
//! serve any number of concurrent calls.

use crate::config::LexiconConfig;
use crate::error::{AnalysisError, Result};
use regex::Regex;
use std::collections::HashSet;

/// Whole-word, case-insensitive matcher over a list of words and phrases
#[derive(Debug, Clone)]
pub struct PhraseMatcher {
    regex: Option<Regex>,
}

impl PhraseMatcher {
    pub fn new(phrases: &[String]) -> Result<Self> {
        let mut alternatives: Vec<String> = phrases
            .iter()
            .map(|p| p.split_whitespace().map(regex::escape).collect::<Vec<_>>())
            .filter(|parts| !parts.is_empty())
            .map(|parts| parts.join(r"\s+"))
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }

        // Longest first so "action required" wins over a shorter prefix
        alternatives.sort_by_key(|a| std::cmp::Reverse(a.len()));

        let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
        let regex = Regex::new(&pattern).map_err(|e| AnalysisError::Configuration(e.to_string()))?;

        Ok(Self { regex: Some(regex) })
    }

    /// All matches in order, lower-cased with whitespace collapsed
    #[must_use]
    pub fn find_all<'t>(&'t self, text: &'t str) -> impl Iterator<Item = String> + 't {
        self.regex
            .iter()
            .flat_map(move |re| re.find_iter(text))
            .map(|m| normalize(m.as_str()))
    }

    #[must_use]
    pub fn count(&self, text: &str) -> usize {
        self.regex
            .as_ref()
            .map_or(0, |re| re.find_iter(text).count())
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

fn normalize(s: &str) -> String {
    s.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The keyword tables used by content analysis
#[derive(Debug, Clone)]
pub struct Lexicons {
    pub urgency: PhraseMatcher,
    pub positive: PhraseMatcher,
    pub negative: PhraseMatcher,
    pub formal: PhraseMatcher,
    pub casual: PhraseMatcher,
    pub action_phrases: PhraseMatcher,
    action_verbs: HashSet<String>,
    stop_words: HashSet<String>,
}

impl Lexicons {
    /// Compile the tables described by `config`
    pub fn new(config: &LexiconConfig) -> Result<Self> {
        Ok(Self {
            urgency: PhraseMatcher::new(&config.urgency)?,
            positive: PhraseMatcher::new(&config.positive)?,
            negative: PhraseMatcher::new(&config.negative)?,
            formal: PhraseMatcher::new(&config.formal)?,
            casual: PhraseMatcher::new(&config.casual)?,
            action_phrases: PhraseMatcher::new(&config.action_phrases)?,
            action_verbs: lower_set(&config.action_verbs),
            stop_words: lower_set(&config.stop_words),
        })
    }

    #[must_use]
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    #[must_use]
    pub fn is_action_verb(&self, word: &str) -> bool {
        self.action_verbs.contains(word)
    }
}

fn lower_set(list: &[String]) -> HashSet<String> {
    list.iter().map(|w| w.trim().to_lowercase()).collect()
}
