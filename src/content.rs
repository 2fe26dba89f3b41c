//! Heuristic content analysis of email text

use crate::config::{AnalyzerConfig, CompiledConfig};
use crate::lexicon::Lexicons;
use crate::types::{ContentInsights, Formality, Polarity, Tone, UrgencySignal};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

// "Dear ..." anywhere at line start, or "Hi/Hello <name>," with the comma
static SALUTATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^\s*(?:dear\b|(?:hi|hello|greetings|good\s+(?:morning|afternoon|evening))\b[^\n,]*,)",
    )
    .unwrap()
});

static CLOSING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:(?:best|kind|warm|warmest)\s+regards|regards|sincerely|yours\s+(?:sincerely|truly|faithfully)|best\s+wishes|best|respectfully|thank\s+you|thanks|many\s+thanks|cheers)\s*[,.!]?\s*$",
    )
    .unwrap()
});

static CONTRACTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z]+['’](?:s|t|re|ve|ll|d|m)\b").unwrap()
});

/// Content analyzer bound to a set of lexicons and settings
#[derive(Debug, Clone, Copy)]
pub struct ContentAnalyzer<'a> {
    lexicons: &'a Lexicons,
    config: &'a AnalyzerConfig,
}

impl<'a> ContentAnalyzer<'a> {
    #[must_use]
    pub const fn new(compiled: &'a CompiledConfig) -> Self {
        Self {
            lexicons: compiled.lexicons(),
            config: compiled.settings(),
        }
    }

    /// Derive urgency, tone, topics, action items and reading time
    #[must_use]
    pub fn analyze(&self, subject: &str, body: &str) -> ContentInsights {
        let full_text = format!("{subject}\n{body}");
        let word_count = body.split_whitespace().count();

        let insights = ContentInsights {
            urgency: self.detect_urgency(&full_text),
            tone: self.detect_tone(&full_text, body),
            topics: self.extract_topics(body),
            action_items: self.extract_action_items(body),
            reading_time_minutes: self.reading_time(word_count),
            word_count,
            character_count: body.chars().count(),
            question_count: body.matches('?').count(),
        };

        debug!(
            "Analyzed content: {} words, urgent={}, {} action items",
            insights.word_count,
            insights.urgency.is_urgent,
            insights.action_items.len()
        );

        insights
    }

    #[must_use]
    pub fn detect_urgency(&self, text: &str) -> UrgencySignal {
        let mut markers: Vec<String> = Vec::new();
        for marker in self.lexicons.urgency.find_all(text) {
            if !markers.contains(&marker) {
                markers.push(marker);
            }
        }

        UrgencySignal {
            is_urgent: !markers.is_empty(),
            markers,
        }
    }

    /// Formality from the body's layout, polarity from the whole text
    #[must_use]
    pub fn detect_tone(&self, text: &str, body: &str) -> Tone {
        let has_salutation = SALUTATION_REGEX.is_match(body);
        let has_signature = has_signature_block(body);

        let formal_score = usize::from(has_salutation)
            + usize::from(has_signature)
            + self.lexicons.formal.count(text);
        let casual_score = CONTRACTION_REGEX.find_iter(text).count() + self.lexicons.casual.count(text);

        let formality = if (has_salutation || has_signature) && casual_score <= formal_score {
            Formality::Formal
        } else {
            Formality::Informal
        };

        let positive = i64::try_from(self.lexicons.positive.count(text)).unwrap_or(i64::MAX);
        let negative = i64::try_from(self.lexicons.negative.count(text)).unwrap_or(i64::MAX);

        Tone {
            formality,
            polarity: Polarity::from_score(positive - negative),
        }
    }

    /// Most frequent non-stop-words of the body, ties in order of appearance
    #[must_use]
    pub fn extract_topics(&self, body: &str) -> Vec<String> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for token in body.split_whitespace() {
            let word: String = token
                .chars()
                .filter(|c| c.is_alphanumeric())
                .flat_map(char::to_lowercase)
                .collect();

            if word.chars().count() < self.config.min_topic_word_len
                || !word.chars().any(char::is_alphabetic)
                || self.lexicons.is_stop_word(&word)
            {
                continue;
            }

            if let Some(&pos) = index.get(&word) {
                counts[pos].1 += 1;
            } else {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }

        // Stable sort keeps first-occurrence order among equal counts
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
            .into_iter()
            .take(self.config.topic_count)
            .map(|(word, _)| word)
            .collect()
    }

    /// Sentences that open with an action verb or contain an action phrase
    #[must_use]
    pub fn extract_action_items(&self, body: &str) -> Vec<String> {
        let items = split_sentences(body)
            .into_iter()
            .filter(|sentence| self.is_action_item(sentence))
            .map(str::to_string);

        match self.config.max_action_items {
            Some(limit) => items.take(limit).collect(),
            None => items.collect(),
        }
    }

    fn is_action_item(&self, sentence: &str) -> bool {
        let opens_with_verb = sentence.split_whitespace().next().is_some_and(|first| {
            let verb: String = first
                .chars()
                .filter(|c| c.is_alphabetic())
                .flat_map(char::to_lowercase)
                .collect();
            self.lexicons.is_action_verb(&verb)
        });

        opens_with_verb || self.lexicons.action_phrases.is_match(sentence)
    }

    #[must_use]
    pub fn reading_time(&self, word_count: usize) -> u32 {
        let wpm = usize::try_from(self.config.reading_speed_wpm)
            .unwrap_or(usize::MAX)
            .max(1);
        let minutes = word_count.div_ceil(wpm).max(1);
        u32::try_from(minutes).unwrap_or(u32::MAX)
    }
}

/// Analyze subject and body with the default lexicons and settings
#[must_use]
pub fn analyze_content(subject: &str, body: &str) -> ContentInsights {
    ContentAnalyzer::new(CompiledConfig::shared()).analyze(subject, body)
}

/// A closing line ("Best regards,") followed by at least one non-empty line
fn has_signature_block(body: &str) -> bool {
    let lines: Vec<&str> = body.lines().collect();
    lines.iter().enumerate().any(|(i, line)| {
        CLOSING_REGEX.is_match(line) && lines[i + 1..].iter().any(|l| !l.trim().is_empty())
    })
}

/// Split text into trimmed, non-empty sentences on `.`, `!`, `?` and line
/// breaks. Terminal punctuation stays with its sentence; a `.` between two
/// digits does not end a sentence.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let (idx, c) = chars[i];
        match c {
            '\n' => {
                sentences.push(&text[start..idx]);
                start = idx + 1;
            }
            '.' | '!' | '?' => {
                let decimal_point = c == '.'
                    && i > 0
                    && chars[i - 1].1.is_ascii_digit()
                    && chars.get(i + 1).is_some_and(|(_, n)| n.is_ascii_digit());

                if !decimal_point {
                    let mut j = i + 1;
                    while j < chars.len() && matches!(chars[j].1, '.' | '!' | '?') {
                        j += 1;
                    }
                    let end = chars.get(j).map_or(text.len(), |(k, _)| *k);
                    sentences.push(&text[start..end]);
                    start = end;
                    i = j;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_keeps_terminators() {
        assert_eq!(
            split_sentences("Please submit your report by Friday. Thanks."),
            vec!["Please submit your report by Friday.", "Thanks."]
        );
    }

    #[test]
    fn test_split_sentences_on_newlines_and_runs() {
        assert_eq!(
            split_sentences("Hi team\nReally?! Yes...\n\nok"),
            vec!["Hi team", "Really?!", "Yes...", "ok"]
        );
    }

    #[test]
    fn test_split_sentences_decimal() {
        assert_eq!(
            split_sentences("Growth was 3.5 percent. Good."),
            vec!["Growth was 3.5 percent.", "Good."]
        );
    }

    #[test]
    fn test_signature_block_needs_name_line() {
        assert!(has_signature_block("Body text.\n\nBest regards,\nAlice"));
        assert!(!has_signature_block("Body text.\n\nBest regards,"));
        assert!(!has_signature_block("Regards to your team, they did well."));
    }

    #[test]
    fn test_reading_time_floor_and_ceiling() {
        let analyzer = ContentAnalyzer::new(CompiledConfig::shared());
        assert_eq!(analyzer.reading_time(0), 1);
        assert_eq!(analyzer.reading_time(200), 1);
        assert_eq!(analyzer.reading_time(201), 2);
        assert_eq!(analyzer.reading_time(1000), 5);
    }
}
