//! Whole-message email analysis

use crate::config::CompiledConfig;
use crate::content::ContentAnalyzer;
use crate::error::Result;
use crate::parser::analyze_recipients;
use crate::types::{EmailAnalysisResult, ParsedAddress};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Already-extracted header and body text of one message
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EmailInput {
    pub sender: String,
    pub to: String,
    pub cc: String,
    pub bcc: String,
    pub subject: String,
    pub body: String,
}

/// Analyzer for complete messages
#[derive(Debug, Clone, Copy)]
pub struct EmailAnalyzer<'a> {
    content: ContentAnalyzer<'a>,
}

impl<'a> EmailAnalyzer<'a> {
    #[must_use]
    pub const fn new(compiled: &'a CompiledConfig) -> Self {
        Self {
            content: ContentAnalyzer::new(compiled),
        }
    }

    /// Analyze sender, recipients and content. Fails as a whole if any
    /// address is malformed.
    pub fn analyze(&self, input: &EmailInput) -> Result<EmailAnalysisResult> {
        let sender = ParsedAddress::parse(&input.sender)?;
        let recipients = analyze_recipients(&input.to, &input.cc, &input.bcc)?;
        let insights = self.content.analyze(&input.subject, &input.body);

        debug!(
            "Analyzed email: {} from {} to {} recipients",
            input.subject,
            sender.email,
            recipients.len()
        );

        Ok(EmailAnalysisResult {
            sender,
            recipients,
            subject: input.subject.clone(),
            insights,
        })
    }
}

/// Analyze one message with the default lexicons and settings
pub fn analyze_email(
    sender: &str,
    to: &str,
    cc: &str,
    bcc: &str,
    subject: &str,
    body: &str,
) -> Result<EmailAnalysisResult> {
    let input = EmailInput {
        sender: sender.to_string(),
        to: to.to_string(),
        cc: cc.to_string(),
        bcc: bcc.to_string(),
        subject: subject.to_string(),
        body: body.to_string(),
    };

    EmailAnalyzer::new(CompiledConfig::shared()).analyze(&input)
}
