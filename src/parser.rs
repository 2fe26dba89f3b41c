//! Address and recipient-list parsing

use crate::error::{AnalysisError, Result};
use crate::types::{ParsedAddress, ParsedRecipient, RecipientKind};
use std::collections::HashSet;
use tracing::debug;

/// Parse a single raw address into name, email and domain
pub fn analyze_identity(raw: &str) -> Result<ParsedAddress> {
    ParsedAddress::parse(raw)
}

/// Parse the To, Cc and Bcc fields into one de-duplicated recipient list
///
/// Entries keep their field order (to, cc, bcc) and their order within each
/// field. A recipient listed twice in the same field is kept once; the same
/// address in two different fields is kept in both.
pub fn analyze_recipients(to: &str, cc: &str, bcc: &str) -> Result<Vec<ParsedRecipient>> {
    let fields = [
        (RecipientKind::To, to),
        (RecipientKind::Cc, cc),
        (RecipientKind::Bcc, bcc),
    ];

    let mut seen: HashSet<(String, RecipientKind)> = HashSet::new();
    let mut recipients = Vec::new();

    for (kind, field) in fields {
        let entries = split_address_list(field).map_err(|e| in_field(e, kind, field))?;

        for entry in entries {
            let address = ParsedAddress::parse(entry).map_err(|e| in_field(e, kind, entry))?;

            if seen.insert((address.email.to_lowercase(), kind)) {
                recipients.push(ParsedRecipient { address, kind });
            }
        }
    }

    debug!("Parsed {} recipients", recipients.len());

    Ok(recipients)
}

/// Name the header field in a parse failure
fn in_field(err: AnalysisError, kind: RecipientKind, input: &str) -> AnalysisError {
    match err {
        AnalysisError::Parse { reason, .. } => AnalysisError::Parse {
            input: input.to_string(),
            reason: format!("{kind} recipient: {reason}"),
        },
        other => other,
    }
}

/// Split a comma-separated address list, ignoring commas inside quotes or
/// angle brackets. Returned entries are trimmed and never empty.
///
/// A quote or `<` still open at the end of the field is a parse error.
pub fn split_address_list(field: &str) -> Result<Vec<&str>> {
    let mut entries = Vec::new();
    let mut in_quotes = false;
    let mut in_angle = false;
    let mut start = 0;

    for (idx, c) in field.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '<' if !in_quotes => in_angle = true,
            '>' if !in_quotes => in_angle = false,
            ',' if !in_quotes && !in_angle => {
                entries.push(&field[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    entries.push(&field[start..]);

    if in_quotes {
        return Err(AnalysisError::parse(field, "unbalanced '\"' in address list"));
    }
    if in_angle {
        return Err(AnalysisError::parse(field, "missing closing '>' in address list"));
    }

    Ok(entries
        .into_iter()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect())
}
