use regex::{Regex, RegexBuilder};

use crate::error::EngineError;
use crate::terms::SuspiciousTerms;

/// Escapes raw text and wraps suspicious terms in `<mark>`. One alternation
/// pattern, branches sorted longest-first, so a longer phrase always wins
/// over a contained shorter term and wraps never nest.
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new(terms: &SuspiciousTerms) -> Result<Self, EngineError> {
        if terms.is_empty() {
            return Ok(Self { pattern: None });
        }
        let mut sorted: Vec<&str> = terms.iter().collect();
        // Stable sort keeps source order for equal lengths.
        sorted.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = sorted
            .iter()
            .map(|term| regex::escape(term))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&format!(r"\b({alternation})\b"))
            .case_insensitive(true)
            .build()
            .map_err(|e| EngineError::Internal(format!("highlight pattern: {e}")))?;
        Ok(Self { pattern: Some(pattern) })
    }

    /// Escaping happens before matching, so input markup can never survive
    /// into the output and the inserted tags are the only markup present.
    pub fn highlight(&self, raw: &str) -> String {
        let escaped = html_escape::encode_quoted_attribute(raw);
        match &self.pattern {
            Some(pattern) => pattern.replace_all(&escaped, "<mark>$1</mark>").into_owned(),
            None => escaped.into_owned(),
        }
    }
}
