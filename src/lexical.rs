use regex::Regex;
use std::sync::Arc;
use url::{Host, Url};

use crate::error::EngineError;
use crate::terms::SuspiciousTerms;

/// Schema order of the rule-based features. This order is load-bearing: the
/// classifier artifact is trained against it and the explainer reports it.
pub const LEXICAL_FEATURE_NAMES: [&str; 8] = [
    "num_words",
    "num_links",
    "num_suspicious_words",
    "has_bank_terms",
    "has_login_request",
    "num_exclamations",
    "contains_ip_url",
    "num_uppercase_words",
];

pub const LEXICAL_FEATURE_COUNT: usize = LEXICAL_FEATURE_NAMES.len();

#[derive(Clone, Debug, PartialEq)]
pub struct LexicalSignals {
    pub num_words: f64,
    pub num_links: f64,
    pub num_suspicious_words: f64,
    pub has_bank_terms: f64,
    pub has_login_request: f64,
    pub num_exclamations: f64,
    pub contains_ip_url: f64,
    pub num_uppercase_words: f64,
}

impl LexicalSignals {
    pub fn to_vec(&self) -> Vec<f64> {
        vec![
            self.num_words,
            self.num_links,
            self.num_suspicious_words,
            self.has_bank_terms,
            self.has_login_request,
            self.num_exclamations,
            self.contains_ip_url,
            self.num_uppercase_words,
        ]
    }
}

/// Computes the rule-based signals on raw text. Case and punctuation carry
/// signal here, so this never sees normalized text.
pub struct SignalExtractor {
    url_re: Regex,
    http_url_re: Regex,
    terms: Arc<SuspiciousTerms>,
}

impl SignalExtractor {
    pub fn new(terms: Arc<SuspiciousTerms>) -> Result<Self, EngineError> {
        let url_re = Regex::new(r"https?://\S+|www\.\S+")
            .map_err(|e| EngineError::Internal(format!("url pattern: {e}")))?;
        let http_url_re = Regex::new(r"https?://\S+")
            .map_err(|e| EngineError::Internal(format!("http url pattern: {e}")))?;
        Ok(Self { url_re, http_url_re, terms })
    }

    pub fn extract(&self, text: &str) -> LexicalSignals {
        let words: Vec<&str> = text.split_whitespace().collect();
        let lower = text.to_lowercase();

        let num_words = words.len() as f64;
        let num_links = self.url_re.find_iter(text).count() as f64;
        let num_suspicious_words = words
            .iter()
            .filter(|word| self.terms.contains(&word.to_lowercase()))
            .count() as f64;
        let has_bank_terms = words
            .iter()
            .any(|word| self.terms.is_bank_term(&word.to_lowercase()))
            as i32 as f64;
        let has_login_request =
            (lower.contains("login") || lower.contains("sign in")) as i32 as f64;
        let num_exclamations = text.matches('!').count() as f64;
        let contains_ip_url = self
            .http_url_re
            .find_iter(text)
            .any(|m| is_ipv4_url(m.as_str())) as i32 as f64;
        let num_uppercase_words = words.iter().filter(|word| is_upper_token(word)).count() as f64;

        LexicalSignals {
            num_words,
            num_links,
            num_suspicious_words,
            has_bank_terms,
            has_login_request,
            num_exclamations,
            contains_ip_url,
            num_uppercase_words,
        }
    }
}

/// The `\S+` candidate carries any sentence punctuation glued to the URL,
/// which would turn `http://10.0.0.1,` into a domain host. Trailing ASCII
/// punctuation is trimmed before parsing; the host check itself stays strict.
fn is_ipv4_url(candidate: &str) -> bool {
    let trimmed = candidate.trim_end_matches(|c: char| c.is_ascii_punctuation());
    Url::parse(trimmed)
        .map(|url| matches!(url.host(), Some(Host::Ipv4(_))))
        .unwrap_or(false)
}

/// Token-level uppercase check: at least one uppercase letter and no
/// lowercase letters, so "FREE!!!" and "FREE2" both count.
fn is_upper_token(token: &str) -> bool {
    let mut has_upper = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}
