use std::collections::HashSet;

/// Suspicious phrases flagged in email bodies. All lowercase; multi-word
/// phrases only ever match through the highlighter, single words also feed
/// the token-level lexical counts.
pub const SUSPICIOUS_TERMS: &[&str] = &[
    "urgent", "verify", "login", "click", "password", "confirm", "immediately",
    "limited time", "action required", "suspended", "unauthorized", "security alert",
    "validate", "alert", "compromise", "reset", "credentials", "locked",
    "verify identity", "failure", "warning", "threat", "penalty", "violation",
    "malicious", "phishing", "virus", "breach", "winner", "prize", "reward",
    "congratulations", "claim", "guarantee", "final notice", "act now",
    "bank", "transfer", "balance", "transaction", "credit", "debit", "loan", "wire",
    "funds", "statement", "routing", "swift", "iban", "sort code", "checking", "savings",
    "finance", "financial", "investment", "overdraft", "mortgage", "deposit", "withdrawal",
    "atm", "interest", "fee", "charges", "security code", "card number", "pin", "cvv",
    "issuer", "banking", "online banking",
];

/// The financial subset that drives the has_bank_terms signal. Deliberately
/// narrower than the financial vocabulary above.
pub const BANK_TERMS: &[&str] = &["bank", "credit", "loan"];

pub struct SuspiciousTerms {
    ordered: Vec<&'static str>,
    lookup: HashSet<&'static str>,
    bank: HashSet<&'static str>,
}

impl SuspiciousTerms {
    pub fn new() -> Self {
        Self::from_terms(SUSPICIOUS_TERMS)
    }

    pub fn from_terms(terms: &[&'static str]) -> Self {
        let ordered = terms.to_vec();
        let lookup = terms.iter().copied().collect();
        let bank = BANK_TERMS.iter().copied().collect();
        Self { ordered, lookup, bank }
    }

    /// Exact match against the term set; `token` must already be lowercase.
    pub fn contains(&self, token: &str) -> bool {
        self.lookup.contains(token)
    }

    pub fn is_bank_term(&self, token: &str) -> bool {
        self.bank.contains(token)
    }

    /// Terms in source order. The highlighter re-sorts these longest-first.
    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ordered.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl Default for SuspiciousTerms {
    fn default() -> Self {
        Self::new()
    }
}
