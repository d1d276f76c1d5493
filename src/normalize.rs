use scraper::Html;
use std::collections::{HashMap, HashSet};

/// NLTK English stopword list. Tokens are matched after punctuation
/// stripping, so the apostrophe entries only matter for inputs that never
/// reach them; they are kept to mirror the published list.
const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "you're", "you've", "you'll", "you'd", "your", "yours", "yourself",
    "yourselves", "he", "him", "his", "himself", "she", "she's", "her",
    "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
    "that", "that'll", "these", "those", "am", "is", "are", "was", "were",
    "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
    "as", "until", "while", "of", "at", "by", "for", "with", "about",
    "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off",
    "over", "under", "again", "further", "then", "once", "here", "there",
    "when", "where", "why", "how", "all", "any", "both", "each", "few",
    "more", "most", "other", "some", "such", "no", "nor", "not", "only",
    "own", "same", "so", "than", "too", "very", "s", "t", "can", "will",
    "just", "don", "don't", "should", "should've", "now", "d", "ll", "m",
    "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
    "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn",
    "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
    "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won",
    "won't", "wouldn", "wouldn't",
];

/// Base-form lexicon for the lemmatizer. Entries are fixed points: a token
/// found here is returned unchanged, and suffix-rule candidates are accepted
/// only if they land here. Singular base forms only, no stopwords.
const LEXICON: &[&str] = &[
    "access", "account", "action", "activity", "address", "agreement",
    "alert", "amount", "analysis", "answer", "appendix", "attachment",
    "attempt", "authentication", "authorization", "balance", "bank",
    "banking", "basis", "benefit", "bill", "bonus", "branch", "breach",
    "browser", "business", "button", "campaign", "card", "case", "cash",
    "center", "certificate", "chance", "change", "charge", "check", "child",
    "claim", "click", "client", "code", "company", "complaint", "computer",
    "concern", "confirmation", "contact", "content", "contract", "cost",
    "credential", "credit", "crisis", "customer", "data", "date", "day",
    "deadline", "deal", "debit", "delivery", "department", "deposit",
    "detail", "device", "document", "dollar", "email", "error",
    "expiration", "failure", "fee", "file", "foot", "fund", "gift", "goose",
    "guarantee", "half", "help", "history", "hour", "identity", "inbox",
    "index", "info", "information", "interest", "invoice", "issue",
    "issuer", "item", "knife", "leaf", "life", "limit", "link", "list",
    "loan", "login", "loss", "machine", "mail", "man", "manager", "matrix",
    "member", "membership", "message", "minute", "money", "month",
    "mortgage", "mouse", "name", "notice", "notification", "number",
    "offer", "office", "order", "overdraft", "owner", "package", "page",
    "password", "payment", "penalty", "people", "person", "phone", "pin",
    "policy", "prize", "problem", "process", "product", "profile",
    "program", "progress", "purchase", "question", "reason", "receipt",
    "record", "refund", "report", "request", "reset", "response", "result",
    "review", "reward", "risk", "routing", "saving", "schedule", "security",
    "self", "server", "service", "shelf", "sign", "site", "software",
    "statement", "status", "step", "success", "support", "system", "tax",
    "team", "term", "text", "thief", "threat", "ticket", "time", "tooth",
    "transaction", "transfer", "update", "upgrade", "user", "validation",
    "value", "verification", "violation", "virus", "warning", "web",
    "website", "week", "wife", "winner", "wish", "withdrawal", "wolf",
    "woman", "word", "year",
];

/// Irregular plurals checked before the suffix rules fire. Every value must
/// be a lexicon member so lemmatizer output stays a fixed point.
const EXCEPTIONS: &[(&str, &str)] = &[
    ("analyses", "analysis"),
    ("appendices", "appendix"),
    ("children", "child"),
    ("crises", "crisis"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("halves", "half"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lives", "life"),
    ("matrices", "matrix"),
    ("mice", "mouse"),
    ("selves", "self"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("thieves", "thief"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// WordNet morphy noun substitutions, in rule order.
const NOUN_SUFFIX_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

pub struct Lemmatizer {
    lexicon: HashSet<&'static str>,
    exceptions: HashMap<&'static str, &'static str>,
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            exceptions: EXCEPTIONS.iter().copied().collect(),
        }
    }

    /// Dictionary-validated noun lemmatization. Tokens already in the
    /// lexicon pass through unchanged; otherwise the irregular table and the
    /// suffix rules are tried, and a candidate is accepted only if the
    /// lexicon contains it. Unknown tokens come back unchanged.
    pub fn lemmatize(&self, token: &str) -> String {
        if self.lexicon.contains(token) {
            return token.to_string();
        }
        if let Some(base) = self.exceptions.get(token) {
            return (*base).to_string();
        }
        for (suffix, replacement) in NOUN_SUFFIX_RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                let candidate = format!("{stem}{replacement}");
                if self.lexicon.contains(candidate.as_str()) {
                    return candidate;
                }
            }
        }
        token.to_string()
    }
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TextNormalizer {
    stopwords: HashSet<&'static str>,
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS.iter().copied().collect(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Produces the canonical text fed to the vectorizer: markup stripped,
    /// lowercased, ASCII punctuation removed, stopwords dropped, tokens
    /// lemmatized, rejoined with single spaces. Total on any input and
    /// idempotent: normalizing its own output is a no-op.
    pub fn normalize(&self, raw: &str) -> String {
        let text = strip_markup(raw);
        let text = text.to_lowercase();
        let text: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
        text.split_whitespace()
            .filter(|word| !self.stopwords.contains(word))
            .map(|word| self.lemmatizer.lemmatize(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenates the text nodes of the parsed document. The parser is
/// error-recovering, so malformed markup degrades to best-effort extraction
/// instead of failing.
fn strip_markup(raw: &str) -> String {
    let document = Html::parse_document(raw);
    document.root_element().text().collect()
}
