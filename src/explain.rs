use crate::features::FeatureRecord;
use crate::lexical::LEXICAL_FEATURE_NAMES;

pub const MAX_EXPLANATION_ENTRIES: usize = 5;

/// The user-facing justification: the top rule-based features by value.
/// Vector features are deliberately excluded; their positions mean nothing
/// to a reader.
#[derive(Clone, Debug, PartialEq)]
pub struct Explanation {
    entries: Vec<(&'static str, f64)>,
}

impl Explanation {
    pub fn from_record(record: &FeatureRecord) -> Self {
        let mut entries: Vec<(&'static str, f64)> = LEXICAL_FEATURE_NAMES
            .iter()
            .copied()
            .zip(record.lexical_slice().iter().copied())
            .collect();
        // Stable sort: ties keep schema order.
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries.truncate(MAX_EXPLANATION_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[(&'static str, f64)] {
        &self.entries
    }

    pub fn to_html(&self) -> String {
        let mut html =
            String::from("<h4>Top Rule-Based Features Contributing to Prediction:</h4><ul>");
        for (name, value) in &self.entries {
            html.push_str(&format!("<li><b>{name}</b>: {value}</li>"));
        }
        html.push_str("</ul>");
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::LexicalSignals;

    fn record(vector: Vec<f64>) -> FeatureRecord {
        let signals = LexicalSignals {
            num_words: 10.0,
            num_links: 2.0,
            num_suspicious_words: 4.0,
            has_bank_terms: 1.0,
            has_login_request: 1.0,
            num_exclamations: 7.0,
            contains_ip_url: 0.0,
            num_uppercase_words: 3.0,
        };
        FeatureRecord::assemble(vector, &signals)
    }

    #[test]
    fn test_top_five_by_value_descending() {
        let explanation = Explanation::from_record(&record(vec![0.3, 0.1]));
        assert_eq!(
            explanation.entries(),
            &[
                ("num_words", 10.0),
                ("num_exclamations", 7.0),
                ("num_suspicious_words", 4.0),
                ("num_uppercase_words", 3.0),
                ("num_links", 2.0),
            ]
        );
    }

    #[test]
    fn test_ties_keep_schema_order() {
        let zeros = LexicalSignals {
            num_words: 0.0,
            num_links: 0.0,
            num_suspicious_words: 0.0,
            has_bank_terms: 0.0,
            has_login_request: 0.0,
            num_exclamations: 0.0,
            contains_ip_url: 0.0,
            num_uppercase_words: 0.0,
        };
        let explanation = Explanation::from_record(&FeatureRecord::assemble(vec![], &zeros));
        let names: Vec<&str> = explanation.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec![
                "num_words",
                "num_links",
                "num_suspicious_words",
                "has_bank_terms",
                "has_login_request",
            ]
        );
    }

    #[test]
    fn test_vector_features_never_appear() {
        let explanation = Explanation::from_record(&record(vec![99.0, 88.0, 77.0]));
        for (name, _) in explanation.entries() {
            assert!(LEXICAL_FEATURE_NAMES.contains(name));
        }
    }

    #[test]
    fn test_renders_list_fragment() {
        let html = Explanation::from_record(&record(vec![])).to_html();
        assert!(html.starts_with("<h4>Top Rule-Based Features Contributing to Prediction:</h4><ul>"));
        assert!(html.contains("<li><b>num_words</b>: 10</li>"));
        assert!(html.ends_with("</ul>"));
    }
}
