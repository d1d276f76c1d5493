use sha2::{Digest, Sha256};

use crate::lexical::{LexicalSignals, LEXICAL_FEATURE_NAMES};

/// The assembled model input: vector features first, then the rule-based
/// block in schema order. Length is always vector_len + 8.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureRecord {
    values: Vec<f64>,
    vector_len: usize,
}

impl FeatureRecord {
    pub fn assemble(vector: Vec<f64>, signals: &LexicalSignals) -> Self {
        let vector_len = vector.len();
        let mut values = vector;
        values.extend(signals.to_vec());
        Self { values, vector_len }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn vector_len(&self) -> usize {
        self.vector_len
    }

    /// The trailing rule-based block, in schema order.
    pub fn lexical_slice(&self) -> &[f64] {
        &self.values[self.vector_len..]
    }
}

/// Hex SHA-256 over feature names, one per line. The classifier artifact
/// carries the digest of the schema it was fit against; a mismatch at
/// startup means the artifacts disagree about what each position holds.
pub fn schema_digest<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Sha256::new();
    for name in names {
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

/// Digest of the live schema: vectorizer vocabulary followed by the lexical
/// feature names.
pub fn full_schema_digest(vector_names: &[String]) -> String {
    schema_digest(
        vector_names
            .iter()
            .map(|s| s.as_str())
            .chain(LEXICAL_FEATURE_NAMES.iter().copied()),
    )
}
