use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use tracing::debug;

use crate::error::EngineError;

/// Narrow seam over the vector feature source. The engine only ever needs a
/// positionally stable vector and the names behind each position.
pub trait Vectorizer: Send + Sync {
    fn transform(&self, text: &str) -> Result<Vec<f64>, EngineError>;
    fn feature_names(&self) -> &[String];

    fn vector_len(&self) -> usize {
        self.feature_names().len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerArtifact {
    pub version: String,
    pub vocabulary: Vec<String>,
    pub idf: Vec<f64>,
}

/// Pretrained tf-idf transform: term counts weighted by per-term idf, then
/// L2-normalized. Vocabulary order defines vector positions.
pub struct TfidfVectorizer {
    artifact: VectorizerArtifact,
    index: HashMap<String, usize>,
}

impl TfidfVectorizer {
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let data = fs::read_to_string(path)?;
        let artifact: VectorizerArtifact = serde_json::from_str(&data)?;
        debug!(
            "Loaded vectorizer {} with {} terms from {}",
            artifact.version,
            artifact.vocabulary.len(),
            path
        );
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: VectorizerArtifact) -> Result<Self, EngineError> {
        if artifact.vocabulary.len() != artifact.idf.len() {
            return Err(EngineError::Artifact(format!(
                "vocabulary has {} terms but idf has {} values",
                artifact.vocabulary.len(),
                artifact.idf.len()
            )));
        }
        let mut index = HashMap::with_capacity(artifact.vocabulary.len());
        for (i, term) in artifact.vocabulary.iter().enumerate() {
            if index.insert(term.clone(), i).is_some() {
                return Err(EngineError::Artifact(format!(
                    "duplicate vocabulary term: {term}"
                )));
            }
        }
        Ok(Self { artifact, index })
    }

    pub fn version(&self) -> &str {
        &self.artifact.version
    }
}

impl Vectorizer for TfidfVectorizer {
    fn transform(&self, text: &str) -> Result<Vec<f64>, EngineError> {
        let mut values = vec![0.0; self.artifact.vocabulary.len()];
        for token in text.split_whitespace() {
            if let Some(&i) = self.index.get(token) {
                values[i] += 1.0;
            }
        }
        for (i, value) in values.iter_mut().enumerate() {
            *value *= self.artifact.idf[i];
        }
        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in values.iter_mut() {
                *value /= norm;
            }
        }
        Ok(values)
    }

    fn feature_names(&self) -> &[String] {
        &self.artifact.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> VectorizerArtifact {
        VectorizerArtifact {
            version: "test".to_string(),
            vocabulary: vec!["account".to_string(), "click".to_string(), "verify".to_string()],
            idf: vec![1.0, 2.0, 1.5],
        }
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let mut bad = artifact();
        bad.idf.pop();
        assert!(matches!(
            TfidfVectorizer::from_artifact(bad),
            Err(EngineError::Artifact(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_terms() {
        let mut bad = artifact();
        bad.vocabulary[2] = "account".to_string();
        assert!(matches!(
            TfidfVectorizer::from_artifact(bad),
            Err(EngineError::Artifact(_))
        ));
    }

    #[test]
    fn test_weights_counts_and_normalizes() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        let values = vectorizer.transform("click account click").unwrap();
        assert_eq!(values.len(), 3);
        // counts [1, 2, 0] * idf [1.0, 2.0, 1.5] = [1.0, 4.0, 0.0], then L2.
        assert!(values[1] > values[0]);
        assert_eq!(values[2], 0.0);
        let norm: f64 = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_tokens_are_ignored() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        let values = vectorizer.transform("nothing matches here").unwrap();
        assert_eq!(values, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_text_is_a_zero_vector() {
        let vectorizer = TfidfVectorizer::from_artifact(artifact()).unwrap();
        let values = vectorizer.transform("").unwrap();
        assert_eq!(values, vec![0.0, 0.0, 0.0]);
        assert!(values.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectorizer.json");
        let json = serde_json::to_string(&artifact()).unwrap();
        std::fs::write(&path, json).unwrap();

        let vectorizer = TfidfVectorizer::load(path.to_str().unwrap()).unwrap();
        assert_eq!(vectorizer.vector_len(), 3);
        assert_eq!(vectorizer.version(), "test");
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = TfidfVectorizer::load("/nonexistent/vectorizer.json");
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectorizer.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = TfidfVectorizer::load(path.to_str().unwrap());
        assert!(matches!(result, Err(EngineError::Serialization(_))));
    }
}
