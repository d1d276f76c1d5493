use serde::{Deserialize, Serialize};
use std::fs;
use tracing::debug;

use crate::error::EngineError;
use crate::types::ClassScore;

/// Black-box classification seam. Implementations score a fully assembled
/// feature vector and report which schema they were trained against.
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &[f64]) -> Result<ClassScore, EngineError>;
    fn n_features(&self) -> usize;
    fn feature_digest(&self) -> &str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierArtifact {
    pub version: String,
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Digest of the feature schema the weights were fit against; checked
    /// against the live schema at engine construction.
    pub feature_digest: String,
}

/// Pretrained logistic model. The sigmoid output is the probability of
/// class 1 (Phishing); ties at exactly 0.5 resolve to class 0.
pub struct LinearClassifier {
    artifact: ClassifierArtifact,
}

impl LinearClassifier {
    pub fn load(path: &str) -> Result<Self, EngineError> {
        let data = fs::read_to_string(path)?;
        let artifact: ClassifierArtifact = serde_json::from_str(&data)?;
        debug!(
            "Loaded classifier {} with {} weights from {}",
            artifact.version,
            artifact.weights.len(),
            path
        );
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self, EngineError> {
        if artifact.weights.is_empty() {
            return Err(EngineError::Artifact("classifier has no weights".to_string()));
        }
        if !artifact.intercept.is_finite() || artifact.weights.iter().any(|w| !w.is_finite()) {
            return Err(EngineError::Artifact(
                "classifier weights must be finite".to_string(),
            ));
        }
        Ok(Self { artifact })
    }

    pub fn version(&self) -> &str {
        &self.artifact.version
    }
}

impl Classifier for LinearClassifier {
    fn classify(&self, features: &[f64]) -> Result<ClassScore, EngineError> {
        if features.len() != self.artifact.weights.len() {
            return Err(EngineError::ModelInference(format!(
                "feature vector has {} values, model expects {}",
                features.len(),
                self.artifact.weights.len()
            )));
        }
        let mut z = self.artifact.intercept;
        for (weight, value) in self.artifact.weights.iter().zip(features) {
            z += weight * value;
        }
        let p_phishing = sigmoid(z);
        let (class_index, probability) = if p_phishing > 0.5 {
            (1, p_phishing)
        } else {
            (0, 1.0 - p_phishing)
        };
        Ok(ClassScore { class_index, probability })
    }

    fn n_features(&self) -> usize {
        self.artifact.weights.len()
    }

    fn feature_digest(&self) -> &str {
        &self.artifact.feature_digest
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
