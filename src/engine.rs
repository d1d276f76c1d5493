use std::sync::Arc;
use tracing::{error, info};

use crate::classifier::{Classifier, LinearClassifier};
use crate::config::Config;
use crate::error::EngineError;
use crate::explain::Explanation;
use crate::features::{full_schema_digest, FeatureRecord};
use crate::highlight::Highlighter;
use crate::lexical::{SignalExtractor, LEXICAL_FEATURE_COUNT};
use crate::normalize::TextNormalizer;
use crate::terms::SuspiciousTerms;
use crate::types::Prediction;
use crate::vectorizer::{TfidfVectorizer, Vectorizer};

pub const MAX_INPUT_CHARS: usize = 5000;
const PREVIEW_CHARS: usize = 200;

pub const INPUT_TOO_LARGE_FRAGMENT: &str =
    "<p style='color:red;'>Error: Input too large. Maximum 5000 characters allowed.</p>";
pub const INTERNAL_ERROR_FRAGMENT: &str =
    "<p style='color:red;'>An internal error occurred. Please try again later.</p>";

/// The full analysis pipeline behind one synchronous call. Built once at
/// startup and shared immutably across handlers.
pub struct AnalysisEngine {
    normalizer: TextNormalizer,
    signals: SignalExtractor,
    highlighter: Highlighter,
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Result<Self, EngineError> {
        info!("Loading vectorizer artifact from {}", config.vectorizer_path);
        let vectorizer = TfidfVectorizer::load(&config.vectorizer_path)?;
        info!("Loading classifier artifact from {}", config.classifier_path);
        let classifier = LinearClassifier::load(&config.classifier_path)?;
        Self::from_parts(Box::new(vectorizer), Box::new(classifier))
    }

    /// Wires the pipeline and enforces the contract between the artifacts:
    /// the classifier must expect exactly the vectorizer's vocabulary plus
    /// the lexical block, in that order.
    pub fn from_parts(
        vectorizer: Box<dyn Vectorizer>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, EngineError> {
        let expected = vectorizer.vector_len() + LEXICAL_FEATURE_COUNT;
        if classifier.n_features() != expected {
            return Err(EngineError::Artifact(format!(
                "classifier expects {} features but the live schema has {}",
                classifier.n_features(),
                expected
            )));
        }
        let live_digest = full_schema_digest(vectorizer.feature_names());
        if classifier.feature_digest() != live_digest {
            return Err(EngineError::Artifact(format!(
                "classifier schema digest {} does not match live schema {}",
                classifier.feature_digest(),
                live_digest
            )));
        }

        let terms = Arc::new(SuspiciousTerms::new());
        let signals = SignalExtractor::new(terms.clone())?;
        let highlighter = Highlighter::new(&terms)?;
        Ok(Self {
            normalizer: TextNormalizer::new(),
            signals,
            highlighter,
            vectorizer,
            classifier,
        })
    }

    /// Analyzes one email and always returns a renderable HTML fragment.
    /// Oversized input short-circuits before any processing; any pipeline
    /// failure is logged once here and collapses to a generic message that
    /// leaks no internal detail.
    pub fn analyze(&self, text: &str) -> String {
        if text.chars().count() > MAX_INPUT_CHARS {
            return INPUT_TOO_LARGE_FRAGMENT.to_string();
        }

        let preview = text
            .chars()
            .take(PREVIEW_CHARS)
            .collect::<String>()
            .replace('\n', " ");
        info!("Received email content: {:?}...", preview);

        match self.run_pipeline(text) {
            Ok(fragment) => fragment,
            Err(e) => {
                error!("Email analysis failed: {}", e);
                INTERNAL_ERROR_FRAGMENT.to_string()
            }
        }
    }

    fn run_pipeline(&self, text: &str) -> Result<String, EngineError> {
        let normalized = self.normalizer.normalize(text);
        let vector = self.vectorizer.transform(&normalized)?;
        let signals = self.signals.extract(text);
        let record = FeatureRecord::assemble(vector, &signals);
        let score = self.classifier.classify(record.as_slice())?;
        let prediction = Prediction::from_score(&score);
        let highlighted = self.highlighter.highlight(text);
        let explanation = Explanation::from_record(&record);
        Ok(format!(
            "<h3>Prediction: {} ({:.2}%)</h3><p>{}</p>{}",
            prediction.label.as_str(),
            prediction.confidence,
            highlighted,
            explanation.to_html()
        ))
    }
}
