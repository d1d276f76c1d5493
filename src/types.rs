use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    pub fn from_class_index(index: usize) -> Self {
        match index {
            1 => Label::Phishing,
            _ => Label::Legitimate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Legitimate => "Legitimate",
            Label::Phishing => "Phishing",
        }
    }
}

/// Raw classifier output: predicted class index and the probability
/// assigned to that class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassScore {
    pub class_index: usize,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    pub confidence: f64,
}

impl Prediction {
    /// Maps a classifier score to the user-facing prediction. Confidence is
    /// the predicted-class probability as a percentage, rounded to two
    /// decimal places.
    pub fn from_score(score: &ClassScore) -> Self {
        Self {
            label: Label::from_class_index(score.class_index),
            confidence: round2(score.probability * 100.0),
        }
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeForm {
    #[serde(default)]
    pub email_content: String,
}
