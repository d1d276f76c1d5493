use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub vectorizer_path: String,
    pub classifier_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("PHISHLENS_BIND", "0.0.0.0:3000"),
            vectorizer_path: env_or("PHISHLENS_VECTORIZER", "./artifacts/vectorizer.json"),
            classifier_path: env_or("PHISHLENS_CLASSIFIER", "./artifacts/classifier.json"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
