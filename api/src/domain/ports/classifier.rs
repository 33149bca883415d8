//! Sentiment classifier port trait

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ClassifierError;

/// Discrete label produced by the model (e.g. `POSITIVE`, `NEGATIVE`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SentimentLabel(pub String);

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifierError>;
}
