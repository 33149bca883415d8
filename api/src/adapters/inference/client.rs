//! Hosted inference client
//!
//! Posts `{"inputs": text}` to a text-classification model and returns the
//! highest-scoring label.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{SentimentClassifier, SentimentLabel};
use crate::error::ClassifierError;

pub const DEFAULT_SENTIMENT_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

pub struct InferenceClient {
    http: Client,
    model_url: String,
    token: Option<String>,
}

impl InferenceClient {
    /// `base_url` is the inference host; the model name is appended as a path
    pub fn new(base_url: &str, model: &str, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            model_url: format!("{}/models/{}", base_url.trim_end_matches('/'), model),
            token,
        }
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    label: String,
    score: f64,
}

/// The model answers one list of predictions per input
fn best_label(predictions: Vec<Vec<Prediction>>) -> Result<SentimentLabel, ClassifierError> {
    predictions
        .into_iter()
        .flatten()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .map(|p| SentimentLabel(p.label))
        .ok_or(ClassifierError::EmptyPrediction)
}

#[async_trait]
impl SentimentClassifier for InferenceClient {
    async fn classify(&self, text: &str) -> Result<SentimentLabel, ClassifierError> {
        let mut request = self
            .http
            .post(&self.model_url)
            .json(&InferenceRequest { inputs: text });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let predictions: Vec<Vec<Prediction>> = resp.json().await?;
        best_label(predictions)
    }
}
