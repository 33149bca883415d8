//! Inference adapter
//!
//! Sentiment classifier backed by a hosted text-classification model.

pub mod client;

pub use client::InferenceClient;
