//! Domain ports (traits)
//!
//! Port traits define interfaces that the application layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod classifier;
pub mod provider;
pub mod storage;

pub use classifier::{SentimentClassifier, SentimentLabel};
pub use provider::DataProvider;
pub use storage::{FileStore, ImageUpload};
