//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod chain;
pub mod inference;
pub mod pinata;

pub use chain::ChainGatewayClient;
pub use inference::InferenceClient;
pub use pinata::PinataClient;
