//! Contract gateway adapter
//!
//! Data Provider implementation over the contract gateway's JSON API.

pub mod client;
pub mod records;

pub use client::ChainGatewayClient;
