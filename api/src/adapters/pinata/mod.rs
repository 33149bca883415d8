//! Pinata adapter
//!
//! File store implementation over the Pinata pinning API.

pub mod client;

pub use client::PinataClient;
