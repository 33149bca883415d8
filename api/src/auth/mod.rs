//! Wallet session handling

pub mod wallet;

pub use wallet::{optional_wallet_middleware, wallet_middleware};
