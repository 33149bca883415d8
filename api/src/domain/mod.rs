//! Domain layer
//!
//! Contains pure business types with no transport concerns.
//! - `entities`: Typed records and the viewer session
//! - `ports`: Trait definitions for external collaborators

pub mod entities;
pub mod ports;
