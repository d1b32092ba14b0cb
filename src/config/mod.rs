//! Configuration and shared types

pub mod settings;
pub mod types;
