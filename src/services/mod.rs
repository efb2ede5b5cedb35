//! Cross-domain services

pub mod analytics;
