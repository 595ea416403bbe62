//! NutriAI relay - HTTP backend between the NutriAI front-end and its Azure services
//!
//! Each route forwards to one service (Blob Storage, Cosmos DB, Translator or
//! Custom Vision) or answers from the local summary and advice rules.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::config::Settings;
pub use crate::core::{summarize, AdviceEngine, AdviceRule};
pub use crate::models::{ClassificationResult, Prediction, UserProfile};
pub use crate::routes::{configure_routes, AppState};
