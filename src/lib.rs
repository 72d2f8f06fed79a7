//! EventPro - School Event Scoring and Ranking
//!
//! This library provides the core functionality for the EventPro service,
//! which records judge marks for school cultural events and turns them into
//! grades, prize ranks and certificate data.
//!
//! # Features
//!
//! - Configurable number of judges and marks per judge
//! - Grade table lookup and dense ranking with prize gating
//! - Consolation prizes for placed entries below the prize threshold
//! - Group (house) events whose results reach every house member
//! - Atomic persistence of judging submissions
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic
//! - **Repositories**: Database access
//! - **Scoring**: Pure ranking core with no I/O
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod scoring;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
