//! Domain models
//!
//! This module contains all database models used throughout the application.

pub mod event;
pub mod participant;
pub mod settings;
pub mod student;

pub use event::*;
pub use participant::*;
pub use settings::*;
pub use student::*;
