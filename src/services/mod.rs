//! Business logic services

pub mod judging_service;
pub mod results_service;
pub mod roster_service;
pub mod settings_service;

pub use judging_service::JudgingService;
pub use results_service::ResultsService;
pub use roster_service::RosterService;
pub use settings_service::SettingsService;
