//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod event_repo;
pub mod score_repo;
pub mod settings_repo;
pub mod student_repo;

pub use event_repo::EventRepository;
pub use score_repo::ScoreRepository;
pub use settings_repo::SettingsRepository;
pub use student_repo::StudentRepository;
