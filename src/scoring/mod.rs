//! Scoring and ranking core
//!
//! Pure, synchronous transforms over judging rows:
//! - [`GradeTable`]: total -> grade lookup
//! - [`RankingEngine`]: totals, grades, dense ranks and prize gating
//! - [`expand_to_members`]: house results fanned out to house members
//! - [`JudgingSnapshot`]: the in-memory state of one judging operation
//!
//! Nothing in this module performs I/O or logs.

pub mod engine;
pub mod error;
pub mod grade_table;
pub mod group;
pub mod snapshot;
pub mod types;

pub use engine::RankingEngine;
pub use error::{ScoringError, ScoringResult};
pub use grade_table::{GradeTable, GradeThreshold};
pub use group::{expand_to_members, RosterMembership};
pub use snapshot::{EventKind, JudgingSnapshot};
pub use types::{JudgeMarks, RankLabel, RankingParameters, ScoreRow};
