//! Points Projection - per-game basketball point projections
//!
//! This library provides:
//! - The projection formula (per-36 rates scaled by minutes, usage, pace and
//!   defense-vs-position, split into twos, threes and free throws)
//! - Input validation and the fallback policy for missing adjustment data
//! - Reference data loading (players, team pace, defense-vs-position)
//! - A transport-agnostic projection service and batch slate runner

pub mod error;
pub mod player;
pub mod reference;
pub mod projection;
pub mod api;
pub mod slate;

// Re-export commonly used types
pub use error::DataError;
pub use player::PlayerRecord;
pub use reference::{ReferenceData, ReferenceSource, TeamPace};
pub use projection::{
    compute_projection, compute_pace_adjustment, ProjectionEngine, ProjectionConfig, ProjectionResult,
    ValidationError,
};
pub use api::{ApiError, ProjectionQuery, ProjectionService};
