//! `ft-movement` — how far has an asset travelled, and has it stopped?
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`classifier`] | `trip_distance_km`, `classify`, `MovementSummary`          |
//! | [`idle`]       | `IdleReport`, `IdleReason`, `assess_idle`                  |
//! | [`error`]      | `MovementError`, `MovementResult<T>`                       |
//!
//! # Idle model
//!
//! An asset is idle over a window when the cumulative great-circle path
//! length through its samples in that window is below a threshold (default
//! 0.1 km).  An empty window is idle by definition, and the report then
//! carries the time since the asset was last seen instead of a path length.
//!
//! All functions are pure: the caller fetches the samples and supplies "now".

pub mod classifier;
pub mod error;
pub mod idle;


pub use classifier::{MovementSummary, classify, trip_distance_km};
pub use error::{MovementError, MovementResult};
pub use idle::{IdleReason, IdleReport, assess_idle};
