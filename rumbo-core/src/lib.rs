//! Core engine for turn-by-turn street guidance.
//!
//! Builds a routable street graph from CSV exports, computes shortest
//! paths, synthesizes human-readable checkpoint sequences along them and
//! tracks live agent positions against those checkpoints, recalculating
//! the route when an agent strays from it.

pub mod directions;
pub mod error;
pub mod geocode;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod tracking;

pub use error::Error;

/// Stable identifier of a street node in the source data (OSM node id
/// for osmnx exports).
pub type StreetNodeId = i64;
