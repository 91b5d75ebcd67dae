//! Turn-by-turn direction synthesis.
//!
//! Converts a shortest-path node sequence into an ordered list of
//! checkpoints carrying geometry and street/turn metadata, and renders
//! per-leg instructions and GeoJSON route overlays from it.

mod phrase;
mod synthesize;
pub mod to_geojson;

pub use phrase::{orientation_phrase, Turn};
pub use synthesize::{synthesize, Checkpoint, SAME_LOCATION_RADIUS_M};
