//! Data model for the street network.

pub mod streets;

pub use streets::components::{StreetEdge, StreetNode};
pub use streets::network::{IndexedPoint, StreetGraph};
