//! This module is responsible for loading street network data from CSV
//! exports and building a routable street graph.

mod builder;
mod config;
pub(crate) mod de;
mod raw_types;

pub use builder::create_street_graph;
pub use config::StreetModelConfig;
