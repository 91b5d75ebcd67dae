// Re-export key components
pub use crate::directions::to_geojson::{route_to_geojson, route_to_geojson_string};
pub use crate::directions::{
    orientation_phrase, synthesize, Checkpoint, Turn, SAME_LOCATION_RADIUS_M,
};
pub use crate::error::Error;
pub use crate::geocode::{Gazetteer, Geocoder};
pub use crate::loading::{create_street_graph, StreetModelConfig};
pub use crate::model::{StreetEdge, StreetGraph, StreetNode};
pub use crate::routing::{plan_route, shortest_path};
pub use crate::tracking::{
    GuideEngine, ProgressUpdate, TrackingSession, ARRIVAL_RADIUS_M, SKIP_TOLERANCE_M,
};

pub use crate::StreetNodeId;
