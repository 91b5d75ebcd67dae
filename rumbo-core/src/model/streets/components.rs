//! Street network components - nodes and edges

use geo::Point;

use crate::StreetNodeId;

/// Street graph node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// Stable ID of the node in the source data
    pub id: StreetNodeId,
    /// Node coordinates (x = longitude, y = latitude, degrees)
    pub geometry: Point<f64>,
}

/// Street graph edge (street segment)
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Street name, absent for unnamed segments
    pub name: Option<String>,
    /// Segment length in meters
    pub length_m: f64,
    /// Compass direction of travel along the segment, degrees [0, 360)
    pub bearing_deg: f64,
}
