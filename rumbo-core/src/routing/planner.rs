use geo::{Distance, Haversine, Point};

use super::dijkstra::shortest_path;
use crate::directions::{synthesize, Checkpoint, SAME_LOCATION_RADIUS_M};
use crate::model::StreetGraph;
use crate::Error;

/// Snaps both coordinates to the graph, computes the shortest path
/// between the snapped nodes and synthesizes the checkpoint sequence.
///
/// # Errors
///
/// Returns [`Error::SameLocation`] when both coordinates snap to the same
/// node within [`SAME_LOCATION_RADIUS_M`], [`Error::NoPointsFound`] when
/// snapping fails and [`Error::NoPath`] when the destination is
/// unreachable.
pub fn plan_route(
    graph: &StreetGraph,
    source: Point<f64>,
    destination: Point<f64>,
) -> Result<Vec<Checkpoint>, Error> {
    let start = graph.nearest_node(source)?;
    let target = graph.nearest_node(destination)?;

    if start == target && Haversine.distance(source, destination) < SAME_LOCATION_RADIUS_M {
        return Err(Error::SameLocation);
    }

    let node_path = shortest_path(graph, start, target)?;
    synthesize(graph, source, destination, &node_path)
}
