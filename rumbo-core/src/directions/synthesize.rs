use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use petgraph::graph::NodeIndex;

use crate::model::StreetGraph;
use crate::Error;

/// Great-circle distance below which identical endpoint nodes mean the
/// caller is already at the destination.
pub const SAME_LOCATION_RADIUS_M: f64 = 100.0;

/// One leg of a synthesized route.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoint {
    /// Where this leg begins.
    pub source: Point<f64>,
    /// Graph node the leg targets; live progress is measured against it.
    pub mid: Point<f64>,
    /// Terminal point of the leg, absent on the final checkpoint.
    pub destination: Option<Point<f64>>,
    /// Street just traversed to reach `mid`.
    pub incoming_street: Option<String>,
    /// Street to take after `mid`; absent marks a terminal checkpoint.
    pub outgoing_street: Option<String>,
    /// Signed delta between outgoing and incoming edge bearings, degrees.
    /// Absent on legs without a defined incoming/outgoing pair.
    pub turn_angle_deg: Option<f64>,
    /// Leg length in meters.
    pub leg_length_m: f64,
}

/// Turns a shortest-path node sequence into an ordered checkpoint list.
///
/// Every consecutive node triple becomes one interior checkpoint; a
/// two-node path contributes its single edge instead. Two terminal
/// checkpoints bridge the last graph node to the requested destination
/// coordinate (the first of them deliberately zero-length), and a leading
/// checkpoint connects the caller's position to the first graph node. The
/// result therefore always has at least four entries for a path of two
/// or more nodes.
///
/// # Errors
///
/// Returns [`Error::SameLocation`] when the path is degenerate and the
/// two coordinates lie within [`SAME_LOCATION_RADIUS_M`] of each other,
/// [`Error::InvalidData`] for other degenerate paths and
/// [`Error::InvalidNodeIndex`] when the path references nodes or edges
/// missing from the graph.
pub fn synthesize(
    graph: &StreetGraph,
    source: Point<f64>,
    destination: Point<f64>,
    node_path: &[NodeIndex],
) -> Result<Vec<Checkpoint>, Error> {
    if node_path.len() < 2 {
        if Haversine.distance(source, destination) < SAME_LOCATION_RADIUS_M {
            return Err(Error::SameLocation);
        }
        return Err(Error::InvalidData(
            "shortest path has fewer than two nodes".to_string(),
        ));
    }

    let mut checkpoints: Vec<Checkpoint> = Vec::with_capacity(node_path.len() + 2);

    for (a, b, c) in node_path.iter().copied().tuple_windows() {
        let incoming = graph.edge_between(a, b).ok_or(Error::InvalidNodeIndex)?;
        let outgoing = graph.edge_between(b, c).ok_or(Error::InvalidNodeIndex)?;
        checkpoints.push(Checkpoint {
            source: graph.node(a)?.geometry,
            mid: graph.node(b)?.geometry,
            destination: Some(graph.node(c)?.geometry),
            incoming_street: incoming.name.clone(),
            outgoing_street: outgoing.name.clone(),
            turn_angle_deg: Some(outgoing.bearing_deg - incoming.bearing_deg),
            leg_length_m: incoming.length_m,
        });
    }

    // A two-node path has no triple; its single edge becomes the one
    // interior checkpoint.
    if node_path.len() == 2 {
        let (a, b) = (node_path[0], node_path[1]);
        let edge = graph.edge_between(a, b).ok_or(Error::InvalidNodeIndex)?;
        checkpoints.push(Checkpoint {
            source: graph.node(a)?.geometry,
            mid: graph.node(b)?.geometry,
            destination: Some(destination),
            incoming_street: edge.name.clone(),
            outgoing_street: None,
            turn_angle_deg: None,
            leg_length_m: edge.length_m,
        });
    }

    let last = checkpoints
        .last()
        .cloned()
        .ok_or_else(|| Error::InvalidData("no interior checkpoints".to_string()))?;
    let last_node = last.destination.unwrap_or(destination);

    // Terminal bridges toward the requested destination coordinate. The
    // first is zero-length and exists only so the closing instruction has
    // a leg to read from; live tracking ends at the first checkpoint
    // without an outgoing street, which is this bridge.
    checkpoints.push(Checkpoint {
        source: last.mid,
        mid: last_node,
        destination: Some(destination),
        incoming_street: last.outgoing_street.clone(),
        outgoing_street: None,
        turn_angle_deg: None,
        leg_length_m: 0.0,
    });
    checkpoints.push(Checkpoint {
        source: last_node,
        mid: destination,
        destination: None,
        incoming_street: last.outgoing_street,
        outgoing_street: None,
        turn_angle_deg: None,
        leg_length_m: Haversine.distance(destination, last_node),
    });

    // Leading checkpoint from the caller's position to the first graph
    // node of the path.
    let first = checkpoints[0].clone();
    checkpoints.insert(
        0,
        Checkpoint {
            source,
            mid: first.source,
            destination: Some(first.mid),
            incoming_street: None,
            outgoing_street: first.incoming_street,
            turn_angle_deg: None,
            leg_length_m: Haversine.distance(source, first.source),
        },
    );

    Ok(checkpoints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StreetEdge;

    // Nodes sit on the equator so degree offsets translate to meters
    // almost linearly (1e-3 deg ~ 111 m).
    fn line_graph(n: usize) -> (StreetGraph, Vec<NodeIndex>) {
        let mut graph = StreetGraph::new();
        let nodes: Vec<NodeIndex> = (0..n)
            .map(|i| graph.add_node(i as i64, Point::new(0.001 * i as f64, 0.0)))
            .collect();
        for pair in nodes.windows(2) {
            graph.add_edge(
                pair[0],
                pair[1],
                StreetEdge {
                    name: Some("Gran Via".to_string()),
                    length_m: 111.0,
                    bearing_deg: 90.0,
                },
            );
        }
        graph.build_index();
        (graph, nodes)
    }

    #[test]
    fn five_node_path_yields_six_checkpoints() {
        let (graph, nodes) = line_graph(5);
        let source = Point::new(-0.0001, 0.0);
        let destination = Point::new(0.0041, 0.0);
        let checkpoints = synthesize(&graph, source, destination, &nodes).unwrap();

        // 3 interior + leading + 2 terminal
        assert_eq!(checkpoints.len(), 6);
    }

    #[test]
    fn two_node_path_yields_four_checkpoints() {
        let (graph, nodes) = line_graph(2);
        let source = Point::new(-0.0001, 0.0);
        let destination = Point::new(0.0011, 0.0);
        let checkpoints = synthesize(&graph, source, destination, &nodes).unwrap();

        assert_eq!(checkpoints.len(), 4);
    }

    #[test]
    fn leading_and_terminal_invariants_hold() {
        let (graph, nodes) = line_graph(4);
        let source = Point::new(-0.0002, 0.0);
        let destination = Point::new(0.0032, 0.0);
        let checkpoints = synthesize(&graph, source, destination, &nodes).unwrap();

        let leading = &checkpoints[0];
        assert_eq!(leading.source, source);
        assert_eq!(leading.mid, graph.node(nodes[0]).unwrap().geometry);
        assert_eq!(leading.outgoing_street.as_deref(), Some("Gran Via"));
        assert!(leading.turn_angle_deg.is_none());

        let bridge = &checkpoints[checkpoints.len() - 2];
        assert_eq!(bridge.leg_length_m, 0.0);
        assert!(bridge.outgoing_street.is_none());

        let last = checkpoints.last().unwrap();
        assert_eq!(last.mid, destination);
        assert!(last.destination.is_none());
        assert!(last.outgoing_street.is_none());
        assert!(last.leg_length_m > 0.0);
    }

    #[test]
    fn interior_turn_angle_is_the_bearing_delta() {
        let mut graph = StreetGraph::new();
        let a = graph.add_node(1, Point::new(0.0, 0.0));
        let b = graph.add_node(2, Point::new(0.001, 0.0));
        let c = graph.add_node(3, Point::new(0.002, 0.001));
        graph.add_edge(
            a,
            b,
            StreetEdge {
                name: Some("First".to_string()),
                length_m: 111.0,
                bearing_deg: 45.0,
            },
        );
        graph.add_edge(
            b,
            c,
            StreetEdge {
                name: Some("Second".to_string()),
                length_m: 140.0,
                bearing_deg: 90.0,
            },
        );
        graph.build_index();

        let checkpoints = synthesize(
            &graph,
            Point::new(-0.0001, 0.0),
            Point::new(0.0021, 0.001),
            &[a, b, c],
        )
        .unwrap();

        let interior = &checkpoints[1];
        assert_eq!(interior.turn_angle_deg, Some(45.0));
        assert_eq!(interior.incoming_street.as_deref(), Some("First"));
        assert_eq!(interior.outgoing_street.as_deref(), Some("Second"));
    }

    #[test]
    fn degenerate_path_near_destination_is_same_location() {
        let (graph, nodes) = line_graph(2);
        let here = Point::new(0.0, 0.0);
        let nearby = Point::new(0.0001, 0.0); // ~11 m away
        assert!(matches!(
            synthesize(&graph, here, nearby, &nodes[..1]),
            Err(Error::SameLocation)
        ));
    }

    #[test]
    fn degenerate_path_far_from_destination_is_invalid() {
        let (graph, nodes) = line_graph(2);
        let here = Point::new(0.0, 0.0);
        let far = Point::new(0.01, 0.0); // ~1.1 km away
        assert!(matches!(
            synthesize(&graph, here, far, &nodes[..1]),
            Err(Error::InvalidData(_))
        ));
    }
}
