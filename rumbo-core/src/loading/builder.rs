use geo::{Bearing, Haversine, Point};
use log::{info, warn};

use super::config::StreetModelConfig;
use super::de::deserialize_csv_file;
use super::raw_types::{RawEdge, RawNode};
use crate::model::{StreetEdge, StreetGraph};
use crate::Error;

/// Creates a street graph based on the provided configuration.
///
/// # Errors
///
/// Returns an error if there are problems reading or processing data
pub fn create_street_graph(config: &StreetModelConfig) -> Result<StreetGraph, Error> {
    validate_config(config)?;

    info!("Loading street nodes: {}", config.nodes_path.display());
    let nodes: Vec<RawNode> = deserialize_csv_file(&config.nodes_path)?;

    info!("Loading street edges: {}", config.edges_path.display());
    let edges: Vec<RawEdge> = deserialize_csv_file(&config.edges_path)?;

    if nodes.is_empty() {
        return Err(Error::InvalidData(
            "node file contains no usable records".to_string(),
        ));
    }

    let graph = build_graph(&nodes, edges);
    info!(
        "Street graph ready: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

fn build_graph(nodes: &[RawNode], edges: Vec<RawEdge>) -> StreetGraph {
    let mut graph = StreetGraph::new();

    for node in nodes {
        graph.add_node(node.id, Point::new(node.lon, node.lat));
    }

    let mut skipped = 0usize;
    for edge in edges {
        let (Some(source), Some(target)) =
            (graph.node_index(edge.source), graph.node_index(edge.target))
        else {
            skipped += 1;
            continue;
        };

        let bearing_deg = match edge.bearing_deg {
            Some(bearing) => bearing.rem_euclid(360.0),
            None => edge_bearing(&graph, source, target),
        };
        let name = (!edge.name.is_empty()).then(|| edge.name.clone());

        graph.add_edge(
            source,
            target,
            StreetEdge {
                name,
                length_m: edge.length_m.max(0.0),
                bearing_deg,
            },
        );
    }
    if skipped > 0 {
        warn!("{skipped} edges referenced unknown nodes and were skipped");
    }

    graph.build_index();
    graph
}

/// Bearing of the straight segment between two nodes, normalized to
/// [0, 360). Stands in for source data without precomputed bearings.
fn edge_bearing(
    graph: &StreetGraph,
    source: petgraph::graph::NodeIndex,
    target: petgraph::graph::NodeIndex,
) -> f64 {
    let from = graph.graph[source].geometry;
    let to = graph.graph[target].geometry;
    Haversine.bearing(from, to).rem_euclid(360.0)
}

fn validate_config(config: &StreetModelConfig) -> Result<(), Error> {
    if !config.nodes_path.exists() {
        return Err(Error::InvalidData(format!(
            "node file not found: {}",
            config.nodes_path.display()
        )));
    }

    if !config.edges_path.exists() {
        return Err(Error::InvalidData(format!(
            "edge file not found: {}",
            config.edges_path.display()
        )));
    }

    Ok(())
}
