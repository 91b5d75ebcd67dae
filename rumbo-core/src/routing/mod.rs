//! Shortest-path search over the street graph.

pub mod dijkstra;
mod planner;

pub use dijkstra::shortest_path;
pub use planner::plan_route;
