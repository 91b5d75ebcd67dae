use std::sync::Arc;

use geo::Point;
use hashbrown::HashMap;
use log::info;
use parking_lot::Mutex;

use super::session::{ProgressUpdate, TrackingSession};
use crate::directions::Checkpoint;
use crate::model::StreetGraph;
use crate::Error;

/// Mutable state held for one agent: the last observed position plus the
/// active session, if any. Positions outlive sessions so `where_am_i`
/// works without an active route.
#[derive(Debug, Default)]
pub struct AgentState {
    pub last_position: Option<Point<f64>>,
    pub session: Option<TrackingSession>,
}

/// Owns the street graph and all live agent sessions.
///
/// Each agent's state sits behind its own mutex, so operations for
/// different agents never contend and samples for one agent are applied
/// in arrival order.
pub struct GuideEngine {
    graph: Arc<StreetGraph>,
    agents: Mutex<HashMap<String, Arc<Mutex<AgentState>>>>,
}

impl GuideEngine {
    #[must_use]
    pub fn new(graph: StreetGraph) -> Self {
        Self {
            graph: Arc::new(graph),
            agents: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn graph(&self) -> &StreetGraph {
        &self.graph
    }

    fn agent(&self, agent_id: &str) -> Arc<Mutex<AgentState>> {
        let mut agents = self.agents.lock();
        agents
            .entry_ref(agent_id)
            .or_insert_with(Arc::default)
            .clone()
    }

    /// Records a position sample for `agent_id`, feeding the active
    /// session if one exists. Returns `None` when no session is active.
    ///
    /// # Errors
    ///
    /// Propagates recalculation failures; the agent's session is removed
    /// in that case and a new route must be requested explicitly.
    pub fn update_position(
        &self,
        agent_id: &str,
        position: Point<f64>,
    ) -> Result<Option<ProgressUpdate>, Error> {
        let state = self.agent(agent_id);
        let mut state = state.lock();
        state.last_position = Some(position);

        let result = match state.session.as_mut() {
            None => return Ok(None),
            Some(session) => session.observe(&self.graph, position),
        };

        match result {
            Ok(update) => {
                if matches!(update, ProgressUpdate::Arrived) {
                    info!("agent {agent_id}: destination reached");
                    state.session = None;
                }
                Ok(Some(update))
            }
            Err(err) => {
                if state.session.as_ref().is_some_and(|s| !s.is_active()) {
                    state.session = None;
                }
                Err(err)
            }
        }
    }

    /// Starts (or replaces) a route for `agent_id` from its last
    /// observed position, returning the first instruction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPosition`] before any position sample has
    /// arrived; route-planning failures tear down any prior session.
    pub fn start_route(&self, agent_id: &str, destination: Point<f64>) -> Result<String, Error> {
        let state = self.agent(agent_id);
        let mut state = state.lock();
        let source = state.last_position.ok_or(Error::UnknownPosition)?;

        match TrackingSession::start(&self.graph, source, destination) {
            Ok(session) => {
                let instruction = session.first_instruction();
                info!(
                    "agent {agent_id}: route started with {} checkpoints",
                    session.checkpoints().len()
                );
                state.session = Some(session);
                Ok(instruction)
            }
            Err(err) => {
                state.session = None;
                Err(err)
            }
        }
    }

    /// Stops the agent's guide.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionNotActive`] when there is nothing to stop;
    /// repeated cancellation has no further effect.
    pub fn cancel(&self, agent_id: &str) -> Result<(), Error> {
        let state = self.agent(agent_id);
        let mut state = state.lock();
        match state.session.take() {
            Some(_) => {
                info!("agent {agent_id}: guide stopped");
                Ok(())
            }
            None => Err(Error::SessionNotActive),
        }
    }

    /// Last observed position of the agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPosition`] before any sample has arrived.
    pub fn where_am_i(&self, agent_id: &str) -> Result<Point<f64>, Error> {
        let state = self.agent(agent_id);
        let state = state.lock();
        state.last_position.ok_or(Error::UnknownPosition)
    }

    /// Checkpoints, current position and destination of the agent's
    /// active route, for rendering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionNotActive`] without an active route.
    pub fn route(
        &self,
        agent_id: &str,
    ) -> Result<(Vec<Checkpoint>, Point<f64>, Point<f64>), Error> {
        let state = self.agent(agent_id);
        let state = state.lock();
        let session = state.session.as_ref().ok_or(Error::SessionNotActive)?;
        Ok((
            session.checkpoints().to_vec(),
            session.current_position(),
            session.destination(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StreetEdge;

    fn engine() -> GuideEngine {
        let mut graph = StreetGraph::new();
        let a = graph.add_node(1, Point::new(0.000, 0.0));
        let b = graph.add_node(2, Point::new(0.002, 0.0));
        let c = graph.add_node(3, Point::new(0.004, 0.0));
        for (from, to) in [(a, b), (b, c)] {
            graph.add_edge(
                from,
                to,
                StreetEdge {
                    name: Some("Aragó".to_string()),
                    length_m: 222.6,
                    bearing_deg: 90.0,
                },
            );
        }
        graph.build_index();
        GuideEngine::new(graph)
    }

    #[test]
    fn route_requires_a_known_position() {
        let engine = engine();
        assert!(matches!(
            engine.start_route("ada", Point::new(0.004, 0.0)),
            Err(Error::UnknownPosition)
        ));
        assert!(matches!(
            engine.where_am_i("ada"),
            Err(Error::UnknownPosition)
        ));
    }

    #[test]
    fn start_track_and_cancel() {
        let engine = engine();
        let here = Point::new(0.0, 0.0);
        assert_eq!(engine.update_position("ada", here).unwrap(), None);
        assert_eq!(engine.where_am_i("ada").unwrap(), here);

        let instruction = engine.start_route("ada", Point::new(0.004, 0.0)).unwrap();
        assert!(instruction.contains("checkpoint 1"));

        // The leading checkpoint targets the snapped start node, which
        // is where the agent already stands.
        let update = engine.update_position("ada", here).unwrap();
        assert!(matches!(
            update,
            Some(ProgressUpdate::CheckpointReached { .. })
        ));

        engine.cancel("ada").unwrap();
        assert!(matches!(engine.cancel("ada"), Err(Error::SessionNotActive)));
        // After cancellation samples are recorded but not tracked.
        assert_eq!(engine.update_position("ada", here).unwrap(), None);
    }

    #[test]
    fn same_location_is_reported_and_leaves_no_session() {
        let engine = engine();
        let here = Point::new(0.0, 0.0);
        engine.update_position("ada", here).unwrap();
        assert!(matches!(
            engine.start_route("ada", Point::new(0.0001, 0.0)),
            Err(Error::SameLocation)
        ));
        assert!(matches!(engine.route("ada"), Err(Error::SessionNotActive)));
    }

    #[test]
    fn agents_do_not_share_sessions() {
        let engine = engine();
        engine.update_position("ada", Point::new(0.0, 0.0)).unwrap();
        engine
            .update_position("grace", Point::new(0.004, 0.0))
            .unwrap();

        engine.start_route("ada", Point::new(0.004, 0.0)).unwrap();
        assert!(matches!(
            engine.route("grace"),
            Err(Error::SessionNotActive)
        ));
    }
}
