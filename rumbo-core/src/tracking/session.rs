use geo::{Distance, Haversine, Point};
use log::debug;

use crate::directions::{orientation_phrase, Checkpoint};
use crate::model::StreetGraph;
use crate::routing::plan_route;
use crate::Error;

/// Radius in meters within which a checkpoint counts as reached.
pub const ARRIVAL_RADIUS_M: f64 = 17.0;

/// Jitter band in meters; only moving farther than this from the current
/// checkpoint counts as a skip or wrong turn.
pub const SKIP_TOLERANCE_M: f64 = 10.0;

/// Pure progress decision for one position sample, measured against the
/// current checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressCheck {
    /// Moved meaningfully farther from the checkpoint than before.
    Skipped,
    /// Within the arrival radius of the checkpoint.
    Reached,
    /// Still on the way.
    EnRoute,
}

/// Skip detection wins over arrival: a sample can only count as arrived
/// if it did not first move out of the tolerance band.
#[must_use]
pub fn check_progress(dist_prev_m: f64, dist_now_m: f64) -> ProgressCheck {
    if dist_prev_m + SKIP_TOLERANCE_M < dist_now_m {
        ProgressCheck::Skipped
    } else if dist_now_m < ARRIVAL_RADIUS_M {
        ProgressCheck::Reached
    } else {
        ProgressCheck::EnRoute
    }
}

/// Outcome of feeding one position sample to a session.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    /// Still on the way to the current checkpoint.
    EnRoute,
    /// Reached checkpoint `reached`; carries the instruction toward the
    /// next one.
    CheckpointReached {
        reached: usize,
        next_target: Point<f64>,
        instruction: String,
    },
    /// Reached the terminal checkpoint; the session has been deactivated.
    Arrived,
    /// Moved away from checkpoint `skipped`; the route was recomputed
    /// from the sampled position and progress reset.
    Recalculated { skipped: usize, instruction: String },
}

/// One agent's live tracking state against a fixed destination.
///
/// The session is single-writer: callers must serialize `observe` and
/// route starts for one agent, since checkpoint progress and the
/// previous/current position pair are read-modify-written together.
#[derive(Debug, Clone)]
pub struct TrackingSession {
    checkpoints: Vec<Checkpoint>,
    checkpoint_index: usize,
    current_position: Point<f64>,
    previous_position: Point<f64>,
    destination: Point<f64>,
    active: bool,
}

impl TrackingSession {
    /// Plans a route from `source` to `destination` and starts tracking
    /// at the first checkpoint.
    ///
    /// # Errors
    ///
    /// Propagates the planning failures of
    /// [`plan_route`](crate::routing::plan_route); no session is created
    /// on failure.
    pub fn start(
        graph: &StreetGraph,
        source: Point<f64>,
        destination: Point<f64>,
    ) -> Result<Self, Error> {
        let checkpoints = plan_route(graph, source, destination)?;
        Ok(Self {
            checkpoints,
            checkpoint_index: 0,
            current_position: source,
            previous_position: source,
            destination,
            active: true,
        })
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    #[must_use]
    pub fn checkpoint_index(&self) -> usize {
        self.checkpoint_index
    }

    #[must_use]
    pub fn destination(&self) -> Point<f64> {
        self.destination
    }

    #[must_use]
    pub fn current_position(&self) -> Point<f64> {
        self.current_position
    }

    /// Instruction announcing the first leg of a freshly planned route.
    #[must_use]
    pub fn first_instruction(&self) -> String {
        match self.checkpoints.first() {
            Some(first) => {
                let street = first.outgoing_street.as_deref().unwrap_or("an unnamed street");
                format!(
                    "Start at checkpoint 1: {:.5}, {:.5} ({street})",
                    first.mid.y(),
                    first.mid.x()
                )
            }
            None => String::new(),
        }
    }

    /// Feeds one position sample and advances the state machine.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionNotActive`] once the session has ended.
    /// A failed recalculation deactivates the session and propagates the
    /// planning error; the agent must request a new route explicitly.
    pub fn observe(
        &mut self,
        graph: &StreetGraph,
        position: Point<f64>,
    ) -> Result<ProgressUpdate, Error> {
        if !self.active {
            return Err(Error::SessionNotActive);
        }

        let current = self
            .checkpoints
            .get(self.checkpoint_index)
            .cloned()
            .ok_or_else(|| Error::InvalidData("checkpoint cursor out of range".to_string()))?;

        let dist_prev = Haversine.distance(self.previous_position, current.mid);
        let dist_now = Haversine.distance(position, current.mid);

        // Previous/current chain across samples; they are never reset
        // within a route.
        self.previous_position = self.current_position;
        self.current_position = position;

        match check_progress(dist_prev, dist_now) {
            ProgressCheck::Skipped => {
                let skipped = self.checkpoint_index;
                debug!("checkpoint {skipped} skipped ({dist_prev:.0} m -> {dist_now:.0} m)");
                let instruction = self.recalculate(graph, position)?;
                Ok(ProgressUpdate::Recalculated {
                    skipped,
                    instruction,
                })
            }
            ProgressCheck::Reached => Ok(self.advance(&current)),
            ProgressCheck::EnRoute => Ok(ProgressUpdate::EnRoute),
        }
    }

    /// Deactivates the session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SessionNotActive`] if it already ended.
    pub fn cancel(&mut self) -> Result<(), Error> {
        if !self.active {
            return Err(Error::SessionNotActive);
        }
        self.active = false;
        Ok(())
    }

    fn advance(&mut self, current: &Checkpoint) -> ProgressUpdate {
        // A checkpoint without an outgoing street is terminal.
        if current.outgoing_street.is_none() {
            self.active = false;
            return ProgressUpdate::Arrived;
        }

        let reached = self.checkpoint_index;
        let street = current.outgoing_street.as_deref();
        let next_target = current.destination.unwrap_or(self.destination);
        let (angle, length) = match self.checkpoints.get(reached + 1) {
            Some(next) => (next.turn_angle_deg, next.leg_length_m),
            None => (None, 0.0),
        };

        self.checkpoint_index += 1;
        let instruction = format!(
            "Checkpoint {} reached. Go to checkpoint {}: {:.5}, {:.5} ({}). {}",
            reached + 1,
            reached + 2,
            next_target.y(),
            next_target.x(),
            street.unwrap_or("an unnamed street"),
            orientation_phrase(angle, length, street),
        );

        ProgressUpdate::CheckpointReached {
            reached,
            next_target,
            instruction,
        }
    }

    fn recalculate(&mut self, graph: &StreetGraph, position: Point<f64>) -> Result<String, Error> {
        match plan_route(graph, position, self.destination) {
            Ok(checkpoints) => {
                self.checkpoints = checkpoints;
                self.checkpoint_index = 0;
                Ok(self.first_instruction())
            }
            Err(err) => {
                self.active = false;
                Err(err)
            }
        }
    }
}
