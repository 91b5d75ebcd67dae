//! Live checkpoint tracking.
//!
//! A per-agent state machine that consumes position samples, advances
//! checkpoint progress, detects skipped checkpoints and wrong turns and
//! recalculates the route from the current position when needed.

mod registry;
mod session;

pub use registry::{AgentState, GuideEngine};
pub use session::{
    check_progress, ProgressCheck, ProgressUpdate, TrackingSession, ARRIVAL_RADIUS_M,
    SKIP_TOLERANCE_M,
};
