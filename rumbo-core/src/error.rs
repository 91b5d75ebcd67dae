use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No nearby nodes found for snapping")]
    NoPointsFound,
    #[error("Source and destination are the same location")]
    SameLocation,
    #[error("No position sample received for this agent yet")]
    UnknownPosition,
    #[error("No path between the requested locations")]
    NoPath,
    #[error("No active guide session")]
    SessionNotActive,
    #[error("Could not geocode '{0}'")]
    Geocode(String),
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}
