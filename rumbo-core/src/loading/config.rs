use std::path::PathBuf;

/// Paths to the CSV exports describing a street network.
///
/// `nodes_path` holds `id,lat,lon` records; `edges_path` holds
/// `source,target,name,length_m,bearing_deg` records, where `name` and
/// `bearing_deg` may be empty.
#[derive(Debug, Clone)]
pub struct StreetModelConfig {
    pub nodes_path: PathBuf,
    pub edges_path: PathBuf,
}
