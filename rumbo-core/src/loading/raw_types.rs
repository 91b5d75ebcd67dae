use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawNode {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct RawEdge {
    pub source: i64,
    pub target: i64,
    /// Empty string means an unnamed street
    pub name: String,
    pub length_m: f64,
    /// Absent bearings are computed from node geometry
    pub bearing_deg: Option<f64>,
}
