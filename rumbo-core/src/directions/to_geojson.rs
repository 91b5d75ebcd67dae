//! GeoJSON rendering of a synthesized route.

use geo::{line_string, Point};
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::{json, Map, Value as JsonValue};

use super::Checkpoint;
use crate::Error;

/// Converts a checkpoint sequence to a `GeoJSON` `FeatureCollection`:
/// one LineString per leg (source to mid) plus point markers for every
/// checkpoint and for the route endpoints.
#[must_use]
pub fn route_to_geojson(
    checkpoints: &[Checkpoint],
    source: Point<f64>,
    destination: Point<f64>,
) -> FeatureCollection {
    let mut features = Vec::with_capacity(checkpoints.len() * 2 + 2);

    for (index, checkpoint) in checkpoints.iter().enumerate() {
        let leg = line_string![
            (x: checkpoint.source.x(), y: checkpoint.source.y()),
            (x: checkpoint.mid.x(), y: checkpoint.mid.y()),
        ];
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new((&leg).into())),
            id: None,
            properties: properties(json!({
                "kind": "leg",
                "checkpoint": index,
                "street": checkpoint.outgoing_street,
                "length_m": checkpoint.leg_length_m,
            })),
            foreign_members: None,
        });
        features.push(marker(checkpoint.source, "checkpoint", Some(index)));
    }

    features.push(marker(source, "source", None));
    features.push(marker(destination, "destination", None));

    FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    }
}

/// Serialized form for transports that ship the overlay as text.
///
/// # Errors
///
/// Returns [`Error::GeoJsonError`] if serialization fails.
pub fn route_to_geojson_string(
    checkpoints: &[Checkpoint],
    source: Point<f64>,
    destination: Point<f64>,
) -> Result<String, Error> {
    serde_json::to_string(&route_to_geojson(checkpoints, source, destination))
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn marker(point: Point<f64>, kind: &str, checkpoint: Option<usize>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new((&point).into())),
        id: None,
        properties: properties(json!({
            "kind": kind,
            "checkpoint": checkpoint,
        })),
        foreign_members: None,
    }
}

fn properties(value: JsonValue) -> Option<Map<String, JsonValue>> {
    match value {
        JsonValue::Object(map) => Some(map),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(x: f64) -> Checkpoint {
        Checkpoint {
            source: Point::new(x, 0.0),
            mid: Point::new(x + 0.001, 0.0),
            destination: Some(Point::new(x + 0.002, 0.0)),
            incoming_street: None,
            outgoing_street: Some("Gran Via".to_string()),
            turn_angle_deg: None,
            leg_length_m: 111.0,
        }
    }

    #[test]
    fn one_leg_and_one_marker_per_checkpoint_plus_endpoints() {
        let checkpoints = vec![checkpoint(0.0), checkpoint(0.001)];
        let collection = route_to_geojson(
            &checkpoints,
            Point::new(0.0, 0.0),
            Point::new(0.003, 0.0),
        );
        assert_eq!(collection.features.len(), 2 * 2 + 2);
    }

    #[test]
    fn serializes_to_a_feature_collection() {
        let raw = route_to_geojson_string(
            &[checkpoint(0.0)],
            Point::new(0.0, 0.0),
            Point::new(0.002, 0.0),
        )
        .unwrap();
        assert!(raw.contains("\"FeatureCollection\""));
        assert!(raw.contains("\"LineString\""));
    }
}
