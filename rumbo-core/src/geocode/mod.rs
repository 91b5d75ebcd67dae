//! Free-text destination resolution.
//!
//! Transports hand the engine destination names, not coordinates. The
//! seam is a trait so any resolver can be plugged in; the bundled
//! implementation is a CSV-backed gazetteer of named places.

use std::io::Read;
use std::path::Path;

use geo::Point;
use hashbrown::HashMap;
use serde::Deserialize;

use crate::loading::de::{deserialize_csv, deserialize_csv_file};
use crate::Error;

/// Resolves free-text queries to coordinates.
pub trait Geocoder {
    /// # Errors
    ///
    /// Returns [`Error::Geocode`] when the query cannot be resolved.
    fn geocode(&self, query: &str) -> Result<Point<f64>, Error>;
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct RawPlace {
    name: String,
    lat: f64,
    lon: f64,
}

/// Name-to-coordinate lookup loaded from `name,lat,lon` records.
/// Matching is case-insensitive on the trimmed query.
#[derive(Debug, Default)]
pub struct Gazetteer {
    places: HashMap<String, Point<f64>>,
}

impl Gazetteer {
    /// # Errors
    ///
    /// Returns [`Error::IoError`] if the file cannot be read.
    pub fn from_csv(path: &Path) -> Result<Self, Error> {
        let records: Vec<RawPlace> = deserialize_csv_file(path)?;
        Ok(Self::from_records(records))
    }

    #[must_use]
    pub fn from_reader<R: Read>(reader: R) -> Self {
        Self::from_records(deserialize_csv(reader))
    }

    fn from_records(records: Vec<RawPlace>) -> Self {
        let places = records
            .into_iter()
            .map(|place| (place.name.to_lowercase(), Point::new(place.lon, place.lat)))
            .collect();
        Self { places }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl Geocoder for Gazetteer {
    fn geocode(&self, query: &str) -> Result<Point<f64>, Error> {
        self.places
            .get(&query.trim().to_lowercase())
            .copied()
            .ok_or_else(|| Error::Geocode(query.to_string()))
    }
}
