use csv::ReaderBuilder;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::InvalidGeometry;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> LatLng {
        LatLng { lat, lng }
    }

    /// Whether the coordinate lies within [-90, 90] latitude and
    /// [-180, 180] longitude. Non-finite values are out of range.
    pub fn in_range(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    fn key(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lng.to_bits())
    }
}

/// Minimal axis-aligned bounding box around a set of coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Compute the minimal box around `points`. Pure and deterministic;
    /// returns `None` for an empty slice.
    pub fn around(points: &[LatLng]) -> Option<BoundingBox> {
        let first = points.first()?;
        let mut bounds = BoundingBox {
            south: first.lat,
            west: first.lng,
            north: first.lat,
            east: first.lng,
        };
        for point in &points[1..] {
            bounds.south = bounds.south.min(point.lat);
            bounds.west = bounds.west.min(point.lng);
            bounds.north = bounds.north.max(point.lat);
            bounds.east = bounds.east.max(point.lng);
        }
        Some(bounds)
    }
}

/// An ordered ring of coordinates forming the user's area of interest,
/// plus its derived bounding box.
///
/// `Polygon::new` is the only constructor; a value of this type has always
/// passed structural validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    points: Vec<LatLng>,
    bounds: BoundingBox,
}

impl Polygon {
    /// Validate a drawn ring of coordinates.
    ///
    /// An explicitly closed ring (last vertex equal to the first) counts its
    /// closing vertex once. Fails when fewer than 3 distinct vertices remain
    /// or when any coordinate is out of range.
    pub fn new(points: Vec<LatLng>) -> Result<Polygon, InvalidGeometry> {
        for point in &points {
            if !point.in_range() {
                return Err(InvalidGeometry::CoordinateOutOfRange {
                    lat: point.lat,
                    lng: point.lng,
                });
            }
        }
        let mut ring = points;
        if ring.len() > 1 && ring.first().map(LatLng::key) == ring.last().map(LatLng::key) {
            ring.pop();
        }
        let mut seen = HashSet::new();
        let distinct = ring.iter().filter(|p| seen.insert(p.key())).count();
        if distinct < 3 {
            return Err(InvalidGeometry::TooFewPoints(distinct));
        }
        let bounds = BoundingBox::around(&ring).unwrap();
        Ok(Polygon { points: ring, bounds })
    }

    /// The vertices of the ring, in drawing order, without a closing vertex.
    pub fn points(&self) -> &[LatLng] {
        &self.points
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

/// Parse a polygon vertex CSV into coordinates.
///
/// Expected CSV columns: lat, lng (with a header row). Rows that fail to
/// parse as two floats are skipped; range validation happens in
/// `Polygon::new`.
pub fn parse_vertex_csv(csv_object: &str) -> Result<Vec<LatLng>, csv::Error> {
    let mut points: Vec<LatLng> = Vec::new();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_object.as_bytes());
    for row in rdr.records() {
        let record = row?;
        let lat = record.get(0).and_then(|s| s.trim().parse::<f64>().ok());
        let lng = record.get(1).and_then(|s| s.trim().parse::<f64>().ok());
        if let (Some(lat), Some(lng)) = (lat, lng) {
            points.push(LatLng::new(lat, lng));
        } else {
            warn!("Skipping unparseable vertex row: {:?}", record);
        }
    }
    Ok(points)
}
