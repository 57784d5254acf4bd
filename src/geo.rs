//! Coordinates and the address lookup that travels with them.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

/// A visit location as (longitude, latitude).
///
/// Equality and hashing are exact on the bit pattern of both coordinates, so
/// a point can key a map without any rounding.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub lng: f64,
    pub lat: f64,
}

impl Point {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Straight-line distance in coordinate space.
    pub fn euclidean(&self, other: &Point) -> f64 {
        self.squared_distance(other).sqrt()
    }

    pub(crate) fn squared_distance(&self, other: &Point) -> f64 {
        (self.lng - other.lng).powi(2) + (self.lat - other.lat).powi(2)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.lng.to_bits() == other.lng.to_bits() && self.lat.to_bits() == other.lat.to_bits()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lng.to_bits().hash(state);
        self.lat.to_bits().hash(state);
    }
}

impl From<(f64, f64)> for Point {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self::new(lng, lat)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lng, self.lat)
    }
}

/// Arithmetic mean of a set of points. `None` when empty.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lng, lat) = points
        .iter()
        .fold((0.0, 0.0), |(lng, lat), p| (lng + p.lng, lat + p.lat));
    Some(Point::new(lng / n, lat / n))
}

/// Points to route, split by whether they must form their own route.
#[derive(Debug, Clone, Default)]
pub struct RegionSplit {
    pub general: Vec<Point>,
    /// Points that always get a dedicated route. May be empty.
    pub mandatory: Vec<Point>,
}

impl RegionSplit {
    pub fn new(general: Vec<Point>, mandatory: Vec<Point>) -> Self {
        Self { general, mandatory }
    }

    pub fn has_mandatory_region(&self) -> bool {
        !self.mandatory.is_empty()
    }
}

/// Maps every routable point back to the address it was geocoded from.
#[derive(Debug, Clone, Default)]
pub struct AddressIndex {
    addresses: HashMap<Point, String>,
}

impl AddressIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a coordinate list and an address list given in the same order.
    ///
    /// When two addresses geocode to the same point the later one wins.
    pub fn from_parallel<P, S>(points: &[P], addresses: &[S]) -> Result<Self>
    where
        P: Copy + Into<Point>,
        S: AsRef<str>,
    {
        if points.len() != addresses.len() {
            return Err(Error::data(format!(
                "{} coordinates but {} addresses",
                points.len(),
                addresses.len()
            )));
        }

        let mut index = Self::new();
        for (point, address) in points.iter().zip(addresses) {
            index.insert((*point).into(), address.as_ref());
        }
        Ok(index)
    }

    pub fn insert(&mut self, point: Point, address: impl Into<String>) {
        self.addresses.insert(point, address.into());
    }

    pub fn address_of(&self, point: &Point) -> Result<&str> {
        self.addresses
            .get(point)
            .map(String::as_str)
            .ok_or(Error::Lookup(*point))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Point, &str)> {
        self.addresses.iter().map(|(point, address)| (point, address.as_str()))
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
