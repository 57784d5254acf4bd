//! Straight-line cost oracle (fallback when no directions service is reachable).
//!
//! Uses great-circle distance at an assumed speed. Less accurate than a road
//! network but needs no network access.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::geo::{AddressIndex, Point};
use crate::traits::{CostOracle, Directions, Leg};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Estimates legs between known addresses from their coordinates.
///
/// With `optimize` set, waypoints are ordered greedily by nearest neighbour
/// from the origin.
#[derive(Debug, Clone)]
pub struct HaversineOracle {
    locations: HashMap<String, Point>,
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl HaversineOracle {
    pub fn new(speed_kmh: f64) -> Self {
        Self {
            locations: HashMap::new(),
            speed_kmh,
        }
    }

    pub fn with_location(mut self, address: impl Into<String>, point: Point) -> Self {
        self.locations.insert(address.into(), point);
        self
    }

    /// Know every address in `index`, plus the depot.
    pub fn from_index(index: &AddressIndex, depot: (&str, Point)) -> Self {
        let mut oracle = Self::default().with_location(depot.0, depot.1);
        for (point, address) in index.iter() {
            oracle.locations.insert(address.to_string(), *point);
        }
        oracle
    }

    fn locate(&self, address: &str) -> Result<Point> {
        self.locations
            .get(address)
            .copied()
            .ok_or_else(|| Error::oracle(format!("unknown address: {address}")))
    }

    fn leg(&self, from: Point, to: Point) -> Leg {
        let km = haversine_km(from, to);
        Leg::measured(km / self.speed_kmh * 60.0, km)
    }
}

impl Default for HaversineOracle {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED_KMH)
    }
}

impl CostOracle for HaversineOracle {
    fn route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        optimize: bool,
    ) -> Result<Directions> {
        let start = self.locate(origin)?;
        let end = self.locate(destination)?;
        let stops = waypoints
            .iter()
            .map(|address| self.locate(address))
            .collect::<Result<Vec<_>>>()?;

        let waypoint_order = if optimize {
            nearest_neighbour_order(start, &stops)
        } else {
            (0..stops.len()).collect()
        };

        let mut legs = Vec::with_capacity(stops.len() + 1);
        let mut current = start;
        for &i in &waypoint_order {
            legs.push(self.leg(current, stops[i]));
            current = stops[i];
        }
        legs.push(self.leg(current, end));

        Ok(Directions { legs, waypoint_order })
    }
}

/// Great-circle distance in kilometers.
pub fn haversine_km(from: Point, to: Point) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

fn nearest_neighbour_order(start: Point, stops: &[Point]) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..stops.len()).collect();
    let mut order = Vec::with_capacity(stops.len());
    let mut current = start;

    while !remaining.is_empty() {
        let mut best = 0;
        for (slot, &i) in remaining.iter().enumerate() {
            if haversine_km(current, stops[i]) < haversine_km(current, stops[remaining[best]]) {
                best = slot;
            }
        }
        let next = remaining.remove(best);
        current = stops[next];
        order.push(next);
    }

    order
}
