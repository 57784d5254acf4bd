//! External services the balancer consumes.
//!
//! Each is a single request/response call. Implementations are constructed
//! once and passed in explicitly, so tests can substitute fixed answers.

use crate::error::Result;
use crate::geo::Point;
use crate::units::{DistanceUnit, Reading, TimeUnit};

/// One leg of a driven route.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    pub duration: Reading<TimeUnit>,
    pub distance: Reading<DistanceUnit>,
}

impl Leg {
    pub fn new(duration: Reading<TimeUnit>, distance: Reading<DistanceUnit>) -> Self {
        Self { duration, distance }
    }

    pub fn measured(minutes: f64, km: f64) -> Self {
        Self::new(Reading::minutes(minutes), Reading::kilometers(km))
    }
}

/// A directions answer: per-leg costs and the visiting order of the waypoints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directions {
    pub legs: Vec<Leg>,
    /// Permutation of the input waypoint indices.
    pub waypoint_order: Vec<usize>,
}

/// Measures the driving cost of visiting a list of addresses.
pub trait CostOracle {
    /// Route from `origin` through every waypoint to `destination`.
    ///
    /// With `optimize` set the service may reorder the waypoints and reports
    /// the order it chose. Transport or service failures are errors; a partial
    /// answer is never returned.
    fn route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        optimize: bool,
    ) -> Result<Directions>;
}

/// Resolves an address to coordinates.
pub trait Geocoder {
    /// `Ok(None)` when the service knows no such address.
    fn geocode(&self, address: &str) -> Result<Option<Point>>;
}
