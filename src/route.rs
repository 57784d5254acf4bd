//! Routes and the collection the balancer mutates.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::geo::Point;

/// Route identifier. Cluster labels are small integers starting at zero;
/// [`RouteId::MANDATORY`] is reserved for the mandatory-region route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouteId(pub u32);

impl RouteId {
    pub const MANDATORY: RouteId = RouteId(99);

    pub fn is_mandatory(&self) -> bool {
        *self == Self::MANDATORY
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route {}", self.0)
    }
}

/// Measured cost of a route.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkInfo {
    /// Driving plus service time, minutes, one decimal.
    pub duration_min: f64,
    /// Driving distance, km, one decimal.
    pub distance_km: f64,
    /// Addresses in the visiting order the oracle chose.
    pub sequence: Vec<String>,
    /// Leg readings that could not be interpreted and counted as zero.
    pub skipped_legs: usize,
}

#[derive(Debug, Clone)]
pub struct Route {
    /// Representative location, usually a cluster centroid.
    pub origin: Point,
    /// Members; duplicates are repeat visits to the same stop.
    pub points: Vec<Point>,
    /// Last measurement, cleared whenever membership changes.
    pub work: Option<WorkInfo>,
}

impl Route {
    pub fn new(origin: Point, points: Vec<Point>) -> Self {
        Self {
            origin,
            points,
            work: None,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn occurrences(&self, point: &Point) -> usize {
        self.points.iter().filter(|p| *p == point).count()
    }
}

pub type RouteCollection = BTreeMap<RouteId, Route>;

/// Total work minutes per route.
pub type WorkTimeTable = BTreeMap<RouteId, f64>;

/// Work-time table from the routes' last measurements. Unmeasured routes are
/// left out.
pub fn work_time_table(routes: &RouteCollection) -> WorkTimeTable {
    routes
        .iter()
        .filter_map(|(id, route)| route.work.as_ref().map(|work| (*id, work.duration_min)))
        .collect()
}

pub fn point_count(routes: &RouteCollection) -> usize {
    routes.values().map(Route::len).sum()
}

/// Every point across all routes with its multiplicity.
pub fn point_multiset(routes: &RouteCollection) -> HashMap<Point, usize> {
    let mut counts = HashMap::new();
    for point in routes.values().flat_map(|route| route.points.iter()) {
        *counts.entry(*point).or_insert(0) += 1;
    }
    counts
}
