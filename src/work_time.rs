//! Work time of a route: driving time from the cost oracle plus service time
//! at each stop.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::{AddressIndex, Point};
use crate::route::{RouteCollection, RouteId, WorkInfo};
use crate::traits::{CostOracle, Directions};

/// Minutes spent on site, on top of driving.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceTimeModel {
    /// Per distinct address.
    pub per_stop_minutes: f64,
    /// Per extra visit to an address already on the route.
    pub per_repeat_minutes: f64,
}

impl Default for ServiceTimeModel {
    fn default() -> Self {
        Self {
            per_stop_minutes: 20.0,
            per_repeat_minutes: 5.0,
        }
    }
}

impl ServiceTimeModel {
    pub fn service_minutes(&self, waypoints: &[String]) -> f64 {
        let unique = waypoints.iter().collect::<HashSet<_>>().len();
        let repeats = waypoints.len() - unique;
        unique as f64 * self.per_stop_minutes + repeats as f64 * self.per_repeat_minutes
    }
}

/// Measures routes against a depot that every route starts and ends at.
pub struct WorkTimeEstimator<'a, O> {
    oracle: &'a O,
    index: &'a AddressIndex,
    depot: &'a str,
    service: ServiceTimeModel,
}

impl<'a, O: CostOracle> WorkTimeEstimator<'a, O> {
    pub fn new(oracle: &'a O, index: &'a AddressIndex, depot: &'a str, service: ServiceTimeModel) -> Self {
        Self {
            oracle,
            index,
            depot,
            service,
        }
    }

    pub fn measure(&self, points: &[Point]) -> Result<WorkInfo> {
        if points.is_empty() {
            return Ok(WorkInfo::default());
        }

        let waypoints = points
            .iter()
            .map(|point| self.index.address_of(point).map(str::to_string))
            .collect::<Result<Vec<_>>>()?;

        let directions = self.oracle.route(self.depot, self.depot, &waypoints, true)?;
        check_order(&directions, waypoints.len())?;

        let mut driving_min = 0.0;
        let mut distance_km = 0.0;
        let mut skipped_legs = 0;
        for (leg_idx, leg) in directions.legs.iter().enumerate() {
            match leg.duration.to_minutes() {
                Some(minutes) => driving_min += minutes,
                None => {
                    warn!(leg = leg_idx, reading = ?leg.duration, "unreadable leg duration counted as zero");
                    skipped_legs += 1;
                }
            }
            match leg.distance.to_kilometers() {
                Some(km) => distance_km += km,
                None => {
                    warn!(leg = leg_idx, reading = ?leg.distance, "unreadable leg distance counted as zero");
                    skipped_legs += 1;
                }
            }
        }

        let sequence = directions
            .waypoint_order
            .iter()
            .map(|&i| waypoints[i].clone())
            .collect();

        let service_min = self.service.service_minutes(&waypoints);
        debug!(
            stops = waypoints.len(),
            driving_min, service_min, distance_km, "route measured"
        );

        Ok(WorkInfo {
            duration_min: round1(round1(driving_min) + service_min),
            distance_km: round1(distance_km),
            sequence,
            skipped_legs,
        })
    }
}

impl<'a, O: CostOracle + Sync> WorkTimeEstimator<'a, O> {
    /// Measure every route. Oracle calls run in parallel; results are written
    /// back one route at a time once all have succeeded.
    pub fn measure_all(&self, routes: &mut RouteCollection) -> Result<()> {
        let measured = routes
            .par_iter()
            .map(|(id, route)| self.measure(&route.points).map(|work| (*id, work)))
            .collect::<Result<Vec<_>>>()?;

        for (id, work) in measured {
            if let Some(route) = routes.get_mut(&id) {
                route.work = Some(work);
            }
        }
        Ok(())
    }

    pub fn measure_route(&self, routes: &mut RouteCollection, id: RouteId) -> Result<()> {
        let route = routes
            .get_mut(&id)
            .ok_or_else(|| Error::data(format!("no {id} in the collection")))?;
        route.work = Some(self.measure(&route.points)?);
        Ok(())
    }
}

fn check_order(directions: &Directions, waypoints: usize) -> Result<()> {
    let order = &directions.waypoint_order;
    let mut seen = vec![false; waypoints];
    let valid = order.len() == waypoints
        && order
            .iter()
            .all(|&i| i < waypoints && !std::mem::replace(&mut seen[i], true));
    if valid {
        Ok(())
    } else {
        Err(Error::oracle(format!(
            "waypoint order {order:?} is not a permutation of {waypoints} waypoints"
        )))
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
