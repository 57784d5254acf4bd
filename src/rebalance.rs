//! Moves points from the most loaded route to the least loaded one.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::Point;
use crate::route::{Route, RouteCollection, RouteId, WorkTimeTable};

/// One applied move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transfer {
    pub point: Point,
    pub from: RouteId,
    pub to: RouteId,
    /// Occurrences of `point` moved together.
    pub moved: usize,
}

/// Routes with the largest and smallest work time. On ties the route seen
/// first in id order wins. `None` for an empty table.
pub fn longest_and_shortest(table: &WorkTimeTable) -> Option<(RouteId, RouteId)> {
    let mut entries = table.iter();
    let (&first, &first_time) = entries.next()?;
    let mut longest = (first, first_time);
    let mut shortest = (first, first_time);
    for (&id, &time) in entries {
        if time > longest.1 {
            longest = (id, time);
        }
        if time < shortest.1 {
            shortest = (id, time);
        }
    }
    Some((longest.0, shortest.0))
}

/// The member of `route` closest to `target`, first one on ties.
pub fn transfer_candidate(route: &Route, target: &Point) -> Option<Point> {
    closest(route.points.iter(), target)
}

fn closest<'p>(points: impl Iterator<Item = &'p Point>, target: &Point) -> Option<Point> {
    let mut best: Option<(Point, f64)> = None;
    for point in points {
        let dist = point.euclidean(target);
        if best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((*point, dist));
        }
    }
    best.map(|(point, _)| point)
}

/// Move every occurrence of `point` from one route to the other and return how
/// many moved. Neither route changes when either id is unknown.
pub fn transfer(routes: &mut RouteCollection, from: RouteId, to: RouteId, point: Point) -> Result<usize> {
    if !routes.contains_key(&to) {
        return Err(Error::data(format!("no {to} in the collection")));
    }
    let source = routes
        .get_mut(&from)
        .ok_or_else(|| Error::data(format!("no {from} in the collection")))?;

    let before = source.points.len();
    source.points.retain(|p| *p != point);
    let moved = before - source.points.len();
    source.work = None;

    if let Some(target) = routes.get_mut(&to) {
        target.points.extend(std::iter::repeat_n(point, moved));
        target.work = None;
    }
    Ok(moved)
}

/// Greedy longest-to-shortest mover with a short memory.
///
/// A point is not sent back into a route it left within the last
/// `tabu_tenure` steps unless every member of the longest route is barred.
#[derive(Debug, Clone)]
pub struct Rebalancer {
    tabu_tenure: usize,
    step: usize,
    departures: Vec<Departure>,
}

#[derive(Debug, Clone, Copy)]
struct Departure {
    point: Point,
    route: RouteId,
    step: usize,
}

impl Rebalancer {
    pub fn new(tabu_tenure: usize) -> Self {
        Self {
            tabu_tenure,
            step: 0,
            departures: Vec::new(),
        }
    }

    /// Apply one move based on the current table. Both touched routes lose
    /// their measurement and must be re-measured before the next step.
    pub fn step(&mut self, table: &WorkTimeTable, routes: &mut RouteCollection) -> Result<Transfer> {
        self.step += 1;
        let tenure = self.tabu_tenure;
        let now = self.step;
        self.departures.retain(|d| now - d.step <= tenure);

        let (from, to) = longest_and_shortest(table)
            .ok_or_else(|| Error::data("no measured routes to rebalance"))?;
        if from == to {
            return Err(Error::data(format!("{from} is both longest and shortest")));
        }

        let source = routes
            .get(&from)
            .ok_or_else(|| Error::data(format!("no {from} in the collection")))?;
        let target = routes
            .get(&to)
            .ok_or_else(|| Error::data(format!("no {to} in the collection")))?;
        let origin = target.origin;

        let allowed = source.points.iter().filter(|p| !self.is_barred(p, to));
        let point = match closest(allowed, &origin) {
            Some(point) => point,
            None => {
                let point = transfer_candidate(source, &origin)
                    .ok_or_else(|| Error::data(format!("{from} has no points to give")))?;
                warn!(%point, %from, %to, "every candidate recently left the target; moving closest anyway");
                point
            }
        };

        let moved = transfer(routes, from, to, point)?;
        self.departures.push(Departure {
            point,
            route: from,
            step: now,
        });

        debug!(%point, %from, %to, moved, step = now, "point transferred");
        Ok(Transfer { point, from, to, moved })
    }

    fn is_barred(&self, point: &Point, target: RouteId) -> bool {
        self.departures
            .iter()
            .any(|d| d.route == target && d.point == *point)
    }
}
