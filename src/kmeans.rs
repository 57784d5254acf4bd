//! Lloyd's k-means over raw (lng, lat) pairs.
//!
//! Seeding is deterministic: the first distinct point, then repeatedly the
//! distinct point farthest from every centre chosen so far. Local minima are
//! accepted as they fall out.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::geo::Point;

pub const DEFAULT_MAX_ITERATIONS: usize = 300;

#[derive(Debug, Clone)]
pub struct Clustering {
    /// One centre per cluster, indexed by label.
    pub centroids: Vec<Point>,
    /// Cluster label of each input point, in input order.
    pub labels: Vec<usize>,
}

impl Clustering {
    /// Input points grouped by label, preserving input order within a group.
    pub fn members(&self, points: &[Point]) -> Vec<Vec<Point>> {
        let mut groups = vec![Vec::new(); self.centroids.len()];
        for (point, &label) in points.iter().zip(&self.labels) {
            groups[label].push(*point);
        }
        groups
    }
}

pub fn kmeans(points: &[Point], k: usize, max_iterations: usize) -> Result<Clustering> {
    if k == 0 {
        return Err(Error::data("cannot partition into zero routes"));
    }

    let distinct = distinct_points(points);
    if k > distinct.len() {
        return Err(Error::data(format!(
            "{} routes requested but only {} distinct points",
            k,
            distinct.len()
        )));
    }

    let mut centroids = seed(&distinct, k);
    let mut labels = vec![0usize; points.len()];

    for iteration in 0..max_iterations.max(1) {
        let mut changed = false;
        for (i, point) in points.iter().enumerate() {
            let best = nearest(point, &centroids);
            if labels[i] != best {
                labels[i] = best;
                changed = true;
            }
        }

        if iteration > 0 && !changed {
            break;
        }

        let mut sums = vec![(0.0, 0.0); k];
        let mut counts = vec![0usize; k];
        for (point, &label) in points.iter().zip(&labels) {
            sums[label].0 += point.lng;
            sums[label].1 += point.lat;
            counts[label] += 1;
        }
        for (j, centre) in centroids.iter_mut().enumerate() {
            // An emptied cluster keeps its previous centre.
            if counts[j] > 0 {
                let n = counts[j] as f64;
                *centre = Point::new(sums[j].0 / n, sums[j].1 / n);
            }
        }
    }

    Ok(Clustering { centroids, labels })
}

fn distinct_points(points: &[Point]) -> Vec<Point> {
    let mut seen = HashSet::new();
    points.iter().copied().filter(|p| seen.insert(*p)).collect()
}

fn seed(distinct: &[Point], k: usize) -> Vec<Point> {
    let mut centres = Vec::with_capacity(k);
    centres.push(distinct[0]);

    while centres.len() < k {
        let mut best_idx = 0;
        let mut best_dist = f64::NEG_INFINITY;
        for (i, candidate) in distinct.iter().enumerate() {
            let min_dist = centres
                .iter()
                .map(|c| candidate.squared_distance(c))
                .fold(f64::INFINITY, f64::min);
            if min_dist > best_dist {
                best_dist = min_dist;
                best_idx = i;
            }
        }
        centres.push(distinct[best_idx]);
    }

    centres
}

fn nearest(point: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (j, centre) in centroids.iter().enumerate() {
        let dist = point.squared_distance(centre);
        if dist < best_dist {
            best_dist = dist;
            best = j;
        }
    }
    best
}
