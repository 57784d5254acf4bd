//! Initial geographic partition of the points into routes.

use tracing::info;

use crate::error::Result;
use crate::geo::{Point, RegionSplit};
use crate::kmeans::{kmeans, DEFAULT_MAX_ITERATIONS};
use crate::route::{Route, RouteCollection, RouteId};

/// Routes produced in total, with or without a mandatory region.
pub const TOTAL_ROUTES: usize = 3;

/// Cluster the points into [`TOTAL_ROUTES`] routes.
///
/// A non-empty mandatory region becomes its own route under
/// [`RouteId::MANDATORY`], centred on its centroid, and the general points
/// share the remaining routes.
pub fn partition(split: &RegionSplit) -> Result<RouteCollection> {
    let mut routes = RouteCollection::new();

    let general_k = if split.has_mandatory_region() {
        let centre = kmeans(&split.mandatory, 1, DEFAULT_MAX_ITERATIONS)?.centroids[0];
        routes.insert(
            RouteId::MANDATORY,
            Route::new(centre, split.mandatory.clone()),
        );
        TOTAL_ROUTES - 1
    } else {
        TOTAL_ROUTES
    };

    routes.extend(cluster_routes(&split.general, general_k)?);

    info!(
        routes = routes.len(),
        general = split.general.len(),
        mandatory = split.mandatory.len(),
        "initial partition built"
    );

    Ok(routes)
}

fn cluster_routes(points: &[Point], k: usize) -> Result<Vec<(RouteId, Route)>> {
    let clustering = kmeans(points, k, DEFAULT_MAX_ITERATIONS)?;
    let members = clustering.members(points);

    Ok(clustering
        .centroids
        .iter()
        .zip(members)
        .enumerate()
        .map(|(label, (centre, points))| (RouteId(label as u32), Route::new(*centre, points)))
        .collect())
}
