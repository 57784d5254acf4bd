//! Turning address lists into routable points.

use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{AddressIndex, Point};
use crate::traits::Geocoder;

/// Geocode every address in order. An unknown address stops the run.
pub fn geocode_addresses<G, S>(geocoder: &G, addresses: &[S]) -> Result<Vec<Point>>
where
    G: Geocoder,
    S: AsRef<str>,
{
    addresses
        .iter()
        .map(|address| -> Result<Point> {
            let address = address.as_ref();
            let point = geocoder
                .geocode(address)?
                .ok_or_else(|| Error::data(format!("address not found: {address}")))?;
            debug!(address, %point, "geocoded");
            Ok(point)
        })
        .collect()
}

/// Geocode `addresses` and index each resulting point back to its address.
pub fn build_address_index<G, S>(geocoder: &G, addresses: &[S]) -> Result<(Vec<Point>, AddressIndex)>
where
    G: Geocoder,
    S: AsRef<str>,
{
    let points = geocode_addresses(geocoder, addresses)?;
    let index = AddressIndex::from_parallel(&points, addresses)?;
    Ok((points, index))
}
