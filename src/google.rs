//! Google Maps web-service adapter for directions and geocoding.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::geo::Point;
use crate::traits::{CostOracle, Directions, Geocoder, Leg};
use crate::units::{DistanceUnit, Quantity, Reading, TimeUnit};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub base_url: String,
    pub api_key: String,
    /// Response language; decides the unit markers in leg texts.
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api".to_string(),
            api_key: String::new(),
            language: "zh-HK".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GoogleMapsClient {
    config: GoogleConfig,
    client: reqwest::blocking::Client,
}

impl GoogleMapsClient {
    pub fn new(config: GoogleConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn get<T: DeserializeOwned>(&self, service: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}/json", self.config.base_url, service);
        let body = self
            .client
            .get(url)
            .query(query)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<T>())?;
        Ok(body)
    }
}

impl CostOracle for GoogleMapsClient {
    fn route(
        &self,
        origin: &str,
        destination: &str,
        waypoints: &[String],
        optimize: bool,
    ) -> Result<Directions> {
        let waypoints = waypoint_param(waypoints, optimize);
        let mut query = vec![
            ("origin", origin),
            ("destination", destination),
            ("mode", "driving"),
            ("language", self.config.language.as_str()),
        ];
        if !waypoints.is_empty() {
            query.push(("waypoints", waypoints.as_str()));
        }

        directions_from_response(self.get("directions", &query)?)
    }
}

impl Geocoder for GoogleMapsClient {
    fn geocode(&self, address: &str) -> Result<Option<Point>> {
        geocode_from_response(self.get("geocode", &[("address", address)])?)
    }
}

/// Read a Directions API JSON body.
pub fn parse_directions(body: &str) -> Result<Directions> {
    directions_from_response(from_json(body)?)
}

/// Read a Geocoding API JSON body.
pub fn parse_geocode(body: &str) -> Result<Option<Point>> {
    geocode_from_response(from_json(body)?)
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|err| Error::oracle(format!("malformed response: {err}")))
}

fn waypoint_param(waypoints: &[String], optimize: bool) -> String {
    if waypoints.is_empty() {
        return String::new();
    }
    let joined = waypoints.join("|");
    if optimize {
        format!("optimize:true|{joined}")
    } else {
        joined
    }
}

fn directions_from_response(response: DirectionsResponse) -> Result<Directions> {
    if response.status != "OK" {
        return Err(Error::oracle(status_message("directions", &response.status, response.error_message)));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| Error::oracle("directions answered OK without a route"))?;

    let legs = route
        .legs
        .into_iter()
        .map(|leg| Leg::new(duration_reading(leg.duration), distance_reading(leg.distance)))
        .collect();

    Ok(Directions {
        legs,
        waypoint_order: route.waypoint_order,
    })
}

fn geocode_from_response(response: GeocodeResponse) -> Result<Option<Point>> {
    match response.status.as_str() {
        "OK" => Ok(response
            .results
            .into_iter()
            .next()
            .map(|result| Point::new(result.geometry.location.lng, result.geometry.location.lat))),
        "ZERO_RESULTS" => Ok(None),
        status => Err(Error::oracle(status_message("geocode", status, response.error_message))),
    }
}

fn status_message(service: &str, status: &str, detail: Option<String>) -> String {
    match detail {
        Some(detail) => format!("{service} returned {status}: {detail}"),
        None => format!("{service} returned {status}"),
    }
}

/// Numeric seconds when the service sends them, otherwise the localized text.
fn duration_reading(value: TextValue) -> Reading<TimeUnit> {
    match value.value {
        Some(seconds) => Reading::minutes(seconds / 60.0),
        None => Reading::<TimeUnit>::parse(&value.text),
    }
}

/// Numeric metres when the service sends them, otherwise the localized text.
fn distance_reading(value: TextValue) -> Reading<DistanceUnit> {
    match value.value {
        Some(meters) => Reading::Parsed(vec![Quantity::new(meters, DistanceUnit::Meters)]),
        None => Reading::<DistanceUnit>::parse(&value.text),
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<RouteBody>,
}

#[derive(Debug, Deserialize)]
struct RouteBody {
    #[serde(default)]
    legs: Vec<LegBody>,
    #[serde(default)]
    waypoint_order: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct LegBody {
    duration: TextValue,
    distance: TextValue,
}

#[derive(Debug, Deserialize)]
struct TextValue {
    #[serde(default)]
    text: String,
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}
