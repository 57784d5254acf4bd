//! Hong Kong locations for realistic test fixtures.
//!
//! Coordinates are approximate positions of public landmarks.

use route_balancer::geo::{AddressIndex, Point};

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

pub const DEPOT: Location = Location::new(
    "17-19 Dai Hei Street, Tai Po Industrial Estate, Tai Po, New Territories, HK",
    22.4596,
    114.1855,
);

// ============================================================================
// New Territories
// ============================================================================

pub const TAI_PO: &[Location] = &[
    Location::new("Tai Po Market Station", 22.4445, 114.1704),
    Location::new("Tai Po Mega Mall", 22.4507, 114.1680),
    Location::new("Tai Wo Plaza", 22.4510, 114.1611),
    Location::new("Tai Po Hui Market", 22.4486, 114.1650),
];

pub const SHA_TIN: &[Location] = &[
    Location::new("New Town Plaza", 22.3817, 114.1887),
    Location::new("Sha Tin Racecourse", 22.4005, 114.2030),
    Location::new("Ma On Shan Plaza", 22.4248, 114.2318),
    Location::new("Fo Tan Station", 22.3957, 114.1983),
    Location::new("Tai Wai Station", 22.3726, 114.1787),
];

pub const NORTH_WEST: &[Location] = &[
    Location::new("Tuen Mun Town Plaza", 22.3917, 113.9770),
    Location::new("Yuen Long Plaza", 22.4449, 114.0266),
    Location::new("Tin Shui Wai Station", 22.4587, 114.0045),
    Location::new("Tuen Mun Hospital", 22.4067, 113.9761),
    Location::new("Kam Tin Market", 22.4417, 114.0636),
];

// ============================================================================
// Kowloon
// ============================================================================

pub const KOWLOON: &[Location] = &[
    Location::new("Mong Kok Station", 22.3193, 114.1694),
    Location::new("Tsim Sha Tsui Clock Tower", 22.2936, 114.1694),
    Location::new("Kowloon Tong Station", 22.3368, 114.1760),
    Location::new("Kwun Tong APM", 22.3123, 114.2260),
    Location::new("Sham Shui Po Station", 22.3307, 114.1622),
];

// ============================================================================
// Hong Kong Island (mandatory region)
// ============================================================================

pub const HK_ISLAND: &[Location] = &[
    Location::new("Central Pier", 22.2870, 114.1610),
    Location::new("Causeway Bay Times Square", 22.2783, 114.1822),
    Location::new("Wan Chai Market", 22.2760, 114.1751),
    Location::new("Aberdeen Harbour", 22.2480, 114.1556),
    Location::new("Chai Wan Station", 22.2646, 114.2370),
];

/// Everything outside Hong Kong Island.
pub fn general_locations() -> Vec<Location> {
    [TAI_PO, SHA_TIN, NORTH_WEST, KOWLOON].concat()
}

pub fn points(locations: &[Location]) -> Vec<Point> {
    locations.iter().map(Location::point).collect()
}

/// Address index covering every listed location.
pub fn address_index() -> AddressIndex {
    let all = [TAI_PO, SHA_TIN, NORTH_WEST, KOWLOON, HK_ISLAND].concat();
    let coords = points(&all);
    let names: Vec<&str> = all.iter().map(|l| l.name).collect();
    AddressIndex::from_parallel(&coords, &names).expect("fixture lists are parallel")
}
