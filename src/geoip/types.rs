//! GeoIP data structures.

use serde::Serialize;

/// Fields taken from the GeoLite2-City dataset for one IP.
///
/// Every field is independently optional: MaxMind often knows the country
/// and coordinates of a network but not its city or postal code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityRecord {
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Accuracy radius around the coordinates, in kilometres
    pub accuracy_radius_km: Option<u16>,
}

/// Metadata about one opened GeoIP database
#[derive(Debug, Clone, Serialize)]
pub struct GeoDatabaseInfo {
    /// Source path
    pub path: String,
    /// Database type reported by the file (e.g. "GeoLite2-City")
    pub database_type: String,
    /// Build timestamp (Unix epoch seconds)
    pub build_epoch: u64,
}
