//! Offline IP geolocation backed by MaxMind GeoLite2 databases.
//!
//! Three datasets are used side by side: City (location), Country (country
//! name) and ASN (network operator). They are opened once at startup from a
//! local directory and can be refreshed from MaxMind with [`update_geolite_dbs`].

mod extract;
mod lookup;
mod types;
mod update;

pub use lookup::{GeoDatabases, GeoLookup};
pub use types::{CityRecord, GeoDatabaseInfo};
pub use update::{update_geolite_dbs, GeoIpSource};

/// City dataset edition name
pub const CITY_EDITION: &str = "GeoLite2-City";

/// Country dataset edition name
pub const COUNTRY_EDITION: &str = "GeoLite2-Country";

/// ASN dataset edition name
pub const ASN_EDITION: &str = "GeoLite2-ASN";

/// Every edition the service needs, in download order
pub const GEOLITE2_EDITIONS: [&str; 3] = [CITY_EDITION, COUNTRY_EDITION, ASN_EDITION];
