//! Per-IP lookups against the three GeoLite2 datasets.

use std::net::IpAddr;
use std::path::Path;

use maxminddb::{geoip2, Reader};

use super::types::{CityRecord, GeoDatabaseInfo};
use super::{ASN_EDITION, CITY_EDITION, COUNTRY_EDITION};
use crate::error_handling::InitializationError;

/// Answers "what place and network does this IP belong to?".
///
/// The three questions are independent: an IP missing from the ASN dataset
/// still gets its city and country, and vice versa.
pub trait GeoLookup: Send + Sync {
    /// City-level location data, or `None` if the city dataset has no entry.
    fn city(&self, ip: IpAddr) -> Option<CityRecord>;

    /// English country name from the country dataset.
    fn country(&self, ip: IpAddr) -> Option<String>;

    /// Autonomous-system organization name from the ASN dataset.
    fn network_operator(&self, ip: IpAddr) -> Option<String>;
}

/// The City, Country and ASN readers, opened once at startup.
///
/// Readers hold the whole file in memory and are never mutated after
/// construction, so one instance is shared by every request without locking.
pub struct GeoDatabases {
    city: Reader<Vec<u8>>,
    country: Reader<Vec<u8>>,
    asn: Reader<Vec<u8>>,
    info: Vec<GeoDatabaseInfo>,
}

impl GeoDatabases {
    /// Opens `GeoLite2-City.mmdb`, `GeoLite2-Country.mmdb` and `GeoLite2-ASN.mmdb` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::GeoDatabaseError` naming the first file
    /// that is missing or cannot be parsed.
    pub fn open(dir: &Path) -> Result<Self, InitializationError> {
        let mut info = Vec::with_capacity(3);
        let city = open_reader(dir, CITY_EDITION, &mut info)?;
        let country = open_reader(dir, COUNTRY_EDITION, &mut info)?;
        let asn = open_reader(dir, ASN_EDITION, &mut info)?;

        Ok(Self {
            city,
            country,
            asn,
            info,
        })
    }

    /// Type and build date of each opened database, in City, Country, ASN order.
    pub fn metadata(&self) -> &[GeoDatabaseInfo] {
        &self.info
    }
}

fn open_reader(
    dir: &Path,
    edition: &str,
    info: &mut Vec<GeoDatabaseInfo>,
) -> Result<Reader<Vec<u8>>, InitializationError> {
    let path = dir.join(format!("{}.mmdb", edition));
    let display_path = path.display().to_string();

    let reader =
        Reader::open_readfile(&path).map_err(|e| InitializationError::GeoDatabaseError {
            path: display_path.clone(),
            message: e.to_string(),
        })?;

    log::info!(
        "Opened GeoIP database {} ({}, build {})",
        display_path,
        reader.metadata.database_type,
        reader.metadata.build_epoch
    );
    info.push(GeoDatabaseInfo {
        path: display_path,
        database_type: reader.metadata.database_type.clone(),
        build_epoch: reader.metadata.build_epoch,
    });

    Ok(reader)
}

impl GeoLookup for GeoDatabases {
    fn city(&self, ip: IpAddr) -> Option<CityRecord> {
        let lookup = match self.city.lookup(ip) {
            Ok(result) => result,
            Err(e) => {
                log::debug!("City lookup failed for {}: {}", ip, e);
                return None;
            }
        };
        if !lookup.has_data() {
            return None;
        }

        let city: geoip2::City = match lookup.decode() {
            Ok(Some(city)) => city,
            Ok(None) => return None,
            Err(e) => {
                log::debug!("City record for {} could not be decoded: {}", ip, e);
                return None;
            }
        };

        Some(CityRecord {
            city: city.city.names.english.map(|s| s.to_string()),
            postal_code: city.postal.code.map(|s| s.to_string()),
            latitude: city.location.latitude,
            longitude: city.location.longitude,
            accuracy_radius_km: city.location.accuracy_radius,
        })
    }

    fn country(&self, ip: IpAddr) -> Option<String> {
        let lookup = self.country.lookup(ip).ok()?;
        if !lookup.has_data() {
            return None;
        }
        match lookup.decode::<geoip2::Country>() {
            Ok(Some(country)) => country.country.names.english.map(|s| s.to_string()),
            Ok(None) => None,
            Err(e) => {
                log::debug!("Country record for {} could not be decoded: {}", ip, e);
                None
            }
        }
    }

    fn network_operator(&self, ip: IpAddr) -> Option<String> {
        let lookup = self.asn.lookup(ip).ok()?;
        if !lookup.has_data() {
            return None;
        }
        match lookup.decode::<geoip2::Asn>() {
            Ok(Some(asn)) => asn.autonomous_system_organization.map(|s| s.to_string()),
            Ok(None) => None,
            Err(e) => {
                log::debug!("ASN record for {} could not be decoded: {}", ip, e);
                None
            }
        }
    }
}
