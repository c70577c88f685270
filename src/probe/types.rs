//! Probe result structures, serialized as the HTTP response body.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::WHOIS_DATE_FORMAT;
use crate::dns::server_type;
use crate::geoip::GeoLookup;
use crate::whois::{parse_date_string, Contacts, WhoisRecord};

/// Everything known about one probed website.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    /// The string the caller asked about, before normalization
    pub initial_query: String,
    pub domain_info: DomainRecord,
    pub server_info: ServerInfo,
}

/// Server records for the bare and the `www.` name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerInfo {
    pub no_prefix: ServerRecord,
    pub www_prefix: ServerRecord,
}

/// Registration data for the bare hostname.
///
/// Each date is a pair of keys (`<name>` and `<name>_unix`) that are either
/// both present or both absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomainRecord {
    pub contacts: Contacts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
    pub nameservers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_date_unix: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_date_unix: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date_unix: Option<i64>,
    pub query: String,
}

/// First date string of a group, if it parses.
///
/// Only the first value is considered: it is the registry's, later ones
/// come from the registrar's answer.
fn first_timestamp(values: &[String]) -> Option<DateTime<Utc>> {
    let first = values.first()?;
    let parsed = parse_date_string(first);
    if parsed.is_none() {
        log::debug!("Ignoring unparseable WHOIS date {:?}", first);
    }
    parsed
}

fn date_pair(values: &[String]) -> (Option<String>, Option<i64>) {
    match first_timestamp(values) {
        Some(dt) => (
            Some(dt.format(WHOIS_DATE_FORMAT).to_string()),
            Some(dt.timestamp()),
        ),
        None => (None, None),
    }
}

impl DomainRecord {
    /// Builds the record for `query` from its WHOIS data.
    ///
    /// The three date groups are parsed independently; a malformed expiration
    /// date does not hide a valid creation date.
    pub fn from_whois(query: &str, whois: &WhoisRecord) -> Self {
        let (creation_date, creation_date_unix) = date_pair(&whois.creation_dates);
        let (last_update_date, last_update_date_unix) = date_pair(&whois.updated_dates);
        let (expiration_date, expiration_date_unix) = date_pair(&whois.expiration_dates);

        Self {
            contacts: whois.contacts.clone(),
            registrar: whois.registrars.first().cloned(),
            nameservers: whois.nameservers.clone(),
            creation_date,
            creation_date_unix,
            last_update_date,
            last_update_date_unix,
            expiration_date,
            expiration_date_unix,
            query: query.to_string(),
        }
    }
}

/// Geolocation of a server IP. Every field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncertainty_radius_km: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// DNS and network facts about one hostname variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerRecord {
    #[serde(rename = "CNAME")]
    pub cname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_type: Option<String>,
    pub ip: IpAddr,
    pub query: String,
    pub location_data: LocationData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_operator: Option<String>,
}

impl ServerRecord {
    /// Record for `query` without geolocation.
    pub fn new(query: &str, ip: IpAddr, canonical_name: String) -> Self {
        Self {
            server_type: server_type(&canonical_name),
            cname: canonical_name,
            ip,
            query: query.to_string(),
            location_data: LocationData::default(),
            network_operator: None,
        }
    }

    /// Fills location and network operator from `geo`.
    ///
    /// City, country and ASN are looked up separately; a miss in one leaves
    /// the others intact.
    pub fn with_geo(mut self, geo: &dyn GeoLookup) -> Self {
        if let Some(city) = geo.city(self.ip) {
            self.location_data.city = city.city;
            self.location_data.postal_code = city.postal_code;
            self.location_data.longitude = city.longitude;
            self.location_data.latitude = city.latitude;
            self.location_data.uncertainty_radius_km = city.accuracy_radius_km;
        }
        self.location_data.country = geo.country(self.ip);
        self.network_operator = geo.network_operator(self.ip);
        self
    }
}
