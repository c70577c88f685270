//! WHOIS text parsing.
//!
//! WHOIS has no schema; registries and registrars label the same field in
//! many ways. Each field is matched line by line with a case-insensitive
//! pattern over the known labels.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

use super::types::{Contacts, WhoisRecord};

fn field_pattern(labels: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?im)^[ \t]*(?:{})[ \t]*:[ \t]*([^\r\n]*?)[ \t]*\r?$", labels)).ok()
}

static REGISTRAR_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| field_pattern("Registrar|Sponsoring Registrar|Registrar Name|registrar-name"));

static CREATION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    field_pattern(
        "Creation Date|Created On|Created|Registered On|Registration Time|Domain Registration Date|created",
    )
});

static UPDATED_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    field_pattern("Updated Date|Last Updated On|Last Modified|Last Updated|Changed|last-update")
});

static EXPIRATION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    field_pattern(
        "Registry Expiry Date|Registrar Registration Expiration Date|Expiration Date|Expiry Date|Expires On|Expires|paid-till",
    )
});

static NAMESERVER_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| field_pattern("Name Server|Nameserver|Nameservers|nserver|Name Servers"));

static STATUS_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| field_pattern("Domain Status|Status|state"));

static CONTACT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(Registrant|Administrative|Admin|Technical|Tech|Billing)[ \t]+(?:Contact[ \t]+)?([A-Za-z][A-Za-z /\-]*?)[ \t]*:[ \t]*([^\r\n]*?)[ \t]*\r?$",
    )
    .ok()
});

/// Answers registries give for unregistered names (matched case-insensitively)
const NOT_FOUND_MARKERS: &[&str] = &[
    "no match for",
    "not found",
    "no data found",
    "no entries found",
    "domain not found",
    "status: free",
    "status: available",
];

fn all_values(re: &LazyLock<Option<Regex>>, text: &str) -> Vec<String> {
    match re.as_ref() {
        Some(re) => re
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect(),
        None => {
            log::warn!("WHOIS field pattern failed to compile, field skipped");
            Vec::new()
        }
    }
}

/// Extracts the known fields from a WHOIS answer.
///
/// Never fails: a field that cannot be found is simply empty.
pub fn parse_whois_text(raw: &str) -> WhoisRecord {
    let mut nameservers: Vec<String> = Vec::new();
    for value in all_values(&NAMESERVER_RE, raw) {
        // "ns1.example.com 192.0.2.1" lists the glue address after the name
        let Some(host) = value.split_whitespace().next() else {
            continue;
        };
        let host = host.trim_end_matches('.').to_lowercase();
        if host.contains('.') && !nameservers.contains(&host) {
            nameservers.push(host);
        }
    }

    let mut status: Vec<String> = Vec::new();
    for value in all_values(&STATUS_RE, raw) {
        // "clientTransferProhibited https://icann.org/epp#clientTransferProhibited"
        if let Some(code) = value.split_whitespace().next() {
            if !status.iter().any(|s| s == code) {
                status.push(code.to_string());
            }
        }
    }

    WhoisRecord {
        registrars: all_values(&REGISTRAR_RE, raw),
        creation_dates: all_values(&CREATION_RE, raw),
        updated_dates: all_values(&UPDATED_RE, raw),
        expiration_dates: all_values(&EXPIRATION_RE, raw),
        nameservers,
        status,
        contacts: parse_contacts(raw),
        raw: raw.to_string(),
    }
}

fn parse_contacts(raw: &str) -> Contacts {
    let mut contacts = Contacts::new();
    let Some(re) = CONTACT_RE.as_ref() else {
        log::warn!("WHOIS contact pattern failed to compile, contacts skipped");
        return contacts;
    };

    for caps in re.captures_iter(raw) {
        let (Some(role), Some(field), Some(value)) = (caps.get(1), caps.get(2), caps.get(3)) else {
            continue;
        };
        let role = match role.as_str().to_lowercase().as_str() {
            "administrative" | "admin" => "admin",
            "technical" | "tech" => "tech",
            "billing" => "billing",
            _ => "registrant",
        };
        let field = field_key(field.as_str());
        let value = value.as_str().trim();
        if field.is_empty() || value.is_empty() {
            continue;
        }
        // First occurrence wins; registrar answers repeat registry fields
        contacts
            .entry(role.to_string())
            .or_default()
            .entry(field)
            .or_insert_with(|| value.to_string());
    }

    contacts
}

/// "State/Province" → "state_province", "Phone Ext" → "phone_ext"
fn field_key(label: &str) -> String {
    label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Whether an answer means "this name is not registered".
pub fn is_not_found(raw: &str) -> bool {
    if raw.trim().is_empty() {
        return true;
    }
    let lower = raw.to_lowercase();
    // A real record always has at least one of these; "not found" may
    // otherwise appear in registry boilerplate.
    let has_record_fields = lower.contains("domain name:") && lower.contains("registrar");
    !has_record_fields && NOT_FOUND_MARKERS.iter().any(|m| lower.contains(m))
}

/// Attempts to parse a WHOIS date string in the common formats.
///
/// Strings without a zone are taken as UTC.
pub fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // Formats carrying a zone offset
    let zoned_formats = ["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%z"];
    for format in &zoned_formats {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    let datetime_formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S UTC",
        "%Y.%m.%d %H:%M:%S",
        "%d-%b-%Y %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
    ];
    for format in &datetime_formats {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
    }

    let date_formats = [
        "%Y-%m-%d",
        "%d-%b-%Y",
        "%d/%m/%Y",
        "%Y.%m.%d",
        "%Y/%m/%d",
        "%d.%m.%Y",
        "%Y%m%d",
    ];
    for format in &date_formats {
        if let Ok(naive_date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
