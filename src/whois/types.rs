//! WHOIS data structures.

use std::collections::BTreeMap;

/// Contact fields keyed by role (`registrant`, `admin`, `tech`, `billing`),
/// then by field name (`name`, `organization`, `email`, ...).
pub type Contacts = BTreeMap<String, BTreeMap<String, String>>;

/// Fields extracted from a WHOIS answer.
///
/// Every list keeps the order in which values appeared in the text, so the
/// first entry is what the registry (not the registrar) reported.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhoisRecord {
    /// Registrar names
    pub registrars: Vec<String>,
    /// Raw creation date strings
    pub creation_dates: Vec<String>,
    /// Raw last-updated date strings
    pub updated_dates: Vec<String>,
    /// Raw expiration date strings
    pub expiration_dates: Vec<String>,
    /// Nameserver host names (lower-cased, de-duplicated)
    pub nameservers: Vec<String>,
    /// EPP status codes (e.g. "clientTransferProhibited")
    pub status: Vec<String>,
    pub contacts: Contacts,
    /// Full answer text (registry answer, then registrar answer if any)
    pub raw: String,
}
