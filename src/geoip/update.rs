//! GeoLite2 database refresh.
//!
//! Downloads the City, Country and ASN archives, pulls the `.mmdb` member out
//! of each and writes it as `<dir>/<edition>.mmdb`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::extract::extract_mmdb_from_tar_gz;
use super::GEOLITE2_EDITIONS;
use crate::config::{
    GEOIP_DOWNLOAD_TIMEOUT, MAXMIND_DOWNLOAD_BASE, MAXMIND_LICENSE_KEY_ENV,
    MAX_GEOIP_DOWNLOAD_SIZE,
};

/// Where GeoLite2 archives are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeoIpSource {
    /// MaxMind's download endpoint, authenticated with a license key
    MaxMind { license_key: String },
    /// A mirror serving `<edition>.tar.gz` under this base URL
    BaseUrl(String),
}

impl GeoIpSource {
    /// Picks the source from CLI/env settings.
    ///
    /// An explicit base URL wins; otherwise the MaxMind license key is read
    /// from `MAXMIND_LICENSE_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error when neither a base URL nor a license key is available.
    pub fn from_settings(base_url: Option<&str>) -> Result<Self> {
        if let Some(base) = base_url.filter(|b| !b.trim().is_empty()) {
            return Ok(Self::BaseUrl(base.trim().to_string()));
        }

        let license_key = std::env::var(MAXMIND_LICENSE_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .with_context(|| {
                format!(
                    "GeoIP update requested but neither --geoip-source nor {} is set",
                    MAXMIND_LICENSE_KEY_ENV
                )
            })?;

        Ok(Self::MaxMind { license_key })
    }

    /// Download URL for one edition's tar.gz archive.
    pub fn archive_url(&self, edition: &str) -> String {
        match self {
            Self::MaxMind { license_key } => format!(
                "{}?edition_id={}&license_key={}&suffix=tar.gz",
                MAXMIND_DOWNLOAD_BASE, edition, license_key
            ),
            Self::BaseUrl(base) => {
                format!("{}/{}.tar.gz", base.trim_end_matches('/'), edition)
            }
        }
    }

    /// URL safe to print in logs (license key masked).
    fn display_url(&self, edition: &str) -> String {
        match self {
            Self::MaxMind { .. } => format!(
                "{}?edition_id={}&license_key=***&suffix=tar.gz",
                MAXMIND_DOWNLOAD_BASE, edition
            ),
            Self::BaseUrl(_) => self.archive_url(edition),
        }
    }
}

/// Downloads and installs all three GeoLite2 databases into `dir`.
///
/// `dir` is created if needed. Each database is written to a temporary file
/// and renamed into place, so a failed download never leaves a truncated
/// `.mmdb` behind.
///
/// # Returns
///
/// Paths of the installed files, in City, Country, ASN order.
///
/// # Errors
///
/// Fails on the first edition that cannot be downloaded, extracted or written.
pub async fn update_geolite_dbs(dir: &Path, source: &GeoIpSource) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create GeoIP directory: {}", dir.display()))?;

    let client = reqwest::Client::builder()
        .timeout(GEOIP_DOWNLOAD_TIMEOUT)
        .build()
        .context("Failed to build HTTP client for GeoIP download")?;

    let mut installed = Vec::with_capacity(GEOLITE2_EDITIONS.len());
    for edition in GEOLITE2_EDITIONS {
        log::info!("Downloading {} from {}", edition, source.display_url(edition));

        let archive = download_with_size_limit(
            &client,
            &source.archive_url(edition),
            MAX_GEOIP_DOWNLOAD_SIZE,
        )
        .await
        .with_context(|| format!("Failed to download {}", edition))?;

        let extracted = extract_mmdb_from_tar_gz(&archive, edition)?;
        let target = dir.join(format!("{}.mmdb", edition));
        write_atomically(&target, &extracted.bytes).await?;

        log::info!(
            "Installed {} ({} bytes, from archive member {})",
            target.display(),
            extracted.bytes.len(),
            extracted.file_name
        );
        installed.push(target);
    }

    Ok(installed)
}

async fn download_with_size_limit(
    client: &reqwest::Client,
    url: &str,
    max_bytes: usize,
) -> Result<Vec<u8>> {
    let mut response = client.get(url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "No error details".to_string());
        log::debug!("GeoIP download error response: {}", error_body);
        return Err(anyhow::anyhow!(
            "Failed to download GeoIP database: {} - {}",
            status,
            error_body
        ));
    }

    if let Some(content_length) = response.content_length() {
        if content_length > max_bytes as u64 {
            return Err(anyhow::anyhow!(
                "GeoIP archive too large: {} bytes (max: {} bytes)",
                content_length,
                max_bytes
            ));
        }
    }

    // Content-Length may be missing or wrong, so the cap is checked per chunk
    let mut downloaded_bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if downloaded_bytes.len() + chunk.len() > max_bytes {
            return Err(anyhow::anyhow!(
                "GeoIP archive too large: at least {} bytes (max: {} bytes)",
                downloaded_bytes.len() + chunk.len(),
                max_bytes
            ));
        }
        downloaded_bytes.extend_from_slice(&chunk);
    }

    Ok(downloaded_bytes)
}

async fn write_atomically(target: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = target.with_extension("mmdb.part");
    tokio::fs::write(&tmp, bytes)
        .await
        .with_context(|| format!("Failed to write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, target)
        .await
        .with_context(|| format!("Failed to move {} into place", target.display()))?;
    Ok(())
}
