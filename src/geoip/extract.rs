//! Archive extraction.
//!
//! MaxMind ships each edition as a tar.gz with a dated top-level directory
//! (`GeoLite2-City_20240101/GeoLite2-City.mmdb`) next to licence files. Only
//! the `.mmdb` member is kept, and its directory prefix is dropped.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::io::Read;
use tar::Archive;

/// A `.mmdb` file pulled out of an archive, with its path flattened.
#[derive(Debug)]
pub(crate) struct ExtractedDatabase {
    /// Bare file name of the member (no directories)
    pub(crate) file_name: String,
    /// Database contents
    pub(crate) bytes: Vec<u8>,
}

/// Extracts the `.mmdb` member for `edition` from a tar.gz archive.
///
/// A member named exactly `<edition>.mmdb` wins. If there is none but the
/// archive holds a single `.mmdb` file under another name, that one is used.
pub(crate) fn extract_mmdb_from_tar_gz(
    tar_gz_bytes: &[u8],
    edition: &str,
) -> Result<ExtractedDatabase> {
    log::debug!("Extracting {}.mmdb from tar.gz archive", edition);

    let expected_name = format!("{}.mmdb", edition);
    let mut tar_archive = Archive::new(GzDecoder::new(tar_gz_bytes));
    let entries = tar_archive
        .entries()
        .with_context(|| "Failed to read tar archive entries")?;

    let mut other_mmdb: Vec<ExtractedDatabase> = Vec::new();

    for entry_result in entries {
        let mut entry = entry_result.with_context(|| "Failed to read tar entry")?;
        let file_name = {
            let path = entry.path().with_context(|| "Failed to get entry path")?;
            match path.file_name().and_then(|name| name.to_str()) {
                Some(name) if name.ends_with(".mmdb") => name.to_string(),
                _ => continue,
            }
        };

        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .with_context(|| format!("Failed to read {} from archive", file_name))?;

        if file_name == expected_name {
            log::info!("Extracted {} from tar.gz ({} bytes)", file_name, bytes.len());
            return Ok(ExtractedDatabase { file_name, bytes });
        }
        other_mmdb.push(ExtractedDatabase { file_name, bytes });
    }

    if other_mmdb.len() == 1 {
        if let Some(found) = other_mmdb.pop() {
            log::warn!(
                "Archive for {} contains {} instead of {}; using it",
                edition,
                found.file_name,
                expected_name
            );
            return Ok(found);
        }
    }

    Err(anyhow::anyhow!("{} not found in tar.gz archive", expected_name))
}
