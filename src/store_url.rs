//! Storefront URL validation.

use url::Url;

use crate::Error;

/// Hosts that serve hosted storefront pages.
const STOREFRONT_HOSTS: &[&str] = &["take.app", "www.take.app"];

/// A validated storefront URL.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreUrl {
    /// `st_`-prefixed store identifier from the URL path.
    pub store_id: String,
    /// Normalized URL to fetch. Query string and fragment are dropped.
    pub url: String,
}

/// Checks that `input` is a hosted storefront URL and pulls out the store
/// identifier.
///
/// Blank input is reported as [`Error::MissingUrl`] before any format
/// checks, so a serving layer can keep "nothing was sent" and "garbage was
/// sent" apart.
pub fn validate_store_url(input: &str) -> Result<StoreUrl, Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::MissingUrl);
    }

    let url =
        Url::parse(trimmed).map_err(|e| Error::InvalidUrlFormat(format!("not a url: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrlFormat(format!(
            "unsupported scheme '{}'",
            url.scheme()
        )));
    }

    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    if !STOREFRONT_HOSTS.contains(&host.as_str()) {
        return Err(Error::InvalidUrlFormat(format!(
            "host '{host}' is not a hosted storefront"
        )));
    }

    let store_id = url
        .path_segments()
        .and_then(|mut segments| segments.find(|s| !s.is_empty()))
        .filter(|s| is_store_id(s))
        .ok_or_else(|| {
            Error::InvalidUrlFormat("path does not contain a store identifier".to_string())
        })?
        .to_string();

    Ok(StoreUrl {
        url: format!("https://take.app/{store_id}"),
        store_id,
    })
}

fn is_store_id(segment: &str) -> bool {
    segment.len() > 3
        && segment.starts_with("st_")
        && segment[3..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
