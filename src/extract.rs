//! Embedded hydration state extraction.
//!
//! The storefront page renders client-side; the only reliable source of
//! catalog data is the Next.js bootstrap script the host embeds for
//! hydration. The extractor scans the raw HTML for that script by marker
//! instead of parsing the full document, so markup changes that leave the
//! payload convention alone cannot break it.

use serde_json::Value;

use crate::Error;

/// Marker identifying the hydration script tag.
const STATE_MARKER: &str = "__NEXT_DATA__";

/// Locates the hydration payload in `html` and decodes it into a generic
/// JSON tree.
///
/// No schema interpretation happens here; a success only proves a decodable
/// payload exists.
pub fn extract_embedded_state(html: &str) -> Result<Value, Error> {
    let payload = find_state_payload(html).ok_or_else(|| {
        tracing::error!("hydration marker not present in store page");
        Error::NoEmbeddedStateFound
    })?;

    serde_json::from_str(payload).map_err(|e| {
        tracing::error!("hydration payload does not decode: {}", e);
        Error::MalformedEmbeddedState(e)
    })
}

/// Returns the text between the marker script's opening tag and the next
/// `</script>`. Tolerant of attribute order inside the tag.
fn find_state_payload(html: &str) -> Option<&str> {
    let marker = html.find(STATE_MARKER)?;
    let tag_end = html[marker..].find('>').map(|i| marker + i + 1)?;
    let close = html[tag_end..].find("</script>").map(|i| tag_end + i)?;
    Some(html[tag_end..close].trim())
}
