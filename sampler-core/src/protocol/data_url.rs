//! Inline image data URLs (`data:<media type>[;base64],<payload>`)

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::percent_decode_str;

/// Media type assumed for image bytes that don't declare one
pub const DEFAULT_IMAGE_MEDIA_TYPE: &str = "image/jpeg";

const BASE64_MARKER: &str = ";base64";

/// A decoded `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Declared media type, parameters included
    pub media_type: String,
    /// Payload as base64
    pub data: String,
}

impl DataUrl {
    /// Decode the base64 payload into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.data)
    }

    /// The media type without parameters, e.g. `image/svg+xml`
    pub fn essence(&self) -> &str {
        media_type_essence(&self.media_type)
    }
}

/// Strip parameters such as `;charset=utf-8` from a media type
pub fn media_type_essence(media_type: &str) -> &str {
    media_type.split(';').next().unwrap_or_default().trim()
}

/// Encode raw bytes as a base64 data URL
pub fn to_data_url(data: &[u8], media_type: Option<&str>) -> String {
    let media_type = media_type
        .filter(|mt| !mt.is_empty())
        .unwrap_or(DEFAULT_IMAGE_MEDIA_TYPE);
    format!("data:{};base64,{}", media_type, STANDARD.encode(data))
}

/// Parse a `data:` URL into its media type and a base64 payload.
///
/// Everything between `data:` and the `;base64` marker (or the comma, for
/// percent-encoded payloads) is the media type. Percent-encoded payloads are
/// re-encoded as base64. Returns `None` for anything that isn't a `data:` URL.
pub fn parse_data_url(url: &str) -> Option<DataUrl> {
    let scheme = url.get(..5)?;
    if !scheme.eq_ignore_ascii_case("data:") {
        return None;
    }
    let (header, payload) = url[5..].split_once(',')?;

    let (media_type, data) = match strip_base64_marker(header) {
        Some(media_type) => (media_type, payload.to_string()),
        None => {
            let bytes: Vec<u8> = percent_decode_str(payload).collect();
            (header, STANDARD.encode(bytes))
        }
    };

    let media_type = if media_type.is_empty() {
        DEFAULT_IMAGE_MEDIA_TYPE.to_string()
    } else {
        media_type.to_string()
    };

    Some(DataUrl { media_type, data })
}

fn strip_base64_marker(header: &str) -> Option<&str> {
    let split = header.len().checked_sub(BASE64_MARKER.len())?;
    let marker = header.get(split..)?;
    marker
        .eq_ignore_ascii_case(BASE64_MARKER)
        .then(|| &header[..split])
}
