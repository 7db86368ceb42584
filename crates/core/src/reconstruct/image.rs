//! Data-URI image recognition and decoding.

use std::sync::LazyLock;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use regex::Regex;
use thiserror::Error;

/// Standard alphabet, padding optional. Captured bundles frequently drop `=`.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

static DATA_URI_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:image/(?:png|jpeg|jpg|gif|svg\+xml)(?:;charset=[^;]+)?;base64,")
        .unwrap()
});

static CSS_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)url\(['"]?(data:image/(?:png|jpeg|jpg|gif|svg\+xml)(?:;charset=[^;]+)?;base64,[^'")]+)['"]?\)"#,
    )
    .unwrap()
});

static DATA_URI_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)data:image/(png|jpeg|jpg|gif|svg\+xml)(?:;charset=[^;]+)?;base64,(.+)$")
        .unwrap()
});

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Not a supported image data URI")]
    NotDataUri,
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Raw image bytes recovered from a data URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// MIME subtype as written in the URI (lowercased), e.g. `svg+xml`.
    pub subtype: String,
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// Map a MIME subtype to the extension used on disk.
pub fn extension_for_subtype(subtype: &str) -> String {
    match subtype {
        "svg+xml" => "svg".to_string(),
        other => other.to_string(),
    }
}

/// Locate an image data URI in `literal`.
///
/// A CSS `url(...)` wrapper anywhere in the literal wins and is stripped;
/// otherwise the literal itself must start with a data URI.
pub fn find_data_uri(literal: &str) -> Option<&str> {
    if let Some(inner) = CSS_URL_RE.captures(literal).and_then(|c| c.get(1)) {
        return Some(inner.as_str());
    }
    DATA_URI_PREFIX_RE.is_match(literal).then_some(literal)
}

/// Split a data URI into subtype and payload and decode the payload.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, DecodeError> {
    let caps = DATA_URI_RE.captures(uri).ok_or(DecodeError::NotDataUri)?;
    let subtype = caps[1].to_ascii_lowercase();
    let bytes = LENIENT_BASE64.decode(caps[2].trim())?;
    Ok(DecodedImage { extension: extension_for_subtype(&subtype), subtype, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn decodes_png_data_uri() {
        let image = decode_data_uri("data:image/png;base64,AAAA").unwrap();
        assert_eq!(image.extension, "png");
        assert_eq!(image.bytes, STANDARD.decode("AAAA").unwrap());
    }

    #[test]
    fn svg_xml_maps_to_svg_extension() {
        let uri = "data:image/svg+xml;charset=utf-8;base64,PHN2Zz48L3N2Zz4=";
        let image = decode_data_uri(uri).unwrap();
        assert_eq!(image.subtype, "svg+xml");
        assert_eq!(image.extension, "svg");
        assert_eq!(image.bytes, b"<svg></svg>");
    }

    #[test]
    fn payload_reencodes_to_original() {
        let payload = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
        let image = decode_data_uri(&format!("data:image/png;base64,{payload}")).unwrap();
        assert_eq!(STANDARD.encode(&image.bytes), payload);
    }

    #[test]
    fn missing_padding_is_tolerated() {
        let image = decode_data_uri("data:image/gif;base64,PHN2Zz4").unwrap();
        assert_eq!(image.bytes, b"<svg>");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = decode_data_uri("data:image/png;base64,@@@@").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidBase64(_)));
    }

    #[test]
    fn unsupported_subtype_is_not_a_data_uri() {
        assert!(find_data_uri("data:image/webp;base64,AAAA").is_none());
        assert!(matches!(
            decode_data_uri("data:image/webp;base64,AAAA"),
            Err(DecodeError::NotDataUri)
        ));
    }

    #[test]
    fn css_url_wrappers_are_stripped() {
        let bare = "data:image/png;base64,AAAA";
        for wrapped in [
            "url(data:image/png;base64,AAAA)",
            "url('data:image/png;base64,AAAA')",
            "url(\"data:image/png;base64,AAAA\")",
            "background: URL('data:image/png;base64,AAAA') no-repeat",
        ] {
            assert_eq!(find_data_uri(wrapped), Some(bare), "{wrapped}");
        }
    }

    #[test]
    fn url_wrapper_stops_at_closing_paren() {
        let css = "background:url(data:image/png;base64,AAAA) no-repeat;width:calc(100% - 2px)";
        assert_eq!(find_data_uri(css), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn subtype_case_does_not_depend_on_wrapper() {
        let bare = "data:image/PNG;base64,AAAA";
        assert_eq!(find_data_uri(bare), Some(bare));
        assert_eq!(find_data_uri("url(data:image/PNG;base64,AAAA)"), Some(bare));
        assert_eq!(decode_data_uri(bare).unwrap().extension, "png");
    }

    #[test]
    fn bare_uri_must_be_at_start() {
        assert_eq!(find_data_uri("data:image/jpeg;base64,AAAA"), Some("data:image/jpeg;base64,AAAA"));
        assert!(find_data_uri("see data:image/jpeg;base64,AAAA").is_none());
    }
}
