//! Login-challenge artifact rendering

use url::form_urlencoded;

const QR_RENDER_BASE: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_SIZE: &str = "300x300";

/// Wrap a raw challenge payload into a scannable QR image URL.
///
/// The raw payload is opaque provider data; serving it through a render
/// endpoint gives status readers something they can display directly.
pub fn render_challenge(challenge: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("size", QR_SIZE)
        .append_pair("data", challenge)
        .finish();

    format!("{QR_RENDER_BASE}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_encodes_payload() {
        let url = render_challenge("2@abc,def&x=1");
        assert!(url.starts_with(QR_RENDER_BASE));
        assert!(url.contains("size=300x300"));
        // Reserved characters must not survive unescaped
        assert!(!url.contains("abc,def&x"));
        assert!(url.contains("2%40abc%2Cdef%26x%3D1"));
    }

    #[test]
    fn test_render_is_deterministic() {
        assert_eq!(render_challenge("payload"), render_challenge("payload"));
    }
}
