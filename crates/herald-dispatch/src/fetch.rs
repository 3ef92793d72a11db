//! Campaign image retrieval

use std::time::Duration;

use thiserror::Error;
use url::Url;

// Some image hosts reject anonymous default clients, so the fetch carries
// a fixed realistic browser identity.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const ACCEPT: &str = "image/avif,image/webp,image/png,image/jpeg,*/*;q=0.8";

const DEFAULT_FILENAME: &str = "promo.jpg";

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Image host answered HTTP {0}")]
    Status(u16),

    #[error("Payload too small to be an image: {got} bytes (minimum {min})")]
    TooSmall { got: usize, min: usize },
}

/// A resolved campaign image.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Fetch image bytes with a bounded timeout.
///
/// The minimum-size check guards against silently treating an error page
/// as image content.
pub async fn fetch_image(
    http: &reqwest::Client,
    url: &Url,
    timeout: Duration,
    min_bytes: usize,
) -> std::result::Result<ImagePayload, FetchError> {
    let response = http
        .get(url.clone())
        .timeout(timeout)
        .header(reqwest::header::USER_AGENT, USER_AGENT)
        .header(reqwest::header::ACCEPT, ACCEPT)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let bytes = response.bytes().await?.to_vec();
    if bytes.len() < min_bytes {
        return Err(FetchError::TooSmall {
            got: bytes.len(),
            min: min_bytes,
        });
    }

    Ok(ImagePayload {
        bytes,
        filename: filename_from_url(url),
    })
}

/// Derive a delivery filename from the source URL's last path segment,
/// falling back to a fixed default when the path carries no usable name.
fn filename_from_url(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|s| !s.is_empty() && s.contains('.'))
        .map(|s| s.to_string())
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_url() {
        let url = Url::parse("https://cdn.example.com/img/sale-banner.png?v=2").unwrap();
        assert_eq!(filename_from_url(&url), "sale-banner.png");
    }

    #[test]
    fn test_filename_falls_back_without_extension() {
        let url = Url::parse("https://cdn.example.com/img/banner").unwrap();
        assert_eq!(filename_from_url(&url), DEFAULT_FILENAME);

        let url = Url::parse("https://cdn.example.com/").unwrap();
        assert_eq!(filename_from_url(&url), DEFAULT_FILENAME);
    }
}
