//! Background asset acquisition.
//!
//! The certificate background ships as a small JSON resource whose
//! `backgroundImage` field carries a base64 data-URL JPEG. A reserved
//! placeholder value means "not configured" and is treated the same as an
//! absent asset. Every failure mode here degrades to `None`; a missing
//! background never aborts a render.

use base64::Engine;
use serde::Deserialize;
use tracing::warn;

const PLACEHOLDER: &str = "data:image/jpeg;base64,PUT_YOUR_BASE64_STRING_HERE";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackgroundAsset {
    #[serde(default)]
    background_image: String,
}

fn asset_url() -> Option<String> {
    std::env::var("BACKGROUND_ASSET_URL")
        .ok()
        .filter(|s| !s.is_empty())
}

/// Fetch and decode the background JPEG from `BACKGROUND_ASSET_URL`.
pub async fn fetch(http: &reqwest::Client) -> Option<Vec<u8>> {
    let url = asset_url()?;

    let resp = match http.get(&url).send().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("could not load background asset: {e}");
            return None;
        }
    };
    let asset = match resp.json::<BackgroundAsset>().await {
        Ok(asset) => asset,
        Err(e) => {
            warn!("could not parse background asset: {e}");
            return None;
        }
    };

    decode(&asset.background_image)
}

/// Decode a data-URL (or bare base64) JPEG payload. Empty values and the
/// reserved placeholder mean "no background".
pub fn decode(value: &str) -> Option<Vec<u8>> {
    let value = value.trim();
    if value.is_empty() || value == PLACEHOLDER {
        return None;
    }
    let b64 = strip_data_uri(value);
    match base64::engine::general_purpose::STANDARD.decode(b64.as_bytes()) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("invalid background image base64: {e}");
            None
        }
    }
}

fn strip_data_uri(input: &str) -> &str {
    match input.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        // data:image/jpeg;base64,....
        Some((_, b64)) => b64.trim(),
        // assume plain base64
        None => input,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_means_absent() {
        assert_eq!(decode(PLACEHOLDER), None);
    }

    #[test]
    fn empty_means_absent() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("   "), None);
    }

    #[test]
    fn decodes_data_uri() {
        // "hello" in base64
        assert_eq!(
            decode("data:image/jpeg;base64,aGVsbG8="),
            Some(b"hello".to_vec())
        );
    }

    #[test]
    fn decodes_bare_base64() {
        assert_eq!(decode("aGVsbG8="), Some(b"hello".to_vec()));
    }

    #[test]
    fn rejects_invalid_base64() {
        assert_eq!(decode("data:image/jpeg;base64,!!not-base64!!"), None);
    }
}
