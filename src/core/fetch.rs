use std::time::Duration;

use reqwest::header::{
    CACHE_CONTROL,
    PRAGMA,
};
use serde_json::Value;

use crate::core::TangochoError;

pub const DOCUMENT_EXTENSION: &str = "json";

/// Documents live under `<base>/<section>/data/<topic>.<ext>`. The base is
/// configuration: an http(s) URL or a local directory.
pub fn document_location(base: &str, section: &str, topic: &str) -> String {
    format!("{}/{}/data/{}.{}", base.trim_end_matches('/'), section, topic, DOCUMENT_EXTENSION)
}

/// Sounds live under `<base>/<section>/sounds/<file>`.
pub fn sound_location(base: &str, section: &str, file: &str) -> String {
    format!("{}/{}/sounds/{}", base.trim_end_matches('/'), section, file)
}

pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

pub fn http_client() -> Result<reqwest::Client, TangochoError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| TangochoError::Custom(format!("HTTP client build failed: {e}")))
}

/// Fetches and parses one lesson document. Remote documents are requested
/// with caching disabled so an edited lesson is always picked up.
pub async fn fetch_document(
    client: &reqwest::Client,
    location: &str,
) -> Result<Value, TangochoError> {
    if is_remote(location) {
        let response = client
            .get(location)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TangochoError::Custom(format!(
                "HTTP error {} from {}",
                response.status(),
                location
            )));
        }

        Ok(response.json::<Value>().await?)
    } else {
        let content = tokio::fs::read_to_string(location).await?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_convention() {
        assert_eq!(
            document_location("https://example.com/lessons", "section1", "numbers"),
            "https://example.com/lessons/section1/data/numbers.json"
        );
        assert_eq!(
            document_location("https://example.com/lessons/", "section1", "numbers"),
            "https://example.com/lessons/section1/data/numbers.json"
        );
        assert_eq!(
            document_location("/home/me/lessons", "section3", "ta"),
            "/home/me/lessons/section3/data/ta.json"
        );
        assert_eq!(
            sound_location("https://example.com/lessons", "section1", "one.mp3"),
            "https://example.com/lessons/section1/sounds/one.mp3"
        );
    }

    #[test]
    fn test_remote_detection() {
        assert!(is_remote("http://example.com/x.json"));
        assert!(is_remote("https://example.com/x.json"));
        assert!(!is_remote("/home/me/lessons/x.json"));
        assert!(!is_remote("lessons/x.json"));
    }

    #[test]
    fn test_local_document_read() {
        let dir = std::env::temp_dir().join(format!("tangocho-fetch-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("section1/data")).unwrap();
        std::fs::write(
            dir.join("section1/data/numbers.json"),
            r#"{"numbers": [{"en": "One", "jp": "一"}]}"#,
        )
        .unwrap();

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = http_client().unwrap();

        let base = dir.to_string_lossy().to_string();
        let location = document_location(&base, "section1", "numbers");
        let document = runtime.block_on(fetch_document(&client, &location)).unwrap();
        assert!(document.get("numbers").is_some());

        let missing = document_location(&base, "section1", "absent");
        assert!(runtime.block_on(fetch_document(&client, &missing)).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
