/// Manifest loader
///
/// Fetches and validates `index.json` for a photo collection. The manifest
/// is untrusted input: a missing or wrong-typed `items` field degrades to an
/// empty list, and per-item fields fall back to defaults. Only a failed HTTP
/// request or an unparseable body is terminal.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::gallery::bucket::UNKNOWN_AGE;

/// Placeholder shown when the manifest carries no `updatedAt`
const UPDATED_AT_PLACEHOLDER: &str = "-";

/// Errors that halt the render pipeline. Display text is user-facing:
/// it replaces the gallery content.
#[derive(Debug, Clone, Error)]
pub enum ManifestError {
    /// Non-success HTTP status from the CDN
    #[error("index.json 読み込み失敗: {0}")]
    Status(u16),

    /// Request never completed (DNS, TLS, connection reset, ...)
    #[error("index.json 取得エラー: {0}")]
    Network(String),

    /// Response body was not valid JSON at all
    #[error("index.json 解析エラー: {0}")]
    Parse(String),
}

/// One photo entry from the manifest
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoItem {
    /// Storage key, a path relative to the CDN origin (e.g. "photos/hime/001.jpg")
    pub key: String,
    /// Age in whole years at time of capture, or `UNKNOWN_AGE` when the
    /// manifest had no usable value
    pub age_year: i32,
}

/// Validated manifest contents
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub items: Vec<PhotoItem>,
    pub updated_at: String,
}

/// Manifest shape straight off the wire. Fields stay `Value` so a
/// wrong-typed field degrades that field alone instead of failing the
/// whole parse.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawManifest {
    items: Value,
    #[serde(rename = "updatedAt")]
    updated_at: Value,
}

/// One wire-level item, same loose typing as `RawManifest`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawItem {
    key: Value,
    age_year: Value,
}

/// Fetch the manifest for a collection, bypassing intermediate caches.
///
/// The request carries `Cache-Control: no-store` and a millisecond
/// timestamp query parameter so a stale CDN edge copy is never served.
/// No timeout is imposed: a hanging request delays first render
/// indefinitely.
pub async fn fetch_manifest(base: String, collection: String) -> Result<Manifest, ManifestError> {
    let url = format!(
        "{}/photos/{}/index.json?v={}",
        base,
        collection,
        chrono::Utc::now().timestamp_millis()
    );

    let response = reqwest::Client::new()
        .get(&url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(|e| ManifestError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ManifestError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ManifestError::Network(e.to_string()))?;

    parse_manifest(&body)
}

/// Parse a manifest body. Pure function, split from the network call so the
/// salvage rules can be tested without a server.
pub fn parse_manifest(body: &str) -> Result<Manifest, ManifestError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ManifestError::Parse(e.to_string()))?;

    // A non-object top level degrades to the default (empty) manifest
    let raw: RawManifest = serde_json::from_value(value).unwrap_or_default();

    // `items` absent or not an array is tolerated, not fatal
    let items = raw
        .items
        .as_array()
        .map(|entries| entries.iter().map(photo_item_from_value).collect())
        .unwrap_or_default();

    let updated_at = raw
        .updated_at
        .as_str()
        .unwrap_or(UPDATED_AT_PLACEHOLDER)
        .to_string();

    Ok(Manifest { items, updated_at })
}

/// Salvage a single item. `key` defaults to the empty string; `age_year`
/// must be a non-negative integer number or it becomes the unknown sentinel.
fn photo_item_from_value(value: &Value) -> PhotoItem {
    // Non-object entries fall back to the all-defaults item
    let raw: RawItem = serde_json::from_value(value.clone()).unwrap_or_default();

    let key = raw.key.as_str().unwrap_or_default().to_string();

    let age_year = integral_value(&raw.age_year)
        .filter(|n| *n >= 0)
        .map(|n| n as i32)
        .unwrap_or(UNKNOWN_AGE);

    PhotoItem { key, age_year }
}

/// JSON numbers may arrive as `3` or `3.0`; both count as the integer 3.
/// Anything fractional, non-numeric, or out of range is rejected.
fn integral_value(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let manifest = parse_manifest(
            r#"{"items":[{"key":"a.jpg","age_year":0},{"key":"b.jpg"}],"updatedAt":"2026-08-01"}"#,
        )
        .unwrap();

        assert_eq!(manifest.items.len(), 2);
        assert_eq!(manifest.items[0].key, "a.jpg");
        assert_eq!(manifest.items[0].age_year, 0);
        assert_eq!(manifest.items[1].key, "b.jpg");
        assert_eq!(manifest.items[1].age_year, UNKNOWN_AGE);
        assert_eq!(manifest.updated_at, "2026-08-01");
    }

    #[test]
    fn test_missing_items_becomes_empty() {
        let manifest = parse_manifest(r#"{"updatedAt":"x"}"#).unwrap();
        assert!(manifest.items.is_empty());
    }

    #[test]
    fn test_wrong_typed_items_becomes_empty() {
        let manifest = parse_manifest(r#"{"items":"oops"}"#).unwrap();
        assert!(manifest.items.is_empty());

        let manifest = parse_manifest(r#"{"items":42}"#).unwrap();
        assert!(manifest.items.is_empty());
    }

    #[test]
    fn test_updated_at_defaults_to_placeholder() {
        let manifest = parse_manifest(r#"{"items":[]}"#).unwrap();
        assert_eq!(manifest.updated_at, "-");

        // Wrong type falls back too
        let manifest = parse_manifest(r#"{"items":[],"updatedAt":7}"#).unwrap();
        assert_eq!(manifest.updated_at, "-");
    }

    #[test]
    fn test_age_year_normalization() {
        let manifest = parse_manifest(
            r#"{"items":[
                {"key":"a","age_year":3},
                {"key":"b","age_year":2.0},
                {"key":"c","age_year":1.5},
                {"key":"d","age_year":-2},
                {"key":"e","age_year":"3"},
                {"key":"f"}
            ]}"#,
        )
        .unwrap();

        let ages: Vec<i32> = manifest.items.iter().map(|i| i.age_year).collect();
        assert_eq!(
            ages,
            vec![3, 2, UNKNOWN_AGE, UNKNOWN_AGE, UNKNOWN_AGE, UNKNOWN_AGE]
        );
    }

    #[test]
    fn test_non_object_item_entry_degrades() {
        let manifest = parse_manifest(r#"{"items":["x",{"key":"a","age_year":1}]}"#).unwrap();

        assert_eq!(manifest.items.len(), 2);
        assert_eq!(manifest.items[0].key, "");
        assert_eq!(manifest.items[0].age_year, UNKNOWN_AGE);
        assert_eq!(manifest.items[1].key, "a");
        assert_eq!(manifest.items[1].age_year, 1);
    }

    #[test]
    fn test_missing_key_defaults_to_empty() {
        let manifest = parse_manifest(r#"{"items":[{"age_year":1}]}"#).unwrap();
        assert_eq!(manifest.items[0].key, "");
    }

    #[test]
    fn test_top_level_not_an_object_degrades() {
        // A bare array still renders (as an empty gallery) rather than failing
        let manifest = parse_manifest("[1,2,3]").unwrap();
        assert!(manifest.items.is_empty());
        assert_eq!(manifest.updated_at, "-");
    }

    #[test]
    fn test_invalid_json_is_terminal() {
        let err = parse_manifest("not json at all").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn test_status_error_text_contains_code() {
        let err = ManifestError::Status(500);
        assert!(err.to_string().contains("500"));
    }
}
