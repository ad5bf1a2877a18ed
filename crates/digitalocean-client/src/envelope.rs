//! Response decoding and collection re-indexing.
//!
//! Collection actions answer with an envelope such as
//! `{"status":"OK","regions":[{"id":1,...},{"id":2,...}]}`. The array is
//! turned into a map keyed by each element's `id`.

use digitalocean_core::{Error, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Resources keyed by their `id`, rendered as text.
///
/// Numeric ids use their decimal form, so region `1` is found under `"1"`.
pub type ResourceMap = HashMap<String, Value>;

/// Parse a response body as JSON.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] for empty or malformed bodies.
pub fn decode(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|err| {
        let preview: String = body.chars().take(64).collect();
        Error::DecodeError(format!("{err} (body starts with `{preview}`)"))
    })
}

/// Take the array stored under `key` and index its elements by `id`.
///
/// Elements sharing an id collapse to the last one seen.
///
/// # Errors
///
/// Returns [`Error::UnexpectedResponse`] when `key` is missing or not an
/// array, or when an element has no string or numeric `id`.
pub fn index_by_id(mut envelope: Value, key: &str) -> Result<ResourceMap> {
    let items = match envelope.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(Error::UnexpectedResponse(format!(
                "`{key}` is not an array"
            )))
        }
        None => {
            let reason = envelope
                .get("error_message")
                .and_then(Value::as_str)
                .map(|message| format!(": {message}"))
                .unwrap_or_default();
            return Err(Error::UnexpectedResponse(format!(
                "missing `{key}` array{reason}"
            )));
        }
    };

    items
        .into_iter()
        .map(|item| {
            let id = resource_key(&item).ok_or_else(|| {
                Error::UnexpectedResponse(format!("`{key}` element without an id"))
            })?;
            Ok((id, item))
        })
        .collect()
}

fn resource_key(item: &Value) -> Option<String> {
    match item.get("id")? {
        Value::Number(number) => Some(number.to_string()),
        Value::String(text) => Some(text.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_rejects_empty_body() {
        assert!(matches!(decode(""), Err(Error::DecodeError(_))));
    }

    #[test]
    fn decode_rejects_malformed_body() {
        assert!(matches!(decode("<html>"), Err(Error::DecodeError(_))));
    }

    #[test]
    fn decode_accepts_object() {
        let value = decode(r#"{"status":"OK"}"#).unwrap();
        assert_eq!(value["status"], "OK");
    }

    #[test]
    fn index_regions_by_id() {
        let envelope = json!({
            "status": "OK",
            "regions": [
                {"id": 1, "name": "New York 1"},
                {"id": 2, "name": "Amsterdam 1"}
            ]
        });

        let regions = index_by_id(envelope, "regions").unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions["1"]["name"], "New York 1");
        assert_eq!(regions["2"]["name"], "Amsterdam 1");
    }

    #[test]
    fn index_accepts_string_ids() {
        let envelope = json!({"domains": [{"id": "abc", "name": "example.com"}]});
        let domains = index_by_id(envelope, "domains").unwrap();
        assert_eq!(domains["abc"]["name"], "example.com");
    }

    #[test]
    fn index_empty_array() {
        let sizes = index_by_id(json!({"status": "OK", "sizes": []}), "sizes").unwrap();
        assert!(sizes.is_empty());
    }

    #[test]
    fn index_duplicate_ids_keep_last() {
        let envelope = json!({"images": [{"id": 7, "name": "a"}, {"id": 7, "name": "b"}]});
        let images = index_by_id(envelope, "images").unwrap();
        assert_eq!(images.len(), 1);
        assert_eq!(images["7"]["name"], "b");
    }

    #[test]
    fn index_missing_key_reports_api_error() {
        let envelope = json!({"status": "ERROR", "error_message": "Access Denied"});
        let err = index_by_id(envelope, "droplets").unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedResponse("missing `droplets` array: Access Denied".to_string())
        );
    }

    #[test]
    fn index_non_array_field() {
        let err = index_by_id(json!({"sizes": {"id": 1}}), "sizes").unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn index_element_without_id() {
        let err = index_by_id(json!({"ssh_keys": [{"name": "laptop"}]}), "ssh_keys").unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }
}
