//! Query-string encoding shared by request URLs and signatures.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::error::KucoinError;

/// Placeholder for calls that carry no parameters.
pub const NO_PARAMS: Option<&()> = None;

/// Encode request parameters as a query string.
///
/// Returns `""` when `params` is absent or encodes to no pairs, otherwise
/// `"?"` followed by `key=value` pairs joined with `&`. Values are
/// form-encoded (space becomes `+`), keys are emitted in sorted order and
/// `null` values (e.g. `None` fields) are skipped.
///
/// The output is used verbatim both as the URL suffix and as the query part of
/// the signed canonical string for GET and DELETE requests.
///
/// # Errors
///
/// Fails if `params` does not serialize to a flat key/value mapping.
///
/// # Example
///
/// ```rust
/// use kucoin_futures_api_client::auth::{format_query, NO_PARAMS};
///
/// let query = format_query(Some(&serde_json::json!({ "symbol": "XBTUSDM" }))).unwrap();
/// assert_eq!(query, "?symbol=XBTUSDM");
/// assert_eq!(format_query(NO_PARAMS).unwrap(), "");
/// ```
pub fn format_query<P>(params: Option<&P>) -> Result<String, KucoinError>
where
    P: Serialize + ?Sized,
{
    let Some(params) = params else {
        return Ok(String::new());
    };

    let map = match serde_json::to_value(params)? {
        Value::Null => return Ok(String::new()),
        Value::Object(map) => map,
        other => {
            return Err(KucoinError::InvalidParams(format!(
                "query parameters must be a key/value mapping, got `{other}`"
            )));
        }
    };

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &map {
        let value: Cow<'_, str> = match value {
            Value::Null => continue,
            Value::String(s) => Cow::Borrowed(s.as_str()),
            Value::Bool(b) => Cow::Owned(b.to_string()),
            Value::Number(n) => Cow::Owned(n.to_string()),
            Value::Array(_) | Value::Object(_) => {
                return Err(KucoinError::InvalidParams(format!(
                    "query parameter `{key}` must be a scalar"
                )));
            }
        };
        serializer.append_pair(key, &value);
    }

    let encoded = serializer.finish();
    if encoded.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("?{encoded}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_absent_params_are_empty() {
        assert_eq!(format_query(NO_PARAMS).unwrap(), "");
    }

    #[test]
    fn test_empty_mapping_is_empty() {
        let empty: BTreeMap<String, String> = BTreeMap::new();
        assert_eq!(format_query(Some(&empty)).unwrap(), "");
        assert_eq!(format_query(Some(&serde_json::json!({}))).unwrap(), "");
    }

    #[test]
    fn test_single_param() {
        let params = serde_json::json!({ "symbol": "XBTUSDM" });
        assert_eq!(format_query(Some(&params)).unwrap(), "?symbol=XBTUSDM");
    }

    #[test]
    fn test_scalars_and_escaping() {
        let params = serde_json::json!({
            "symbol": "XBTUSDM",
            "forward": true,
            "maxCount": 50,
            "remark": "a b&c"
        });
        assert_eq!(
            format_query(Some(&params)).unwrap(),
            "?forward=true&maxCount=50&remark=a+b%26c&symbol=XBTUSDM"
        );
    }

    #[test]
    fn test_none_fields_skipped() {
        #[derive(Serialize)]
        struct Params {
            symbol: Option<&'static str>,
            status: Option<&'static str>,
        }
        let params = Params {
            symbol: None,
            status: Some("active"),
        };
        assert_eq!(format_query(Some(&params)).unwrap(), "?status=active");

        let all_none = Params {
            symbol: None,
            status: None,
        };
        assert_eq!(format_query(Some(&all_none)).unwrap(), "");
    }

    #[test]
    fn test_nested_values_rejected() {
        let params = serde_json::json!({ "symbols": ["XBTUSDM", "ETHUSDM"] });
        assert!(matches!(
            format_query(Some(&params)),
            Err(KucoinError::InvalidParams(_))
        ));
        assert!(format_query(Some(&"XBTUSDM")).is_err());
    }
}
