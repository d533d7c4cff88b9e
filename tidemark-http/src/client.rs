use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use tidemark_core::TidemarkError;

/// Send a request and decode a JSON body, normalizing failures.
///
/// 404 maps to `NotFound`; any other non-2xx status, transport error, or
/// undecodable body maps to `Connector` tagged with `connector`.
pub async fn send_json(
    connector: &'static str,
    what: &str,
    req: RequestBuilder,
) -> Result<Value, TidemarkError> {
    let resp = req
        .send()
        .await
        .map_err(|e| TidemarkError::connector(connector, format!("{what}: {e}")))?;
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(TidemarkError::not_found(what.to_string()));
    }
    if !status.is_success() {
        return Err(TidemarkError::connector(
            connector,
            format!("{what}: HTTP {status}"),
        ));
    }
    resp.json::<Value>()
        .await
        .map_err(|e| TidemarkError::connector(connector, format!("{what}: bad body: {e}")))
}

/// Walk `path` through nested objects and return what is found there.
///
/// A 2xx body of the wrong shape is not a fetch failure: it is logged and
/// handed on as `Null`, which the normalizer treats as an empty payload.
pub fn take_array(connector: &'static str, what: &str, mut body: Value, path: &[&str]) -> Value {
    for key in path {
        body = match body {
            Value::Object(mut map) => map.remove(*key).unwrap_or(Value::Null),
            _ => Value::Null,
        };
    }
    if !body.is_array() {
        tracing::warn!(
            connector,
            what,
            path = %path.join("."),
            "response has no array at path; treating as empty"
        );
        return Value::Null;
    }
    body
}

pub fn trim_base(base: impl Into<String>) -> String {
    let mut base = base.into();
    while base.ends_with('/') {
        base.pop();
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn take_array_walks_nested_path() {
        let body = json!({ "data": { "poolDayDatas": [1, 2] } });
        let got = take_array("t", "x", body, &["data", "poolDayDatas"]);
        assert_eq!(got, json!([1, 2]));
    }

    #[test]
    fn misshapen_body_becomes_null() {
        assert_eq!(take_array("t", "x", json!({ "data": {} }), &["data"]), Value::Null);
        assert_eq!(take_array("t", "x", json!([]), &["prices"]), Value::Null);
        assert_eq!(take_array("t", "x", json!({ "prices": null }), &["prices"]), Value::Null);
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        assert_eq!(trim_base("http://h/api//"), "http://h/api");
    }
}
