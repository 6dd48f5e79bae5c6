//! Request construction: URL, headers and payload placement.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::Method;
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::auth::{AuthMethod, Credentials};
use crate::{Error, Result};

/// Header carrying the API key id in key pair mode.
pub const KEY_ID_HEADER: &str = "APCA-API-KEY-ID";
/// Header carrying the secret key in key pair mode.
pub const SECRET_KEY_HEADER: &str = "APCA-API-SECRET-KEY";

/// Where the request data travels.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No data
    None,
    /// Query parameters, in insertion order
    Query(Vec<(String, String)>),
    /// A pre-encoded query string, appended verbatim
    RawQuery(String),
    /// JSON request body
    Json(Value),
}

/// A fully prepared request, ready to be sent.
///
/// Built fresh for every call and never stored on the client.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// `{base_url}/{api_version}{path}`
    pub url: String,
    /// User agent and authentication headers
    pub headers: HeaderMap,
    /// Request data
    pub payload: Payload,
}

impl PreparedRequest {
    /// Compose a request.
    ///
    /// The URL is a plain string join with no slash normalization, so `path`
    /// must start with `/`. For `GET` and `DELETE` the data becomes query
    /// parameters; for every other method it is sent as a JSON body.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        credentials: &Credentials,
        use_basic_auth: bool,
        user_agent: &str,
        method: Method,
        path: &str,
        data: Option<Value>,
        base_url: &str,
        api_version: &str,
    ) -> Result<Self> {
        let url = format!("{}/{}{}", base_url, api_version, path);

        let mut headers = auth_headers(credentials, use_basic_auth)?;
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| Error::InvalidInput(format!("Invalid user agent: {user_agent}")))?,
        );

        let payload = match data {
            None | Some(Value::Null) => Payload::None,
            Some(data) if sends_query(&method) => query_payload(data)?,
            Some(data) => Payload::Json(data),
        };

        Ok(Self {
            method,
            url,
            headers,
            payload,
        })
    }

    /// Turn this request into a `reqwest` builder on the given client.
    pub(crate) fn into_reqwest(self, http: &reqwest::Client) -> Result<reqwest::RequestBuilder> {
        let mut url = url::Url::parse(&self.url)?;

        if let Payload::RawQuery(ref query) = self.payload {
            let query = match url.query() {
                Some(existing) if !existing.is_empty() => format!("{existing}&{query}"),
                _ => query.clone(),
            };
            url.set_query(Some(&query));
        }

        let builder = http.request(self.method, url).headers(self.headers);

        Ok(match self.payload {
            Payload::Query(params) => builder.query(&params),
            Payload::Json(body) => builder.json(&body),
            Payload::None | Payload::RawQuery(_) => builder,
        })
    }
}

/// Parse one of the supported HTTP verbs, case-insensitively.
pub fn parse_method(method: &str) -> Result<Method> {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "PATCH" => Ok(Method::PATCH),
        "DELETE" => Ok(Method::DELETE),
        other => Err(Error::InvalidInput(format!("Unsupported HTTP method: {other}"))),
    }
}

fn sends_query(method: &Method) -> bool {
    *method == Method::GET || *method == Method::DELETE
}

/// Build the authentication headers. OAuth takes precedence, then basic
/// auth, then the two key headers.
fn auth_headers(credentials: &Credentials, use_basic_auth: bool) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    match credentials.method() {
        AuthMethod::OAuth { token } => {
            headers.insert(
                AUTHORIZATION,
                sensitive(&format!("Bearer {}", token.expose_secret()))?,
            );
        }
        AuthMethod::KeyPair {
            api_key,
            secret_key,
        } if use_basic_auth => {
            let encoded = BASE64.encode(format!(
                "{}:{}",
                api_key.expose_secret(),
                secret_key.expose_secret()
            ));
            headers.insert(AUTHORIZATION, sensitive(&format!("Basic {encoded}"))?);
        }
        AuthMethod::KeyPair {
            api_key,
            secret_key,
        } => {
            headers.insert(
                HeaderName::from_static("apca-api-key-id"),
                sensitive(api_key.expose_secret())?,
            );
            headers.insert(
                HeaderName::from_static("apca-api-secret-key"),
                sensitive(secret_key.expose_secret())?,
            );
        }
    }

    Ok(headers)
}

fn sensitive(value: &str) -> Result<HeaderValue> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|_| Error::InvalidInput("Credentials contain invalid header characters".into()))?;
    value.set_sensitive(true);
    Ok(value)
}

fn query_payload(data: Value) -> Result<Payload> {
    match data {
        Value::String(query) => Ok(Payload::RawQuery(
            query.trim_start_matches('?').to_string(),
        )),
        Value::Object(map) => Ok(Payload::Query(
            map.into_iter()
                .filter_map(|(key, value)| query_value(value).map(|v| (key, v)))
                .collect(),
        )),
        other => Err(Error::InvalidInput(format!(
            "Query data must be an object or a query string, got {other}"
        ))),
    }
}

/// Scalars render without JSON quoting and arrays as comma-joined lists;
/// `null` drops the parameter.
fn query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://paper-api.alpaca.markets";

    fn key_pair() -> Credentials {
        Credentials::key_pair("key-id", "secret").unwrap()
    }

    fn build(method: Method, data: Option<Value>) -> PreparedRequest {
        PreparedRequest::build(&key_pair(), false, "paca-rs/test", method, "/orders", data, BASE, "v2")
            .unwrap()
    }

    #[test]
    fn test_url_join() {
        let req = build(Method::GET, None);
        assert_eq!(req.url, "https://paper-api.alpaca.markets/v2/orders");
        assert_eq!(req.payload, Payload::None);
    }

    #[test]
    fn test_url_join_is_not_normalized() {
        let req = PreparedRequest::build(
            &key_pair(), false, "ua", Method::GET, "//account", None, "http://localhost/", "v1",
        )
        .unwrap();
        assert_eq!(req.url, "http://localhost//v1//account");
    }

    #[test]
    fn test_get_data_goes_to_query() {
        let req = build(Method::GET, Some(json!({"limit": 5})));
        assert_eq!(
            req.payload,
            Payload::Query(vec![("limit".to_string(), "5".to_string())])
        );
    }

    #[test]
    fn test_delete_data_goes_to_query() {
        let req = build(Method::DELETE, Some(json!({"cancel_orders": true})));
        assert_eq!(
            req.payload,
            Payload::Query(vec![("cancel_orders".to_string(), "true".to_string())])
        );
    }

    #[test]
    fn test_post_data_goes_to_body() {
        let req = build(Method::POST, Some(json!({"limit": 5})));
        assert_eq!(req.payload, Payload::Json(json!({"limit": 5})));

        let req = build(Method::PATCH, Some(json!({"no_shorting": true})));
        assert_eq!(req.payload, Payload::Json(json!({"no_shorting": true})));
    }

    #[test]
    fn test_query_flattening() {
        let req = build(
            Method::GET,
            Some(json!({"symbols": ["AAPL", "MSFT"], "status": "open", "after": null})),
        );
        let Payload::Query(params) = req.payload else {
            panic!("Expected query payload");
        };
        assert!(params.contains(&("symbols".to_string(), "AAPL,MSFT".to_string())));
        assert!(params.contains(&("status".to_string(), "open".to_string())));
        assert!(!params.iter().any(|(k, _)| k == "after"));
    }

    #[test]
    fn test_string_query_is_verbatim() {
        let req = build(Method::GET, Some(json!("?status=all&limit=10")));
        assert_eq!(req.payload, Payload::RawQuery("status=all&limit=10".into()));

        let built = req.into_reqwest(&reqwest::Client::new()).unwrap().build().unwrap();
        assert_eq!(built.url().query(), Some("status=all&limit=10"));
    }

    #[test]
    fn test_array_query_data_rejected() {
        let result = PreparedRequest::build(
            &key_pair(), false, "ua", Method::GET, "/orders", Some(json!([1, 2])), BASE, "v2",
        );
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_key_pair_headers() {
        let req = build(Method::GET, None);
        assert_eq!(req.headers.get(KEY_ID_HEADER).unwrap(), "key-id");
        assert_eq!(req.headers.get(SECRET_KEY_HEADER).unwrap(), "secret");
        assert!(req.headers.get(AUTHORIZATION).is_none());
        assert_eq!(req.headers.get(USER_AGENT).unwrap(), "paca-rs/test");
    }

    #[test]
    fn test_basic_auth_header() {
        let req = PreparedRequest::build(
            &key_pair(), true, "ua", Method::GET, "/account", None, BASE, "v2",
        )
        .unwrap();
        // base64("key-id:secret")
        assert_eq!(
            req.headers.get(AUTHORIZATION).unwrap(),
            "Basic a2V5LWlkOnNlY3JldA=="
        );
        assert!(req.headers.get(KEY_ID_HEADER).is_none());
    }

    #[test]
    fn test_bearer_header_wins_over_basic_auth() {
        let creds = Credentials::oauth("tok123").unwrap();
        let req = PreparedRequest::build(&creds, true, "ua", Method::GET, "/account", None, BASE, "v2")
            .unwrap();
        assert_eq!(req.headers.get(AUTHORIZATION).unwrap(), "Bearer tok123");
        assert!(req.headers.get(KEY_ID_HEADER).is_none());
    }

    #[test]
    fn test_auth_headers_are_sensitive() {
        let creds = Credentials::key_pair("AKVISIBLE", "SKVISIBLE").unwrap();
        let req = PreparedRequest::build(&creds, false, "ua", Method::GET, "/account", None, BASE, "v2")
            .unwrap();
        assert!(req.headers.get(KEY_ID_HEADER).unwrap().is_sensitive());
        let debug_str = format!("{:?}", req.headers);
        assert!(!debug_str.contains("AKVISIBLE"));
        assert!(!debug_str.contains("SKVISIBLE"));
    }

    #[test]
    fn test_into_reqwest_places_query_and_body() {
        let http = reqwest::Client::new();

        let get = build(Method::GET, Some(json!({"limit": 5})))
            .into_reqwest(&http)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(get.url().query(), Some("limit=5"));
        assert!(get.body().is_none());

        let post = build(Method::POST, Some(json!({"limit": 5})))
            .into_reqwest(&http)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(post.url().query(), None);
        assert_eq!(post.body().and_then(|b| b.as_bytes()), Some(&br#"{"limit":5}"#[..]));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Patch").unwrap(), Method::PATCH);
        assert!(parse_method("HEAD").is_err());
    }
}
