use crate::{Config, Detail, Session, StorageError};
use reqwest::{Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt::Display;
use url::Url;

/// A single call to the backend, built up and thrown away per request.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Vec<(String, String)>,
}

impl Request {
    /// `path` is relative to the configured base address (e.g.
    /// `"/api/auth/me"`).
    pub fn new<P: Into<String>>(method: Method, path: P) -> Self {
        Request {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get<P: Into<String>>(path: P) -> Self { Request::new(Method::GET, path) }

    pub fn post<P: Into<String>>(path: P) -> Self {
        Request::new(Method::POST, path)
    }

    pub fn put<P: Into<String>>(path: P) -> Self { Request::new(Method::PUT, path) }

    /// Attach a JSON body.
    pub fn json<B>(mut self, body: &B) -> Result<Self, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.body = Some(serde_json::to_value(body).map_err(ApiError::Encode)?);
        Ok(self)
    }

    pub fn query<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Display,
    {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn method(&self) -> &Method { &self.method }

    pub fn path(&self) -> &str { &self.path }

    pub fn body(&self) -> Option<&Value> { self.body.as_ref() }
}

/// The one place requests to the backend go through.
///
/// Every request carries the [`Session`]'s token as a bearer credential, if
/// there is one. A `401 Unauthorized` response clears the token and comes
/// back as [`ApiError::Unauthorized`] so the caller can send the user off to
/// log in again.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
    session: Session,
}

impl ApiClient {
    pub fn new(config: Config, session: Session) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(ApiError::Network)?;

        Ok(ApiClient {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &Config { &self.config }

    pub fn session(&self) -> &Session { &self.session }

    /// Resolve a path against the base address, keeping any path prefix the
    /// base address already has.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let raw = format!("{}/{}", base, path);

        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl {
            url: raw,
            source: e,
        })
    }

    /// Send a request and hand back the decoded JSON body untouched.
    pub async fn send(&self, request: Request) -> Result<Value, ApiError> {
        self.send_as(request).await
    }

    /// Send a request and deserialize the response body.
    pub async fn send_as<T>(&self, request: Request) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let Request {
            method,
            path,
            body,
            query,
        } = request;
        let url = self.url(&path)?;

        log::debug!("Sending a {} request to {}", method, url);

        let mut builder = self.http.request(method.clone(), url.clone());

        if !query.is_empty() {
            log::trace!("Query: {:?}", query);
            builder = builder.query(&query);
        }

        if let Some(body) = body {
            log::trace!("Payload: {:#}", body);
            builder = builder.json(&body);
        }

        match self.session.token()? {
            Some(token) => builder = builder.bearer_auth(token.as_str()),
            None => log::trace!("No session token, sending anonymously"),
        }

        let response = builder.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        log::trace!("Headers: {:#?}", response.headers());

        if status == StatusCode::UNAUTHORIZED {
            log::warn!(
                "{} {} was rejected as unauthorized, clearing the session",
                method,
                url
            );
            // the token goes whether or not the body arrives
            self.session.clear()?;

            let detail = match response.bytes().await {
                Ok(raw) => Detail::from_body(&raw),
                Err(e) => {
                    log::debug!("Unable to read the 401 response body: {}", e);
                    None
                },
            };

            return Err(ApiError::Unauthorized { detail });
        }

        let raw = response.bytes().await.map_err(ApiError::Network)?;
        log::trace!("Response Body: {}", String::from_utf8_lossy(&raw));

        if status.is_success() {
            return decode(&raw);
        }

        let detail = Detail::from_body(&raw);

        log::debug!("{} {} failed with {}", method, url, status);

        Err(ApiError::Status { status, detail })
    }
}

fn decode<T: DeserializeOwned>(raw: &[u8]) -> Result<T, ApiError> {
    // endpoints like logout may answer with an empty body
    if raw.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(Value::Null).map_err(ApiError::Decode);
    }

    serde_json::from_slice(raw).map_err(ApiError::Decode)
}

/// Everything that can go wrong while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The session token was missing, invalid, or expired. It has already
    /// been removed from the session.
    #[error("Not logged in{}", render_detail(.detail))]
    Unauthorized { detail: Option<Detail> },
    /// The backend answered with an error status.
    #[error("The request failed with {}{}", status, render_detail(.detail))]
    Status {
        status: StatusCode,
        detail: Option<Detail>,
    },
    /// No response was received.
    #[error("Unable to send the request")]
    Network(#[source] reqwest::Error),
    /// The backend answered successfully but the body wasn't what we
    /// expected.
    #[error("Unable to parse the response")]
    Decode(#[source] serde_json::Error),
    #[error("Unable to serialize the request body")]
    Encode(#[source] serde_json::Error),
    #[error("\"{}\" isn't a valid URL", url)]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unable to access the session")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// The HTTP status the backend responded with, if it responded at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Unauthorized { .. } => Some(StatusCode::UNAUTHORIZED),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend's explanation for the failure.
    pub fn detail(&self) -> Option<&Detail> {
        match self {
            ApiError::Unauthorized { detail }
            | ApiError::Status { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// Where the user should be sent after this error, if anywhere.
    pub fn redirect_to(&self) -> Option<&'static str> {
        match self {
            ApiError::Unauthorized { .. } => Some(crate::LOGIN_PATH),
            _ => None,
        }
    }

    /// Did the request give up because it took too long?
    pub fn is_timeout(&self) -> bool {
        match self {
            ApiError::Network(e) => e.is_timeout(),
            _ => false,
        }
    }
}

fn render_detail(detail: &Option<Detail>) -> String {
    match detail {
        Some(detail) => format!(": {}", detail),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> ApiClient {
        let config = Config::with_base_url(base).unwrap();
        ApiClient::new(config, Session::in_memory()).unwrap()
    }

    #[test]
    fn paths_are_appended_to_the_base_address() {
        let api = client("http://localhost:8000");

        let got = api.url("/api/auth/me").unwrap();

        assert_eq!(got.as_str(), "http://localhost:8000/api/auth/me");
    }

    #[test]
    fn base_address_prefix_is_kept() {
        let api = client("https://example.com/backend/");

        let got = api.url("/api/users/profile").unwrap();

        assert_eq!(got.as_str(), "https://example.com/backend/api/users/profile");
    }

    #[test]
    fn build_a_request_descriptor() {
        let req = Request::get("/api/analytics/trends")
            .query("days", 7)
            .json(&json!({"a": 1}))
            .unwrap();

        assert_eq!(req.method(), &Method::GET);
        assert_eq!(req.path(), "/api/analytics/trends");
        assert_eq!(req.body(), Some(&json!({"a": 1})));
        assert_eq!(req.query, vec![(String::from("days"), String::from("7"))]);
    }

    #[test]
    fn empty_success_body_decodes_as_null() {
        let got: Value = decode(b"").unwrap();

        assert_eq!(got, Value::Null);
    }

    #[test]
    fn error_accessors() {
        let unauthorized = ApiError::Unauthorized {
            detail: Some(Detail::Message(String::from("Invalid credentials"))),
        };
        let not_found = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            detail: None,
        };

        assert_eq!(unauthorized.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(unauthorized.redirect_to(), Some("/login"));
        assert_eq!(
            unauthorized.to_string(),
            "Not logged in: Invalid credentials"
        );
        assert_eq!(not_found.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(not_found.redirect_to(), None);
        assert_eq!(not_found.detail(), None);
    }
}
