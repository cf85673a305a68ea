//! HTTP access-log fields
//!
//! Turns a request-like value into a [`LogMessage`] and emits it through a
//! [`Logger`]. The web framework stays outside this crate: implement
//! [`AccessRequest`] for its request type, or fill in a [`RequestInfo`].

use crate::core::{LogLevel, LogMessage, Logger};
use rand::Rng;

/// Length of generated session ids
pub const SESSION_ID_LEN: usize = 16;

/// Header callers usually set to the generated session id
pub const SESSION_ID_HEADER: &str = "X-Session-ID";

const SESSION_ID_CHARSET: &[u8] =
    b"1234567890abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";

/// Request data needed for an access-log line
pub trait AccessRequest {
    /// User name from basic authentication, if any
    fn basic_auth_user(&self) -> Option<&str>;
    fn remote_addr(&self) -> &str;
    fn uri(&self) -> &str;
    fn method(&self) -> &str;
    fn proto(&self) -> &str;
    fn referer(&self) -> Option<&str>;
    fn user_agent(&self) -> Option<&str>;
    /// Request headers, first value per name
    fn headers(&self) -> Vec<(&str, &str)>;
}

/// Plain request description implementing [`AccessRequest`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestInfo {
    pub user: Option<String>,
    pub remote_addr: String,
    pub uri: String,
    pub method: String,
    pub proto: String,
    pub headers: Vec<(String, String)>,
}

impl RequestInfo {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            proto: "HTTP/1.1".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn with_remote_addr(mut self, addr: impl Into<String>) -> Self {
        self.remote_addr = addr.into();
        self
    }

    #[must_use]
    pub fn with_proto(mut self, proto: impl Into<String>) -> Self {
        self.proto = proto.into();
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl AccessRequest for RequestInfo {
    fn basic_auth_user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    fn uri(&self) -> &str {
        &self.uri
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn proto(&self) -> &str {
        &self.proto
    }

    fn referer(&self) -> Option<&str> {
        self.header("Referer")
    }

    fn user_agent(&self) -> Option<&str> {
        self.header("User-Agent")
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut seen: Vec<(&str, &str)> = Vec::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            if !seen.iter().any(|(known, _)| known.eq_ignore_ascii_case(name)) {
                seen.push((name.as_str(), value.as_str()));
            }
        }
        seen
    }
}

/// Random session id over `[0-9a-zA-Z_]`
pub fn generate_session_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| SESSION_ID_CHARSET[rng.gen_range(0..SESSION_ID_CHARSET.len())] as char)
        .collect()
}

/// Field name for a header: `http_` plus the lowercased name with `-` as `_`
pub fn header_field_name(header: &str) -> String {
    format!("http_{}", header.to_lowercase().replace('-', "_"))
}

/// Build access-log fields for `request`.
///
/// Always sets `user` (`-` when unauthenticated), `session_id`, `address`,
/// `uri`, `method`, `proto` and `referer`. With `include_headers` every
/// header is added as an `http_*` field; otherwise only `useragent` is.
pub fn access_fields<R: AccessRequest + ?Sized>(
    request: &R,
    include_headers: bool,
    session_id: &str,
) -> LogMessage {
    let mut msg = LogMessage::new();
    msg.put("user", request.basic_auth_user().unwrap_or("-"))
        .put("session_id", session_id)
        .put("address", request.remote_addr())
        .put("uri", request.uri())
        .put("method", request.method())
        .put("proto", request.proto())
        .put("referer", request.referer().unwrap_or(""));

    if include_headers {
        for (name, value) in request.headers() {
            msg.put(header_field_name(name), value);
        }
    } else {
        msg.put("useragent", request.user_agent().unwrap_or(""));
    }

    msg
}

impl Logger {
    /// Log an access line for `request` and return the generated session id.
    ///
    /// Headers are included when the logger is at `debug` or more verbose.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_stream_logger::access::RequestInfo;
    /// use rust_stream_logger::prelude::*;
    ///
    /// let out = MemorySink::new();
    /// let logger = Logger::builder().stdout(out.clone()).build();
    ///
    /// let request = RequestInfo::new("GET", "/health").with_remote_addr("10.0.0.1:5000");
    /// let session_id = logger.access(LogLevel::Info, &request);
    ///
    /// assert_eq!(session_id.len(), 16);
    /// assert!(out.contents().contains(r#"uri="/health""#));
    /// ```
    pub fn access<R: AccessRequest + ?Sized>(&self, level: LogLevel, request: &R) -> String {
        let session_id = generate_session_id(SESSION_ID_LEN);
        if self.is_enabled(level) {
            self.log(level, access_fields(request, self.is_debug(), &session_id));
        }
        session_id
    }
}
