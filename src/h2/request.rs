//! Logical requests and their HEADERS frames
//!
//! A request is turned into a header block of the four request
//! pseudo-headers followed by any extra headers, then wrapped in a single
//! HEADERS frame with END_HEADERS and END_STREAM set.

use super::codec::FrameCodec;
use super::error::{Error, Result};
use super::headers::HeaderBlock;
use super::stream::StreamId;
use super::DEFAULT_SCHEME;
use bytes::Bytes;

/// A bodiless HTTP/2 request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct H2Request {
    host: String,
    path: String,
    method: String,
    scheme: String,
    extra_headers: Vec<(String, String)>,
}

impl H2Request {
    /// Create a request with the default `https` scheme and no extra headers
    pub fn new(host: impl Into<String>, path: impl Into<String>, method: impl Into<String>) -> Self {
        H2Request {
            host: host.into(),
            path: path.into(),
            method: method.into(),
            scheme: DEFAULT_SCHEME.to_string(),
            extra_headers: Vec::new(),
        }
    }

    /// Create a request builder
    pub fn builder() -> H2RequestBuilder {
        H2RequestBuilder::new()
    }

    /// Get the `:authority` value
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Get the `:path` value
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the `:method` value
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the `:scheme` value
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Extra headers, in the order they were added
    pub fn extra_headers(&self) -> &[(String, String)] {
        &self.extra_headers
    }

    /// Check that the request can be encoded
    ///
    /// The request pseudo-headers must be non-empty, including when an
    /// extra header overrides one of them.
    pub fn validate(&self) -> Result<()> {
        for (what, value) in [
            (":authority", &self.host),
            (":path", &self.path),
            (":method", &self.method),
            (":scheme", &self.scheme),
        ] {
            if value.is_empty() {
                return Err(Error::InvalidInput(format!("empty {}", what)));
            }
            validate_value(what, value)?;
        }

        for (name, value) in &self.extra_headers {
            validate_name(name)?;
            if value.is_empty() && is_request_pseudo_header(name) {
                return Err(Error::InvalidInput(format!(
                    "empty {}",
                    name.to_ascii_lowercase()
                )));
            }
            validate_value(name, value)?;
        }

        Ok(())
    }

    /// Build the ordered header block
    ///
    /// Pseudo-headers come first in the order `:authority`, `:path`,
    /// `:method`, `:scheme`; extra headers are overlaid on top, replacing
    /// any field with an equal (case-insensitive) name.
    pub fn header_block(&self) -> HeaderBlock {
        let mut block = HeaderBlock::new();
        block.set(":authority", self.host.as_str());
        block.set(":path", self.path.as_str());
        block.set(":method", self.method.as_str());
        block.set(":scheme", self.scheme.as_str());
        block.merge(
            self.extra_headers
                .iter()
                .map(|(n, v)| (n.as_str(), v.as_str())),
        );
        block
    }
}

const REQUEST_PSEUDO_HEADERS: [&str; 4] = [":authority", ":path", ":method", ":scheme"];

fn is_request_pseudo_header(name: &str) -> bool {
    REQUEST_PSEUDO_HEADERS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(name))
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidInput("empty header name".to_string()));
    }
    if !name.bytes().all(|b| b.is_ascii_graphic()) {
        return Err(Error::InvalidInput(format!(
            "header name {:?} must be visible ASCII",
            name
        )));
    }
    Ok(())
}

fn validate_value(name: &str, value: &str) -> Result<()> {
    // Visible ASCII, space and tab
    if !value.bytes().all(|b| b == b'\t' || (0x20..0x7f).contains(&b)) {
        return Err(Error::InvalidInput(format!(
            "value of {} must be printable ASCII",
            name
        )));
    }
    Ok(())
}

/// Builder for [`H2Request`]
#[derive(Debug, Default)]
pub struct H2RequestBuilder {
    host: Option<String>,
    path: Option<String>,
    method: Option<String>,
    scheme: Option<String>,
    extra_headers: Vec<(String, String)>,
}

impl H2RequestBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `:authority` host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the `:path`
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the `:method` (default: GET)
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the `:scheme` (default: https)
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Add an extra header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.push((name.into(), value.into()));
        self
    }

    /// Add several extra headers
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.extra_headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Build and validate the request
    pub fn build(self) -> Result<H2Request> {
        let host = self
            .host
            .ok_or_else(|| Error::InvalidInput("missing host".to_string()))?;
        let path = self
            .path
            .ok_or_else(|| Error::InvalidInput("missing path".to_string()))?;

        let request = H2Request {
            host,
            path,
            method: self.method.unwrap_or_else(|| "GET".to_string()),
            scheme: self.scheme.unwrap_or_else(|| DEFAULT_SCHEME.to_string()),
            extra_headers: self.extra_headers,
        };
        request.validate()?;
        Ok(request)
    }
}

/// Encode `request` as one HEADERS frame on `stream_id`
pub fn build_headers_frame(stream_id: StreamId, request: &H2Request) -> Result<Bytes> {
    request.validate()?;
    let block = request.header_block().encode()?;
    FrameCodec::encode_headers_frame(stream_id, &block)
}
