//! HTTP/2 request frame generation
//!
//! This module builds byte-exact HTTP/2 client traffic for manual testing
//! against a real endpoint. It only encodes: there is no frame parsing, no
//! flow control and no HPACK table state.
//!
//! # Architecture
//!
//! - [`codec::FrameCodec`] writes the 9-byte frame header and payload
//! - [`headers`] encodes header fields as uncompressed HPACK literals
//! - [`request::H2Request`] maps a logical request to one HEADERS frame
//! - [`stream::StreamIdAllocator`] hands out odd client stream IDs
//! - [`session`] concatenates preface, SETTINGS and HEADERS frames
//!
//! # Examples
//!
//! ```
//! use h2gen::h2::{generate_session, H2Request};
//!
//! let requests = vec![H2Request::new("example.com", "/x", "GET")];
//! let bytes = generate_session(&requests, true).unwrap();
//!
//! assert!(bytes.starts_with(h2gen::h2::CONNECTION_PREFACE));
//! ```

pub mod codec;
pub mod error;
pub mod frames;
pub mod headers;
pub mod request;
pub mod session;
pub mod stream;

pub use codec::FrameCodec;
pub use error::{Error, Result};
pub use frames::{Frame, FrameFlags, FrameKind, FrameType};
pub use headers::{encode_header_field, HeaderBlock, HeaderField};
pub use request::{build_headers_frame, H2Request, H2RequestBuilder};
pub use session::{generate_early_data, generate_session, EarlyDataSessions, SessionGenerator};
pub use stream::{StreamId, StreamIdAllocator};

/// HTTP/2 connection preface that must be sent by clients
///
/// From RFC 7540 Section 3.5:
/// "PRI * HTTP/2.0\r\n\r\nSM\r\n\r\n"
pub const CONNECTION_PREFACE: &[u8] = b"PRI * HTTP/2.0\r\n\r\nSM\r\n\r\n";

/// Maximum frame payload length (2^24 - 1)
pub const MAX_FRAME_PAYLOAD: usize = 0x00FF_FFFF;

/// Maximum stream ID value (2^31 - 1)
pub const MAX_STREAM_ID: u32 = 0x7FFF_FFFF;

/// Stream ID 0 (connection-level)
pub const CONNECTION_STREAM_ID: u32 = 0;

/// Maximum byte length of a header name or value
pub const MAX_HEADER_STRING_LEN: usize = 255;

/// Scheme used when a request does not set one
pub const DEFAULT_SCHEME: &str = "https";
