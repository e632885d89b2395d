//! Multi-request session generation
//!
//! A session is the byte stream a client would write on a fresh connection:
//! optionally the connection preface and an empty SETTINGS frame, then one
//! HEADERS frame per request on stream IDs 1, 3, 5, ...

use super::codec::FrameCodec;
use super::error::Result;
use super::request::{build_headers_frame, H2Request};
use super::stream::StreamIdAllocator;
use super::CONNECTION_PREFACE;
use bytes::{BufMut, Bytes, BytesMut};

/// Generator for one session's worth of frames
///
/// Owns its stream ID allocator; a new generator always starts at stream 1.
#[derive(Debug, Default)]
pub struct SessionGenerator {
    streams: StreamIdAllocator,
    buf: BytesMut,
}

impl SessionGenerator {
    /// Create a generator with an empty buffer
    pub fn new() -> Self {
        SessionGenerator {
            streams: StreamIdAllocator::new(),
            buf: BytesMut::new(),
        }
    }

    /// Append the connection preface and an empty SETTINGS frame
    pub fn preface(&mut self) -> Result<&mut Self> {
        let settings = FrameCodec::encode_settings_frame()?;
        self.buf.put_slice(CONNECTION_PREFACE);
        self.buf.put_slice(&settings);
        Ok(self)
    }

    /// Append a HEADERS frame for `request` on the next stream ID
    pub fn request(&mut self, request: &H2Request) -> Result<&mut Self> {
        // A request that fails to encode gives its ID back
        let probe = self.streams.clone();
        let stream_id = self.streams.next_id()?;
        match build_headers_frame(stream_id, request) {
            Ok(frame) => {
                self.buf.put_slice(&frame);
                Ok(self)
            }
            Err(e) => {
                self.streams = probe;
                Err(e)
            }
        }
    }

    /// Last stream ID used, if any request was added
    pub fn last_stream_id(&self) -> Option<u32> {
        self.streams.last_id()
    }

    /// Take the generated bytes
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Generate one session for `requests`
///
/// Fails as a whole on the first request that cannot be encoded.
pub fn generate_session(requests: &[H2Request], include_preface: bool) -> Result<Bytes> {
    for request in requests {
        request.validate()?;
    }

    let mut session = SessionGenerator::new();
    if include_preface {
        session.preface()?;
    }
    for request in requests {
        session.request(request)?;
    }
    let output = session.finish();

    tracing::debug!(
        requests = requests.len(),
        include_preface,
        bytes = output.len(),
        "generated session"
    );

    Ok(output)
}

/// Output of [`generate_early_data`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarlyDataSessions {
    /// Sent as TLS 1.3 early data: preface, SETTINGS and the early requests
    pub early_data: Bytes,
    /// Sent after the handshake completes, without a preface
    pub after_early_data: Bytes,
}

/// Generate the two independent sessions used for 0-RTT testing
///
/// Both sessions number their streams from 1.
pub fn generate_early_data(early: &[H2Request], after: &[H2Request]) -> Result<EarlyDataSessions> {
    Ok(EarlyDataSessions {
        early_data: generate_session(early, true)?,
        after_early_data: generate_session(after, false)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::h2::codec::FRAME_HEADER_SIZE;
    use crate::h2::error::Error;

    fn stream_ids(mut data: &[u8]) -> Vec<u32> {
        let mut ids = Vec::new();
        while data.len() >= FRAME_HEADER_SIZE {
            let len = u32::from_be_bytes([0, data[0], data[1], data[2]]) as usize;
            ids.push(u32::from_be_bytes([data[5], data[6], data[7], data[8]]));
            data = &data[FRAME_HEADER_SIZE + len..];
        }
        ids
    }

    #[test]
    fn test_preface_and_settings() {
        let output = generate_session(&[], true).unwrap();
        assert_eq!(output.len(), 24 + 9);
        assert_eq!(&output[..24], b"PRI * HTTP/2.0\r\n\r\nSM\r\n\r\n");
        assert_eq!(&output[24..], &[0, 0, 0, 0x4, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_no_preface() {
        let output = generate_session(&[], false).unwrap();
        assert!(output.is_empty());

        let requests = vec![H2Request::new("h", "/", "GET")];
        let output = generate_session(&requests, false).unwrap();
        assert_eq!(output[3], 0x1);
        assert!(!output.starts_with(CONNECTION_PREFACE));
    }

    #[test]
    fn test_stream_ids_sequence() {
        let requests: Vec<H2Request> = (0..4).map(|_| H2Request::new("h", "/", "GET")).collect();
        let output = generate_session(&requests, false).unwrap();
        assert_eq!(stream_ids(&output), vec![1, 3, 5, 7]);
    }

    #[test]
    fn test_sessions_are_independent() {
        let requests = vec![H2Request::new("h", "/", "GET"), H2Request::new("h", "/", "GET")];
        let first = generate_session(&requests, false).unwrap();
        let second = generate_session(&requests, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(stream_ids(&second), vec![1, 3]);
    }

    #[test]
    fn test_early_data_split() {
        let early = vec![H2Request::new("h", "/early", "GET")];
        let after = vec![H2Request::new("h", "/", "GET"), H2Request::new("h", "/", "GET")];
        let sessions = generate_early_data(&early, &after).unwrap();

        assert!(sessions.early_data.starts_with(CONNECTION_PREFACE));
        assert_eq!(stream_ids(&sessions.early_data[24..]), vec![0, 1]);
        assert!(!sessions.after_early_data.starts_with(CONNECTION_PREFACE));
        assert_eq!(stream_ids(&sessions.after_early_data), vec![1, 3]);
    }

    #[test]
    fn test_failure_is_all_or_nothing() {
        let good = H2Request::new("h", "/", "GET");
        let bad = H2Request::builder()
            .host("h")
            .path("/")
            .header("x-big", "v".repeat(300))
            .build()
            .unwrap();

        let result = generate_session(&[good.clone(), bad.clone(), good], true);
        assert!(matches!(result, Err(Error::HeaderTooLong { .. })));

        let invalid = H2Request::new("", "/", "GET");
        assert!(matches!(
            generate_session(&[invalid], true),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_generator_failed_request_keeps_counter() {
        let bad = H2Request::builder()
            .host("h")
            .path("/")
            .header("x-big", "v".repeat(300))
            .build()
            .unwrap();

        let mut session = SessionGenerator::new();
        session.request(&H2Request::new("h", "/", "GET")).unwrap();
        assert!(session.request(&bad).is_err());
        session.request(&H2Request::new("h", "/", "GET")).unwrap();
        assert_eq!(session.last_stream_id(), Some(3));
        assert_eq!(stream_ids(&session.finish()), vec![1, 3]);
    }
}
